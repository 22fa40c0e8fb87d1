//! Lỗi khi gọi API.

use serde_json::{Value, json};
use thiserror::Error;

/// The one failure kind of the API client: a request that did not produce usable data.
///
/// `Clone` because the value is kept in the query cache and rendered every frame.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status.
    #[error("request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// No response at all: connect failure, timeout, or the worker is gone.
    #[error("request failed: {0}")]
    Transport(String),

    /// 2xx response whose body does not match the expected shape.
    #[error("failed to parse response (status {status}): {reason}")]
    Decode {
        status: u16,
        body: String,
        reason: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }

    /// JSON shape shown to the user, e.g. `{"status":500,"data":{...}}`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::Http { status, body } => json!({
                "status": status,
                "data": body_as_json(body),
            }),
            ApiError::Transport(reason) => json!({
                "status": "FETCH_ERROR",
                "error": reason,
            }),
            ApiError::Decode {
                status,
                body,
                reason,
            } => json!({
                "status": "PARSING_ERROR",
                "originalStatus": status,
                "data": body,
                "error": reason,
            }),
        }
    }

    pub fn display_json(&self) -> String {
        self.to_json().to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

fn body_as_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_embeds_json_body() {
        let err = ApiError::Http {
            status: 500,
            body: r#"{"message":"boom"}"#.to_string(),
        };

        assert_eq!(
            err.to_json(),
            json!({ "status": 500, "data": { "message": "boom" } })
        );
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn http_error_keeps_plain_text_body() {
        let err = ApiError::Http {
            status: 502,
            body: "Bad Gateway".to_string(),
        };

        assert_eq!(err.to_json()["data"], "Bad Gateway");
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());

        assert_eq!(err.status(), None);
        assert_eq!(err.to_json()["status"], "FETCH_ERROR");
        assert_eq!(err.to_json()["error"], "connection refused");
    }

    #[test]
    fn decode_error_reports_original_status() {
        let err = ApiError::Decode {
            status: 200,
            body: "<html>".to_string(),
            reason: "expected value".to_string(),
        };

        let json = err.to_json();
        assert_eq!(json["status"], "PARSING_ERROR");
        assert_eq!(json["originalStatus"], 200);
        assert_eq!(json["data"], "<html>");
    }
}
