use serde::{Deserialize, Serialize};

/// Message of the day như API trả về.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub content: String,
    /// ISO-8601, giữ nguyên chuỗi server gửi.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Payload của `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

/// Dữ liệu đã decode của một request thành công.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Message(Message),
    Health(HealthStatus),
}

impl ApiResponse {
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            ApiResponse::Message(message) => Some(message),
            ApiResponse::Health(_) => None,
        }
    }

    pub fn as_health(&self) -> Option<&HealthStatus> {
        match self {
            ApiResponse::Health(health) => Some(health),
            ApiResponse::Message(_) => None,
        }
    }
}
