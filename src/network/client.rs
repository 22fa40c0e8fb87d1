use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::common::{ApiResponse, HealthStatus, Message};
use crate::config::AppConfig;
use crate::error::ApiError;

use super::endpoints::{Endpoint, join_url};

/// Thin wrapper over `reqwest` for the message-of-the-day API.
///
/// One attempt per call: no retry, no backoff.
#[derive(Debug, Clone)]
pub struct MotdApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl MotdApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_message_of_the_day(&self) -> Result<Message, ApiError> {
        let url = self.url(&Endpoint::GetMessageOfTheDay);
        self.send(self.http.get(url)).await
    }

    /// Body là chuỗi text được encode thành JSON string literal.
    pub async fn create_message_of_the_day(&self, text: &str) -> Result<Message, ApiError> {
        let url = self.url(&Endpoint::CreateMessageOfTheDay(String::new()));
        self.send(self.http.post(url).json(text)).await
    }

    pub async fn get_health_check(&self) -> Result<HealthStatus, ApiError> {
        let url = self.url(&Endpoint::GetHealthCheck);
        self.send(self.http.get(url)).await
    }

    pub async fn execute(&self, endpoint: &Endpoint) -> Result<ApiResponse, ApiError> {
        match endpoint {
            Endpoint::GetMessageOfTheDay => self
                .get_message_of_the_day()
                .await
                .map(ApiResponse::Message),
            Endpoint::CreateMessageOfTheDay(text) => self
                .create_message_of_the_day(text)
                .await
                .map(ApiResponse::Message),
            Endpoint::GetHealthCheck => self.get_health_check().await.map(ApiResponse::Health),
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        join_url(&self.base_url, endpoint.path())
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            log::debug!("API responded with {status}");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            status: status.as_u16(),
            body,
            reason: err.to_string(),
        })
    }
}
