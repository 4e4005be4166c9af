//! Chat API client: plain JSON request/response against `{api_base}/chat`.

mod error;
mod response;

use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;

pub use error::{ApiError, map_transport_error};
pub use response::{ChatReply, NO_RESPONSE_TEXT, Source, sources_line};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequestBody<'a> {
    message: &'a str,
    session_id: &'a str,
}

/// HTTP client for the analysis chat API.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_timeout(&config.api_base, config.request_timeout)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Send one message and wait for the reply.
    pub async fn send(&self, message: &str, session_id: &str) -> Result<ChatReply, ApiError> {
        let url = self.chat_url();
        log::debug!("POST {} (session {})", url, session_id);

        let response = self
            .client
            .post(&url)
            .json(&ChatRequestBody {
                message,
                session_id,
            })
            .send()
            .await
            .map_err(|e| map_transport_error(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Chat API returned {}", status);
            return Err(ApiError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| map_transport_error(e, &url))?;
        let reply = ChatReply::from_value(&body);
        log::info!(
            "Reply received: {} chars, {} source(s), chart: {}",
            reply.text.len(),
            reply.sources.len(),
            reply.chart.is_some()
        );
        Ok(reply)
    }

    /// Like [`send`](Self::send), but returns `ApiError::Cancelled` as soon as
    /// the token is cancelled.
    pub async fn send_cancellable(
        &self,
        message: &str,
        session_id: &str,
        cancel_token: &CancellationToken,
    ) -> Result<ChatReply, ApiError> {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log::info!("Chat request cancelled");
                Err(ApiError::Cancelled)
            }
            result = self.send(message, session_id) => result,
        }
    }
}
