use reqwest::Client as HttpClient;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    services::providers::Notifier,
};

const PUSH_URL: &str = "https://api.line.me/v2/bot/message/push";

/// Push delivery over the LINE Messaging API
#[derive(Clone)]
pub struct LineNotifier {
    http_client: HttpClient,
    channel_access_token: String,
}

impl LineNotifier {
    pub fn new(channel_access_token: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            channel_access_token,
        }
    }
}

#[async_trait::async_trait]
impl Notifier for LineNotifier {
    async fn push(&self, to: &str, message: &str) -> AppResult<()> {
        let response = self
            .http_client
            .post(PUSH_URL)
            .bearer_auth(&self.channel_access_token)
            .json(&json!({
                "to": to,
                "messages": [{ "type": "text", "text": message }],
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "LINE API error: {} {}",
                status, body
            )));
        }

        tracing::info!(chars = message.len(), "Digest push delivered");

        Ok(())
    }
}
