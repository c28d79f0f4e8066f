//! Telegram Bot API sender.

use async_trait::async_trait;
use tracing::debug;

use crate::engine::ConversationId;
use crate::error::LiaisonError;
use crate::llm::http::{shared_client, status_to_error};

use super::ChatTransport;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Telegram's hard cap on message length, in characters.
pub const MESSAGE_LIMIT: usize = 4096;

pub struct TelegramTransport {
    bot_token: String,
    base_url: String,
}

impl TelegramTransport {
    pub fn new(bot_token: String, base_url: Option<String>) -> Self {
        Self {
            bot_token,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(
        &self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<(), LiaisonError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        debug!(chat = %conversation_id, chars = text.chars().count(), "Telegram sendMessage");

        let resp = shared_client()
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": conversation_id.0,
                "text": text,
            }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }

        Ok(())
    }
}
