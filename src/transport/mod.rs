//! Outbound chat transport.

pub mod telegram;

use async_trait::async_trait;

use crate::engine::ConversationId;
use crate::error::LiaisonError;

/// An inbound chat message event.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub conversation_id: ConversationId,
    pub text: String,
}

/// Outbound delivery seam. `text` must already satisfy the transport's
/// maximum length; the chunker enforces that upstream.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, conversation_id: &ConversationId, text: &str)
        -> Result<(), LiaisonError>;
}
