//! Common imports for liaison users.

pub use crate::chunker::chunk;
pub use crate::config::LiaisonConfig;
pub use crate::engine::{
    ActiveConversation, ConversationEngine, ConversationHistoryStore, ConversationId,
    ConverseOutcome, ToolExecutor, ToolExecutorRegistry,
};
pub use crate::error::{LiaisonError, Result};
pub use crate::hosting::HostingApi;
pub use crate::llm::{ChatRequest, ChatResponse, LlmClient, StopReason, ToolSchema};
pub use crate::notify::{CompletionEvent, NotificationPipeline, NotificationStatus};
pub use crate::relay::MessageRelay;
pub use crate::transport::{ChatTransport, InboundMessage};
pub use crate::types::{Block, Role, ToolCall, ToolCallOutcome, ToolResult, Turn};
