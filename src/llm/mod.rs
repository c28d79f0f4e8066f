//! LLM client trait and request/response types.

pub mod anthropic;
pub mod http;

use async_trait::async_trait;

use crate::error::LiaisonError;
use crate::types::{Block, Turn};

/// A request sent to the model.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system_prompt: Option<String>,
    pub max_tokens: u32,
    pub turns: Vec<Turn>,
    pub tools: Vec<ToolSchema>,
}

impl ChatRequest {
    /// Single-message request with no tools (used by the log analyzer).
    pub fn single(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: None,
            max_tokens,
            turns: vec![Turn::user(prompt)],
            tools: Vec::new(),
        }
    }
}

/// A model response: its stop condition plus ordered content blocks.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub stop_reason: StopReason,
    pub blocks: Vec<Block>,
}

/// The model's signal for whether it wants tools invoked or is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Final answer produced.
    EndTurn,
    /// The model is waiting on tool output.
    ToolUse,
    /// Output budget exhausted.
    MaxTokens,
    /// Anything the provider adds later.
    Other,
}

/// A tool advertised to the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSchema {
    /// A locally executed function with a JSON Schema for its input.
    Function {
        name: String,
        description: String,
        input_schema: serde_json::Value,
    },
    /// A provider-native capability (e.g. built-in web search). Executed
    /// server-side; the engine never resolves a local executor for it.
    Builtin { kind: String, name: String },
}

impl ToolSchema {
    pub fn name(&self) -> &str {
        match self {
            Self::Function { name, .. } | Self::Builtin { name, .. } => name,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin { .. })
    }
}

/// Core trait implemented by model clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One non-streaming round trip to the model.
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LiaisonError>;
}
