//! Conversation turn and block types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in a conversation history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Turn {
    /// Create a user turn from plain text.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            blocks: vec![Block::Text { text: text.into() }],
            timestamp: Some(Utc::now()),
        }
    }

    /// Create an assistant turn from the model's content blocks.
    pub fn assistant(blocks: Vec<Block>) -> Self {
        Self {
            role: Role::Assistant,
            blocks,
            timestamp: Some(Utc::now()),
        }
    }

    /// Create a tool-result turn answering one round of tool calls.
    pub fn tool_results(results: Vec<ToolResult>) -> Self {
        Self {
            role: Role::Tool,
            blocks: results.into_iter().map(Block::ToolResult).collect(),
            timestamp: Some(Utc::now()),
        }
    }

    /// Concatenate all text blocks, one per line.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Tool calls requested in this turn, in the order they appear.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::ToolCall(call) => Some(call),
                _ => None,
            })
            .collect()
    }
}

/// Conversation role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// An atomic unit within a turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text { text: String },
    ToolCall(ToolCall),
    ToolResult(ToolResult),
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

/// The answer to one tool call, normalized to a single text payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub call_id: String,
    pub payload: String,
    #[serde(default)]
    pub is_error: bool,
}

/// Outcome of invoking a tool executor.
///
/// Failures are data, not control flow: the engine converts thrown executor
/// errors and unknown tool names into `Err` outcomes and keeps looping.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallOutcome {
    Ok(serde_json::Value),
    Err(String),
}

impl ToolCallOutcome {
    /// Serialize to the single text payload stored in history. Errors take
    /// the normalized `{"error": message}` wire shape.
    pub fn into_result(self, call_id: impl Into<String>) -> ToolResult {
        match self {
            Self::Ok(value) => ToolResult {
                call_id: call_id.into(),
                payload: value.to_string(),
                is_error: false,
            },
            Self::Err(message) => ToolResult {
                call_id: call_id.into(),
                payload: serde_json::json!({ "error": message }).to_string(),
                is_error: true,
            },
        }
    }
}
