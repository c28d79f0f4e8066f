//! Core data model.

pub mod turn;

pub use turn::{Block, Role, ToolCall, ToolCallOutcome, ToolResult, Turn};
