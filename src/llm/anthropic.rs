//! Anthropic Messages API client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::LiaisonError;
use crate::types::{Block, Role, ToolCall, Turn};

use super::http::{anthropic_headers, shared_client, status_to_error};
use super::{ChatRequest, ChatResponse, LlmClient, StopReason, ToolSchema};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    model: String,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    pub fn new(model: impl Into<String>, api_key: String, base_url: Option<String>) -> Self {
        Self {
            model: model.into(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    fn build_request_body(&self, request: &ChatRequest) -> serde_json::Value {
        let mut messages = Vec::new();

        for turn in &request.turns {
            match turn.role {
                Role::User => {
                    messages.push(serde_json::json!({
                        "role": "user",
                        "content": turn.text(),
                    }));
                }
                Role::Assistant => {
                    let mut content: Vec<serde_json::Value> = Vec::new();
                    for block in &turn.blocks {
                        match block {
                            Block::Text { text } => {
                                if !text.is_empty() {
                                    content.push(
                                        serde_json::json!({"type": "text", "text": text}),
                                    );
                                }
                            }
                            Block::ToolCall(call) => {
                                content.push(serde_json::json!({
                                    "type": "tool_use",
                                    "id": call.id,
                                    "name": call.name,
                                    "input": call.arguments,
                                }));
                            }
                            Block::ToolResult(_) => {}
                        }
                    }
                    messages.push(serde_json::json!({
                        "role": "assistant",
                        "content": content,
                    }));
                }
                Role::Tool => {
                    let content: Vec<serde_json::Value> = turn
                        .blocks
                        .iter()
                        .filter_map(|block| match block {
                            Block::ToolResult(tr) => Some(serde_json::json!({
                                "type": "tool_result",
                                "tool_use_id": tr.call_id,
                                "content": tr.payload,
                                "is_error": tr.is_error,
                            })),
                            _ => None,
                        })
                        .collect();
                    messages.push(serde_json::json!({
                        "role": "user",
                        "content": content,
                    }));
                }
            }
        }

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": request.max_tokens,
        });

        let obj = body.as_object_mut().unwrap();

        if let Some(ref system) = request.system_prompt {
            obj.insert("system".into(), system.clone().into());
        }

        if !request.tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| match t {
                    ToolSchema::Function {
                        name,
                        description,
                        input_schema,
                    } => serde_json::json!({
                        "name": name,
                        "description": description,
                        "input_schema": input_schema,
                    }),
                    ToolSchema::Builtin { kind, name } => serde_json::json!({
                        "type": kind,
                        "name": name,
                    }),
                })
                .collect();
            obj.insert("tools".into(), tool_defs.into());
        }

        body
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LiaisonError> {
        let body = self.build_request_body(request);
        let url = format!("{}/messages", self.base_url);

        debug!(model = %self.model, turns = request.turns.len(), "Anthropic complete");

        let resp = shared_client()
            .post(&url)
            .headers(anthropic_headers(&self.api_key, API_VERSION))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: AnthropicResponse = resp.json().await?;

        let mut blocks = Vec::new();
        for block in &data.content {
            match block.r#type.as_str() {
                "text" => {
                    if let Some(ref text) = block.text {
                        blocks.push(Block::Text { text: text.clone() });
                    }
                }
                "tool_use" => {
                    if let (Some(ref id), Some(ref name), Some(ref input)) =
                        (&block.id, &block.name, &block.input)
                    {
                        blocks.push(Block::ToolCall(ToolCall {
                            id: id.clone(),
                            name: name.clone(),
                            arguments: input.clone(),
                        }));
                    }
                }
                _ => {}
            }
        }

        let stop_reason = match data.stop_reason.as_deref() {
            Some("end_turn") => StopReason::EndTurn,
            Some("tool_use") => StopReason::ToolUse,
            Some("max_tokens") => StopReason::MaxTokens,
            _ => StopReason::Other,
        };

        Ok(ChatResponse {
            stop_reason,
            blocks,
        })
    }
}

// Internal Anthropic response types

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContentBlock>,
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct AnthropicContentBlock {
    r#type: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}
