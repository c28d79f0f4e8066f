//! Multi-turn tool-use conversation loop.

pub mod history;
pub mod registry;

pub use history::{ActiveConversation, ConversationHistoryStore, ConversationId};
pub use registry::{FnExecutor, ToolExecutor, ToolExecutorRegistry};

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{LiaisonError, Result};
use crate::llm::{ChatRequest, LlmClient, StopReason, ToolSchema};
use crate::types::{ToolCallOutcome, ToolResult, Turn};
use crate::util::with_timeout;

/// Upper bound on model rounds within one `converse` call, guarding against
/// a model that never stops requesting tools.
pub const DEFAULT_MAX_ROUNDS: usize = 20;

const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Hard bound on one model round, independent of the client's own timeouts.
const ROUND_TIMEOUT: Duration = Duration::from_secs(180);

/// Result of one `converse` invocation.
#[derive(Debug, Clone)]
pub struct ConverseOutcome {
    pub reply_text: String,
    pub history: Vec<Turn>,
}

/// Drives the LLM round-trip loop, invoking registered executors until the
/// model produces a final answer.
pub struct ConversationEngine {
    llm: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
    max_tokens: u32,
    max_rounds: usize,
}

impl ConversationEngine {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Process one user message against an existing history.
    ///
    /// The model is called with the full history each round. When it asks for
    /// tool output, every tool-call block of the round is answered in order
    /// by exactly one result in a single tool-result turn. Tool failures and
    /// unknown tool names become `{"error": ...}` payloads rather than
    /// aborting the loop; only an upstream model failure propagates.
    pub async fn converse(
        &self,
        user_message: &str,
        history: Vec<Turn>,
        catalog: &[ToolSchema],
        executors: &ToolExecutorRegistry,
    ) -> Result<ConverseOutcome> {
        let builtin_names: HashSet<&str> = catalog
            .iter()
            .filter(|t| t.is_builtin())
            .map(|t| t.name())
            .collect();

        let mut turns = history;
        turns.push(Turn::user(user_message));

        for round in 0..self.max_rounds {
            let request = ChatRequest {
                system_prompt: self.system_prompt.clone(),
                max_tokens: self.max_tokens,
                turns: turns.clone(),
                tools: catalog.to_vec(),
            };

            debug!(round, turns = turns.len(), "converse: calling model");
            let response = with_timeout(ROUND_TIMEOUT, self.llm.complete(&request)).await?;

            let assistant = Turn::assistant(response.blocks);
            let reply_text = assistant.text();
            let tool_calls: Vec<_> = assistant.tool_calls().into_iter().cloned().collect();
            turns.push(assistant);

            if response.stop_reason != StopReason::ToolUse {
                return Ok(ConverseOutcome {
                    reply_text,
                    history: turns,
                });
            }

            let mut results: Vec<ToolResult> = Vec::new();
            for call in &tool_calls {
                // Server-executed tools are answered by the provider itself.
                if builtin_names.contains(call.name.as_str()) {
                    debug!(tool = %call.name, "skipping server-executed tool");
                    continue;
                }

                let outcome = match executors.resolve(&call.name) {
                    Some(executor) => match executor.execute(call.arguments.clone()).await {
                        Ok(value) => ToolCallOutcome::Ok(value),
                        Err(e) => {
                            warn!(tool = %call.name, error = %e, "Tool execution failed");
                            ToolCallOutcome::Err(e.to_string())
                        }
                    },
                    None => {
                        warn!(tool = %call.name, "Tool not found");
                        ToolCallOutcome::Err(format!("Unknown tool: {}", call.name))
                    }
                };

                results.push(outcome.into_result(call.id.clone()));
            }

            // Nothing owed back to the model this round; don't append an
            // empty tool-result turn.
            if results.is_empty() {
                return Ok(ConverseOutcome {
                    reply_text,
                    history: turns,
                });
            }

            turns.push(Turn::tool_results(results));
        }

        Err(LiaisonError::MaxRoundsExceeded(self.max_rounds))
    }
}
