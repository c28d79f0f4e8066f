//! Shared test helpers and mocks.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use liaison::engine::ConversationId;
use liaison::error::LiaisonError;
use liaison::hosting::{CommitInfo, DirEntry, HostingApi};
use liaison::llm::{ChatRequest, ChatResponse, LlmClient, StopReason};
use liaison::transport::ChatTransport;
use liaison::types::{Block, ToolCall};

/// A mock model client that returns canned responses in FIFO order and
/// records every request it receives.
#[derive(Default)]
pub struct MockLlm {
    responses: Mutex<std::collections::VecDeque<ChatResponse>>,
    requests: Mutex<Vec<ChatRequest>>,
    fail_next: Mutex<Option<LiaisonError>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an arbitrary response.
    pub fn queue_response(&self, response: ChatResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a final text response.
    pub fn queue_text(&self, text: &str) {
        self.responses.lock().unwrap().push_back(ChatResponse {
            stop_reason: StopReason::EndTurn,
            blocks: vec![Block::Text { text: text.into() }],
        });
    }

    /// Queue a tool-use response with the given calls (and optional preamble text).
    pub fn queue_tool_use(&self, preamble: Option<&str>, calls: Vec<ToolCall>) {
        let mut blocks = Vec::new();
        if let Some(text) = preamble {
            blocks.push(Block::Text { text: text.into() });
        }
        blocks.extend(calls.into_iter().map(Block::ToolCall));
        self.responses.lock().unwrap().push_back(ChatResponse {
            stop_reason: StopReason::ToolUse,
            blocks,
        });
    }

    /// Make the next `complete` call fail.
    pub fn fail_next(&self, error: LiaisonError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, LiaisonError> {
        if let Some(error) = self.fail_next.lock().unwrap().take() {
            return Err(error);
        }
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ChatResponse {
                stop_reason: StopReason::EndTurn,
                blocks: vec![],
            }))
    }
}

pub fn call(id: &str, name: &str, arguments: serde_json::Value) -> ToolCall {
    ToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

/// A mock hosting API backed by in-memory maps keyed by `(path, ref)`.
#[derive(Default)]
pub struct MockHosting {
    files: Mutex<HashMap<(String, String), String>>,
    dirs: Mutex<HashMap<(String, String), Vec<DirEntry>>>,
    commits: Mutex<HashMap<u64, Vec<CommitInfo>>>,
}

impl MockHosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, git_ref: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert((path.into(), git_ref.into()), content.into());
        self
    }

    pub fn with_dir(self, path: &str, git_ref: &str, entries: Vec<(&str, &str)>) -> Self {
        self.dirs.lock().unwrap().insert(
            (path.into(), git_ref.into()),
            entries
                .into_iter()
                .map(|(name, path)| DirEntry {
                    name: name.into(),
                    path: path.into(),
                })
                .collect(),
        );
        self
    }

    pub fn with_commits(self, number: u64, messages: Vec<&str>) -> Self {
        self.commits.lock().unwrap().insert(
            number,
            messages
                .into_iter()
                .map(|m| CommitInfo { message: m.into() })
                .collect(),
        );
        self
    }
}

#[async_trait]
impl HostingApi for MockHosting {
    async fn get_file_content(&self, path: &str, git_ref: &str) -> Result<String, LiaisonError> {
        self.files
            .lock()
            .unwrap()
            .get(&(path.to_string(), git_ref.to_string()))
            .cloned()
            .ok_or_else(|| LiaisonError::api(404, "Not Found"))
    }

    async fn list_directory(
        &self,
        path: &str,
        git_ref: &str,
    ) -> Result<Vec<DirEntry>, LiaisonError> {
        self.dirs
            .lock()
            .unwrap()
            .get(&(path.to_string(), git_ref.to_string()))
            .cloned()
            .ok_or_else(|| LiaisonError::api(404, "Not Found"))
    }

    async fn get_pull_request_commits(
        &self,
        number: u64,
    ) -> Result<Vec<CommitInfo>, LiaisonError> {
        self.commits
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| LiaisonError::api(404, "Not Found"))
    }
}

/// A mock transport recording every outbound send.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<(ConversationId, String)>>,
    fail: Mutex<bool>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_sends(&self) {
        *self.fail.lock().unwrap() = true;
    }

    pub fn sent(&self) -> Vec<(ConversationId, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send(
        &self,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<(), LiaisonError> {
        if *self.fail.lock().unwrap() {
            return Err(LiaisonError::Delivery("mock transport down".into()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((conversation_id.clone(), text.to_string()));
        Ok(())
    }
}
