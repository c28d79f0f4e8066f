//! Inbound message relay: history in, conversation loop, chunked delivery out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::error;

use crate::chunker;
use crate::engine::{
    ActiveConversation, ConversationEngine, ConversationHistoryStore, ConversationId,
    ToolExecutorRegistry,
};
use crate::error::Result;
use crate::llm::ToolSchema;
use crate::transport::{ChatTransport, InboundMessage};

/// Ties the conversation engine to the history store and the outbound
/// transport for one chat deployment.
///
/// `converse` invocations are serialized per conversation key; different
/// keys proceed independently.
pub struct MessageRelay {
    engine: ConversationEngine,
    store: Mutex<ConversationHistoryStore>,
    key_locks: Mutex<HashMap<ConversationId, Arc<tokio::sync::Mutex<()>>>>,
    transport: Arc<dyn ChatTransport>,
    active: ActiveConversation,
    catalog: Vec<ToolSchema>,
    executors: ToolExecutorRegistry,
    chunk_limit: usize,
}

impl MessageRelay {
    pub fn new(
        engine: ConversationEngine,
        transport: Arc<dyn ChatTransport>,
        active: ActiveConversation,
        catalog: Vec<ToolSchema>,
        executors: ToolExecutorRegistry,
        chunk_limit: usize,
    ) -> Self {
        Self {
            engine,
            store: Mutex::new(ConversationHistoryStore::new()),
            key_locks: Mutex::new(HashMap::new()),
            transport,
            active,
            catalog,
            executors,
            chunk_limit,
        }
    }

    fn key_lock(&self, id: &ConversationId) -> Arc<tokio::sync::Mutex<()>> {
        self.key_locks
            .lock()
            .unwrap()
            .entry(id.clone())
            .or_default()
            .clone()
    }

    /// Process one inbound chat message end to end.
    ///
    /// On an upstream model failure the user gets a single generic apology;
    /// provider detail never reaches the transport.
    pub async fn handle_message(&self, message: &InboundMessage) -> Result<()> {
        let id = &message.conversation_id;
        self.active.touch(id.clone());

        let lock = self.key_lock(id);
        let _guard = lock.lock().await;

        let history = self.store.lock().unwrap().get(id);

        let outcome = match self
            .engine
            .converse(&message.text, history, &self.catalog, &self.executors)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(chat = %id, error = %e, "Failed to process message");
                // Best effort; a failed apology is not worth surfacing.
                let _ = self.transport.send(id, e.user_message()).await;
                return Ok(());
            }
        };

        self.store.lock().unwrap().put(id.clone(), outcome.history);

        for chunk in chunker::chunk(&outcome.reply_text, self.chunk_limit) {
            self.transport.send(id, &chunk).await?;
        }

        Ok(())
    }
}
