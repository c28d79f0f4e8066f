//! Process-scoped conversation history storage.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::types::Turn;

/// Identity of one conversation (e.g. a chat session key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ConversationId(pub String);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ConversationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Mapping from conversation identity to ordered turn history.
///
/// The store performs no synchronization of its own. Callers must serialize
/// `converse` invocations per key; overlapping calls on the same key lose
/// updates. Different keys are independent.
#[derive(Debug, Default)]
pub struct ConversationHistoryStore {
    histories: HashMap<ConversationId, Vec<Turn>>,
}

impl ConversationHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy-out view of a conversation's history; empty if unseen.
    pub fn get(&self, id: &ConversationId) -> Vec<Turn> {
        self.histories.get(id).cloned().unwrap_or_default()
    }

    /// Replace the stored history for a conversation.
    pub fn put(&mut self, id: ConversationId, history: Vec<Turn>) {
        self.histories.insert(id, history);
    }
}

/// The single most-recently-active conversation.
///
/// Single-tenant assumption: notifications always target whichever
/// conversation spoke last, which may be stale under concurrent chat and
/// webhook traffic. Best-effort by design.
#[derive(Debug, Clone, Default)]
pub struct ActiveConversation {
    current: Arc<RwLock<Option<ConversationId>>>,
}

impl ActiveConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a conversation as the most recently active one.
    pub fn touch(&self, id: ConversationId) {
        *self.current.write().unwrap() = Some(id);
    }

    pub fn current(&self) -> Option<ConversationId> {
        self.current.read().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_conversation_is_empty() {
        let store = ConversationHistoryStore::new();
        assert!(store.get(&"chat-1".into()).is_empty());
    }

    #[test]
    fn put_replaces_history() {
        let mut store = ConversationHistoryStore::new();
        let id: ConversationId = "chat-1".into();
        store.put(id.clone(), vec![Turn::user("hi")]);
        store.put(id.clone(), vec![Turn::user("hi"), Turn::assistant(vec![])]);
        assert_eq!(store.get(&id).len(), 2);
    }

    #[test]
    fn keys_are_independent() {
        let mut store = ConversationHistoryStore::new();
        store.put("a".into(), vec![Turn::user("one")]);
        store.put("b".into(), vec![Turn::user("two"), Turn::assistant(vec![])]);
        assert_eq!(store.get(&"a".into()).len(), 1);
        assert_eq!(store.get(&"b".into()).len(), 2);
    }

    #[test]
    fn active_conversation_tracks_last_touch() {
        let active = ActiveConversation::new();
        assert_eq!(active.current(), None);
        active.touch("a".into());
        active.touch("b".into());
        assert_eq!(active.current(), Some("b".into()));
    }
}
