//! Inbound relay tests: history bookkeeping, chunked delivery, apologies.

mod common;

use std::sync::Arc;

use common::{MockLlm, MockTransport};
use pretty_assertions::assert_eq;

use liaison::engine::{ActiveConversation, ConversationEngine, ToolExecutorRegistry};
use liaison::error::LiaisonError;
use liaison::relay::MessageRelay;
use liaison::transport::InboundMessage;

fn inbound(id: &str, text: &str) -> InboundMessage {
    InboundMessage {
        conversation_id: id.into(),
        text: text.to_string(),
    }
}

fn relay(llm: Arc<MockLlm>, transport: Arc<MockTransport>, chunk_limit: usize) -> MessageRelay {
    MessageRelay::new(
        ConversationEngine::new(llm),
        transport,
        ActiveConversation::new(),
        Vec::new(),
        ToolExecutorRegistry::new(),
        chunk_limit,
    )
}

#[tokio::test]
async fn reply_is_sent_and_history_accumulates() {
    let llm = Arc::new(MockLlm::new());
    llm.queue_text("first answer");
    llm.queue_text("second answer");

    let transport = Arc::new(MockTransport::new());
    let relay = relay(llm.clone(), transport.clone(), 4096);

    relay.handle_message(&inbound("chat-1", "first")).await.unwrap();
    relay.handle_message(&inbound("chat-1", "second")).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].1, "second answer");

    // The second request carried the first exchange.
    let request = llm.last_request().unwrap();
    assert_eq!(request.turns.len(), 3);
}

#[tokio::test]
async fn long_replies_are_chunked_in_order() {
    let llm = Arc::new(MockLlm::new());
    llm.queue_text(&format!("{}\n{}", "a".repeat(8), "b".repeat(8)));

    let transport = Arc::new(MockTransport::new());
    let relay = relay(llm, transport.clone(), 10);

    relay.handle_message(&inbound("chat-1", "hi")).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].1, "a".repeat(8));
    assert_eq!(sent[1].1, "b".repeat(8));
}

#[tokio::test]
async fn upstream_failure_sends_generic_apology() {
    let llm = Arc::new(MockLlm::new());
    llm.fail_next(LiaisonError::api(502, "secret upstream detail"));

    let transport = Arc::new(MockTransport::new());
    let relay = relay(llm, transport.clone(), 4096);

    relay.handle_message(&inbound("chat-1", "hi")).await.unwrap();

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].1,
        "Sorry, I encountered an error processing your message."
    );
    assert!(!sent[0].1.contains("secret upstream detail"));
}

#[tokio::test]
async fn failed_turn_does_not_corrupt_history() {
    let llm = Arc::new(MockLlm::new());
    llm.fail_next(LiaisonError::api(500, "down"));
    llm.queue_text("back up");

    let transport = Arc::new(MockTransport::new());
    let relay = relay(llm.clone(), transport, 4096);

    relay.handle_message(&inbound("chat-1", "one")).await.unwrap();
    relay.handle_message(&inbound("chat-1", "two")).await.unwrap();

    // The failed turn was not committed: the retry starts from an empty
    // history plus the new user message.
    let request = llm.last_request().unwrap();
    assert_eq!(request.turns.len(), 1);
    assert_eq!(request.turns[0].text(), "two");
}
