//! liaison — chat-to-agent relay with job completion notifications.
//!
//! Relays chat messages into a tool-augmented LLM conversation loop and
//! correlates the completion of background jobs (surfaced as pull requests
//! on job branches) back to the most recently active conversation.
//!
//! # Quick Start
//!
//! ```no_run
//! use liaison::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example(llm: Arc<dyn LlmClient>) -> liaison::error::Result<()> {
//! let engine = ConversationEngine::new(llm);
//! let outcome = engine
//!     .converse("What's 2+2?", Vec::new(), &[], &ToolExecutorRegistry::new())
//!     .await?;
//! println!("{}", outcome.reply_text);
//! # Ok(())
//! # }
//! ```

pub mod chunker;
pub mod config;
pub mod engine;
pub mod error;
pub mod hosting;
pub mod llm;
pub mod notify;
pub mod prelude;
pub mod relay;
pub mod transport;
pub mod types;
pub mod util;
