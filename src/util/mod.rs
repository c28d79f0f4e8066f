//! Shared utilities.

pub mod text;
pub mod timeout;

pub use text::{head_chars, tail_chars};
pub use timeout::with_timeout;
