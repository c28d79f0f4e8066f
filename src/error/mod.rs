//! Error types for liaison.

use thiserror::Error;

/// Primary error type for all liaison operations.
#[derive(Error, Debug)]
pub enum LiaisonError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Conversation exceeded {0} model rounds without a final answer")]
    MaxRoundsExceeded(usize),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LiaisonError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error came from the upstream model or hosting API rather
    /// than from local logic.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Network(_) | Self::Authentication(_) | Self::Timeout(_)
        )
    }

    /// Generic user-facing failure text. Intentionally free of upstream
    /// status codes and provider error bodies.
    pub fn user_message(&self) -> &'static str {
        "Sorry, I encountered an error processing your message."
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LiaisonError>;
