//! Tool executor trait and name-keyed registry.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LiaisonError;

/// An externally supplied capability the model may request.
///
/// Executors are opaque to the engine: they may suspend arbitrarily and have
/// arbitrary side effects. Failures are caught by the engine and surfaced to
/// the model as data.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, LiaisonError>;
}

type ExecutorHandler = dyn Fn(serde_json::Value) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, LiaisonError>> + Send>>
    + Send
    + Sync;

/// Closure-based executor for quick registration.
pub struct FnExecutor {
    handler: Arc<ExecutorHandler>,
}

impl FnExecutor {
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, LiaisonError>> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |input| Box::pin(handler(input))),
        }
    }
}

#[async_trait]
impl ToolExecutor for FnExecutor {
    async fn execute(&self, input: serde_json::Value) -> Result<serde_json::Value, LiaisonError> {
        (self.handler)(input).await
    }
}

/// Lookup table from tool name to executor.
#[derive(Clone, Default)]
pub struct ToolExecutorRegistry {
    executors: HashMap<String, Arc<dyn ToolExecutor>>,
}

impl ToolExecutorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, executor: Arc<dyn ToolExecutor>) {
        self.executors.insert(name.into(), executor);
    }

    /// Register a closure as an executor.
    pub fn register_fn<F, Fut>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(serde_json::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<serde_json::Value, LiaisonError>> + Send + 'static,
    {
        self.register(name, Arc::new(FnExecutor::new(handler)));
    }

    pub fn resolve(&self, name: &str) -> Option<&Arc<dyn ToolExecutor>> {
        self.executors.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.executors.is_empty()
    }
}

impl std::fmt::Debug for ToolExecutorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolExecutorRegistry")
            .field("names", &self.executors.keys().collect::<Vec<_>>())
            .finish()
    }
}
