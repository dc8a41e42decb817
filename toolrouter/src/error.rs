//! Request-level error type.
//!
//! Returned by graph nodes and by [`Orchestrator::handle_query`](crate::Orchestrator::handle_query)
//! when the request itself cannot be processed (model-call failure, broken graph). Tool
//! failures never surface here; the tools node turns them into result strings.

use thiserror::Error;

/// Error from running a node or the whole graph.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. the model call failed).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
