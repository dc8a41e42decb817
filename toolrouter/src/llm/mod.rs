//! Model client abstraction used by the router, the tool-argument extractor and the general
//! responder.
//!
//! One trait method, [`LlmClient::generate`], covers the three call shapes the graph needs:
//!
//! - [`CallShape::Plain`]: free-text answer.
//! - [`CallShape::Structured`]: the model must fill the given schema; the parsed object lands in
//!   [`LlmResponse::structured`].
//! - [`CallShape::BoundTool`]: the model may emit calls to the given tool in
//!   [`LlmResponse::tool_calls`].
//!
//! Implementations: [`ChatOpenAI`] (OpenAI-compatible API), [`MockLlm`] (scripted, for tests),
//! [`HeuristicLlm`] (offline rules, no network).

mod heuristic;
mod mock;
mod openai;

pub use heuristic::{HeuristicLlm, OFFLINE_GENERAL_REPLY};
pub use mock::{MockLlm, RecordedCall};
pub use openai::ChatOpenAI;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

/// How a single model call constrains the output.
#[derive(Clone, Copy, Debug)]
pub enum CallShape<'a> {
    Plain,
    Structured(&'a ToolSpec),
    BoundTool(&'a ToolSpec),
}

impl CallShape<'_> {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            CallShape::Plain => "plain",
            CallShape::Structured(_) => "structured",
            CallShape::BoundTool(_) => "bound_tool",
        }
    }
}

/// Token usage for one call (prompt + completion).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LlmUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from one model call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmResponse {
    /// Assistant text; may be empty when the model only called a tool.
    pub content: String,
    /// Tool calls, in the order the model produced them.
    pub tool_calls: Vec<ToolCall>,
    /// Parsed schema object for [`CallShape::Structured`] calls.
    pub structured: Option<Value>,
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_tool_call(call: ToolCall) -> Self {
        Self {
            tool_calls: vec![call],
            ..Self::default()
        }
    }

    pub fn structured(value: Value) -> Self {
        Self {
            structured: Some(value),
            ..Self::default()
        }
    }

    /// Content coerced to text: `content` when non-empty, else the JSON of `structured`, else empty.
    pub fn as_text(&self) -> String {
        if !self.content.is_empty() {
            return self.content.clone();
        }
        self.structured
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default()
    }
}

/// Chat model client.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// One completion over `messages`, constrained by `shape`.
    async fn generate(
        &self,
        messages: &[Message],
        shape: CallShape<'_>,
    ) -> Result<LlmResponse, AgentError>;

    /// Plain completion.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.generate(messages, CallShape::Plain).await
    }
}
