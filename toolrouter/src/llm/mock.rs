//! Mock LLM for tests.
//!
//! Returns scripted responses in order (the last one repeats), counts calls and records the
//! shape of every request so tests can assert which node called the model and how.
//! A failing mode returns `AgentError` on every call.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::error::AgentError;
use crate::llm::{CallShape, LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::ToolCall;

/// One recorded call: the shape label, the bound/structured tool name, and the messages sent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub shape: &'static str,
    pub tool: Option<String>,
    pub messages: Vec<Message>,
}

/// Scripted LLM.
///
/// **Interaction**: Implements `LlmClient`; used by orchestrator and node tests in place of
/// `ChatOpenAI`.
pub struct MockLlm {
    responses: Vec<LlmResponse>,
    fail_with: Option<String>,
    call_count: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlm {
    /// Mock that returns `responses` in order; the last one repeats once exhausted.
    pub fn new(responses: Vec<LlmResponse>) -> Self {
        Self {
            responses,
            fail_with: None,
            call_count: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Mock that always answers with plain text.
    pub fn with_text(content: impl Into<String>) -> Self {
        Self::new(vec![LlmResponse::text(content)])
    }

    /// Mock whose every call fails with `AgentError::ExecutionFailed(message)`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_with: Some(message.into()),
            ..Self::new(vec![])
        }
    }

    /// Router decision followed by a tool call: the common weather/math script.
    pub fn route_then_tool(step: &str, tool_name: &str, arguments: serde_json::Value) -> Self {
        Self::new(vec![
            LlmResponse::structured(json!({ "step": step })),
            LlmResponse::with_tool_call(ToolCall {
                name: tool_name.to_string(),
                arguments: arguments.to_string(),
                id: Some("call-1".to_string()),
            }),
        ])
    }

    /// Router decision followed by a plain answer: the general-path script.
    pub fn route_then_text(step: &str, content: impl Into<String>) -> Self {
        Self::new(vec![
            LlmResponse::structured(json!({ "step": step })),
            LlmResponse::text(content),
        ])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Snapshot of every call made so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn generate(
        &self,
        messages: &[Message],
        shape: CallShape<'_>,
    ) -> Result<LlmResponse, AgentError> {
        let n = self.call_count.fetch_add(1, Ordering::SeqCst);
        let tool = match shape {
            CallShape::Plain => None,
            CallShape::Structured(spec) | CallShape::BoundTool(spec) => Some(spec.name.clone()),
        };
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                shape: shape.label(),
                tool,
                messages: messages.to_vec(),
            });
        }

        if let Some(ref msg) = self.fail_with {
            return Err(AgentError::ExecutionFailed(msg.clone()));
        }
        let response = self
            .responses
            .get(n)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or_default();
        Ok(response)
    }
}
