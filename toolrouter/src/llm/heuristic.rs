//! Offline `LlmClient` driven by keyword and pattern rules.
//!
//! Routing looks at the last user message: `weather`/`temperature` → weather, an arithmetic
//! expression → math, anything else → llm. Tool-bound calls emit one tool call whose single
//! argument comes from [`extract_location_from_query`] or [`extract_math_expression`]. Plain
//! calls answer with [`OFFLINE_GENERAL_REPLY`].

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::error::AgentError;
use crate::llm::{CallShape, LlmClient, LlmResponse};
use crate::message::Message;
use crate::state::{RouteStep, ToolCall, ROUTE_TOOL_NAME};
use crate::tools::{extract_location_from_query, extract_math_expression, ToolKind};

pub const OFFLINE_GENERAL_REPLY: &str =
    "I can answer weather and arithmetic questions offline; general questions need a model provider.";

/// Rule-based client; no network.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicLlm;

impl HeuristicLlm {
    pub fn new() -> Self {
        Self
    }

    /// Routing rule used for structured `route` calls.
    pub fn classify(query: &str) -> RouteStep {
        let lower = query.to_lowercase();
        if lower.contains("weather") || lower.contains("temperature") {
            RouteStep::Weather
        } else if !extract_math_expression(query).is_empty() {
            RouteStep::Math
        } else {
            RouteStep::Llm
        }
    }

    fn last_user(messages: &[Message]) -> &str {
        messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(Message::content)
            .unwrap_or("")
    }
}

#[async_trait]
impl LlmClient for HeuristicLlm {
    async fn generate(
        &self,
        messages: &[Message],
        shape: CallShape<'_>,
    ) -> Result<LlmResponse, AgentError> {
        let query = Self::last_user(messages);
        let response = match shape {
            CallShape::Structured(spec) if spec.name == ROUTE_TOOL_NAME => {
                let step = Self::classify(query);
                LlmResponse::structured(json!({ "step": step }))
            }
            CallShape::Structured(spec) => {
                return Err(AgentError::ExecutionFailed(format!(
                    "offline client has no rule for schema '{}'",
                    spec.name
                )));
            }
            CallShape::BoundTool(spec) => match ToolKind::from_name(&spec.name) {
                Some(kind) => {
                    let value = match kind {
                        ToolKind::Weather => extract_location_from_query(query),
                        ToolKind::Math => extract_math_expression(query),
                    };
                    let arguments = json!({ kind.argument(): value });
                    LlmResponse::with_tool_call(ToolCall {
                        name: kind.name().to_string(),
                        arguments: arguments.to_string(),
                        id: Some("offline-1".to_string()),
                    })
                }
                None => LlmResponse::default(),
            },
            CallShape::Plain => LlmResponse::text(OFFLINE_GENERAL_REPLY),
        };
        debug!(shape = shape.label(), query = %query, "offline llm response");
        Ok(response)
    }
}
