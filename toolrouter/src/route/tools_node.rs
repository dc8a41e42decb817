//! Tools node: bind the intent's single tool, let the model fill its argument, run it.
//!
//! Never fails: a missing tool call, an unknown tool, bad arguments, a model error or a tool
//! error all end up as the result string.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{CallShape, LlmClient};
use crate::state::{ConversationState, Intent, ToolInvocation};
use crate::tools::{ToolError, ToolKind, Toolbox};

pub const NO_MESSAGES: &str = "No messages to process";
pub const NO_TOOL_CALLS: &str = "No tool calls detected";

/// **Interaction**: Implements `Node<ConversationState>`; runs when the router picked weather
/// or math. Holds the shared `LlmClient` and the `Toolbox`.
pub struct ToolsNode {
    llm: Arc<dyn LlmClient>,
    toolbox: Arc<Toolbox>,
}

impl ToolsNode {
    pub fn new(llm: Arc<dyn LlmClient>, toolbox: Arc<Toolbox>) -> Self {
        Self { llm, toolbox }
    }

    /// Tool for this request. An absent or general intent falls back to weather.
    fn tool_for(intent: Option<Intent>) -> ToolKind {
        match intent.and_then(ToolKind::for_intent) {
            Some(kind) => kind,
            None => {
                // TODO: route a missing intent to the llm node instead of guessing weather.
                warn!(?intent, "tools node reached without a tool intent, falling back to weather");
                ToolKind::Weather
            }
        }
    }

    async fn extract_and_call(
        &self,
        state: &ConversationState,
        kind: ToolKind,
    ) -> Result<String, ToolError> {
        let spec = kind.spec();
        let response = self
            .llm
            .generate(&state.messages, CallShape::BoundTool(&spec))
            .await
            .map_err(|e| ToolError::Model(e.to_string()))?;

        let Some(call) = response.tool_calls.first() else {
            info!(tool = kind.name(), "model returned no tool call");
            return Ok(NO_TOOL_CALLS.to_string());
        };
        if response.tool_calls.len() > 1 {
            warn!(
                count = response.tool_calls.len(),
                "multiple tool calls returned; only the first is executed"
            );
        }

        let invocation = ToolInvocation::from_call(call);
        info!(tool = %invocation.tool_name, arguments = ?invocation.arguments, "executing tool");
        self.toolbox.call(&invocation).await
    }
}

#[async_trait]
impl Node<ConversationState> for ToolsNode {
    fn id(&self) -> &str {
        "tools"
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        if state.messages.is_empty() {
            error!("tools node received an empty message history");
            state.set_result(NO_MESSAGES);
            return Ok((state, Next::Continue));
        }

        let kind = Self::tool_for(state.intent);
        let result = match self.extract_and_call(&state, kind).await {
            Ok(output) => output,
            Err(e) => {
                error!(tool = kind.name(), error = %e, "tool query failed");
                format!("Error processing tool query: {}", e)
            }
        };
        state.set_result(result);
        Ok((state, Next::Continue))
    }
}
