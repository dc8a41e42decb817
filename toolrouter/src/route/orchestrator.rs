//! Orchestrator: builds the routing graph once and serves `handle_query`.
//!
//! ```text
//! START → router ─┬─ weather ─┐
//!                 ├─ math ────┴→ tools → END
//!                 └─ llm ─────→ llm   → END
//! ```
//!
//! Each request gets a fresh [`ConversationState`]; the graph, model client and toolbox are
//! shared read-only across requests.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use env_config::Settings;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, StateGraph, END, START};
use crate::llm::{ChatOpenAI, LlmClient};
use crate::state::{ConversationState, ToolUsed};
use crate::tools::{Toolbox, WeatherLookup};

use super::{route_condition, LlmNode, RouteTarget, RouterNode, ToolsNode};

/// What a caller gets back for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub tool_used: ToolUsed,
    pub result: String,
}

/// **Interaction**: Built once at startup (`from_settings`, or `new` with a stub model in
/// tests) and shared behind `Arc` by the REST handler, the WebSocket handler and the CLI.
pub struct Orchestrator {
    compiled: CompiledStateGraph<ConversationState>,
}

impl Orchestrator {
    /// Builds the graph over the given model client and toolbox.
    pub fn new(llm: Arc<dyn LlmClient>, toolbox: Toolbox) -> Result<Self, CompilationError> {
        let toolbox = Arc::new(toolbox);
        let router = RouterNode::new(Arc::clone(&llm));
        let tools = ToolsNode::new(Arc::clone(&llm), toolbox);
        let general = LlmNode::new(llm);

        let path_map: HashMap<String, String> = [RouteTarget::Tools, RouteTarget::Llm]
            .into_iter()
            .map(|t| (t.as_str().to_string(), t.as_str().to_string()))
            .collect();

        let mut graph = StateGraph::<ConversationState>::new();
        graph
            .add_node("router", Arc::new(router))
            .add_node("tools", Arc::new(tools))
            .add_node("llm", Arc::new(general))
            .add_edge(START, "router")
            .add_conditional_edges(
                "router",
                Arc::new(|state: &ConversationState| route_condition(state).as_str().to_string()),
                Some(path_map),
            )
            .add_edge("tools", END)
            .add_edge("llm", END);

        Ok(Self {
            compiled: graph.compile()?,
        })
    }

    /// Production wiring: `ChatOpenAI` from the model settings, weather from the weather settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, CompilationError> {
        let llm: Arc<dyn LlmClient> = Arc::new(ChatOpenAI::from_settings(&settings.model));
        let toolbox = Toolbox::new(WeatherLookup::new(settings.weather.clone()));
        Self::new(llm, toolbox)
    }

    /// Runs the graph on a prepared state and returns the final state.
    pub async fn run(&self, state: ConversationState) -> Result<ConversationState, AgentError> {
        self.compiled.invoke(state).await
    }

    /// Classifies `query`, runs the matching path and reports which one served it.
    ///
    /// Tool failures come back as `Ok` with an error string in `result`; only model-call
    /// failures on the router or general path are `Err`.
    pub async fn handle_query(&self, query: &str) -> Result<QueryOutcome, AgentError> {
        info!(query = %query, "handling query");
        let state = self.run(ConversationState::from_query(query)).await?;
        let outcome = QueryOutcome {
            tool_used: state.tool_used(),
            result: state.result.unwrap_or_default(),
        };
        info!(tool_used = %outcome.tool_used, "query handled");
        Ok(outcome)
    }
}
