//! # toolrouter
//!
//! Classifies a free-text query into **weather**, **math** or **general**, dispatches it through a
//! small state graph and returns the answer along with the path that produced it.
//!
//! ## Flow
//!
//! One [`ConversationState`] flows through the graph per request:
//!
//! - **router**: one structured model call picks a [`RouteStep`]; it maps to an [`Intent`].
//! - **tools** (weather / math): the model is bound to the intent's single tool and fills its
//!   argument; the tool runs and its output (or an error string) becomes the result.
//! - **llm** (general): one plain completion over the history.
//!
//! [`Orchestrator::handle_query`] wires these up and returns a [`QueryOutcome`].
//!
//! ## Main modules
//!
//! - [`graph`]: [`StateGraph`], [`CompiledStateGraph`], [`Node`], [`Next`]; build and run state graphs.
//! - [`route`]: [`RouterNode`], [`ToolsNode`], [`LlmNode`], [`route_condition`], [`Orchestrator`].
//! - [`state`]: [`ConversationState`], [`Intent`], [`ToolUsed`], [`RoutingDecision`], [`ToolCall`].
//! - [`llm`]: [`LlmClient`] trait, [`ChatOpenAI`], [`MockLlm`], [`HeuristicLlm`].
//! - [`tools`]: [`Toolbox`], [`ToolKind`], [`math_tool`], [`WeatherLookup`], argument extraction.
//! - [`message`]: [`Message`] (System / User / Assistant).
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use toolrouter::{HeuristicLlm, Orchestrator, Toolbox};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let orchestrator = Orchestrator::new(Arc::new(HeuristicLlm::new()), Toolbox::mock()).unwrap();
//! let outcome = orchestrator.handle_query("What is 7 * 3?").await.unwrap();
//! println!("{} -> {}", outcome.tool_used, outcome.result);
//! # }
//! ```

pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod route;
pub mod state;
pub mod tools;

pub use error::AgentError;
pub use graph::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update, CompilationError, CompiledStateGraph, Next, Node, StateGraph,
    DEFAULT_RECURSION_LIMIT, END, START,
};
pub use llm::{
    CallShape, ChatOpenAI, HeuristicLlm, LlmClient, LlmResponse, LlmUsage, MockLlm, RecordedCall,
    OFFLINE_GENERAL_REPLY,
};
pub use message::Message;
pub use route::{
    route_condition, LlmNode, Orchestrator, QueryOutcome, RouteTarget, RouterNode, ToolsNode,
    NO_MESSAGES, NO_TOOL_CALLS,
};
pub use state::{
    ConversationState, Intent, RouteStep, RoutingDecision, ToolCall, ToolInvocation, ToolUsed,
    ROUTER_SYSTEM_PROMPT, ROUTE_TOOL_NAME,
};
pub use tools::{
    extract_location_from_query, extract_math_expression, math_tool, ToolError, ToolKind,
    ToolSpec, Toolbox, WeatherLookup, DEFAULT_LOCATION,
};
