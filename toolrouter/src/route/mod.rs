//! Routing graph nodes and the orchestrator.
//!
//! # Main types
//!
//! - **[`RouterNode`]**: classifies the last user message with one structured model call and
//!   sets `intent`.
//! - **[`ToolsNode`]**: binds the intent's tool, lets the model fill the argument, runs the
//!   tool. Never fails.
//! - **[`LlmNode`]**: plain completion for general questions.
//! - **[`Orchestrator`]**: compiles `router → (tools | llm)` and exposes
//!   [`handle_query`](Orchestrator::handle_query).
//!
//! # Routing
//!
//! After the router, [`route_condition`] picks the next node from the intent:
//!
//! ```rust
//! use toolrouter::{route_condition, ConversationState, Intent, RouteTarget};
//!
//! let mut state = ConversationState::from_query("What is 7 * 3?");
//! state.set_intent(Intent::Math);
//! assert_eq!(route_condition(&state), RouteTarget::Tools);
//! assert_eq!(route_condition(&ConversationState::default()), RouteTarget::Llm);
//! ```

mod llm_node;
mod orchestrator;
mod router_node;
mod tools_node;

pub use llm_node::LlmNode;
pub use orchestrator::{Orchestrator, QueryOutcome};
pub use router_node::RouterNode;
pub use tools_node::{ToolsNode, NO_MESSAGES, NO_TOOL_CALLS};

use crate::state::{ConversationState, Intent};

/// Node that runs after the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    Tools,
    Llm,
}

impl RouteTarget {
    /// Node id for this target.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tools => "tools",
            Self::Llm => "llm",
        }
    }
}

/// Weather and math go to the tools node; general or unset intent goes to llm.
pub fn route_condition(state: &ConversationState) -> RouteTarget {
    match state.intent {
        Some(Intent::Weather | Intent::Math) => RouteTarget::Tools,
        Some(Intent::General) | None => RouteTarget::Llm,
    }
}
