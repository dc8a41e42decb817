//! State graph: nodes, explicit edges and conditional edges; compile, then invoke with state.
//!
//! The orchestrator builds `START → router → (tools | llm) → END` with it. Nodes implement
//! [`Node`]; routing after a node is either a fixed edge or a [`ConditionalRouter`] over state.

mod compile_error;
mod compiled;
mod conditional;
mod logging;
mod next;
mod node;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::{CompiledStateGraph, DEFAULT_RECURSION_LIMIT};
pub use conditional::{ConditionalRouter, ConditionalRouterFn, NextEntry};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
pub use next::Next;
pub use node::Node;
pub use state_graph::{StateGraph, END, START};
