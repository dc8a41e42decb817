//! Compiled state graph: immutable, supports invoke only.
//!
//! Built by `StateGraph::compile`. Runs from the START node; after each node the conditional
//! router (when present) or the node's returned `Next` picks the next node.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::AgentError;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state, log_state_update,
};
use super::state_graph::END;
use super::{Next, NextEntry, Node};

/// Node executions allowed per invoke unless overridden with `StateGraph::with_recursion_limit`.
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Compiled graph: immutable structure, supports invoke only.
///
/// Cheap to clone; nodes are shared. One compiled graph serves every request.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: HashMap<String, Arc<dyn Node<S>>>,
    pub(super) first_node_id: String,
    pub(super) next_map: HashMap<String, NextEntry<S>>,
    pub(super) recursion_limit: usize,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    fn next_id(&self, current_id: &str, state: &S, next: Next) -> Option<String> {
        match self.next_map.get(current_id) {
            Some(NextEntry::Conditional(router)) => {
                let target = router.resolve_next(state);
                tracing::debug!(from = %current_id, to = %target, "conditional routing");
                Some(target)
            }
            Some(NextEntry::Unconditional(to)) => match next {
                Next::End => None,
                Next::Node(id) => Some(id),
                Next::Continue => Some(to.clone()),
            },
            None => match next {
                Next::Node(id) => Some(id),
                Next::End | Next::Continue => None,
            },
        }
    }

    async fn run_loop(&self, state: &mut S) -> Result<(), AgentError> {
        let mut current_id = self.first_node_id.clone();
        let mut steps = 0usize;

        loop {
            if steps >= self.recursion_limit {
                return Err(AgentError::ExecutionFailed(format!(
                    "recursion limit of {} reached without hitting END",
                    self.recursion_limit
                )));
            }
            steps += 1;

            let node = self.nodes.get(&current_id).cloned().ok_or_else(|| {
                AgentError::ExecutionFailed(format!("node not found: {}", current_id))
            })?;

            log_node_start(&current_id);
            log_node_state(&current_id, state);

            let (new_state, next) = node.run(state.clone()).await?;
            log_node_complete(&current_id, &next);
            *state = new_state;
            log_state_update(&current_id);

            match self.next_id(&current_id, state, next) {
                Some(id) if id != END => current_id = id,
                _ => return Ok(()),
            }
        }
    }

    /// Runs the graph with the given state and returns the final state.
    ///
    /// - `Next::Continue`: follow the node's outgoing edge.
    /// - `Next::Node(id)`: run the node with that id next.
    /// - `Next::End`: stop and return current state.
    ///
    /// Node errors stop the run and are returned unchanged.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        if !self.nodes.contains_key(&self.first_node_id) {
            return Err(AgentError::ExecutionFailed("empty graph".into()));
        }
        log_graph_start();
        let mut state = state;
        match self.run_loop(&mut state).await {
            Ok(()) => {
                log_graph_complete();
                Ok(state)
            }
            Err(e) => {
                log_graph_error(&e);
                Err(e)
            }
        }
    }

    /// Ids of the registered nodes, sorted.
    pub fn node_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
