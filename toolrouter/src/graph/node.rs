//! Graph node trait: one step in a StateGraph.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

use super::Next;

/// One step in a graph: state in, (state out, next step).
///
/// **Interaction**: Implemented by `RouterNode`, `ToolsNode` and `LlmNode`. See
/// `StateGraph::add_node` and `CompiledStateGraph::invoke`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"router"`, `"tools"`). Must be unique within a graph.
    fn id(&self) -> &str;

    /// Return `Next::Continue` to follow the outgoing edge; `Next::Node(id)` to jump;
    /// `Next::End` to stop.
    async fn run(&self, state: S) -> Result<(S, Next), AgentError>;
}
