//! Next-step result from a graph node: follow the edge, jump to a node, or end.

/// Next step after running a node.
///
/// - **Continue**: follow the node's outgoing edge (END if it has none).
/// - **Node(id)**: run the given node next.
/// - **End**: stop; return current state as final result.
///
/// Ignored for nodes with conditional edges; the router decides.
///
/// **Interaction**: Returned by `Node::run`; consumed by `CompiledStateGraph::invoke`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    Continue,
    Node(String),
    End,
}
