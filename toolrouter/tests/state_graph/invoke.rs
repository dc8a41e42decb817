//! StateGraph invoke: linear chains, explicit jumps, errors, recursion limit.

use std::sync::Arc;

use toolrouter::{AgentError, Next, StateGraph, END, START};

use crate::common::{AddNode, CounterState, FailingNode, JumpNode};

#[tokio::test]
async fn invoke_linear_chain_runs_nodes_in_edge_order() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("one", Arc::new(AddNode::new("one", 1)))
        .add_node("ten", Arc::new(AddNode::new("ten", 10)))
        .add_edge(START, "one")
        .add_edge("one", "ten")
        .add_edge("ten", END);

    let state = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(state.value, 11);
    assert_eq!(state.visited, vec!["one", "ten"]);
}

/// **Scenario**: `Next::End` stops before the outgoing edge is followed.
#[tokio::test]
async fn next_end_stops_early() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node(
            "stop",
            Arc::new(JumpNode {
                id: "stop",
                next: Next::End,
            }),
        )
        .add_node("never", Arc::new(AddNode::new("never", 100)))
        .add_edge(START, "stop")
        .add_edge("stop", "never")
        .add_edge("never", END);

    let state = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(state.value, 0);
    assert_eq!(state.visited, vec!["stop"]);
}

#[tokio::test]
async fn next_node_jumps_over_edge() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node(
            "jump",
            Arc::new(JumpNode {
                id: "jump",
                next: Next::Node("last".into()),
            }),
        )
        .add_node("skipped", Arc::new(AddNode::new("skipped", 5)))
        .add_node("last", Arc::new(AddNode::new("last", 1)))
        .add_edge(START, "jump")
        .add_edge("jump", "skipped")
        .add_edge("skipped", END)
        .add_edge("last", END);

    let state = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(state.visited, vec!["jump", "last"]);
    assert_eq!(state.value, 1);
}

#[tokio::test]
async fn node_error_propagates_unchanged() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("failing", Arc::new(FailingNode))
        .add_edge(START, "failing")
        .add_edge("failing", END);

    match graph.compile().unwrap().invoke(CounterState::default()).await {
        Err(AgentError::ExecutionFailed(msg)) => assert_eq!(msg, "always fails"),
        other => panic!("expected ExecutionFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn jump_to_unknown_node_fails_at_runtime() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node(
            "jump",
            Arc::new(JumpNode {
                id: "jump",
                next: Next::Node("ghost".into()),
            }),
        )
        .add_edge(START, "jump")
        .add_edge("jump", END);

    let err = graph
        .compile()
        .unwrap()
        .invoke(CounterState::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "execution failed: node not found: ghost");
}

/// **Scenario**: A node that keeps jumping to itself hits the recursion limit.
#[tokio::test]
async fn self_loop_hits_recursion_limit() {
    let mut graph = StateGraph::<CounterState>::new().with_recursion_limit(4);
    graph
        .add_node(
            "spin",
            Arc::new(JumpNode {
                id: "spin",
                next: Next::Node("spin".into()),
            }),
        )
        .add_edge(START, "spin")
        .add_edge("spin", END);

    let err = graph
        .compile()
        .unwrap()
        .invoke(CounterState::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("recursion limit of 4"), "{}", err);
}
