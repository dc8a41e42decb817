//! Conditional edges: the router function decides, the node's `Next` is ignored.

use std::sync::Arc;

use toolrouter::{CompilationError, StateGraph, END, START};

use crate::common::{AddNode, CounterState};

fn branching_graph() -> StateGraph<CounterState> {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("seed", Arc::new(AddNode::new("seed", 0)))
        .add_node("small", Arc::new(AddNode::new("small", 1)))
        .add_node("large", Arc::new(AddNode::new("large", 1000)))
        .add_edge(START, "seed")
        .add_conditional_edges(
            "seed",
            Arc::new(|s: &CounterState| {
                if s.value >= 10 { "big" } else { "little" }.to_string()
            }),
            Some(
                [
                    ("big".to_string(), "large".to_string()),
                    ("little".to_string(), "small".to_string()),
                ]
                .into_iter()
                .collect(),
            ),
        )
        .add_edge("small", END)
        .add_edge("large", END);
    graph
}

#[tokio::test]
async fn routes_on_state_through_path_map() {
    let compiled = branching_graph().compile().unwrap();

    let low = compiled.invoke(CounterState::default()).await.unwrap();
    assert_eq!(low.visited, vec!["seed", "small"]);

    let high = compiled
        .invoke(CounterState {
            value: 50,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(high.visited, vec!["seed", "large"]);
    assert_eq!(high.value, 1050);
}

/// **Scenario**: Without a path map the routing key is the next node id; `END` stops.
#[tokio::test]
async fn key_is_node_id_without_path_map() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_node("b", Arc::new(AddNode::new("b", 2)))
        .add_edge(START, "a")
        .add_conditional_edges(
            "a",
            Arc::new(|s: &CounterState| if s.value < 3 { "a" } else { END }.to_string()),
            None,
        )
        .add_edge("b", END);

    let state = graph.compile().unwrap().invoke(CounterState::default()).await.unwrap();
    assert_eq!(state.visited, vec!["a", "a", "a"]);
    assert_eq!(state.value, 3);
}

#[test]
fn path_map_to_missing_node_fails_compile() {
    let mut graph = StateGraph::<CounterState>::new();
    graph
        .add_node("a", Arc::new(AddNode::new("a", 1)))
        .add_edge(START, "a")
        .add_conditional_edges(
            "a",
            Arc::new(|_: &CounterState| "x".to_string()),
            Some([("x".to_string(), "missing".to_string())].into_iter().collect()),
        );
    assert!(matches!(
        graph.compile(),
        Err(CompilationError::InvalidConditionalPathMap(ref t)) if t == "missing"
    ));
}
