//! Shared types for StateGraph integration tests: a counter state and small nodes over it.

use async_trait::async_trait;
use toolrouter::{AgentError, Next, Node};

#[derive(Debug, Clone, Default)]
pub struct CounterState {
    pub value: i64,
    pub visited: Vec<String>,
}

/// Adds `delta` and records its id.
pub struct AddNode {
    pub id: &'static str,
    pub delta: i64,
}

impl AddNode {
    pub fn new(id: &'static str, delta: i64) -> Self {
        Self { id, delta }
    }
}

#[async_trait]
impl Node<CounterState> for AddNode {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, mut state: CounterState) -> Result<(CounterState, Next), AgentError> {
        state.value += self.delta;
        state.visited.push(self.id.to_string());
        Ok((state, Next::Continue))
    }
}

/// Returns a fixed `Next` without touching the value.
pub struct JumpNode {
    pub id: &'static str,
    pub next: Next,
}

#[async_trait]
impl Node<CounterState> for JumpNode {
    fn id(&self) -> &str {
        self.id
    }

    async fn run(&self, mut state: CounterState) -> Result<(CounterState, Next), AgentError> {
        state.visited.push(self.id.to_string());
        Ok((state, self.next.clone()))
    }
}

/// Node that always returns Err.
pub struct FailingNode;

#[async_trait]
impl Node<CounterState> for FailingNode {
    fn id(&self) -> &str {
        "failing"
    }

    async fn run(&self, _state: CounterState) -> Result<(CounterState, Next), AgentError> {
        Err(AgentError::ExecutionFailed("always fails".into()))
    }
}
