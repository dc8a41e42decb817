//! Router node: classify the last user message into weather / math / general.
//!
//! One structured model call with [`ROUTER_SYSTEM_PROMPT`] and the user message; the
//! decision maps straight to `state.intent`. Without a user message the node sets
//! `General` and makes no call.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::{CallShape, LlmClient};
use crate::message::Message;
use crate::state::{ConversationState, Intent, RoutingDecision, ROUTER_SYSTEM_PROMPT};

/// **Interaction**: Implements `Node<ConversationState>`; first node after START. Its
/// output feeds the conditional edge built on [`route_condition`](super::route_condition).
pub struct RouterNode {
    llm: Arc<dyn LlmClient>,
}

impl RouterNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for RouterNode {
    fn id(&self) -> &str {
        "router"
    }

    /// Model failures propagate; they are not turned into a general intent.
    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        let Some(query) = state.last_user_message().map(str::to_owned) else {
            if state.messages.is_empty() {
                error!("router received an empty message history");
            } else {
                error!(messages = state.messages.len(), "router found no user message");
            }
            state.set_intent(Intent::General);
            return Ok((state, Next::Continue));
        };

        let schema = RoutingDecision::schema();
        let prompt = [Message::system(ROUTER_SYSTEM_PROMPT), Message::user(query)];
        let response = self
            .llm
            .generate(&prompt, CallShape::Structured(&schema))
            .await?;
        let decision = RoutingDecision::from_response(&response);
        let intent = Intent::from(decision.step);
        info!(step = ?decision.step, intent = ?intent, "routing decision");

        state.set_intent(intent);
        Ok((state, Next::Continue))
    }
}
