//! General responder: one plain completion over the full history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::error::AgentError;
use crate::graph::{Next, Node};
use crate::llm::LlmClient;
use crate::state::ConversationState;

use super::tools_node::NO_MESSAGES;

/// **Interaction**: Implements `Node<ConversationState>`; runs for the general intent.
pub struct LlmNode {
    llm: Arc<dyn LlmClient>,
}

impl LlmNode {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Node<ConversationState> for LlmNode {
    fn id(&self) -> &str {
        "llm"
    }

    async fn run(
        &self,
        mut state: ConversationState,
    ) -> Result<(ConversationState, Next), AgentError> {
        if state.messages.is_empty() {
            error!("llm node received an empty message history");
            state.set_result(NO_MESSAGES);
            return Ok((state, Next::Continue));
        }

        let response = self.llm.invoke(&state.messages).await?;
        let text = response.as_text();
        info!(chars = text.len(), "general response");
        state.set_result(text);
        Ok((state, Next::Continue))
    }
}
