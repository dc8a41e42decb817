//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against any OpenAI-compatible endpoint. Temperature is fixed at 0 so routing and
//! extraction are as repeatable as the provider allows.
//!
//! Shape mapping:
//! - `Plain`: no tools.
//! - `Structured(spec)`: `spec` is the only tool and `tool_choice = required`; the first tool
//!   call's arguments are parsed into `LlmResponse::structured`.
//! - `BoundTool(spec)`: `spec` is offered with `tool_choice = auto`.

use async_trait::async_trait;
use tracing::{debug, trace, warn};

use crate::error::AgentError;
use crate::llm::{CallShape, LlmClient, LlmResponse, LlmUsage};
use crate::message::Message;
use crate::state::ToolCall;
use crate::tools::ToolSpec;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionMessageToolCalls, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage, ChatCompletionTool,
        ChatCompletionToolChoiceOption, ChatCompletionTools, CreateChatCompletionRequestArgs,
        FunctionObject, ToolChoiceOptions,
    },
    Client,
};
use env_config::ModelSettings;

const TEMPERATURE: f32 = 0.0;

/// OpenAI chat client over one model, temperature 0.
///
/// **Interaction**: Implements `LlmClient`; shared by the router, tools and llm nodes.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
}

impl ChatOpenAI {
    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    /// Build client from process settings: key, optional base URL and model name.
    pub fn from_settings(settings: &ModelSettings) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(settings.api_key.clone());
        if let Some(ref base) = settings.base_url {
            config = config.with_api_base(base.clone());
        }
        Self::with_config(config, settings.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert our `Message` list to OpenAI request messages (system/user/assistant text only).
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }

    fn tool_to_request(spec: &ToolSpec) -> ChatCompletionTools {
        ChatCompletionTools::Function(ChatCompletionTool {
            function: FunctionObject {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: Some(spec.input_schema.clone()),
                ..Default::default()
            },
        })
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn generate(
        &self,
        messages: &[Message],
        shape: CallShape<'_>,
    ) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        args.temperature(TEMPERATURE);

        match shape {
            CallShape::Plain => {}
            CallShape::Structured(spec) => {
                args.tools(vec![Self::tool_to_request(spec)]);
                args.tool_choice(ChatCompletionToolChoiceOption::Mode(
                    ToolChoiceOptions::Required,
                ));
            }
            CallShape::BoundTool(spec) => {
                args.tools(vec![Self::tool_to_request(spec)]);
                args.tool_choice(ChatCompletionToolChoiceOption::Mode(ToolChoiceOptions::Auto));
            }
        }

        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        debug!(
            trace_id = %trace_id,
            model = %self.model,
            message_count = messages.len(),
            shape = shape.label(),
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("OpenAI API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string(&response) {
            trace!(trace_id = %trace_id, response = %js, "OpenAI response body");
        }

        let usage = response.usage.as_ref().map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        let choice =
            response.choices.into_iter().next().ok_or_else(|| {
                AgentError::ExecutionFailed("OpenAI returned no choices".to_string())
            })?;

        let msg = choice.message;
        let content = msg.content.unwrap_or_default();
        let tool_calls: Vec<ToolCall> = msg
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .filter_map(|tc| {
                if let ChatCompletionMessageToolCalls::Function(f) = tc {
                    Some(ToolCall {
                        name: f.function.name,
                        arguments: f.function.arguments,
                        id: Some(f.id),
                    })
                } else {
                    None
                }
            })
            .collect();

        let structured = match shape {
            CallShape::Structured(spec) => {
                let parsed = tool_calls
                    .iter()
                    .find(|c| c.name == spec.name)
                    .and_then(|c| serde_json::from_str(&c.arguments).ok());
                if parsed.is_none() {
                    warn!(trace_id = %trace_id, tool = %spec.name, "structured call returned no parsable arguments");
                }
                parsed
            }
            _ => None,
        };

        debug!(
            trace_id = %trace_id,
            tool_calls = tool_calls.len(),
            has_structured = structured.is_some(),
            "OpenAI chat done"
        );
        Ok(LlmResponse {
            content,
            tool_calls,
            structured,
            usage,
        })
    }
}
