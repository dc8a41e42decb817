//! Router output: a single-field record `{"step": "weather" | "math" | "llm"}`.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::llm::LlmResponse;
use crate::tools::ToolSpec;

/// System prompt sent ahead of the user message when classifying.
pub const ROUTER_SYSTEM_PROMPT: &str =
    "Route the query to weather, math, or llm based on the user's request.";

/// Name of the single function the model must call to return a [`RoutingDecision`].
pub const ROUTE_TOOL_NAME: &str = "route";

/// Next step chosen by the router. Unknown values fall back to `Llm`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStep {
    Weather,
    Math,
    #[default]
    Llm,
}

impl RouteStep {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().trim_matches('"').to_ascii_lowercase().as_str() {
            "weather" => Some(Self::Weather),
            "math" => Some(Self::Math),
            "llm" => Some(Self::Llm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub step: RouteStep,
}

impl RoutingDecision {
    /// Schema handed to the model as the only callable function.
    pub fn schema() -> ToolSpec {
        ToolSpec {
            name: ROUTE_TOOL_NAME.to_string(),
            description: Some(
                "Route the user's query: weather for weather questions, math for arithmetic, llm for everything else."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "step": {
                        "type": "string",
                        "enum": ["weather", "math", "llm"],
                        "description": "The next step in the routing process"
                    }
                },
                "required": ["step"]
            }),
        }
    }

    /// Reads the decision from a structured response.
    ///
    /// Looks at `structured`, then the first tool call's arguments, then the bare content
    /// text. Anything unrecognised becomes `llm`.
    pub fn from_response(response: &LlmResponse) -> Self {
        if let Some(d) = response
            .structured
            .as_ref()
            .and_then(|v| serde_json::from_value::<RawDecision>(v.clone()).ok())
            .and_then(RawDecision::step)
        {
            return Self { step: d };
        }
        if let Some(d) = response
            .tool_calls
            .first()
            .and_then(|c| serde_json::from_str::<RawDecision>(&c.arguments).ok())
            .and_then(RawDecision::step)
        {
            return Self { step: d };
        }
        if let Some(step) = RouteStep::parse(&response.content) {
            return Self { step };
        }
        warn!(content = %response.content, "unrecognised routing decision, defaulting to llm");
        Self::default()
    }
}

#[derive(Deserialize)]
struct RawDecision {
    step: Option<String>,
}

impl RawDecision {
    fn step(self) -> Option<RouteStep> {
        self.step.as_deref().and_then(RouteStep::parse)
    }
}
