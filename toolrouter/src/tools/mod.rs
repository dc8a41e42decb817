//! Leaf tools and the static registry the extractor dispatches into.
//!
//! Two tools exist, each exposed to the model as a single function:
//!
//! | Tool           | Argument     | Leaf                              |
//! |----------------|--------------|-----------------------------------|
//! | `weather_tool` | `location`   | [`WeatherLookup::lookup`]         |
//! | `math_tool`    | `expression` | [`math_tool`] (never fails)       |
//!
//! [`ToolKind`] is the closed set; [`Toolbox`] owns the configured leaves and executes a
//! [`ToolInvocation`]. Rule-based argument extraction used by the offline client lives in
//! [`extract`].

pub mod extract;
mod math;
mod weather;

pub use extract::{extract_location_from_query, extract_math_expression, DEFAULT_LOCATION};
pub use math::math_tool;
pub use weather::WeatherLookup;

use serde_json::{json, Value};
use thiserror::Error;

use crate::state::{Intent, ToolInvocation};

/// Function specification handed to the model (name, description, JSON Schema for arguments).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: Value,
}

/// Tool-level failures. The extractor turns every variant into a result string.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected weather response: {0}")]
    Decode(String),
    #[error("model call failed: {0}")]
    Model(String),
}

/// The closed set of callable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Weather,
    Math,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Weather => "weather_tool",
            ToolKind::Math => "math_tool",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "weather_tool" => Some(ToolKind::Weather),
            "math_tool" => Some(ToolKind::Math),
            _ => None,
        }
    }

    /// Tool bound for an intent; `General` has none.
    pub fn for_intent(intent: Intent) -> Option<Self> {
        match intent {
            Intent::Weather => Some(ToolKind::Weather),
            Intent::Math => Some(ToolKind::Math),
            Intent::General => None,
        }
    }

    /// Name of the single argument the tool takes.
    pub fn argument(self) -> &'static str {
        match self {
            ToolKind::Weather => "location",
            ToolKind::Math => "expression",
        }
    }

    pub fn spec(self) -> ToolSpec {
        let (description, arg_description) = match self {
            ToolKind::Weather => (
                "Get current weather information for a specific location.",
                "The city or location to get weather for (e.g. \"Paris\", \"Tokyo\", \"New York\")",
            ),
            ToolKind::Math => (
                "Perform mathematical calculations safely.",
                "A mathematical expression to evaluate (e.g. \"42 * 7\", \"15 + 27\")",
            ),
        };
        let arg = self.argument();
        ToolSpec {
            name: self.name().to_string(),
            description: Some(description.to_string()),
            input_schema: json!({
                "type": "object",
                "properties": {
                    arg: { "type": "string", "description": arg_description }
                },
                "required": [arg]
            }),
        }
    }
}

/// Configured tool leaves.
///
/// **Interaction**: Owned by `Orchestrator`, called by `ToolsNode` with the first tool call
/// of the extractor response.
#[derive(Debug, Clone)]
pub struct Toolbox {
    weather: WeatherLookup,
}

impl Toolbox {
    pub fn new(weather: WeatherLookup) -> Self {
        Self { weather }
    }

    /// Toolbox with the weather leaf in mock mode.
    pub fn mock() -> Self {
        Self::new(WeatherLookup::mock())
    }

    pub fn weather(&self) -> &WeatherLookup {
        &self.weather
    }

    /// Runs the named tool with its argument and returns the tool's string output.
    pub async fn call(&self, invocation: &ToolInvocation) -> Result<String, ToolError> {
        let kind = ToolKind::from_name(&invocation.tool_name)
            .ok_or_else(|| ToolError::NotFound(invocation.tool_name.clone()))?;
        let arg = invocation.str_arg(kind.argument()).ok_or_else(|| {
            ToolError::InvalidInput(format!(
                "missing string argument '{}' for {}",
                kind.argument(),
                kind.name()
            ))
        })?;
        match kind {
            ToolKind::Weather => self.weather.lookup(arg).await,
            ToolKind::Math => Ok(math_tool(arg)),
        }
    }
}
