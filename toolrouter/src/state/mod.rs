//! Per-request state threaded through the routing graph.
//!
//! # Main types
//!
//! - [`ConversationState`]: messages plus the routed [`Intent`] and the final result text.
//!   Built fresh for every request and dropped after the terminal node.
//! - [`RoutingDecision`]: the router's constrained output (`{"step": "weather" | "math" | "llm"}`).
//! - [`ToolCall`]: one tool call as returned by the model; [`ToolInvocation`] is the parsed form.
//! - [`ToolUsed`]: the label reported to callers.
//!
//! # Example
//!
//! ```rust
//! use toolrouter::{ConversationState, Intent};
//!
//! let mut state = ConversationState::from_query("What is 7 * 3?");
//! assert_eq!(state.last_user_message(), Some("What is 7 * 3?"));
//! assert!(state.set_intent(Intent::Math));
//! assert!(!state.set_intent(Intent::Weather));
//! assert_eq!(state.intent, Some(Intent::Math));
//! ```

mod routing;

pub use routing::{RouteStep, RoutingDecision, ROUTER_SYSTEM_PROMPT, ROUTE_TOOL_NAME};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::message::Message;

/// Classification label for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Weather,
    Math,
    General,
}

impl From<RouteStep> for Intent {
    fn from(step: RouteStep) -> Self {
        match step {
            RouteStep::Weather => Intent::Weather,
            RouteStep::Math => Intent::Math,
            RouteStep::Llm => Intent::General,
        }
    }
}

/// Which path served the request, as reported to callers (`tool_used`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolUsed {
    Weather,
    Math,
    Llm,
}

impl ToolUsed {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolUsed::Weather => "weather",
            ToolUsed::Math => "math",
            ToolUsed::Llm => "llm",
        }
    }
}

impl From<Intent> for ToolUsed {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Weather => ToolUsed::Weather,
            Intent::Math => ToolUsed::Math,
            Intent::General => ToolUsed::Llm,
        }
    }
}

impl std::fmt::Display for ToolUsed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tool call produced by the model.
///
/// `arguments` is the raw JSON string from the provider; see [`ToolInvocation::from_call`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: String,
    pub id: Option<String>,
}

/// Parsed tool call: tool name plus argument map.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub arguments: Map<String, Value>,
}

impl ToolInvocation {
    /// Parses `call.arguments`. Blank or unparsable arguments yield an empty map; a JSON
    /// string holding an encoded object is decoded once more.
    pub fn from_call(call: &ToolCall) -> Self {
        let raw = call.arguments.trim();
        let mut value = if raw.is_empty() {
            Value::Object(Map::new())
        } else {
            serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!(error = %e, arguments = %raw, "tool arguments JSON parse failed, using empty object");
                Value::Object(Map::new())
            })
        };
        if let Some(nested) = value.as_str().and_then(|s| serde_json::from_str::<Value>(s).ok()) {
            value = nested;
        }
        let arguments = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            tool_name: call.name.clone(),
            arguments,
        }
    }

    /// String argument by name.
    pub fn str_arg(&self, name: &str) -> Option<&str> {
        self.arguments.get(name).and_then(Value::as_str)
    }
}

/// Request-scoped record passed through router → tools | llm.
///
/// Fields are public for inspection; writes go through [`set_intent`](Self::set_intent) and
/// [`set_result`](Self::set_result), which refuse to overwrite a value already set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub intent: Option<Intent>,
    pub result: Option<String>,
}

impl ConversationState {
    /// State for one query: a single user message, or an empty history when the query is blank.
    pub fn from_query(query: &str) -> Self {
        let messages = if query.trim().is_empty() {
            Vec::new()
        } else {
            vec![Message::user(query)]
        };
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Most recent user-authored message, scanning from the end.
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(Message::content)
    }

    /// Sets the intent once. Returns false (and keeps the old value) if already set.
    pub fn set_intent(&mut self, intent: Intent) -> bool {
        if let Some(existing) = self.intent {
            warn!(?existing, ?intent, "intent already set; ignoring overwrite");
            return false;
        }
        self.intent = Some(intent);
        true
    }

    /// Sets the result once. Returns false (and keeps the old value) if already set.
    pub fn set_result(&mut self, result: impl Into<String>) -> bool {
        if self.result.is_some() {
            warn!("result already set; ignoring overwrite");
            return false;
        }
        self.result = Some(result.into());
        true
    }

    /// Label reported to callers.
    pub fn tool_used(&self) -> ToolUsed {
        self.intent.map(ToolUsed::from).unwrap_or(ToolUsed::Llm)
    }
}
