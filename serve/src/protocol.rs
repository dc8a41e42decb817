//! Wire types for the REST and WebSocket endpoints.
//!
//! REST names the answer `result`; the WebSocket reply names it `response`.

use serde::{Deserialize, Serialize};
use toolrouter::{QueryOutcome, ToolUsed};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

/// `POST /api/v1/query` success body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub tool_used: ToolUsed,
    pub result: String,
}

impl QueryResponse {
    pub fn new(query: String, outcome: QueryOutcome) -> Self {
        Self {
            query,
            tool_used: outcome.tool_used,
            result: outcome.result,
        }
    }
}

/// One WebSocket reply frame. Serialized without a tag: the field set identifies the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WsReply {
    Answer {
        query: String,
        tool_used: ToolUsed,
        response: String,
    },
    Failure {
        error: String,
        message: String,
    },
    Rejected {
        error: String,
    },
}

impl WsReply {
    pub const MISSING_QUERY: &'static str = "Missing 'query' field in message";
    pub const INVALID_JSON: &'static str = "Invalid JSON";
    pub const PROCESSING_FAILED: &'static str = "Error processing query";

    pub fn answer(query: String, outcome: QueryOutcome) -> Self {
        Self::Answer {
            query,
            tool_used: outcome.tool_used,
            response: outcome.result,
        }
    }

    pub fn missing_query() -> Self {
        Self::Rejected {
            error: Self::MISSING_QUERY.to_string(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::Failure {
            error: Self::INVALID_JSON.to_string(),
            message: message.into(),
        }
    }

    pub fn processing_failed(message: impl Into<String>) -> Self {
        Self::Failure {
            error: Self::PROCESSING_FAILED.to_string(),
            message: message.into(),
        }
    }
}
