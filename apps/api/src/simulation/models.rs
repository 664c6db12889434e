//! Request and response contracts for the simulator endpoints.
//!
//! Every request field is optional: the front-end sends whatever it has and the
//! prompt builders decide how an absent field reads (see `simulation::prompts`).
//! `userInfo`, history turns, `message` and `theme` are opaque to the server and
//! passed through as JSON; only the history containers must be arrays.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Requests
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/chat
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<Value>,
    pub history: Option<Vec<Value>>,
    pub user_info: Option<Value>,
    pub theme: Option<Value>,
}

/// POST /api/evaluate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRequest {
    pub chat_history: Option<Vec<Value>>,
    pub user_info: Option<Value>,
}

/// POST /api/summarize
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub chat_history: Option<Vec<Value>>,
}

/// POST /api/initial-guidance
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialGuidanceRequest {
    pub theme: Option<Value>,
    pub user_info: Option<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Responses
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub evaluation: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct InitialGuidanceResponse {
    pub guidance: String,
}
