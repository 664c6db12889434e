use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// The four simulator operations. Each owns the fixed message shown to the client on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Chat,
    Evaluate,
    Summarize,
    InitialGuidance,
}

impl Endpoint {
    pub fn failure_message(self) -> &'static str {
        match self {
            Endpoint::Chat => "AIとの通信中にエラーが発生しました。",
            Endpoint::Evaluate => "評価生成中にエラーが発生しました。",
            Endpoint::Summarize => "会話の要約中にエラーが発生しました。",
            Endpoint::InitialGuidance => "初期指導の生成中にエラーが発生しました。",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Chat => "chat",
            Endpoint::Evaluate => "evaluate",
            Endpoint::Summarize => "summarize",
            Endpoint::InitialGuidance => "initial-guidance",
        })
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant answers 500 with the endpoint's fixed message; the detail only reaches the log.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{endpoint}: request body rejected: {detail}")]
    BadRequest { endpoint: Endpoint, detail: String },

    #[error("{endpoint}: generation failed: {source}")]
    Generation {
        endpoint: Endpoint,
        #[source]
        source: LlmError,
    },
}

impl AppError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            AppError::BadRequest { endpoint, .. } | AppError::Generation { endpoint, .. } => {
                *endpoint
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::BadRequest { endpoint, detail } => {
                tracing::error!(%endpoint, "Request body rejected: {detail}");
            }
            AppError::Generation { endpoint, source } => {
                tracing::error!(%endpoint, "LLM error: {source}");
            }
        }

        let body = Json(json!({ "error": self.endpoint().failure_message() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
