//! Axum route handlers for the simulator API.
//!
//! Each handler: parse body → build prompt → one generation call → single-field JSON.
//! Body parse failures and generation failures both surface as the endpoint's generic 500.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::{AppError, Endpoint};
use crate::simulation::models::{
    ChatRequest, ChatResponse, EvaluateRequest, EvaluateResponse, InitialGuidanceRequest,
    InitialGuidanceResponse, SummarizeRequest, SummarizeResponse,
};
use crate::simulation::prompts::{
    chat_prompt, evaluation_prompt, initial_guidance_prompt, summary_prompt,
};
use crate::state::AppState;

/// POST /api/chat
///
/// Individualized guidance for the patient's current message.
pub async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| rejected(Endpoint::Chat, e))?;
    let prompt = chat_prompt(&request, &state.guidelines);

    let reply = generate(&state, Endpoint::Chat, &prompt).await?;
    Ok(Json(ChatResponse { reply }))
}

/// POST /api/evaluate
///
/// Markdown evaluation of a finished simulation.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> Result<Json<EvaluateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| rejected(Endpoint::Evaluate, e))?;
    let prompt = evaluation_prompt(&request, &state.guidelines);

    let evaluation = generate(&state, Endpoint::Evaluate, &prompt).await?;
    Ok(Json(EvaluateResponse { evaluation }))
}

/// POST /api/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let Json(request) = payload.map_err(|e| rejected(Endpoint::Summarize, e))?;
    let prompt = summary_prompt(&request);

    let summary = generate(&state, Endpoint::Summarize, &prompt).await?;
    Ok(Json(SummarizeResponse { summary }))
}

/// POST /api/initial-guidance
///
/// Opening message for a new simulation on the chosen theme.
pub async fn handle_initial_guidance(
    State(state): State<AppState>,
    payload: Result<Json<InitialGuidanceRequest>, JsonRejection>,
) -> Result<Json<InitialGuidanceResponse>, AppError> {
    let Json(request) = payload.map_err(|e| rejected(Endpoint::InitialGuidance, e))?;
    let prompt = initial_guidance_prompt(&request, &state.guidelines);

    let guidance = generate(&state, Endpoint::InitialGuidance, &prompt).await?;
    Ok(Json(InitialGuidanceResponse { guidance }))
}

async fn generate(state: &AppState, endpoint: Endpoint, prompt: &str) -> Result<String, AppError> {
    match state.generator.generate(prompt).await {
        Ok(text) => Ok(text),
        Err(source) => Err(AppError::Generation { endpoint, source }),
    }
}

fn rejected(endpoint: Endpoint, rejection: JsonRejection) -> AppError {
    AppError::BadRequest {
        endpoint,
        detail: rejection.body_text(),
    }
}
