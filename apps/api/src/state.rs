use std::sync::Arc;

use crate::guidelines::Guidelines;
use crate::llm_client::Generator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable generation backend. Default: GeminiClient.
    pub generator: Arc<dyn Generator>,
    /// Guideline text loaded at startup; read-only for the life of the process.
    pub guidelines: Arc<Guidelines>,
}
