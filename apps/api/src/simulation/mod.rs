// Simulator API: chat guidance, evaluation, summary and initial guidance.
// All LLM calls go through the `Generator` trait in llm_client.

pub mod handlers;
pub mod models;
pub mod prompts;
