use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "https://diabetes-simulator-frontend.vercel.app";
/// Resolved against the crate directory so the binary starts from any working directory.
pub const DEFAULT_GUIDELINE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/guideline_text");

/// Application configuration loaded from environment variables.
///
/// `GEMINI_API_KEY` is optional: without it the server still starts
/// and every generation request fails with the endpoint's generic error.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub allowed_origin: String,
    pub guideline_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: match std::env::var("PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
                Err(_) => DEFAULT_PORT,
            },
            gemini_api_key: non_blank(std::env::var("GEMINI_API_KEY").ok()),
            allowed_origin: env_or("ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN),
            guideline_dir: PathBuf::from(env_or("GUIDELINE_DIR", DEFAULT_GUIDELINE_DIR)),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// `KEY=` in a `.env` file counts as unset.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
