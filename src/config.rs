use std::env;

use crate::error::AppError;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro-experimental";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://studyscribe.db";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl GeminiConfig {
    /// Reads the endpoint credential and optional overrides. `GEMINI_API_KEY`
    /// is the only value without a default; `GEMINI_API_BASE` exists so tests
    /// can point the gateway at a stub endpoint.
    pub fn new_from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| AppError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let api_base =
            env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            api_key,
            api_base,
            model,
        })
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub database_url: String,
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let gemini = GeminiConfig::new_from_env()?;
        let database_url =
            env::var("STUDYSCRIBE_DB").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        Ok(Self {
            gemini,
            database_url,
        })
    }
}
