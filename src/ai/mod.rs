pub mod dto;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::warn;

use crate::config::GeminiConfig;
use crate::error::AppError;
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Model,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(&self, turns: &[ChatTurn]) -> Result<dto::GenerateContentResponse, AppError>;
}

pub struct GeminiHttpClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiHttpClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl GenerativeClient for GeminiHttpClient {
    async fn generate(&self, turns: &[ChatTurn]) -> Result<dto::GenerateContentResponse, AppError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base, self.config.model, self.config.api_key
        );

        let request_body = dto::GenerateContentRequest {
            contents: turns
                .iter()
                .map(|turn| dto::Content {
                    role: turn.role.as_str().to_string(),
                    parts: vec![dto::Part {
                        text: turn.text.clone(),
                    }],
                })
                .collect(),
            generation_config: dto::GenerationConfig::default(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Generation(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let body_text = response.text().await.unwrap_or_default();
        serde_json::from_str::<dto::GenerateContentResponse>(&body_text).map_err(|e| {
            warn!("failed to parse generation response: {}", e);
            AppError::Generation(format!("unexpected response shape: {}", e))
        })
    }
}

/// The single primitive behind every AI feature: one request, first
/// candidate's text. Every failure mode collapses to one error notification
/// and `None`; callers treat `None` as "no update".
pub struct AiGateway {
    client: Arc<dyn GenerativeClient>,
    notifier: Arc<dyn Notifier>,
}

impl AiGateway {
    pub fn new(client: Arc<dyn GenerativeClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    pub async fn generate(&self, turns: &[ChatTurn]) -> Option<String> {
        match self.client.generate(turns).await {
            Ok(response) => match response.first_text() {
                Some(text) => Some(text.to_string()),
                None => {
                    self.notifier.error("Received empty response from Gemini");
                    None
                }
            },
            Err(err) => {
                warn!("generation request failed: {}", err);
                self.notifier.error("Failed to get a response from Gemini");
                None
            }
        }
    }
}
