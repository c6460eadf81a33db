use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::constants::PROVIDER_TIMEOUT_SECS;
use crate::enums::ai_provider_error::AiProviderError;
use crate::traits::llm_judge::LlmJudge;

const DEFAULT_MODEL: &str = "deepseek-chat";

// DeepSeek speaks the OpenAI chat-completions dialect.
#[derive(Serialize)]
struct DeepSeekRequest {
    model: String,
    temperature: f32,
    messages: Vec<DeepSeekMessage>,
}

#[derive(Serialize)]
struct DeepSeekMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct DeepSeekResponse {
    choices: Vec<DeepSeekChoice>,
}

#[derive(Deserialize)]
struct DeepSeekChoice {
    message: DeepSeekChoiceMessage,
}

#[derive(Deserialize)]
struct DeepSeekChoiceMessage {
    content: Option<String>,
}

#[derive(Clone)]
pub struct DeepSeekProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
}

impl DeepSeekProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            api_key,
            base_url: "https://api.deepseek.com/v1".to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
                .build()
                .unwrap_or_else(|_| Client::new()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    // Each prompt carries its own role preamble (analysis vs translation),
    // so no fixed system message here.
    fn get_request(&self, prompt: &str) -> DeepSeekRequest {
        DeepSeekRequest {
            model: self.model.clone(),
            temperature: 0.1,
            messages: vec![DeepSeekMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

#[async_trait]
impl LlmJudge for DeepSeekProvider {
    async fn analyze(&self, prompt: &str) -> Result<String, AiProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&self.get_request(prompt))
            .send()
            .await
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(match status.as_u16() {
                401 | 403 => AiProviderError::AuthenticationError(error_text),
                429 => AiProviderError::RateLimited(error_text),
                _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: DeepSeekResponse = response
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                AiProviderError::SerializationError("No choices in DeepSeek response".to_string())
            })
    }

    fn provider_name(&self) -> &'static str {
        "deepseek"
    }
}
