pub mod anthropic;
pub mod openai;
pub mod deepseek;
pub mod gemini;

use std::sync::Arc;

use crate::config::constants::SUPPORTED_LLM_PROVIDERS;
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::structs::config::ai_config::AiConfig;
use crate::traits::llm_judge::LlmJudge;

use anthropic::AnthropicProvider;
use deepseek::DeepSeekProvider;
use gemini::GeminiProvider;
use openai::OpenAiProvider;

/// Picks the provider adapter from configuration. Everything past this
/// point only sees the `LlmJudge` capability.
pub fn create_judge(ai: &AiConfig) -> VulnhoundResult<Arc<dyn LlmJudge>> {
    let api_key = ai.api_key.clone();
    let model = ai.model.clone();

    match ai.provider.as_str() {
        "anthropic" => Ok(Arc::new(AnthropicProvider::new(api_key, model))),
        "openai" => Ok(Arc::new(OpenAiProvider::new(api_key, model))),
        "deepseek" => Ok(Arc::new(DeepSeekProvider::new(api_key, model))),
        "gemini" => Ok(Arc::new(GeminiProvider::new(api_key, model))),
        other => Err(VulnhoundError::config_error(
            &format!("Unsupported LLM provider: {}", other),
            Some("ai.provider"),
            Some(&format!("Supported providers: {}", SUPPORTED_LLM_PROVIDERS.join(", "))),
        )),
    }
}
