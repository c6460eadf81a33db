use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;

/// The single capability the pipeline needs from any provider: send a
/// prompt, get text back. Adapters are interchangeable behind this trait;
/// nothing downstream branches on provider identity.
#[async_trait]
pub trait LlmJudge: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<String, AiProviderError>;

    fn provider_name(&self) -> &'static str;
}
