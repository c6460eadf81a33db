use std::sync::Arc;
use std::time::Duration;

use crate::config::constants::{MAX_PROVIDER_RETRIES, RETRY_BASE_DELAY_MS};
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::helpers::prompt_generator::batch_analysis_prompt;
use crate::services::transcript_logger::TranscriptLogger;
use crate::services::verdict_parser::VerdictParser;
use crate::structs::extraction::Extraction;
use crate::structs::verdict::Verdict;
use crate::traits::llm_judge::LlmJudge;

/// Sends findings to the model in fixed-size batches and turns the
/// responses into verdicts. A batch that keeps failing after retries is
/// filled with fallback verdicts; only authentication failures abort the
/// whole analysis.
pub struct BatchAnalyzer {
    judge: Arc<dyn LlmJudge>,
    parser: VerdictParser,
    transcript: Option<TranscriptLogger>,
    batch_size: usize,
    max_prompt_tokens: usize,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl BatchAnalyzer {
    pub fn new(
        judge: Arc<dyn LlmJudge>,
        transcript: Option<TranscriptLogger>,
        batch_size: usize,
        max_prompt_tokens: usize,
    ) -> Self {
        Self {
            judge,
            parser: VerdictParser::new(),
            transcript,
            batch_size: batch_size.max(1),
            max_prompt_tokens,
            max_retries: MAX_PROVIDER_RETRIES,
            retry_base_delay: Duration::from_millis(RETRY_BASE_DELAY_MS),
        }
    }

    /// Overrides the retry schedule. Mostly useful in tests, where real
    /// backoff delays have no place.
    pub fn with_retry_policy(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries.max(1);
        self.retry_base_delay = base_delay;
        self
    }

    /// One verdict per extraction, in the same order. Batches run
    /// sequentially so provider rate limits stay predictable.
    pub async fn analyze(&self, extractions: &[Extraction]) -> VulnhoundResult<Vec<Verdict>> {
        let mut verdicts = Vec::with_capacity(extractions.len());

        for (batch_index, batch) in extractions.chunks(self.batch_size).enumerate() {
            log::info!(
                "Analyzing batch {} ({} finding{})",
                batch_index + 1,
                batch.len(),
                if batch.len() == 1 { "" } else { "s" }
            );

            let prompt = batch_analysis_prompt(batch, self.max_prompt_tokens);

            match self.request_with_retry(&prompt).await {
                Ok(response) => {
                    if let Some(transcript) = &self.transcript {
                        transcript.record(self.judge.provider_name(), "analysis", &prompt, &response);
                    }
                    verdicts.extend(self.parser.parse_batch(&response, batch.len()));
                }
                Err(e) if e.is_fatal() => {
                    return Err(VulnhoundError::from(e));
                }
                Err(e) => {
                    log::warn!(
                        "Batch {} failed after {} attempts: {}. Using fallback verdicts.",
                        batch_index + 1,
                        self.max_retries,
                        e
                    );
                    let reason = format!("Automated analysis failed: {}", e);
                    verdicts.extend(batch.iter().map(|_| Verdict::fallback(&reason)));
                }
            }
        }

        Ok(verdicts)
    }

    async fn request_with_retry(
        &self,
        prompt: &str,
    ) -> Result<String, crate::enums::ai_provider_error::AiProviderError> {
        let mut attempt = 1;

        loop {
            match self.judge.analyze(prompt).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) if attempt >= self.max_retries || !e.is_retryable() => return Err(e),
                Err(e) => {
                    let delay = self.retry_base_delay * 2u32.pow(attempt - 1);
                    log::warn!(
                        "Provider request failed (attempt {}/{}): {}. Retrying in {:?}",
                        attempt,
                        self.max_retries,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
