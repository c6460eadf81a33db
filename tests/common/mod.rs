use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use vulnhound::enums::ai_provider_error::AiProviderError;
use vulnhound::traits::llm_judge::LlmJudge;

/// Test double that replays canned responses in order and records every
/// prompt it was given. Runs out of responses loudly.
pub struct MockJudge {
    responses: Mutex<Vec<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl MockJudge {
    pub fn new(responses: Vec<&str>) -> Self {
        let mut queued: Vec<String> = responses.into_iter().map(String::from).collect();
        queued.reverse();
        Self {
            responses: Mutex::new(queued),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmJudge for MockJudge {
    async fn analyze(&self, prompt: &str) -> Result<String, AiProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop()
            .ok_or_else(|| AiProviderError::ApiError("mock judge ran out of responses".to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Always fails with the given error, counting attempts.
pub struct FailingJudge {
    error: fn() -> AiProviderError,
    pub calls: AtomicUsize,
}

impl FailingJudge {
    pub fn new(error: fn() -> AiProviderError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmJudge for FailingJudge {
    async fn analyze(&self, _prompt: &str) -> Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.error)())
    }

    fn provider_name(&self) -> &'static str {
        "failing"
    }
}

/// Builds a well-formed analysis response for `count` findings.
pub fn analysis_response(verdicts: &[(&str, &str)]) -> String {
    let mut response = String::new();
    for (index, (assessment, severity)) in verdicts.iter().enumerate() {
        response.push_str(&format!(
            "ANALYSIS FOR VULNERABILITY {}:\n## Assessment\n{}\n\n## Severity\n{}\n\n## Analysis\nDetailed reasoning for finding {}.\n\n## Recommendation\nRemediation for finding {}.\n\n",
            index + 1,
            assessment,
            severity,
            index + 1,
            index + 1
        ));
    }
    response
}
