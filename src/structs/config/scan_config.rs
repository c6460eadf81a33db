use serde::{Deserialize, Serialize};
use crate::config::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CONTEXT_LINES, DEFAULT_TRANSCRIPT_DIR, MAX_PROMPT_TOKENS,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    #[serde(default = "default_max_prompt_tokens")]
    pub max_prompt_tokens: usize,

    /// Persist every LLM request/response pair for auditing.
    #[serde(default)]
    pub log_transcript: bool,

    #[serde(default = "default_transcript_dir")]
    pub transcript_dir: String,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

fn default_max_prompt_tokens() -> usize {
    MAX_PROMPT_TOKENS
}

fn default_transcript_dir() -> String {
    DEFAULT_TRANSCRIPT_DIR.to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            context_lines: default_context_lines(),
            max_prompt_tokens: default_max_prompt_tokens(),
            log_transcript: false,
            transcript_dir: default_transcript_dir(),
        }
    }
}
