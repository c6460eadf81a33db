pub const SUPPORTED_LLM_PROVIDERS: &[&str] = &["anthropic", "openai", "deepseek", "gemini"];

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_CONTEXT_LINES: usize = 5;
pub const DEFAULT_PATTERN_DIR: &str = "intelligence";

/// Soft budget for the vulnerabilities section of one analysis prompt,
/// counted with the chars/4 approximation.
pub const MAX_PROMPT_TOKENS: usize = 4000;

pub const TRANSLATION_CHUNK_SIZE: usize = 2000;
pub const TRANSLATION_CHUNK_OVERLAP: usize = 200;

pub const MAX_PROVIDER_RETRIES: u32 = 3;
pub const RETRY_BASE_DELAY_MS: u64 = 500;
pub const PROVIDER_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_API_KEY_ENV: &str = "LLM_API_KEY";
pub const PROVIDER_ENV: &str = "LLM_PROVIDER";
pub const DEFAULT_TRANSCRIPT_DIR: &str = "chat_logs";

/// Which language's rule set a framework pattern file extends.
pub const FRAMEWORK_LANGUAGE_MAP: &[(&str, &str)] = &[
    ("laravel", "php"),
    ("symfony", "php"),
    ("django", "python"),
    ("flask", "python"),
    ("fastapi", "python"),
    ("spring", "java"),
    ("rails", "ruby"),
    ("react", "javascript"),
    ("angular", "javascript"),
    ("vue", "javascript"),
    ("express", "javascript"),
    ("gin", "golang"),
    ("echo", "golang"),
];

pub fn framework_language(framework: &str) -> Option<&'static str> {
    FRAMEWORK_LANGUAGE_MAP
        .iter()
        .find(|(name, _)| *name == framework)
        .map(|(_, language)| *language)
}
