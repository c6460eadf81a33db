use serde::{Deserialize, Serialize};
use crate::config::constants::DEFAULT_API_KEY_ENV;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AiConfig {
    /// Provider identifier: anthropic, openai, deepseek or gemini.
    #[serde(default)]
    pub provider: String,

    /// Provider model override; every adapter carries its own default.
    #[serde(default)]
    pub model: Option<String>,

    /// Environment variable the API key is read from.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Resolved at load time, never serialized back out.
    #[serde(skip)]
    pub api_key: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: String::new(),
            model: None,
            api_key_env: default_api_key_env(),
            api_key: String::new(),
        }
    }
}
