use std::env;
use std::fs;

use crate::config::constants::{PROVIDER_ENV, SUPPORTED_LLM_PROVIDERS};
use crate::errors::{VulnhoundError, VulnhoundResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {
    /// Loads `~/.vulnhound/config.toml` when present, then applies
    /// environment overrides. Missing provider or API key is fatal: the run
    /// aborts before any scanning starts.
    pub fn load() -> VulnhoundResult<Config> {
        let mut config = Self::load_file()?;

        if let Ok(provider) = env::var(PROVIDER_ENV) {
            if !provider.is_empty() {
                config.ai.provider = provider;
            }
        }

        if config.ai.provider.is_empty() {
            return Err(VulnhoundError::config_error(
                "No LLM provider configured",
                Some("ai.provider"),
                Some(&format!(
                    "Set {} or add [ai] provider to the config file. Supported: {}",
                    PROVIDER_ENV,
                    SUPPORTED_LLM_PROVIDERS.join(", ")
                )),
            ));
        }

        let provider = config.ai.provider.to_lowercase();
        if !SUPPORTED_LLM_PROVIDERS.contains(&provider.as_str()) {
            return Err(VulnhoundError::config_error(
                &format!("Unsupported LLM provider: {}", config.ai.provider),
                Some("ai.provider"),
                Some(&format!("Supported providers: {}", SUPPORTED_LLM_PROVIDERS.join(", "))),
            ));
        }
        config.ai.provider = provider;

        config.ai.api_key = env::var(&config.ai.api_key_env).unwrap_or_default();
        if config.ai.api_key.is_empty() {
            return Err(VulnhoundError::config_error(
                "No API key found",
                Some("ai.api_key_env"),
                Some(&format!("Set the {} environment variable", config.ai.api_key_env)),
            ));
        }

        Ok(config)
    }

    fn load_file() -> VulnhoundResult<Config> {
        let config_path = dirs::home_dir()
            .map(|d| d.join(".vulnhound/config.toml"))
            .unwrap_or_default();

        if !config_path.exists() {
            return Ok(Config::default());
        }

        log::debug!("Loading config from {}", config_path.display());
        let content = fs::read_to_string(&config_path).map_err(|e| {
            VulnhoundError::file_error(&config_path.display().to_string(), "read", &e.to_string())
        })?;

        toml::from_str(&content).map_err(|e| {
            VulnhoundError::config_error(
                &format!("Invalid config file: {}", e),
                None,
                Some(&format!("Fix {}", config_path.display())),
            )
        })
    }
}
