use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;

/// Writes each prompt/response exchange to a timestamped JSON file.
/// Purely diagnostic: failures are logged and swallowed, and the
/// transcripts never contain credentials.
#[derive(Clone)]
pub struct TranscriptLogger {
    directory: PathBuf,
}

#[derive(Serialize)]
struct TranscriptEntry<'a> {
    timestamp: String,
    provider: &'a str,
    exchange: &'a str,
    prompt: &'a str,
    response: &'a str,
}

impl TranscriptLogger {
    pub fn new(directory: &str) -> Self {
        Self {
            directory: PathBuf::from(directory),
        }
    }

    /// `exchange` labels what the prompt was for, e.g. "analysis" or
    /// "translation".
    pub fn record(&self, provider: &str, exchange: &str, prompt: &str, response: &str) {
        if let Err(e) = self.write_entry(provider, exchange, prompt, response) {
            log::warn!("Failed to write chat transcript: {}", e);
        }
    }

    fn write_entry(
        &self,
        provider: &str,
        exchange: &str,
        prompt: &str,
        response: &str,
    ) -> std::io::Result<()> {
        fs::create_dir_all(&self.directory)?;

        let now = Utc::now();
        let entry = TranscriptEntry {
            timestamp: now.to_rfc3339(),
            provider,
            exchange,
            prompt,
            response,
        };

        let file_name = format!(
            "{}_{}_{}.json",
            now.format("%Y%m%d_%H%M%S%3f"),
            provider,
            exchange
        );
        let body = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.directory.join(file_name), body)
    }
}
