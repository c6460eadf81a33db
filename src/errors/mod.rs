use std::error::Error as StdError;
use std::fmt;

use crate::enums::ai_provider_error::AiProviderError;

pub type VulnhoundResult<T> = Result<T, VulnhoundError>;

#[derive(Debug, Clone)]
pub enum VulnhoundError {
    // Configuration errors (fatal before scanning begins)
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },

    // Pattern file errors
    PatternFormatError {
        file: String,
        section: String,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Scan errors (invalid target path and similar)
    ScanError {
        target: String,
        reason: String,
    },

    // Analysis pipeline errors
    AnalysisError {
        stage: String,
        reason: String,
    },

    // Provider errors that could not be degraded to fallback verdicts
    ProviderError(AiProviderError),
}

impl VulnhoundError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn pattern_format_error(file: &str, section: &str, reason: &str) -> Self {
        Self::PatternFormatError {
            file: file.to_string(),
            section: section.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn scan_error(target: &str, reason: &str) -> Self {
        Self::ScanError {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(stage: &str, reason: &str) -> Self {
        Self::AnalysisError {
            stage: stage.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for VulnhoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                write!(f, "Configuration Error: {}", message)?;
                if let Some(field) = field {
                    write!(f, " (field: {})", field)?;
                }
                if let Some(suggestion) = suggestion {
                    write!(f, "\n💡 Suggestion: {}", suggestion)?;
                }
                Ok(())
            }
            Self::PatternFormatError { file, section, reason } => {
                write!(f, "Pattern Format Error in {} [{}]: {}", file, section, reason)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                write!(f, "File Error: {} failed for {}: {}", operation, file_path, reason)
            }
            Self::ScanError { target, reason } => {
                write!(f, "Scan Error for {}: {}", target, reason)
            }
            Self::AnalysisError { stage, reason } => {
                write!(f, "Analysis Error during {}: {}", stage, reason)
            }
            Self::ProviderError(error) => write!(f, "Provider Error: {}", error),
        }
    }
}

impl StdError for VulnhoundError {}

impl From<AiProviderError> for VulnhoundError {
    fn from(error: AiProviderError) -> Self {
        Self::ProviderError(error)
    }
}
