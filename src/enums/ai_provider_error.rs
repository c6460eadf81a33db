use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AiProviderError {
    #[error("API Error: {0}")]
    ApiError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),
    #[error("Rate Limited: {0}")]
    RateLimited(String),
}

impl AiProviderError {
    /// Transient failures worth another attempt: rate limiting and network
    /// problems (timeouts surface as network errors from reqwest).
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AiProviderError::RateLimited(_) | AiProviderError::NetworkError(_)
        )
    }

    /// Authentication failures abort the whole run; retrying cannot help.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AiProviderError::AuthenticationError(_))
    }
}
