// src/infra/errors.rs — Error types for learnpath

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LearnpathError {
    // Setup errors (raised before any collaborator call)
    #[error("Configuration error: {0}")]
    Configuration(String),

    // Response errors
    #[error("Failed to parse AI response: {0}")]
    Parse(String),

    #[error("Roadmap failed validation: {}", errors.join("; "))]
    InvalidRoadmap { errors: Vec<String> },

    // Status-mapped collaborator errors (surfaced verbatim, never retried here)
    #[error("Invalid API credentials")]
    InvalidCredentials,

    #[error("API quota exceeded")]
    QuotaExceeded,

    #[error("Rate limited by AI service")]
    RateLimited,

    #[error("AI service unavailable (status {status})")]
    ServiceUnavailable { status: u16 },

    #[error("Unexpected response status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    // Collaborator transport failure, passed through unchanged
    #[error("Transport error: {0}")]
    Transport(String),

    // Infra
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LearnpathError {
    /// Errors a caller may reasonably retry later. Nothing in this crate retries.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            LearnpathError::RateLimited | LearnpathError::ServiceUnavailable { .. }
        )
    }

    /// Map a non-success response status from the AI collaborator.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => LearnpathError::InvalidCredentials,
            402 => LearnpathError::QuotaExceeded,
            429 => LearnpathError::RateLimited,
            500..=599 => LearnpathError::ServiceUnavailable { status },
            _ => LearnpathError::UnexpectedStatus {
                status,
                message: crate::util::truncate_str(body, 200).to_string(),
            },
        }
    }
}
