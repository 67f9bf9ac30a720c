//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::BatchError;

/// Message shown when the generation service itself fails.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate questions. Please try again later.";

/// Errors emitted by a `QuestionGenerator`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("question generation is not configured")]
    Disabled,
    #[error("question generation returned an empty response")]
    EmptyResponse,
    #[error("question generation was blocked: {0}")]
    Blocked(String),
    #[error("question generation request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Batch(#[from] BatchError),
}

impl QuizServiceError {
    /// Text for the error screen.
    ///
    /// Transport failures get a generic message; validation failures keep their own.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Generation(_) => GENERATION_FAILED_MESSAGE.to_string(),
            Self::Batch(err) => err.to_string(),
        }
    }
}
