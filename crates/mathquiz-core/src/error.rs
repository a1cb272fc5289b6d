//! Quiz error types.
//!
//! Generation errors (`BadArguments`) abort the batch being built. Validation
//! and answer errors are scoped to a single question; the session classifies
//! them with [`QuizError::is_recoverable`] and moves on.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while generating, validating, or answering problems.
#[derive(Debug, Error)]
pub enum QuizError {
    /// A caller supplied an out-of-domain parameter.
    #[error("bad arguments: {0}")]
    BadArguments(String),

    /// A validator could not compute or accept a result.
    #[error("{message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<QuizError>>,
    },

    /// The user's answer could not be read as an integer.
    #[error("invalid answer '{input}': {source}")]
    InvalidAnswer {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// The answer source failed.
    #[error("failed to read answer: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    pub(crate) fn bad_arguments(message: impl Into<String>) -> Self {
        QuizError::BadArguments(message.into())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        QuizError::Validation {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn validation_caused_by(message: impl Into<String>, cause: QuizError) -> Self {
        QuizError::Validation {
            message: message.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Returns `true` if the error only affects the current question.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            QuizError::Validation { .. } | QuizError::InvalidAnswer { .. }
        )
    }
}

/// Result alias used across the core crate.
pub type Result<T> = std::result::Result<T, QuizError>;
