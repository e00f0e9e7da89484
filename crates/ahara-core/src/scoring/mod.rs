//! Prakriti assessment scoring.
//!
//! Pipeline: Question Bank → Answer Accumulation → Finalization → Classification

mod bank;
mod classifier;
mod scorer;

pub use bank::*;
pub use classifier::*;
pub use scorer::*;

use thiserror::Error;

use crate::error::ErrorKind;

/// Assessment errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Out of sequence: expected question {expected}, got {got}")]
    Sequence { expected: usize, got: usize },

    #[error("Invalid option {option} for question {question} ({available} options)")]
    InvalidOption {
        question: usize,
        option: usize,
        available: usize,
    },

    #[error("Assessment {0} is already complete")]
    AlreadyComplete(String),

    #[error("Invalid question bank: {0}")]
    InvalidBank(String),

    #[error("Invalid tie-break order: {0}")]
    InvalidTieBreak(String),
}

impl AssessmentError {
    /// Error class for callers that only distinguish rejection kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AssessmentError::AlreadyComplete(_) => ErrorKind::State,
            _ => ErrorKind::Validation,
        }
    }
}

pub type AssessmentResult<T> = Result<T, AssessmentError>;
