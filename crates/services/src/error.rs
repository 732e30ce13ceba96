//! Shared error types for the services crate.

use thiserror::Error;

use crate::sessions::{QuizAction, QuizPhase};

/// Errors emitted by `QuestionGenerator`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("no IPA symbols left to ask about ({used} already asked)")]
    NoEligibleSymbol { used: usize },
}

/// User input that must not be blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Answer,
}

impl InputField {
    /// Retry prompt shown when the field is left blank.
    #[must_use]
    pub fn prompt(self) -> &'static str {
        match self {
            InputField::Name => "Please enter your name to start the quiz.",
            InputField::Answer => "Please enter an answer before submitting.",
        }
    }
}

/// Errors emitted by quiz session transitions.
///
/// A failed transition leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("{}", .0.prompt())]
    EmptyInput(InputField),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("cannot {action} while the quiz is {phase}")]
    InvalidTransition { action: QuizAction, phase: QuizPhase },
}

impl QuizError {
    /// True when the table has run out of questions for this session.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self,
            QuizError::Generate(GenerateError::NoEligibleSymbol { .. })
        )
    }
}
