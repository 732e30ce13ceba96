#![forbid(unsafe_code)]

pub mod error;
pub mod generator;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::{GenerateError, InputField, QuizError};
pub use generator::{GeneratedQuestion, QuestionGenerator};
pub use sessions::{
    QuizAction, QuizLoop, QuizPhase, QuizService, QuizSession, QuizSummary, QuizView,
};
