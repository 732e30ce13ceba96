//! Free-text answer grading.
//!
//! Both sides of a comparison go through [`normalize`]; the stored answer is
//! normalized once when the [`Answer`] is built.

use serde::Serialize;

use crate::model::Answer;

/// Outcome of grading one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub is_correct: bool,
    pub message: String,
}

/// Trim surrounding whitespace and lowercase.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Grade `submitted` against `expected`.
///
/// The message quotes the answer as stored in the table, not its normalized
/// form.
#[must_use]
pub fn grade(submitted: &str, expected: &Answer) -> Grade {
    let is_correct = normalize(submitted) == expected.normalized();
    let message = if is_correct {
        format!("Correct! The answer was '{}'.", expected.stored())
    } else {
        format!("Wrong! The correct answer was '{}'.", expected.stored())
    };
    Grade {
        is_correct,
        message,
    }
}
