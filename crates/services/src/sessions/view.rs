use serde::Serialize;

use super::service::QuizSession;
use super::state::{QuizAction, QuizPhase};
use super::summary::QuizSummary;
use crate::error::QuizError;

/// Everything a presentation layer needs to draw the quiz after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub phase: QuizPhase,
    pub name: String,
    pub prompt: Option<String>,
    pub result: Option<String>,
    pub last_correct: Option<bool>,
    pub score: u32,
    pub trials: u32,
    pub error: Option<String>,
    pub summary: Option<String>,
    /// Distinct symbols shown before quitting; set only when `Ended`.
    pub symbols_asked: Option<usize>,
    /// Whole seconds from start to quit; set only when `Ended`.
    pub elapsed_secs: Option<i64>,
    pub can_submit: bool,
    /// False in `Graded` once the table has nothing left to ask.
    pub can_advance: bool,
}

impl QuizView {
    /// Snapshot of the session as it stands.
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let phase = session.phase();
        let grade = session.last_grade();
        Self {
            phase,
            name: session.name().to_string(),
            prompt: session
                .current_question()
                .map(|question| question.prompt().to_string()),
            result: grade.map(|grade| grade.message.clone()),
            last_correct: grade.map(|grade| grade.is_correct),
            score: session.score(),
            trials: session.trials(),
            error: None,
            summary: None,
            symbols_asked: None,
            elapsed_secs: None,
            can_submit: QuizAction::Submit.allowed_in(phase),
            can_advance: QuizAction::Next.allowed_in(phase) && session.has_more_questions(),
        }
    }

    /// View shown right after quitting.
    #[must_use]
    pub fn ended(summary: &QuizSummary) -> Self {
        Self {
            phase: QuizPhase::Ended,
            name: summary.name.clone(),
            prompt: None,
            result: None,
            last_correct: None,
            score: summary.score,
            trials: summary.trials,
            error: None,
            summary: Some(summary.message()),
            symbols_asked: Some(summary.symbols_asked),
            elapsed_secs: Some(summary.elapsed_secs()),
            can_submit: false,
            can_advance: false,
        }
    }

    #[must_use]
    pub fn with_error(mut self, err: &QuizError) -> Self {
        self.error = Some(err.to_string());
        self
    }

    /// Serialize as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
