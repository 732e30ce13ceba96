use std::fmt;

use serde::Serialize;

/// Lifecycle of a quiz session.
///
/// `Ended` is only ever reported by the view returned from `quit`; the
/// session itself is already back in `Idle` by then.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    Idle,
    /// A question is shown and awaits an answer.
    Active,
    /// The answer was graded; the next question may be requested.
    Graded,
    Ended,
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Active => "active",
            QuizPhase::Graded => "graded",
            QuizPhase::Ended => "ended",
        };
        f.write_str(label)
    }
}

/// Events the presentation layer can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizAction {
    Start,
    Submit,
    Next,
    Quit,
}

impl QuizAction {
    /// Whether `self` is a legal event in `phase`.
    #[must_use]
    pub fn allowed_in(self, phase: QuizPhase) -> bool {
        matches!(
            (self, phase),
            (QuizAction::Start, QuizPhase::Idle)
                | (QuizAction::Submit, QuizPhase::Active)
                | (QuizAction::Next, QuizPhase::Graded)
                | (QuizAction::Quit, QuizPhase::Active | QuizPhase::Graded)
        )
    }
}

impl fmt::Display for QuizAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuizAction::Start => "start the quiz",
            QuizAction::Submit => "submit an answer",
            QuizAction::Next => "show the next symbol",
            QuizAction::Quit => "quit",
        };
        f.write_str(label)
    }
}
