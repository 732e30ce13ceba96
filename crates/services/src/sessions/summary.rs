use chrono::{DateTime, Duration, Utc};

/// Final tally handed back when a quiz is quit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub name: String,
    pub score: u32,
    pub trials: u32,
    pub symbols_asked: usize,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl QuizSummary {
    /// Message shown to the player on quit.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Quiz ended. Well done, {}! Your total score: {}/{} points.",
            self.name, self.score, self.trials
        )
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> i64 {
        self.elapsed.num_seconds()
    }
}
