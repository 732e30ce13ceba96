use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::model::{LoadError, SymbolTable, TableSchema};
use storage::{SymbolSource, load_table};

use super::service::QuizSession;
use super::view::QuizView;
use crate::Clock;
use crate::error::QuizError;

/// Event interface for a presentation layer.
///
/// Wraps one [`QuizSession`]; every event returns a complete [`QuizView`] to
/// render, with any failure rendered into `QuizView::error`.
#[derive(Debug)]
pub struct QuizLoop {
    session: QuizSession,
    last_error: Option<QuizError>,
}

impl QuizLoop {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            last_error: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Typed error from the most recent event, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&QuizError> {
        self.last_error.as_ref()
    }

    /// Current view without sending an event.
    #[must_use]
    pub fn view(&self) -> QuizView {
        let view = QuizView::from_session(&self.session);
        match &self.last_error {
            Some(err) => view.with_error(err),
            None => view,
        }
    }

    fn settle<T>(&mut self, outcome: Result<T, QuizError>) -> QuizView {
        self.last_error = outcome.err();
        self.view()
    }

    pub fn start_quiz(&mut self, name: &str) -> QuizView {
        let outcome = self.session.start_quiz(name).map(|_| ());
        self.settle(outcome)
    }

    pub fn submit_answer(&mut self, text: &str) -> QuizView {
        let outcome = self.session.submit_answer(text).map(|_| ());
        self.settle(outcome)
    }

    pub fn next_question(&mut self) -> QuizView {
        let outcome = self.session.next_question().map(|_| ());
        self.settle(outcome)
    }

    pub fn quit(&mut self) -> QuizView {
        match self.session.quit() {
            Ok(summary) => {
                self.last_error = None;
                QuizView::ended(&summary)
            }
            Err(err) => self.settle::<()>(Err(err)),
        }
    }
}

/// Owns the shared symbol table and hands out isolated sessions.
#[derive(Debug)]
pub struct QuizService {
    table: Arc<SymbolTable>,
    clock: Clock,
    seed: Option<u64>,
    opened: AtomicU64,
}

impl QuizService {
    #[must_use]
    pub fn new(table: Arc<SymbolTable>, clock: Clock) -> Self {
        Self {
            table,
            clock,
            seed: None,
            opened: AtomicU64::new(0),
        }
    }

    /// Load the table from `source`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the source is unreadable or lacks the symbol
    /// column.
    pub async fn from_source(
        source: &dyn SymbolSource,
        schema: TableSchema,
        clock: Clock,
    ) -> Result<Self, LoadError> {
        let table = load_table(source, schema).await?;
        Ok(Self::new(Arc::new(table), clock))
    }

    /// Seed sessions deterministically; the n-th session gets `seed + n`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn table(&self) -> &Arc<SymbolTable> {
        &self.table
    }

    /// Open a fresh session sharing this service's table.
    #[must_use]
    pub fn open_session(&self) -> QuizLoop {
        let n = self.opened.fetch_add(1, Ordering::Relaxed);
        let mut session = QuizSession::new(Arc::clone(&self.table), self.clock);
        if let Some(seed) = self.seed {
            session = session.with_seed(seed.wrapping_add(n));
        }
        tracing::debug!(session = n, "quiz session opened");
        QuizLoop::new(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::QuizPhase;
    use quiz_core::model::{PropertyName, SymbolRecord};
    use quiz_core::time::fixed_clock;

    fn service() -> QuizService {
        let records = vec![
            SymbolRecord::new(
                Some("p"),
                [(PropertyName::new("Voicing").unwrap(), Some("voiceless".to_string()))],
            ),
            SymbolRecord::new(
                Some("m"),
                [(PropertyName::new("Manner").unwrap(), Some("Nasal".to_string()))],
            ),
        ];
        let table = SymbolTable::from_records(TableSchema::default(), records);
        QuizService::new(Arc::new(table), fixed_clock()).with_seed(3)
    }

    #[test]
    fn idle_view_offers_nothing_but_start() {
        let quiz = service().open_session();
        let view = quiz.view();
        assert_eq!(view.phase, QuizPhase::Idle);
        assert!(view.prompt.is_none());
        assert!(!view.can_submit && !view.can_advance);
    }

    #[test]
    fn blank_answer_shows_prompt_and_keeps_question() {
        let mut quiz = service().open_session();
        let started = quiz.start_quiz("Ava");
        assert_eq!(started.phase, QuizPhase::Active);
        assert!(started.can_submit);

        let view = quiz.submit_answer("");
        assert_eq!(
            view.error.as_deref(),
            Some("Please enter an answer before submitting.")
        );
        assert_eq!(view.prompt, started.prompt);
        assert_eq!(view.trials, 0);
        assert!(quiz.last_error().is_some());
    }

    #[test]
    fn successful_event_clears_previous_error() {
        let mut quiz = service().open_session();
        assert!(quiz.start_quiz("").error.is_some());
        let view = quiz.start_quiz("Ava");
        assert!(view.error.is_none());
        assert!(quiz.last_error().is_none());
    }

    #[test]
    fn graded_view_shows_result_and_next_affordance() {
        let mut quiz = service().open_session();
        quiz.start_quiz("Ava");
        let view = quiz.submit_answer("definitely wrong");
        assert_eq!(view.phase, QuizPhase::Graded);
        assert_eq!(view.last_correct, Some(false));
        assert!(view.result.unwrap().starts_with("Wrong!"));
        assert!(view.can_advance);
        assert!(!view.can_submit);
        assert!(view.prompt.is_some());
    }

    #[test]
    fn exhausted_table_withdraws_next_affordance() {
        let mut quiz = service().open_session();
        quiz.start_quiz("Ava");
        quiz.submit_answer("guess");
        assert!(quiz.next_question().error.is_none());

        let last = quiz.submit_answer("guess");
        assert_eq!(last.phase, QuizPhase::Graded);
        assert!(!last.can_advance);

        let view = quiz.next_question();
        assert!(quiz.last_error().is_some_and(QuizError::is_exhausted));
        assert_eq!(view.phase, QuizPhase::Graded);
        assert!(!view.can_advance);
        assert_eq!(view.trials, 2);
    }

    #[test]
    fn quit_from_idle_is_reported() {
        let mut quiz = service().open_session();
        let view = quiz.quit();
        assert_eq!(view.phase, QuizPhase::Idle);
        assert_eq!(
            view.error.as_deref(),
            Some("cannot quit while the quiz is idle")
        );
    }

    #[test]
    fn sessions_are_isolated() {
        let service = service();
        let mut first = service.open_session();
        let mut second = service.open_session();

        first.start_quiz("Ava");
        assert_eq!(first.session().used_symbols().len(), 1);
        assert_eq!(second.view().phase, QuizPhase::Idle);

        second.start_quiz("Ben");
        first.quit();
        assert_eq!(second.view().name, "Ben");
        assert_eq!(second.session().used_symbols().len(), 1);
        assert_eq!(Arc::strong_count(service.table()), 3);
    }
}
