use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::grading::{Grade, grade};
use quiz_core::model::{Question, SymbolTable};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::state::{QuizAction, QuizPhase};
use super::summary::QuizSummary;
use crate::error::{InputField, QuizError};
use crate::generator::{GeneratedQuestion, QuestionGenerator};

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// State machine for one player's quiz.
///
/// `Idle -> Active -> Graded -> Active ... -> (quit) -> Idle`. Every
/// transition either succeeds completely or returns an error and leaves the
/// session as it was. The symbol table is shared and never mutated.
pub struct QuizSession {
    table: Arc<SymbolTable>,
    generator: QuestionGenerator,
    rng: StdRng,
    clock: Clock,
    name: String,
    score: u32,
    trials: u32,
    used: HashSet<String>,
    current: Option<GeneratedQuestion>,
    last_grade: Option<Grade>,
    phase: QuizPhase,
    started_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(table: Arc<SymbolTable>, clock: Clock) -> Self {
        Self {
            table,
            generator: QuestionGenerator::new(),
            rng: StdRng::from_os_rng(),
            clock,
            name: String::new(),
            score: 0,
            trials: 0,
            used: HashSet::new(),
            current: None,
            last_grade: None,
            phase: QuizPhase::Idle,
            started_at: None,
        }
    }

    /// Use a seeded RNG so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_generator(mut self, generator: QuestionGenerator) -> Self {
        self.generator = generator;
        self
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    /// Player name; empty until a quiz has been started.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of graded answers.
    #[must_use]
    pub fn trials(&self) -> u32 {
        self.trials
    }

    /// Symbols already asked in this session.
    #[must_use]
    pub fn used_symbols(&self) -> &HashSet<String> {
        &self.used
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref().map(|generated| &generated.question)
    }

    /// Result of the most recent answer while in `Graded`.
    #[must_use]
    pub fn last_grade(&self) -> Option<&Grade> {
        self.last_grade.as_ref()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// False once every eligible symbol has been asked in this session.
    #[must_use]
    pub fn has_more_questions(&self) -> bool {
        self.table.eligible_count(&self.used) > 0
    }

    fn ensure_allowed(&self, action: QuizAction) -> Result<(), QuizError> {
        if action.allowed_in(self.phase) {
            Ok(())
        } else {
            Err(QuizError::InvalidTransition {
                action,
                phase: self.phase,
            })
        }
    }

    fn draw_question(&mut self) -> Result<GeneratedQuestion, QuizError> {
        self.generator
            .generate(&self.table, &self.used, &mut self.rng)
            .map_err(|err| {
                tracing::warn!(used = self.used.len(), error = %err, "no question available");
                QuizError::from(err)
            })
    }

    fn install(&mut self, generated: GeneratedQuestion) -> &Question {
        self.used.insert(generated.symbol().to_string());
        self.last_grade = None;
        self.phase = QuizPhase::Active;
        &self.current.insert(generated).question
    }

    /// Start a quiz for `name`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyInput(Name)` for a blank name,
    /// `QuizError::Generate` if the table has nothing to ask, and
    /// `QuizError::InvalidTransition` outside `Idle`.
    pub fn start_quiz(&mut self, name: &str) -> Result<&Question, QuizError> {
        self.ensure_allowed(QuizAction::Start)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::EmptyInput(InputField::Name));
        }

        let generated = self.draw_question()?;
        self.name = name.to_string();
        self.started_at = Some(self.clock.now());
        tracing::info!(player = %self.name, symbol = generated.symbol(), "quiz started");
        Ok(self.install(generated))
    }

    /// Grade `text` against the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyInput(Answer)` for a blank answer and
    /// `QuizError::InvalidTransition` outside `Active`.
    pub fn submit_answer(&mut self, text: &str) -> Result<&Grade, QuizError> {
        self.ensure_allowed(QuizAction::Submit)?;
        if text.trim().is_empty() {
            return Err(QuizError::EmptyInput(InputField::Answer));
        }
        let Some(current) = self.current.as_ref() else {
            return Err(QuizError::InvalidTransition {
                action: QuizAction::Submit,
                phase: self.phase,
            });
        };

        let result = grade(text, &current.answer);
        self.trials += 1;
        if result.is_correct {
            self.score += 1;
        }
        tracing::debug!(
            symbol = current.symbol(),
            correct = result.is_correct,
            score = self.score,
            trials = self.trials,
            "answer graded"
        );
        self.phase = QuizPhase::Graded;
        Ok(self.last_grade.insert(result))
    }

    /// Move on to a fresh symbol.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Generate` when every symbol has been asked (the
    /// session stays in `Graded`) and `QuizError::InvalidTransition` outside
    /// `Graded`.
    pub fn next_question(&mut self) -> Result<&Question, QuizError> {
        self.ensure_allowed(QuizAction::Next)?;
        let generated = self.draw_question()?;
        tracing::debug!(symbol = generated.symbol(), asked = self.used.len() + 1, "next question");
        Ok(self.install(generated))
    }

    /// End the quiz and reset the session, clearing the player name.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidTransition` unless `Active` or `Graded`.
    pub fn quit(&mut self) -> Result<QuizSummary, QuizError> {
        self.ensure_allowed(QuizAction::Quit)?;
        let started_at = self.started_at.unwrap_or_else(|| self.clock.now());
        let summary = QuizSummary {
            name: std::mem::take(&mut self.name),
            score: self.score,
            trials: self.trials,
            symbols_asked: self.used.len(),
            started_at,
            elapsed: self.clock.elapsed_since(started_at),
        };
        tracing::info!(
            player = %summary.name,
            score = summary.score,
            trials = summary.trials,
            elapsed_secs = summary.elapsed_secs(),
            "quiz ended"
        );
        self.reset();
        Ok(summary)
    }

    fn reset(&mut self) {
        self.name.clear();
        self.score = 0;
        self.trials = 0;
        self.used.clear();
        self.current = None;
        self.last_grade = None;
        self.phase = QuizPhase::Idle;
        self.started_at = None;
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase)
            .field("name", &self.name)
            .field("score", &self.score)
            .field("trials", &self.trials)
            .field("used_len", &self.used.len())
            .field("current", &self.current_question().map(Question::symbol))
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
