use std::collections::HashSet;

use quiz_core::model::{Answer, Question, SymbolTable};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::GenerateError;

/// Lower bound on random draws before falling back to a direct pick.
const MIN_ATTEMPTS: usize = 32;
/// Random draws allowed per table row.
const ATTEMPTS_PER_ROW: usize = 4;

/// A question together with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedQuestion {
    pub question: Question,
    pub answer: Answer,
}

impl GeneratedQuestion {
    #[must_use]
    pub fn symbol(&self) -> &str {
        self.question.symbol()
    }
}

/// Picks an unused symbol and one of its known properties.
///
/// Rows are drawn uniformly at random and rejected until one is eligible.
/// Eligibility is counted up front, so an exhausted table fails straight
/// away, and the number of draws is capped; past the cap one of the eligible
/// rows is picked directly, which keeps the distribution uniform.
///
/// The generator never touches `used`; callers record the returned symbol.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionGenerator {
    max_attempts: Option<usize>,
}

impl QuestionGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the draw cap (mostly for tests).
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    fn attempt_cap(&self, rows: usize) -> usize {
        self.max_attempts
            .unwrap_or_else(|| rows.saturating_mul(ATTEMPTS_PER_ROW).max(MIN_ATTEMPTS))
    }

    /// Generate a question about a symbol not in `used`.
    ///
    /// # Errors
    ///
    /// Returns `GenerateError::NoEligibleSymbol` when every askable symbol has
    /// been used, or the table has none.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        table: &SymbolTable,
        used: &HashSet<String>,
        rng: &mut R,
    ) -> Result<GeneratedQuestion, GenerateError> {
        let exhausted = || GenerateError::NoEligibleSymbol { used: used.len() };

        let eligible = table.eligible_indices(used);
        if eligible.is_empty() {
            return Err(exhausted());
        }

        let mut picked = None;
        for _ in 0..self.attempt_cap(table.len()) {
            let Some(idx) = table.sample_index(rng) else {
                break;
            };
            if table.get(idx).is_some_and(|record| record.is_eligible(used)) {
                picked = Some(idx);
                break;
            }
        }
        let idx = match picked {
            Some(idx) => idx,
            None => {
                tracing::debug!(
                    eligible = eligible.len(),
                    "draw cap reached; picking among eligible rows"
                );
                *eligible.choose(rng).ok_or_else(exhausted)?
            }
        };

        let record = table.get(idx).ok_or_else(exhausted)?;
        let symbol = record.symbol().ok_or_else(exhausted)?;
        let known: Vec<_> = record.known_properties().collect();
        let (property, value) = *known.choose(rng).ok_or_else(exhausted)?;

        Ok(GeneratedQuestion {
            question: Question::new(symbol, property.clone()),
            answer: Answer::new(value),
        })
    }
}
