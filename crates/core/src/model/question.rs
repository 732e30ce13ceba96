use serde::Serialize;

use crate::grading::normalize;
use crate::model::property::PropertyName;

/// A question about one property of one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    symbol: String,
    property: PropertyName,
    prompt: String,
}

impl Question {
    #[must_use]
    pub fn new(symbol: impl Into<String>, property: PropertyName) -> Self {
        let symbol = symbol.into();
        let prompt = format!(
            "IPA Symbol: {symbol}\nWhat is the {} of this IPA symbol?",
            property.as_str().to_lowercase()
        );
        Self {
            symbol,
            property,
            prompt,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn property(&self) -> &PropertyName {
        &self.property
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Expected answer to a [`Question`].
///
/// Keeps the table value (surrounding whitespace dropped, case kept) for
/// display and its normalized form for comparison; both are computed once here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    stored: String,
    normalized: String,
}

impl Answer {
    #[must_use]
    pub fn new(stored: impl Into<String>) -> Self {
        let raw: String = stored.into();
        let stored = raw.trim().to_string();
        let normalized = normalize(&stored);
        Self { stored, normalized }
    }

    #[must_use]
    pub fn stored(&self) -> &str {
        &self.stored
    }

    #[must_use]
    pub fn normalized(&self) -> &str {
        &self.normalized
    }
}
