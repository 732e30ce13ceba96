use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Properties asked about when no explicit list is configured.
pub const DEFAULT_PROPERTIES: [&str; 5] = ["Voicing", "Place", "Centrality", "Oro-nasal", "Manner"];

/// Column holding the IPA symbol when no explicit name is configured.
pub const DEFAULT_SYMBOL_COLUMN: &str = "symbol";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PropertyError {
    #[error("property name cannot be empty")]
    EmptyName,

    #[error("property {0:?} is listed more than once")]
    Duplicate(String),

    #[error("at least one property must be tracked")]
    NoProperties,
}

/// Validated column name of an articulatory property (trimmed, non-empty).
///
/// Matching against table headers is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyName(String);

impl PropertyName {
    /// # Errors
    ///
    /// Returns `PropertyError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PropertyError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PropertyError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which columns of a symbol table matter to the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    symbol_column: String,
    properties: Vec<PropertyName>,
}

impl TableSchema {
    /// # Errors
    ///
    /// Returns `PropertyError::EmptyName` for a blank symbol column,
    /// `PropertyError::NoProperties` for an empty property list and
    /// `PropertyError::Duplicate` when a property repeats.
    pub fn new(
        symbol_column: impl Into<String>,
        properties: Vec<PropertyName>,
    ) -> Result<Self, PropertyError> {
        let symbol_column = symbol_column.into();
        if symbol_column.trim().is_empty() {
            return Err(PropertyError::EmptyName);
        }
        if properties.is_empty() {
            return Err(PropertyError::NoProperties);
        }
        for (idx, property) in properties.iter().enumerate() {
            if properties[..idx].contains(property) {
                return Err(PropertyError::Duplicate(property.as_str().to_string()));
            }
        }
        Ok(Self {
            symbol_column: symbol_column.trim().to_string(),
            properties,
        })
    }

    /// Parse a comma-separated property list, e.g. `"Voicing, Place"`.
    ///
    /// # Errors
    ///
    /// Same as [`TableSchema::new`].
    pub fn from_list(symbol_column: impl Into<String>, list: &str) -> Result<Self, PropertyError> {
        let properties = list
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(PropertyName::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(symbol_column, properties)
    }

    #[must_use]
    pub fn symbol_column(&self) -> &str {
        &self.symbol_column
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyName] {
        &self.properties
    }
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            symbol_column: DEFAULT_SYMBOL_COLUMN.to_string(),
            properties: DEFAULT_PROPERTIES
                .iter()
                .map(|name| PropertyName((*name).to_string()))
                .collect(),
        }
    }
}
