use std::collections::HashSet;

use rand::Rng;
use thiserror::Error;

use crate::model::property::{PropertyName, TableSchema};
use crate::model::symbol::SymbolRecord;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Reasons a symbol table cannot be built. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("the required {column:?} column is missing from the data")]
    MissingSymbolColumn { column: String },

    #[error("data source could not be read: {0}")]
    Unreadable(String),
}

//
// ─── TABLE ─────────────────────────────────────────────────────────────────────
//

/// Read-only table of IPA symbols and their articulatory properties.
///
/// Built once at startup and shared between sessions; nothing mutates it
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTable {
    schema: TableSchema,
    records: Vec<SymbolRecord>,
    missing_properties: Vec<PropertyName>,
}

impl SymbolTable {
    /// Build a table from a header row and data rows.
    ///
    /// Rows may be shorter than the header; absent cells read as null. Tracked
    /// properties without a column are tolerated and always null. Rows whose
    /// symbol is null are kept but can never be asked.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingSymbolColumn` if no header equals the
    /// schema's symbol column exactly.
    pub fn from_rows<I>(schema: TableSchema, headers: &[String], rows: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = Vec<Option<String>>>,
    {
        let symbol_idx = headers
            .iter()
            .position(|header| header == schema.symbol_column())
            .ok_or_else(|| LoadError::MissingSymbolColumn {
                column: schema.symbol_column().to_string(),
            })?;

        let property_idx: Vec<(PropertyName, Option<usize>)> = schema
            .properties()
            .iter()
            .map(|name| {
                let idx = headers.iter().position(|header| header == name.as_str());
                (name.clone(), idx)
            })
            .collect();
        let missing_properties = property_idx
            .iter()
            .filter(|(_, idx)| idx.is_none())
            .map(|(name, _)| name.clone())
            .collect();

        let records = rows
            .into_iter()
            .map(|mut row| {
                let symbol = row.get(symbol_idx).cloned().flatten();
                let properties = property_idx.iter().map(|(name, idx)| {
                    let value = idx.and_then(|i| row.get_mut(i).and_then(Option::take));
                    (name.clone(), value)
                });
                SymbolRecord::new(symbol.as_deref(), properties)
            })
            .collect();

        Ok(Self {
            schema,
            records,
            missing_properties,
        })
    }

    /// Build a table directly from records, e.g. for embedding a fixed set.
    #[must_use]
    pub fn from_records(schema: TableSchema, records: Vec<SymbolRecord>) -> Self {
        Self {
            schema,
            records,
            missing_properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// The configured properties questions may ask about.
    #[must_use]
    pub fn tracked_properties(&self) -> &[PropertyName] {
        self.schema.properties()
    }

    /// Tracked properties that had no column in the source.
    #[must_use]
    pub fn missing_properties(&self) -> &[PropertyName] {
        &self.missing_properties
    }

    #[must_use]
    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SymbolRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Index of one row chosen uniformly at random; `None` for an empty table.
    pub fn sample_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.records.is_empty() {
            return None;
        }
        Some(rng.random_range(0..self.records.len()))
    }

    /// One row chosen uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&SymbolRecord> {
        self.sample_index(rng).and_then(|idx| self.records.get(idx))
    }

    /// Indices of rows that can still be asked given `used`.
    #[must_use]
    pub fn eligible_indices(&self, used: &HashSet<String>) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, record)| record.is_eligible(used))
            .map(|(idx, _)| idx)
            .collect()
    }

    #[must_use]
    pub fn eligible_count(&self, used: &HashSet<String>) -> usize {
        self.records
            .iter()
            .filter(|record| record.is_eligible(used))
            .count()
    }

    /// Distinct symbols that could ever be asked in one session.
    #[must_use]
    pub fn askable_symbols(&self) -> HashSet<&str> {
        self.records
            .iter()
            .filter(|record| record.is_askable())
            .filter_map(SymbolRecord::symbol)
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
