use async_trait::async_trait;
use quiz_core::model::{LoadError, SymbolTable, TableSchema};
use thiserror::Error;

/// Errors surfaced by data sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed delimited data: {0}")]
    Parse(String),

    #[error("source is empty: no header row")]
    NoHeader,
}

impl From<StorageError> for LoadError {
    fn from(err: StorageError) -> Self {
        LoadError::Unreadable(err.to_string())
    }
}

/// Header row plus data rows, as read from a source.
///
/// Cells are `None` where the source had no cell at all; empty and null-marker
/// cells are kept as text and interpreted by the core model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Interpret the raw rows under `schema`.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingSymbolColumn` if the symbol column is absent.
    pub fn into_table(self, schema: TableSchema) -> Result<SymbolTable, LoadError> {
        SymbolTable::from_rows(schema, &self.headers, self.rows)
    }
}

/// Where the symbol table comes from. Read once at startup.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Fetch every row the source holds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the source cannot be read or parsed.
    async fn fetch(&self) -> Result<RawTable, StorageError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// Fixed in-memory rows, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    table: RawTable,
}

impl InMemorySource {
    #[must_use]
    pub fn new(table: RawTable) -> Self {
        Self { table }
    }

    /// Convenience constructor from string slices; `None` marks a missing cell.
    #[must_use]
    pub fn from_slices(headers: &[&str], rows: &[&[Option<&str>]]) -> Self {
        let headers = headers.iter().map(|h| (*h).to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
            .collect();
        Self::new(RawTable::new(headers, rows))
    }
}

#[async_trait]
impl SymbolSource for InMemorySource {
    async fn fetch(&self) -> Result<RawTable, StorageError> {
        Ok(self.table.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory table ({} rows)", self.table.rows.len())
    }
}

/// Fetch from `source` and build the symbol table.
///
/// # Errors
///
/// Returns `LoadError::Unreadable` when the source fails and
/// `LoadError::MissingSymbolColumn` when the symbol column is absent.
pub async fn load_table(
    source: &dyn SymbolSource,
    schema: TableSchema,
) -> Result<SymbolTable, LoadError> {
    let origin = source.describe();
    let raw = source.fetch().await.map_err(|err| {
        tracing::error!(%origin, error = %err, "failed to read symbol data");
        LoadError::from(err)
    })?;
    let table = raw.into_table(schema)?;

    for missing in table.missing_properties() {
        tracing::warn!(%origin, property = %missing, "tracked property column not found; treating as empty");
    }
    tracing::info!(
        %origin,
        rows = table.len(),
        askable = table.askable_symbols().len(),
        "symbol table loaded"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn in_memory_source_loads_table() {
        let source = InMemorySource::from_slices(
            &["symbol", "Voicing", "Place"],
            &[
                &[Some("p"), Some("voiceless"), Some("bilabial")],
                &[Some("b"), Some("voiced")],
            ],
        );
        let table = load_table(&source, TableSchema::default()).await.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.eligible_count(&HashSet::new()), 2);
        assert_eq!(table.get(1).unwrap().known_property_count(), 1);
    }

    #[tokio::test]
    async fn missing_symbol_column_fails_load() {
        let source = InMemorySource::from_slices(&["IPA", "Voicing"], &[&[Some("p"), Some("x")]]);
        let err = load_table(&source, TableSchema::default()).await.unwrap_err();
        assert!(matches!(err, LoadError::MissingSymbolColumn { .. }));
    }

    #[test]
    fn storage_errors_become_unreadable() {
        let err: LoadError = StorageError::NoHeader.into();
        assert!(matches!(err, LoadError::Unreadable(msg) if msg.contains("no header")));
    }

    #[test]
    fn source_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SymbolSource>();
    }
}
