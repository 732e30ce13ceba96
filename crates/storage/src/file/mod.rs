use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::repository::{RawTable, StorageError, SymbolSource};

mod parse;

pub use parse::parse_delimited;

/// Field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// Guess from the file extension: `.tsv`/`.tab` are tab-separated,
    /// everything else comma-separated.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("tsv" | "tab") => Self::Tab,
            _ => Self::Comma,
        }
    }

    #[must_use]
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
            Self::Semicolon => b';',
        }
    }
}

/// Delimited text file (CSV/TSV) holding the symbol table.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
    delimiter: Delimiter,
}

impl CsvFileSource {
    /// Source for `path`, delimiter guessed from its extension.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let delimiter = Delimiter::from_path(&path);
        Self { path, delimiter }
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }
}

#[async_trait]
impl SymbolSource for CsvFileSource {
    async fn fetch(&self) -> Result<RawTable, StorageError> {
        let bytes = tokio::fs::read(&self.path).await?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "read symbol file");
        parse_delimited(&bytes, self.delimiter)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
