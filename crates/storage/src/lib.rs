#![forbid(unsafe_code)]

pub mod file;
pub mod repository;

pub use file::{CsvFileSource, Delimiter};
pub use repository::{InMemorySource, RawTable, StorageError, SymbolSource, load_table};
