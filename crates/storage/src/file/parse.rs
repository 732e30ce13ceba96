use csv::{ReaderBuilder, StringRecord, Trim};

use crate::file::Delimiter;
use crate::repository::{RawTable, StorageError};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse delimited UTF-8 text with a header row.
///
/// Rows may have fewer or more cells than the header; short rows are padded
/// with `None` and surplus cells are dropped. Headers are trimmed, cells are
/// not.
///
/// # Errors
///
/// Returns `StorageError::NoHeader` for input without a header row and
/// `StorageError::Parse` for malformed input (e.g. invalid UTF-8).
pub fn parse_delimited(bytes: &[u8], delimiter: Delimiter) -> Result<RawTable, StorageError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .has_headers(true)
        .trim(Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|err| StorageError::Parse(err.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(StorageError::NoHeader);
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => rows.push(to_row(&record, headers.len())),
            Ok(false) => break,
            Err(err) => return Err(StorageError::Parse(err.to_string())),
        }
    }

    Ok(RawTable::new(headers, rows))
}

fn to_row(record: &StringRecord, width: usize) -> Vec<Option<String>> {
    (0..width)
        .map(|idx| record.get(idx).map(str::to_string))
        .collect()
}
