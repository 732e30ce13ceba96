use std::path::{Path, PathBuf};

use quiz_core::model::{DEFAULT_PROPERTIES, DEFAULT_SYMBOL_COLUMN, PropertyError, TableSchema};
use thiserror::Error;

pub const ENV_DATA: &str = "IPA_QUIZ_DATA";
pub const ENV_SYMBOL_COLUMN: &str = "IPA_QUIZ_SYMBOL_COLUMN";
pub const ENV_PROPERTIES: &str = "IPA_QUIZ_PROPERTIES";
pub const ENV_OUTPUT: &str = "IPA_QUIZ_OUTPUT";
pub const ENV_SEED: &str = "IPA_QUIZ_SEED";

const DEFAULT_DATA_PATH: &str = "IPA.csv";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid IPA_QUIZ_SEED value: {raw}")]
    InvalidSeed { raw: String },
    #[error("invalid IPA_QUIZ_OUTPUT value: {raw} (expected `text` or `json`)")]
    InvalidOutput { raw: String },
    #[error("invalid IPA_QUIZ_DATA value: path is empty")]
    EmptyDataPath,
    #[error("invalid table schema: {0}")]
    Schema(#[from] PropertyError),
}

/// How views are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-oriented prompts.
    #[default]
    Text,
    /// One JSON view per line; commands read one per line.
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    data_path: PathBuf,
    schema: TableSchema,
    output: OutputMode,
    seed: Option<u64>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for malformed values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_path = match lookup(ENV_DATA) {
            Some(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyDataPath),
            Some(raw) => PathBuf::from(raw.trim()),
            None => PathBuf::from(DEFAULT_DATA_PATH),
        };

        let symbol_column = lookup(ENV_SYMBOL_COLUMN)
            .filter(|raw| !raw.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SYMBOL_COLUMN.to_string());
        let properties = lookup(ENV_PROPERTIES).unwrap_or_else(|| DEFAULT_PROPERTIES.join(","));
        let schema = TableSchema::from_list(symbol_column, &properties)?;

        let output = match lookup(ENV_OUTPUT) {
            None => OutputMode::Text,
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "" | "text" => OutputMode::Text,
                "json" => OutputMode::Json,
                _ => return Err(ConfigError::InvalidOutput { raw }),
            },
        };

        let seed = lookup(ENV_SEED)
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed { raw: raw.clone() })
            })
            .transpose()?;

        Ok(Self {
            data_path,
            schema,
            output,
            seed,
        })
    }

    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    #[must_use]
    pub fn output(&self) -> OutputMode {
        self.output
    }

    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.data_path(), Path::new("IPA.csv"));
        assert_eq!(cfg.schema(), &TableSchema::default());
        assert_eq!(cfg.output(), OutputMode::Text);
        assert_eq!(cfg.seed(), None);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            (ENV_DATA, " data/ipa.tsv "),
            (ENV_SYMBOL_COLUMN, "IPA"),
            (ENV_PROPERTIES, "Voicing,Manner"),
            (ENV_OUTPUT, "JSON"),
            (ENV_SEED, "7"),
        ])
        .unwrap();
        assert_eq!(cfg.data_path(), Path::new("data/ipa.tsv"));
        assert_eq!(cfg.schema().symbol_column(), "IPA");
        assert_eq!(cfg.schema().properties().len(), 2);
        assert_eq!(cfg.output(), OutputMode::Json);
        assert_eq!(cfg.seed(), Some(7));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            config(&[(ENV_SEED, "soon")]),
            Err(ConfigError::InvalidSeed { .. })
        ));
        assert!(matches!(
            config(&[(ENV_OUTPUT, "yaml")]),
            Err(ConfigError::InvalidOutput { .. })
        ));
        assert!(matches!(
            config(&[(ENV_DATA, "  ")]),
            Err(ConfigError::EmptyDataPath)
        ));
        assert!(matches!(
            config(&[(ENV_PROPERTIES, "Place,Place")]),
            Err(ConfigError::Schema(PropertyError::Duplicate(_)))
        ));
    }
}
