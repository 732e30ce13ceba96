use std::collections::HashSet;

use serde::Serialize;

use crate::model::property::PropertyName;

/// Markers a tabular export uses for "no value", compared after trimming.
const NULL_MARKERS: [&str; 9] = ["NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A"];

/// Returns true when a raw cell should be read as absent.
#[must_use]
pub fn is_null_cell(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NULL_MARKERS.contains(&trimmed)
}

/// One row of the symbol table.
///
/// Only known (non-null) tracked properties are stored, in schema order.
/// Property values are kept exactly as they appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolRecord {
    symbol: Option<String>,
    properties: Vec<(PropertyName, String)>,
}

impl SymbolRecord {
    /// Build a record from raw cells; null cells are dropped.
    #[must_use]
    pub fn new(
        symbol: Option<&str>,
        properties: impl IntoIterator<Item = (PropertyName, Option<String>)>,
    ) -> Self {
        let symbol = symbol
            .filter(|raw| !is_null_cell(raw))
            .map(|raw| raw.trim().to_string());
        let properties = properties
            .into_iter()
            .filter_map(|(name, value)| match value {
                Some(value) if !is_null_cell(&value) => Some((name, value)),
                _ => None,
            })
            .collect();
        Self { symbol, properties }
    }

    #[must_use]
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// Stored value of `name`, if known for this symbol.
    #[must_use]
    pub fn property(&self, name: &PropertyName) -> Option<&str> {
        self.properties
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.as_str())
    }

    /// Known properties in schema order.
    pub fn known_properties(&self) -> impl Iterator<Item = (&PropertyName, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name, value.as_str()))
    }

    #[must_use]
    pub fn known_property_count(&self) -> usize {
        self.properties.len()
    }

    /// Has a symbol and at least one known property.
    #[must_use]
    pub fn is_askable(&self) -> bool {
        self.symbol.is_some() && !self.properties.is_empty()
    }

    /// Askable and not yet asked in the current session.
    #[must_use]
    pub fn is_eligible(&self, used: &HashSet<String>) -> bool {
        match self.symbol() {
            Some(symbol) => !self.properties.is_empty() && !used.contains(symbol),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(name: &str) -> PropertyName {
        PropertyName::new(name).unwrap()
    }

    #[test]
    fn null_markers_are_recognised() {
        for cell in ["", "   ", "NaN", " NA ", "#N/A", "None"] {
            assert!(is_null_cell(cell), "{cell:?} should be null");
        }
        assert!(!is_null_cell("voiced"));
        assert!(!is_null_cell("0"));
    }

    #[test]
    fn record_drops_null_cells_and_keeps_values_verbatim() {
        let record = SymbolRecord::new(
            Some(" p "),
            vec![
                (prop("Voicing"), Some(" Voiceless".to_string())),
                (prop("Place"), Some(String::new())),
                (prop("Manner"), None),
            ],
        );
        assert_eq!(record.symbol(), Some("p"));
        assert_eq!(record.known_property_count(), 1);
        assert_eq!(record.property(&prop("Voicing")), Some(" Voiceless"));
        assert_eq!(record.property(&prop("Place")), None);
    }

    #[test]
    fn eligibility_requires_symbol_property_and_unused() {
        let mut used = HashSet::new();
        let record = SymbolRecord::new(Some("b"), vec![(prop("Voicing"), Some("voiced".into()))]);
        assert!(record.is_eligible(&used));
        used.insert("b".to_string());
        assert!(!record.is_eligible(&used));

        let no_symbol = SymbolRecord::new(Some("NaN"), vec![(prop("Voicing"), Some("voiced".into()))]);
        assert!(!no_symbol.is_askable());
        assert!(!no_symbol.is_eligible(&HashSet::new()));

        let no_properties = SymbolRecord::new(Some("x"), vec![(prop("Voicing"), None)]);
        assert!(!no_properties.is_eligible(&HashSet::new()));
    }
}
