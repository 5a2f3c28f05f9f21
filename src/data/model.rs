use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Canonical field key of the material name column.
pub const NAME_KEY: &str = "MaterialName";
/// Canonical field key of the technology column.
pub const TECHNOLOGY_KEY: &str = "Technology";
/// Canonical field key of the category column.
pub const CATEGORY_KEY: &str = "Category";

// ---------------------------------------------------------------------------
// CellValue – a single typed cell as produced by the loader
// ---------------------------------------------------------------------------

/// A dynamically-typed cell, already type-inferred by the loader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// The numeric value, if this cell counts as a number.
    ///
    /// A `Float` holding NaN is not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) if !v.is_nan() => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_f64().is_some()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Raw input tables (loader output, builder input)
// ---------------------------------------------------------------------------

/// One row of the units source: `(label, unit, ...)`, no header row.
pub type UnitRow = Vec<String>;

/// The properties source as typed cells, positionally aligned with `headers`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Original column headers, as written in the source.
    pub headers: Vec<String>,
    /// Data rows. A row may be shorter than `headers`; missing cells are absent.
    pub rows: Vec<Vec<CellValue>>,
}

// ---------------------------------------------------------------------------
// MaterialRecord – one row of the cleaned dataset
// ---------------------------------------------------------------------------

/// A single material (one row of the properties source).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialRecord {
    pub name: String,
    pub technology: String,
    pub category: String,
    /// Every cell of the row, keyed by canonical field key, in column order.
    pub properties: IndexMap<String, CellValue>,
}

impl MaterialRecord {
    /// Build a record from re-keyed cells. Returns `None` when the name cell is
    /// missing, null or blank.
    pub fn from_properties(properties: IndexMap<String, CellValue>) -> Option<Self> {
        let name = match properties.get(NAME_KEY) {
            Some(CellValue::Null) | None => return None,
            Some(cell) => cell.to_string(),
        };
        if name.trim().is_empty() {
            return None;
        }
        let text_of = |key: &str| {
            properties
                .get(key)
                .map(|v| v.to_string())
                .unwrap_or_default()
        };
        let technology = text_of(TECHNOLOGY_KEY);
        let category = text_of(CATEGORY_KEY);
        Some(MaterialRecord {
            name,
            technology,
            category,
            properties,
        })
    }

    /// Numeric value of a property, if present and numeric.
    pub fn value(&self, key: &str) -> Option<f64> {
        self.properties.get(key).and_then(CellValue::as_f64)
    }
}

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Canonical key → unit label, built from the units source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnitTable {
    units: HashMap<String, String>,
}

impl UnitTable {
    pub fn insert(&mut self, key: String, unit: String) {
        self.units.insert(key, unit);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.units.get(key).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.units.len()
    }
}

/// Canonical key → original header text, used for display labels only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMapping {
    headers: HashMap<String, String>,
}

impl HeaderMapping {
    /// Record `original` for `key` unless the key already has a header.
    pub fn insert_first(&mut self, key: String, original: String) {
        self.headers.entry(key).or_insert(original);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.headers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(cells: &[(&str, CellValue)]) -> IndexMap<String, CellValue> {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn numeric_cells() {
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(CellValue::Float(f64::NAN).as_f64(), None);
        assert_eq!(CellValue::Text("4".into()).as_f64(), None);
        assert!(!CellValue::Bool(true).is_numeric());
        assert!(!CellValue::Null.is_numeric());
    }

    #[test]
    fn record_requires_non_blank_name() {
        assert!(MaterialRecord::from_properties(props(&[(NAME_KEY, CellValue::Text("  ".into()))])).is_none());
        assert!(MaterialRecord::from_properties(props(&[(NAME_KEY, CellValue::Null)])).is_none());
        assert!(MaterialRecord::from_properties(props(&[("Other", CellValue::Integer(1))])).is_none());
    }

    #[test]
    fn record_extracts_categorical_fields() {
        let rec = MaterialRecord::from_properties(props(&[
            (NAME_KEY, CellValue::Text("PLA".into())),
            (TECHNOLOGY_KEY, CellValue::Text("FDM".into())),
            ("TensileStrength", CellValue::Float(50.0)),
        ]))
        .unwrap();
        assert_eq!(rec.name, "PLA");
        assert_eq!(rec.technology, "FDM");
        assert_eq!(rec.category, "");
        assert_eq!(rec.value("TensileStrength"), Some(50.0));
        assert_eq!(rec.value(TECHNOLOGY_KEY), None);
    }

    #[test]
    fn header_mapping_first_occurrence_wins() {
        let mut mapping = HeaderMapping::default();
        mapping.insert_first("Density".into(), "Density (g/cm3)".into());
        mapping.insert_first("Density".into(), "Density".into());
        assert_eq!(mapping.get("Density"), Some("Density (g/cm3)"));
        assert_eq!(mapping.len(), 1);
    }
}
