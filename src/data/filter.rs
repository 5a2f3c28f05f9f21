use std::fmt;

use indexmap::IndexSet;
use serde::Serialize;

use super::model::MaterialRecord;

// ---------------------------------------------------------------------------
// Selection: "All" or one exact value of a categorical column
// ---------------------------------------------------------------------------

/// A dropdown selection for a categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    /// No filtering.
    #[default]
    All,
    /// Keep records whose field equals this value exactly.
    Only(String),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "All"),
            Selection::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Records whose technology passes `selection`, in original order.
pub fn by_technology<'a>(records: &'a [MaterialRecord], selection: &Selection) -> Vec<&'a MaterialRecord> {
    records
        .iter()
        .filter(|r| selection.matches(&r.technology))
        .collect()
}

/// Records whose category passes `selection`, in original order.
pub fn by_category<'a>(records: &'a [MaterialRecord], selection: &Selection) -> Vec<&'a MaterialRecord> {
    records
        .iter()
        .filter(|r| selection.matches(&r.category))
        .collect()
}

/// Distinct values of a field in first-seen order.
pub fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    values
        .into_iter()
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, CATEGORY_KEY, NAME_KEY, TECHNOLOGY_KEY};

    fn record(name: &str, tech: &str, cat: &str) -> MaterialRecord {
        MaterialRecord::from_properties(
            [
                (NAME_KEY, name),
                (TECHNOLOGY_KEY, tech),
                (CATEGORY_KEY, cat),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), CellValue::Text(v.to_string())))
            .collect(),
        )
        .unwrap()
    }

    #[test]
    fn all_keeps_everything() {
        let records = vec![record("a", "FDM", "Polymer"), record("b", "SLS", "Polymer")];
        assert_eq!(by_technology(&records, &Selection::All).len(), 2);
    }

    #[test]
    fn only_is_strict_equality() {
        let records = vec![
            record("a", "FDM", "Polymer"),
            record("b", "fdm", "Metal"),
            record("c", "FDM", "Metal"),
        ];
        let fdm = by_technology(&records, &Selection::Only("FDM".into()));
        let names: Vec<_> = fdm.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
        assert_eq!(by_category(&records, &Selection::Only("Metal".into())).len(), 2);
    }

    #[test]
    fn distinct_preserves_first_seen_order() {
        assert_eq!(distinct(["SLA", "FDM", "SLA", "SLS"]), ["SLA", "FDM", "SLS"]);
    }

    #[test]
    fn distinct_over_many_repeats() {
        let techs: Vec<String> = (0..5000).map(|i| format!("T{}", i % 7)).collect();
        let found = distinct(techs.iter().map(String::as_str));
        assert_eq!(found, ["T0", "T1", "T2", "T3", "T4", "T5", "T6"]);
        assert!(distinct(std::iter::empty()).is_empty());
    }
}
