use crate::color::CategoryColorTable;
use crate::data::builder::{build_record_set, DatasetError, RecordSet};
use crate::data::filter::distinct;
use crate::data::model::{HeaderMapping, MaterialRecord, RawTable, UnitRow, UnitTable};
use crate::stats::numeric_property_keys;

// ---------------------------------------------------------------------------
// DashboardContext – everything the chart adapters read, built once per load
// ---------------------------------------------------------------------------

/// Immutable session context: the record set and its derived lookup tables.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub records: Vec<MaterialRecord>,
    pub header_mapping: HeaderMapping,
    pub unit_table: UnitTable,
    pub colors: CategoryColorTable,
    /// Distinct technologies in first-seen order.
    pub technologies: Vec<String>,
    /// Distinct categories in first-seen order.
    pub categories: Vec<String>,
}

impl DashboardContext {
    /// Build the context from raw loader output. Fails when no record survives.
    pub fn build(units: &[UnitRow], properties: &RawTable) -> Result<Self, DatasetError> {
        Ok(Self::from_record_set(build_record_set(units, properties)?))
    }

    pub fn from_record_set(set: RecordSet) -> Self {
        let technologies = distinct(set.records.iter().map(|r| r.technology.as_str()));
        let categories = distinct(set.records.iter().map(|r| r.category.as_str()));
        let colors = CategoryColorTable::new(&technologies);

        DashboardContext {
            records: set.records,
            header_mapping: set.header_mapping,
            unit_table: set.unit_table,
            colors,
            technologies,
            categories,
        }
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Numeric properties offered in the property dropdowns, discovered from
    /// the first material.
    pub fn numeric_keys(&self) -> Vec<String> {
        self.records
            .first()
            .map(numeric_property_keys)
            .unwrap_or_default()
    }

    /// Display name: the original header, or the key itself.
    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.header_mapping.get(key).unwrap_or(key)
    }

    pub fn unit(&self, key: &str) -> Option<&str> {
        self.unit_table.get(key)
    }

    /// Display name followed by ` (unit)` when a unit is known.
    pub fn label_with_unit(&self, key: &str) -> String {
        let name = self.display_name(key);
        match self.unit(key) {
            Some(unit) => format!("{name} ({unit})"),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn context() -> DashboardContext {
        let units: Vec<UnitRow> = vec![
            vec!["Tensile Strength".into(), "MPa".into()],
            vec!["Young's Modulus".into(), "GPa".into()],
        ];
        let props = RawTable {
            headers: ["Material Name", "Technology", "Category", "Tensile Strength", "Young's Modulus"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: vec![
                vec![
                    CellValue::Text("PLA".into()),
                    CellValue::Text("FDM".into()),
                    CellValue::Text("Polymer".into()),
                    CellValue::Float(50.0),
                    CellValue::Float(3.5),
                ],
                vec![
                    CellValue::Text("PA12".into()),
                    CellValue::Text("SLS".into()),
                    CellValue::Text("Polymer".into()),
                    CellValue::Float(48.0),
                    CellValue::Float(1.7),
                ],
            ],
        };
        DashboardContext::build(&units, &props).unwrap()
    }

    #[test]
    fn derives_distinct_filters_and_colors() {
        let ctx = context();
        assert_eq!(ctx.len(), 2);
        assert!(!ctx.is_empty());
        assert_eq!(ctx.technologies, ["FDM", "SLS"]);
        assert_eq!(ctx.categories, ["Polymer"]);
        assert_ne!(ctx.colors.color_for("FDM"), ctx.colors.color_for("SLS"));
        assert_eq!(ctx.numeric_keys(), ["TensileStrength", "YoungsModulus"]);
    }

    #[test]
    fn labels_come_from_header_rule() {
        let ctx = context();
        assert_eq!(ctx.label_with_unit("TensileStrength"), "Tensile Strength (MPa)");
        // Field key and header key diverge on the apostrophe.
        assert_eq!(ctx.display_name("YoungsModulus"), "YoungsModulus");
        assert_eq!(ctx.label_with_unit("YoungsModulus"), "YoungsModulus");
        assert_eq!(ctx.unit_table.get("Young'sModulus"), Some("GPa"));
    }

    #[test]
    fn empty_dataset_builds_no_context() {
        let props = RawTable {
            headers: vec!["Material Name".into()],
            rows: vec![vec![CellValue::Null]],
        };
        assert!(matches!(
            DashboardContext::build(&[], &props),
            Err(DatasetError::EmptyRecordSet)
        ));
    }
}
