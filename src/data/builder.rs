use indexmap::IndexMap;
use thiserror::Error;

use super::keys::{normalize_field_key, normalize_header};
use super::model::{HeaderMapping, MaterialRecord, RawTable, UnitRow, UnitTable};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("no materials processed: every row lacks a material name (check the properties file format)")]
    EmptyRecordSet,
}

// ---------------------------------------------------------------------------
// RecordSet – cleaned records plus their label tables
// ---------------------------------------------------------------------------

/// The cleaned dataset. `records` is never empty.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub records: Vec<MaterialRecord>,
    pub header_mapping: HeaderMapping,
    pub unit_table: UnitTable,
}

/// Build the unit table from headerless `(label, unit)` rows.
///
/// Rows with a missing or empty label or unit are skipped.
pub fn build_unit_table(rows: &[UnitRow]) -> UnitTable {
    let mut table = UnitTable::default();
    for row in rows {
        let (Some(label), Some(unit)) = (row.first(), row.get(1)) else {
            continue;
        };
        if label.is_empty() || unit.is_empty() {
            continue;
        }
        table.insert(normalize_header(label), unit.trim().to_string());
    }
    table
}

/// Build the header mapping from the original column headers.
pub fn build_header_mapping(headers: &[String]) -> HeaderMapping {
    let mut mapping = HeaderMapping::default();
    for header in headers {
        let original = header.trim();
        mapping.insert_first(normalize_header(original), original.to_string());
    }
    mapping
}

/// Re-key every row with the field-key rule and keep rows with a usable name.
pub fn build_records(table: &RawTable) -> Vec<MaterialRecord> {
    let keys: Vec<String> = table
        .headers
        .iter()
        .map(|h| normalize_field_key(h))
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for (row_no, row) in table.rows.iter().enumerate() {
        let properties: IndexMap<_, _> = keys
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();
        match MaterialRecord::from_properties(properties) {
            Some(record) => records.push(record),
            None => log::debug!("Dropping row {row_no}: no material name"),
        }
    }
    records
}

/// Build the complete record set from the units and properties sources.
pub fn build_record_set(units: &[UnitRow], properties: &RawTable) -> Result<RecordSet, DatasetError> {
    let unit_table = build_unit_table(units);
    let header_mapping = build_header_mapping(&properties.headers);
    let records = build_records(properties);

    if records.is_empty() {
        return Err(DatasetError::EmptyRecordSet);
    }
    log::info!(
        "Processed {} materials ({} rows read, {} units, {} headers)",
        records.len(),
        properties.rows.len(),
        unit_table.len(),
        header_mapping.len()
    );

    Ok(RecordSet {
        records,
        header_mapping,
        unit_table,
    })
}
