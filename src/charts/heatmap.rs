use serde::Serialize;

use crate::context::DashboardContext;
use crate::data::filter::{by_technology, Selection};
use crate::stats::{mean, median, numeric_property_keys, paired_values, pearson_correlation, standard_deviation};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapFilter {
    pub technology: Selection,
}

/// A single matrix cell with the property pair it relates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellPair {
    pub row_key: String,
    pub col_key: String,
    pub value: f64,
}

/// Summary of the off-diagonal correlations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub strongest_positive: CellPair,
    pub strongest_negative: CellPair,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapSeries {
    pub keys: Vec<String>,
    /// Axis labels with units.
    pub labels: Vec<String>,
    /// Row-major correlations; the diagonal is always `None`.
    pub matrix: Vec<Vec<Option<f64>>>,
    /// `None` when no off-diagonal cell has a finite value.
    pub report: Option<CorrelationReport>,
}

/// Correlation of two properties over every material having both values.
pub fn correlation(ctx: &DashboardContext, a: &str, b: &str) -> f64 {
    let (xs, ys) = paired_values(&ctx.records, a, b);
    pearson_correlation(&xs, &ys)
}

/// Correlation matrix for the properties numeric in the first material of the
/// selected technology.
///
/// The technology only picks the axes; each coefficient is computed over the
/// whole dataset.
pub fn build(ctx: &DashboardContext, filter: &HeatmapFilter) -> HeatmapSeries {
    let keys = by_technology(&ctx.records, &filter.technology)
        .first()
        .map(|r| numeric_property_keys(r))
        .unwrap_or_default();

    let matrix: Vec<Vec<Option<f64>>> = keys
        .iter()
        .enumerate()
        .map(|(i, a)| {
            keys.iter()
                .enumerate()
                .map(|(j, b)| (i != j).then(|| correlation(ctx, a, b)))
                .collect()
        })
        .collect();

    let summary = report(&keys, &matrix);
    if summary.is_none() && keys.len() > 1 {
        log::warn!("No finite correlations among {} properties", keys.len());
    }

    HeatmapSeries {
        labels: keys.iter().map(|k| ctx.label_with_unit(k)).collect(),
        keys,
        matrix,
        report: summary,
    }
}

/// Summary statistics and extreme cells, scanning row-major; the first
/// occurrence wins a tie.
pub fn report(keys: &[String], matrix: &[Vec<Option<f64>>]) -> Option<CorrelationReport> {
    let cells: Vec<CellPair> = matrix
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter().enumerate().filter_map(move |(j, cell)| {
                let value = (*cell)?;
                value.is_finite().then(|| CellPair {
                    row_key: keys[i].clone(),
                    col_key: keys[j].clone(),
                    value,
                })
            })
        })
        .collect();

    let first = cells.first()?;
    let mut strongest_positive = first;
    let mut strongest_negative = first;
    for cell in &cells[1..] {
        if cell.value > strongest_positive.value {
            strongest_positive = cell;
        }
        if cell.value < strongest_negative.value {
            strongest_negative = cell;
        }
    }

    let values: Vec<f64> = cells.iter().map(|c| c.value).collect();
    Some(CorrelationReport {
        mean: mean(&values),
        median: median(&values),
        std_dev: standard_deviation(&values),
        strongest_positive: strongest_positive.clone(),
        strongest_negative: strongest_negative.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawTable, UnitRow};
    use approx::assert_abs_diff_eq;

    fn context() -> DashboardContext {
        let units: Vec<UnitRow> = vec![vec!["A".into(), "MPa".into()]];
        let rows = [
            ("m0", "FDM", CellValue::Float(1.0), CellValue::Float(2.0), CellValue::Float(9.0)),
            ("m1", "SLS", CellValue::Float(2.0), CellValue::Text("n/a".into()), CellValue::Float(7.0)),
            ("m2", "FDM", CellValue::Float(3.0), CellValue::Float(6.0), CellValue::Float(8.0)),
            ("m3", "SLS", CellValue::Float(4.0), CellValue::Float(8.0), CellValue::Float(1.0)),
        ];
        let table = RawTable {
            headers: vec![
                "Material Name".into(),
                "Technology".into(),
                "A".into(),
                "B".into(),
                "C".into(),
            ],
            rows: rows
                .into_iter()
                .map(|(name, tech, a, b, c)| {
                    vec![CellValue::Text(name.into()), CellValue::Text(tech.into()), a, b, c]
                })
                .collect(),
        };
        DashboardContext::build(&units, &table).unwrap()
    }

    #[test]
    fn diagonal_is_empty_and_matrix_symmetric() {
        let ctx = context();
        let series = build(&ctx, &HeatmapFilter::default());
        assert_eq!(series.keys, ["A", "B", "C"]);
        assert_eq!(series.labels, ["A (MPa)", "B", "C"]);
        for i in 0..3 {
            assert_eq!(series.matrix[i][i], None);
            for j in 0..3 {
                assert_eq!(series.matrix[i][j], series.matrix[j][i]);
            }
        }
    }

    #[test]
    fn technology_only_changes_axes() {
        let ctx = context();
        let all = build(&ctx, &HeatmapFilter::default());
        // First SLS material has text in B, so B drops off the axes.
        let sls = build(
            &ctx,
            &HeatmapFilter {
                technology: Selection::Only("SLS".into()),
            },
        );
        assert_eq!(sls.keys, ["A", "C"]);
        assert_eq!(sls.matrix[0][1], all.matrix[0][2]);
        assert_eq!(sls.matrix[1][0], all.matrix[2][0]);
    }

    #[test]
    fn pairs_skip_materials_missing_a_value() {
        let ctx = context();
        // A and B over m0, m2, m3 are perfectly linear.
        assert_abs_diff_eq!(correlation(&ctx, "A", "B"), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn report_picks_first_extreme_in_row_major_order() {
        let keys: Vec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
        let matrix = vec![
            vec![None, Some(0.5), Some(-0.5)],
            vec![Some(0.5), None, Some(f64::NAN)],
            vec![Some(-0.5), Some(f64::NAN), None],
        ];
        let report = report(&keys, &matrix).unwrap();
        assert_eq!(report.strongest_positive.row_key, "x");
        assert_eq!(report.strongest_positive.col_key, "y");
        assert_eq!(report.strongest_negative.row_key, "x");
        assert_eq!(report.strongest_negative.col_key, "z");
        assert_abs_diff_eq!(report.mean, 0.0);
        assert_abs_diff_eq!(report.median, 0.0);
        assert_abs_diff_eq!(report.std_dev, 0.5);
    }

    #[test]
    fn no_report_without_cells() {
        let keys = vec!["x".to_string()];
        assert!(report(&keys, &[vec![None]]).is_none());
    }
}
