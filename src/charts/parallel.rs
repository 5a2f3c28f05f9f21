use serde::Serialize;

use crate::context::DashboardContext;
use crate::data::filter::{by_technology, Selection};
use crate::stats::{min_max, numeric_property_keys, MinMax};

/// Share of the filtered materials shown when the view opens.
pub const DEFAULT_PERCENT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelFilter {
    pub technology: Selection,
    /// Head share of the filtered set to display, in percent.
    pub percent: u32,
    pub show_names: bool,
}

impl Default for ParallelFilter {
    fn default() -> Self {
        Self {
            technology: Selection::All,
            percent: DEFAULT_PERCENT,
            show_names: false,
        }
    }
}

/// One vertical axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub key: String,
    pub label: String,
    /// One value per displayed material; NaN where the material has none.
    pub values: Vec<f64>,
    pub range: MinMax,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParallelSeries {
    pub dimensions: Vec<Dimension>,
    /// Colour scale input per line: the material's position in display order.
    pub line_color: Vec<f64>,
    /// Material names, empty unless hover names are enabled.
    pub names: Vec<String>,
}

/// Number of materials kept from a filtered set of `len` at `percent`.
pub fn head_count(len: usize, percent: u32) -> usize {
    (len * percent as usize / 100).max(1)
}

/// Parallel coordinates over the head of the technology-filtered materials.
///
/// The head is taken in dataset order, not sampled.
pub fn build(ctx: &DashboardContext, filter: &ParallelFilter) -> ParallelSeries {
    let filtered = by_technology(&ctx.records, &filter.technology);
    let count = head_count(filtered.len(), filter.percent);
    let shown = &filtered[..count.min(filtered.len())];

    let keys = shown
        .first()
        .map(|r| numeric_property_keys(r))
        .unwrap_or_default();

    let dimensions = keys
        .into_iter()
        .map(|key| {
            let values: Vec<f64> = shown
                .iter()
                .map(|r| r.value(&key).unwrap_or(f64::NAN))
                .collect();
            let present: Vec<f64> = values.iter().cloned().filter(|v| !v.is_nan()).collect();
            Dimension {
                label: ctx.display_name(&key).to_string(),
                range: min_max(&present),
                values,
                key,
            }
        })
        .collect();

    let names = if filter.show_names {
        shown.iter().map(|r| r.name.clone()).collect()
    } else {
        Vec::new()
    };

    ParallelSeries {
        dimensions,
        line_color: (0..shown.len()).map(|i| i as f64).collect(),
        names,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawTable};

    fn context(n: usize) -> DashboardContext {
        let table = RawTable {
            headers: vec!["Material Name".into(), "Technology".into(), "Score".into(), "Note".into()],
            rows: (0..n)
                .map(|i| {
                    vec![
                        CellValue::Text(format!("M{i}")),
                        CellValue::Text(if i % 2 == 0 { "FDM" } else { "SLS" }.into()),
                        if i == 3 { CellValue::Null } else { CellValue::Integer(i as i64) },
                        CellValue::Text("n".into()),
                    ]
                })
                .collect(),
        };
        DashboardContext::build(&[], &table).unwrap()
    }

    #[test]
    fn head_count_rounds_down_with_minimum_one() {
        assert_eq!(head_count(20, 25), 5);
        assert_eq!(head_count(3, 10), 1);
        assert_eq!(head_count(7, 100), 7);
        assert_eq!(head_count(0, 50), 1);
    }

    #[test]
    fn takes_first_records_in_order() {
        let ctx = context(20);
        let filter = ParallelFilter {
            percent: 25,
            show_names: true,
            ..Default::default()
        };
        let series = build(&ctx, &filter);
        assert_eq!(series.names, ["M0", "M1", "M2", "M3", "M4"]);
        assert_eq!(series.line_color, [0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.dimensions.len(), 1);

        let score = &series.dimensions[0];
        assert_eq!(score.key, "Score");
        assert_eq!(score.label, "Score");
        assert!(score.values[3].is_nan());
        assert_eq!(score.range, MinMax { min: 0.0, max: 4.0 });
    }

    #[test]
    fn filters_before_truncating() {
        let ctx = context(8);
        let filter = ParallelFilter {
            technology: Selection::Only("SLS".into()),
            percent: 50,
            show_names: true,
        };
        let series = build(&ctx, &filter);
        assert_eq!(series.names, ["M1", "M3"]);
    }

    #[test]
    fn empty_filter_result_has_no_dimensions() {
        let ctx = context(4);
        let filter = ParallelFilter {
            technology: Selection::Only("SLA".into()),
            ..Default::default()
        };
        let series = build(&ctx, &filter);
        assert!(series.dimensions.is_empty());
        assert!(series.line_color.is_empty());
    }
}
