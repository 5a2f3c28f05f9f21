use palette::Srgb;
use serde::Serialize;

use crate::context::DashboardContext;
use crate::data::filter::{by_technology, Selection};
use crate::stats::{linear_regression, min_max};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScatterFilter {
    pub technology: Selection,
    pub x_key: String,
    pub y_key: String,
    pub show_names: bool,
    pub show_trendline: bool,
}

impl ScatterFilter {
    /// First numeric property on x, the second (or the first again) on y.
    pub fn initial(ctx: &DashboardContext) -> Self {
        let keys = ctx.numeric_keys();
        let x_key = keys.first().cloned().unwrap_or_default();
        let y_key = keys.get(1).cloned().unwrap_or_else(|| x_key.clone());
        ScatterFilter {
            x_key,
            y_key,
            ..Default::default()
        }
    }
}

/// Two-point regression line across the filtered x range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendLine {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Material names, empty unless names are shown.
    pub labels: Vec<String>,
    pub colors: Vec<Srgb<u8>>,
    pub trendline: Option<TrendLine>,
}

/// Scatter points for the selected property pair.
///
/// Materials lacking a numeric value on either axis are left out.
pub fn build(ctx: &DashboardContext, filter: &ScatterFilter) -> ScatterSeries {
    let working: Vec<_> = by_technology(&ctx.records, &filter.technology)
        .into_iter()
        .filter_map(|r| Some((r, r.value(&filter.x_key)?, r.value(&filter.y_key)?)))
        .collect();

    let x: Vec<f64> = working.iter().map(|(_, x, _)| *x).collect();
    let y: Vec<f64> = working.iter().map(|(_, _, y)| *y).collect();
    let labels = if filter.show_names {
        working.iter().map(|(r, _, _)| r.name.clone()).collect()
    } else {
        Vec::new()
    };
    let colors = working
        .iter()
        .map(|(r, _, _)| ctx.colors.color_for(&r.technology))
        .collect();

    let trendline = if filter.show_trendline { fit_trendline(&x, &y) } else { None };

    let x_label = ctx.display_name(&filter.x_key).to_string();
    let y_label = ctx.display_name(&filter.y_key).to_string();
    ScatterSeries {
        title: format!("Scatter Plot: {x_label} vs {y_label}"),
        x_label,
        y_label,
        x,
        y,
        labels,
        colors,
        trendline,
    }
}

fn fit_trendline(x: &[f64], y: &[f64]) -> Option<TrendLine> {
    if x.len() < 2 {
        return None;
    }
    let range = min_max(x);
    if range.is_degenerate() {
        return None;
    }
    let fit = linear_regression(x, y);
    Some(TrendLine {
        x: [range.min, range.max],
        y: [fit.predict(range.min), fit.predict(range.max)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, RawTable};
    use approx::assert_abs_diff_eq;

    fn context(rows: &[(&str, &str, Option<f64>, f64)]) -> DashboardContext {
        let table = RawTable {
            headers: ["Material Name", "Technology", "Hardness", "Density"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows: rows
                .iter()
                .map(|(name, tech, x, y)| {
                    vec![
                        CellValue::Text(name.to_string()),
                        CellValue::Text(tech.to_string()),
                        x.map(CellValue::Float).unwrap_or(CellValue::Null),
                        CellValue::Float(*y),
                    ]
                })
                .collect(),
        };
        DashboardContext::build(&[], &table).unwrap()
    }

    #[test]
    fn initial_filter_picks_first_two_numeric_keys() {
        let ctx = context(&[("a", "FDM", Some(1.0), 2.0)]);
        let filter = ScatterFilter::initial(&ctx);
        assert_eq!(filter.x_key, "Hardness");
        assert_eq!(filter.y_key, "Density");
        assert_eq!(filter.technology, Selection::All);
    }

    #[test]
    fn filters_by_technology_and_colors_points() {
        let ctx = context(&[
            ("a", "FDM", Some(1.0), 2.0),
            ("b", "SLS", Some(2.0), 4.0),
            ("c", "FDM", Some(3.0), 6.0),
        ]);
        let filter = ScatterFilter {
            technology: Selection::Only("FDM".into()),
            show_names: true,
            ..ScatterFilter::initial(&ctx)
        };
        let series = build(&ctx, &filter);
        assert_eq!(series.x, [1.0, 3.0]);
        assert_eq!(series.labels, ["a", "c"]);
        assert_eq!(series.colors, vec![ctx.colors.color_for("FDM"); 2]);
        assert_eq!(series.title, "Scatter Plot: Hardness vs Density");
        assert!(series.trendline.is_none());
    }

    #[test]
    fn trendline_spans_filtered_x_range() {
        let ctx = context(&[
            ("a", "FDM", Some(3.0), 6.0),
            ("b", "FDM", Some(1.0), 2.0),
            ("c", "FDM", None, 100.0),
            ("d", "FDM", Some(2.0), 4.0),
        ]);
        let filter = ScatterFilter {
            show_trendline: true,
            ..ScatterFilter::initial(&ctx)
        };
        let series = build(&ctx, &filter);
        assert_eq!(series.x.len(), 3);
        assert!(series.labels.is_empty());
        let line = series.trendline.unwrap();
        assert_eq!(line.x, [1.0, 3.0]);
        assert_abs_diff_eq!(line.y[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(line.y[1], 6.0, epsilon = 1e-9);
    }

    #[test]
    fn no_trendline_for_degenerate_x() {
        let ctx = context(&[("a", "FDM", Some(1.0), 2.0), ("b", "FDM", Some(1.0), 5.0)]);
        let filter = ScatterFilter {
            show_trendline: true,
            ..ScatterFilter::initial(&ctx)
        };
        assert!(build(&ctx, &filter).trendline.is_none());

        let single = context(&[("a", "FDM", Some(1.0), 2.0)]);
        let filter = ScatterFilter {
            show_trendline: true,
            ..ScatterFilter::initial(&single)
        };
        assert!(build(&single, &filter).trendline.is_none());
    }
}
