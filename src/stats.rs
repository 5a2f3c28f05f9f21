//! Descriptive statistics over material records.
//!
//! Every function is pure and works on the working set handed in by the
//! caller. Degenerate inputs resolve to documented sentinels (NaN, 0.5, 0)
//! instead of errors so that charts still render with partial data.

use serde::Serialize;

use crate::data::model::MaterialRecord;

// ---------------------------------------------------------------------------
// Numeric property discovery and working-set extraction
// ---------------------------------------------------------------------------

/// Keys of `sample` holding a numeric value, in column order.
///
/// Only the representative record is inspected: a property that is numeric
/// elsewhere but not in `sample` is left out.
pub fn numeric_property_keys(sample: &MaterialRecord) -> Vec<String> {
    sample
        .properties
        .iter()
        .filter(|(_, v)| v.is_numeric())
        .map(|(k, _)| k.clone())
        .collect()
}

/// Numeric values of `key`, skipping records without one.
pub fn property_values<'a>(records: impl IntoIterator<Item = &'a MaterialRecord>, key: &str) -> Vec<f64> {
    records.into_iter().filter_map(|r| r.value(key)).collect()
}

/// Aligned `(x, y)` values for records numeric in both keys.
pub fn paired_values<'a>(
    records: impl IntoIterator<Item = &'a MaterialRecord>,
    x_key: &str,
    y_key: &str,
) -> (Vec<f64>, Vec<f64>) {
    records
        .into_iter()
        .filter_map(|r| Some((r.value(x_key)?, r.value(y_key)?)))
        .unzip()
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMax {
    pub min: f64,
    pub max: f64,
}

impl MinMax {
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }
}

/// Smallest and largest value. An empty slice yields `+inf` / `-inf`.
pub fn min_max(values: &[f64]) -> MinMax {
    MinMax {
        min: values.iter().cloned().fold(f64::INFINITY, f64::min),
        max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Arithmetic mean (NaN when empty).
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation, dividing by N.
pub fn standard_deviation(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Median; the mean of the two middle values when the length is even.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 != 0 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

/// Min-max scaling into `[0, 1]`; exactly 0.5 for a constant range.
pub fn normalize_min_max(v: f64, min: f64, max: f64) -> f64 {
    if max == min {
        0.5
    } else {
        (v - min) / (max - min)
    }
}

/// Standard score; exactly 0 when `sd` is 0.
pub fn z_score(v: f64, mean: f64, sd: f64) -> f64 {
    if sd == 0.0 {
        0.0
    } else {
        (v - mean) / sd
    }
}

// ---------------------------------------------------------------------------
// Regression and correlation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares fit of `ys` on `xs`.
///
/// Callers must pass at least two points with distinct x values; otherwise
/// the slope is NaN or infinite.
pub fn linear_regression(xs: &[f64], ys: &[f64]) -> Regression {
    let n = xs.len() as f64;
    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    Regression { slope, intercept }
}

/// Pearson correlation coefficient. NaN when either series has zero variance.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let mean_x = mean(xs);
    let mean_y = mean(ys);
    let (mut numerator, mut denom_x, mut denom_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        numerator += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }
    if denom_x == 0.0 || denom_y == 0.0 {
        return f64::NAN;
    }
    numerator / (denom_x * denom_y).sqrt()
}

/// Mean of `key` over the records that have a numeric value for it.
pub fn group_average<'a>(records: impl IntoIterator<Item = &'a MaterialRecord>, key: &str) -> f64 {
    mean(&property_values(records, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, NAME_KEY};
    use approx::assert_abs_diff_eq;

    fn record(name: &str, cells: &[(&str, CellValue)]) -> MaterialRecord {
        let mut props = vec![(NAME_KEY.to_string(), CellValue::Text(name.to_string()))];
        props.extend(cells.iter().map(|(k, v)| (k.to_string(), v.clone())));
        MaterialRecord::from_properties(props.into_iter().collect()).unwrap()
    }

    #[test]
    fn numeric_keys_follow_representative_record() {
        let first = record(
            "a",
            &[
                ("Density", CellValue::Float(1.2)),
                ("Grade", CellValue::Text("A".into())),
                ("Hardness", CellValue::Integer(80)),
                ("Missing", CellValue::Null),
            ],
        );
        assert_eq!(numeric_property_keys(&first), ["Density", "Hardness"]);
    }

    #[test]
    fn working_set_skips_missing_values() {
        let records = vec![
            record("a", &[("X", CellValue::Float(1.0)), ("Y", CellValue::Float(10.0))]),
            record("b", &[("X", CellValue::Null), ("Y", CellValue::Float(20.0))]),
            record("c", &[("X", CellValue::Float(3.0))]),
        ];
        assert_eq!(property_values(&records, "X"), [1.0, 3.0]);
        assert_eq!(paired_values(&records, "X", "Y"), (vec![1.0], vec![10.0]));
        assert_abs_diff_eq!(group_average(&records, "Y"), 15.0);
    }

    #[test]
    fn summary_statistics() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(min_max(&values), MinMax { min: 2.0, max: 9.0 });
        assert_abs_diff_eq!(mean(&values), 5.0);
        assert_abs_diff_eq!(standard_deviation(&values), 2.0);
        assert!(mean(&[]).is_nan());
        assert_eq!(min_max(&[]).min, f64::INFINITY);
    }

    #[test]
    fn median_odd_and_even() {
        assert_eq!(median(&[1.0, 3.0, 2.0]), 2.0);
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn degenerate_transforms_use_sentinels() {
        assert_eq!(normalize_min_max(42.0, 7.0, 7.0), 0.5);
        assert_eq!(normalize_min_max(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize_min_max(10.0, 0.0, 10.0), 1.0);
        assert_eq!(z_score(42.0, 3.0, 0.0), 0.0);
        assert_eq!(z_score(5.0, 3.0, 2.0), 1.0);
    }

    #[test]
    fn regression_on_perfect_line() {
        let fit = linear_regression(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.predict(10.0), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn regression_with_constant_x_is_undefined() {
        let fit = linear_regression(&[2.0, 2.0], &[1.0, 3.0]);
        assert!(!fit.slope.is_finite());
    }

    #[test]
    fn correlation_properties() {
        let xs = [1.0, 2.0, 3.0, 4.0, 6.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 8.0];
        assert_eq!(pearson_correlation(&xs, &ys), pearson_correlation(&ys, &xs));
        assert_abs_diff_eq!(pearson_correlation(&xs, &xs), 1.0, epsilon = 1e-12);
        let neg: Vec<f64> = xs.iter().map(|x| -x).collect();
        assert_abs_diff_eq!(pearson_correlation(&xs, &neg), -1.0, epsilon = 1e-12);
        assert!(pearson_correlation(&xs, &[1.0; 5]).is_nan());
    }
}
