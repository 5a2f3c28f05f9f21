use std::fmt;

use serde::Serialize;

use crate::context::DashboardContext;
use crate::data::filter::{by_technology, Selection};
use crate::stats::{mean, min_max, normalize_min_max, standard_deviation, z_score};

/// Number of ranked materials shown.
pub const TOP_N: usize = 10;

const NO_EXPLANATION: &str = "No description available for this property.";

/// How values are transformed before ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum AnalysisMode {
    #[default]
    Raw,
    Normalized,
    ZScore,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [AnalysisMode::Raw, AnalysisMode::Normalized, AnalysisMode::ZScore];

    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::Raw => "Raw Values",
            AnalysisMode::Normalized => "Normalized (0-1)",
            AnalysisMode::ZScore => "Z-Score",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AnalysisMode::Raw => "raw",
            AnalysisMode::Normalized => "norm",
            AnalysisMode::ZScore => "zscore",
        };
        write!(f, "{tag}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarFilter {
    pub technology: Selection,
    pub key: String,
    pub mode: AnalysisMode,
}

impl BarFilter {
    pub fn initial(ctx: &DashboardContext) -> Self {
        BarFilter {
            key: ctx.numeric_keys().into_iter().next().unwrap_or_default(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub title: String,
    /// Material names, lowest rank first so rank 1 is drawn at the top.
    pub names: Vec<String>,
    pub values: Vec<f64>,
    /// `values` formatted with two decimals.
    pub value_labels: Vec<String>,
    pub explanation: String,
}

/// Fixed help text for well-known properties.
pub fn property_explanation(key: &str) -> &'static str {
    match key {
        "TensileStrength" => "Tensile Strength (MPa) is the maximum stress a material can withstand while being stretched before necking.",
        "YoungsModulus" => "Young's Modulus (MPa) measures the stiffness of a material; higher values mean stiffer materials.",
        "ElongationatBreak" => "Elongation at Break (%) indicates the ductility, or how much a material can stretch before breaking.",
        "FlexuralStrength" => "Flexural Strength (MPa) measures the ability of a material to resist deformation under load in bending.",
        _ => NO_EXPLANATION,
    }
}

/// Apply `mode` over the working set.
pub fn transform(values: &[f64], mode: AnalysisMode) -> Vec<f64> {
    match mode {
        AnalysisMode::Raw => values.to_vec(),
        AnalysisMode::Normalized => {
            let range = min_max(values);
            values
                .iter()
                .map(|&v| normalize_min_max(v, range.min, range.max))
                .collect()
        }
        AnalysisMode::ZScore => {
            let m = mean(values);
            let sd = standard_deviation(values);
            values.iter().map(|&v| z_score(v, m, sd)).collect()
        }
    }
}

/// Top materials by the selected property, ascending so the best is last.
pub fn build(ctx: &DashboardContext, filter: &BarFilter) -> BarSeries {
    let working: Vec<(&str, f64)> = by_technology(&ctx.records, &filter.technology)
        .into_iter()
        .filter_map(|r| Some((r.name.as_str(), r.value(&filter.key)?)))
        .collect();

    let raw: Vec<f64> = working.iter().map(|(_, v)| *v).collect();
    let mut ranked: Vec<(&str, f64)> = working
        .iter()
        .map(|(name, _)| *name)
        .zip(transform(&raw, filter.mode))
        .collect();
    // Stable: equal values keep dataset order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(TOP_N);
    ranked.reverse();

    let mut title = format!(
        "Top {TOP_N} Materials by {} ({} mode)",
        ctx.display_name(&filter.key),
        filter.mode
    );
    if let Some(unit) = ctx.unit(&filter.key) {
        title.push_str(&format!(" ({unit})"));
    }

    BarSeries {
        title,
        names: ranked.iter().map(|(n, _)| n.to_string()).collect(),
        values: ranked.iter().map(|(_, v)| *v).collect(),
        value_labels: ranked.iter().map(|(_, v)| format!("{v:.2}")).collect(),
        explanation: property_explanation(&filter.key).to_string(),
    }
}
