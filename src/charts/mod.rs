/// Chart data adapters.
///
/// Each adapter is a pure function `(context, filter) -> series`: it reads the
/// immutable [`DashboardContext`](crate::context::DashboardContext), applies
/// the chart's filter state and returns plain, serializable data. Nothing is
/// cached between calls; the UI calls the adapter again on every change.

pub mod bar;
pub mod heatmap;
pub mod parallel;
pub mod radar;
pub mod scatter;

use serde::Serialize;

/// The five dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Scatter,
    Parallel,
    Radar,
    Bar,
    Correlation,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Scatter,
        ChartKind::Parallel,
        ChartKind::Radar,
        ChartKind::Bar,
        ChartKind::Correlation,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Parallel => "Parallel Coordinates",
            ChartKind::Radar => "Radar Chart",
            ChartKind::Bar => "Top Bar Chart",
            ChartKind::Correlation => "Correlation Heatmap",
        }
    }

    /// Usage notes shown in the info area.
    pub fn help(self) -> &'static [&'static str] {
        match self {
            ChartKind::Scatter => &[
                "Select properties for the X- and Y-axes.",
                "Filter by Technology.",
                "Toggle \"Show Materials\" to display or hide material names.",
                "Optionally display a linear trendline.",
            ],
            ChartKind::Parallel => &[
                "Displays all numeric properties for a percentage of materials filtered by Technology.",
                "Hover over a line to view details.",
            ],
            ChartKind::Radar => &[
                "Compare key material properties (normalized 0–1) for materials in the selected Category.",
                "Toggle material buttons (Ctrl-click for multiple) to select up to 5 materials.",
                "The \"Show Average\" trace displays the average of all materials in the current Category filter.",
            ],
            ChartKind::Bar => &[
                "Ranks materials by a selected property and analysis mode.",
                "Filter by Technology.",
                "Below the chart, a brief explanation of the property is provided.",
            ],
            ChartKind::Correlation => &[
                "Displays Pearson correlation coefficients between numeric properties (for materials in the selected Technology).",
                "No individual numeric annotations appear; instead, an analytical report is provided below.",
            ],
        }
    }
}
