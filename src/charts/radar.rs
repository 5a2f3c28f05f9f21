use serde::Serialize;

use crate::context::DashboardContext;
use crate::data::filter::{by_category, Selection};
use crate::stats::{group_average, min_max, normalize_min_max, property_values, MinMax};

/// Radar axes, by canonical key.
pub const RADAR_PROPERTIES: [&str; 4] = [
    "TensileStrength",
    "YoungsModulus",
    "ElongationatBreak",
    "FlexuralStrength",
];

/// Maximum number of material polygons drawn at once.
pub const MAX_SELECTIONS: usize = 5;

pub const AVERAGE_NAME: &str = "Average (Category)";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RadarFilter {
    pub category: Selection,
    /// Selected materials as indices into the full record set.
    pub selected: Vec<usize>,
    pub show_average: bool,
}

impl RadarFilter {
    /// Plain click: select only `index`.
    pub fn select_only(&mut self, index: usize) {
        self.selected = vec![index];
    }

    /// Ctrl-click: toggle `index` while keeping the rest.
    pub fn toggle(&mut self, index: usize) {
        if let Some(pos) = self.selected.iter().position(|&i| i == index) {
            self.selected.remove(pos);
        } else {
            self.selected.push(index);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarPolygon {
    pub name: String,
    /// Normalized radii, closed (first value repeated at the end).
    pub r: Vec<f64>,
    /// Axis labels, closed the same way.
    pub theta: Vec<String>,
    pub is_average: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarSeries {
    pub polygons: Vec<RadarPolygon>,
}

/// Materials offered as selection buttons for a category, as
/// `(index into the full record set, name)`.
pub fn buttons(ctx: &DashboardContext, category: &Selection) -> Vec<(usize, String)> {
    ctx.records
        .iter()
        .enumerate()
        .filter(|(_, r)| category.matches(&r.category))
        .map(|(i, r)| (i, r.name.clone()))
        .collect()
}

/// Radar polygons for the selected materials plus the optional category average.
///
/// Every axis is scaled with the bounds of all materials, including the
/// average polygon, which is taken over the category-filtered materials only.
pub fn build(ctx: &DashboardContext, filter: &RadarFilter) -> RadarSeries {
    let bounds: Vec<MinMax> = RADAR_PROPERTIES
        .iter()
        .map(|key| min_max(&property_values(&ctx.records, key)))
        .collect();
    let theta = closed(
        RADAR_PROPERTIES
            .iter()
            .map(|key| ctx.display_name(key).to_string())
            .collect(),
    );
    let scale = |key_index: usize, value: f64| {
        let b = bounds[key_index];
        normalize_min_max(value, b.min, b.max)
    };

    let mut polygons: Vec<RadarPolygon> = filter
        .selected
        .iter()
        .take(MAX_SELECTIONS)
        .filter_map(|&i| ctx.records.get(i))
        .map(|material| {
            let r = RADAR_PROPERTIES
                .iter()
                .enumerate()
                .map(|(k, key)| scale(k, material.value(key).unwrap_or(f64::NAN)))
                .collect();
            RadarPolygon {
                name: material.name.clone(),
                r: closed(r),
                theta: theta.clone(),
                is_average: false,
            }
        })
        .collect();

    let filtered = by_category(&ctx.records, &filter.category);
    if filter.show_average && !filtered.is_empty() {
        let r = RADAR_PROPERTIES
            .iter()
            .enumerate()
            .map(|(k, key)| scale(k, group_average(filtered.iter().copied(), key)))
            .collect();
        polygons.push(RadarPolygon {
            name: AVERAGE_NAME.to_string(),
            r: closed(r),
            theta,
            is_average: true,
        });
    }

    RadarSeries { polygons }
}

fn closed<T: Clone>(mut ring: Vec<T>) -> Vec<T> {
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }
    ring
}
