use std::collections::HashMap;
use std::str::FromStr;

use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

/// Neon palette assigned round-robin to technologies.
pub const NEON_PALETTE: [&str; 6] = ["#00ff99", "#ff00cc", "#ff66cc", "#66ffcc", "#cc00ff", "#00ccff"];

/// Correlation heatmap stops: position in `[0, 1]` → colour.
pub const HEATMAP_STOPS: [(f32, &str); 5] = [
    (0.0, "#ff00cc"),
    (0.25, "#ff66cc"),
    (0.5, "#444444"),
    (0.75, "#66ffcc"),
    (1.0, "#00ff99"),
];

/// Parse a `#rrggbb` literal; malformed input falls back to black.
pub fn hex(code: &str) -> Srgb<u8> {
    Srgb::from_str(code).unwrap_or_else(|_| {
        log::warn!("invalid colour literal {code:?}");
        Srgb::new(0, 0, 0)
    })
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` colours with hues sweeping from blue to red, for sequential
/// data such as the line index of a parallel-coordinates plot.
pub fn generate_palette(n: usize) -> Vec<Srgb<u8>> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.0 } else { i as f32 / (n - 1) as f32 };
            let hue = 240.0 * (1.0 - t);
            let hsl = Hsl::new(hue, 0.85, 0.5);
            let rgb: Srgb = hsl.into_color();
            rgb.into_format()
        })
        .collect()
}

/// Colour for a correlation coefficient in `[-1, 1]` on the heatmap scale.
/// Non-finite values map to the neutral middle stop.
pub fn correlation_color(value: f64) -> Srgb<u8> {
    let t = if value.is_finite() {
        ((value.clamp(-1.0, 1.0) + 1.0) / 2.0) as f32
    } else {
        0.5
    };
    let window = HEATMAP_STOPS
        .windows(2)
        .find(|w| t <= w[1].0)
        .unwrap_or(&HEATMAP_STOPS[3..5]);
    let (lo_pos, lo) = window[0];
    let (hi_pos, hi) = window[1];
    let local = (t - lo_pos) / (hi_pos - lo_pos);
    let a: LinSrgb = hex(lo).into_format::<f32>().into_linear();
    let b: LinSrgb = hex(hi).into_format::<f32>().into_linear();
    Srgb::<f32>::from_linear(a.mix(b, local)).into_format()
}

// ---------------------------------------------------------------------------
// Category colour table: technology → colour
// ---------------------------------------------------------------------------

/// Maps each technology to a palette colour by first-seen index.
#[derive(Debug, Clone)]
pub struct CategoryColorTable {
    mapping: HashMap<String, Srgb<u8>>,
    order: Vec<String>,
    default_color: Srgb<u8>,
}

impl CategoryColorTable {
    /// Build the table from technologies in first-seen order.
    pub fn new(technologies: &[String]) -> Self {
        let palette: Vec<Srgb<u8>> = NEON_PALETTE.iter().map(|c| hex(c)).collect();
        let mapping = technologies
            .iter()
            .enumerate()
            .map(|(i, tech)| (tech.clone(), palette[i % palette.len()]))
            .collect();
        log::debug!("Technology colours assigned for {} technologies", technologies.len());

        CategoryColorTable {
            mapping,
            order: technologies.to_vec(),
            default_color: palette[0],
        }
    }

    /// Look up the colour for a technology.
    pub fn color_for(&self, technology: &str) -> Srgb<u8> {
        self.mapping
            .get(technology)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (technology → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Srgb<u8>)> {
        self.order
            .iter()
            .map(|tech| (tech.clone(), self.color_for(tech)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_neon_literals() {
        assert_eq!(hex("#00ff99"), Srgb::new(0x00, 0xff, 0x99));
        assert_eq!(hex("nope"), Srgb::new(0, 0, 0));
    }

    #[test]
    fn technologies_cycle_through_palette() {
        let techs: Vec<String> = (0..8).map(|i| format!("T{i}")).collect();
        let table = CategoryColorTable::new(&techs);
        assert_eq!(table.color_for("T0"), hex("#00ff99"));
        assert_eq!(table.color_for("T5"), hex("#00ccff"));
        assert_eq!(table.color_for("T6"), table.color_for("T0"));
        assert_eq!(table.color_for("T7"), table.color_for("T1"));
        assert_eq!(table.color_for("unknown"), hex("#00ff99"));
        assert_eq!(table.legend_entries()[2].0, "T2");
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn heatmap_scale_hits_stops() {
        assert_eq!(correlation_color(-1.0), hex("#ff00cc"));
        assert_eq!(correlation_color(1.0), hex("#00ff99"));
        assert_eq!(correlation_color(0.0), hex("#444444"));
        assert_eq!(correlation_color(f64::NAN), hex("#444444"));
    }

    #[test]
    fn heatmap_scale_blends_between_stops() {
        let low = correlation_color(-1.0);
        let mid = correlation_color(-0.75);
        let next = correlation_color(-0.5);
        assert_ne!(mid, low);
        assert_ne!(mid, next);
        // Values past the ends clamp to the end stops.
        assert_eq!(correlation_color(-3.0), low);
        assert_eq!(correlation_color(3.0), correlation_color(1.0));
    }
}
