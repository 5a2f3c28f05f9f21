use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_extras::{Column, TableBuilder};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use material_dashboard::charts::{bar, heatmap, parallel, radar, scatter, ChartKind};
use material_dashboard::color::{correlation_color, generate_palette, hex, NEON_PALETTE};
use material_dashboard::stats::normalize_min_max;
use material_dashboard::DashboardContext;

use crate::state::AppState;
use crate::ui::to_color32;

// ---------------------------------------------------------------------------
// Central panel: dispatch to the active chart
// ---------------------------------------------------------------------------

/// Render the active chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let Some(ctx) = &state.context else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open the units and properties files  (File → Open…)");
        });
        return;
    };

    match state.active {
        ChartKind::Scatter => scatter_plot(ui, &scatter::build(ctx, &state.scatter)),
        ChartKind::Parallel => parallel_plot(ui, &parallel::build(ctx, &state.parallel)),
        ChartKind::Radar => radar_plot(ui, &radar::build(ctx, &state.radar)),
        ChartKind::Bar => bar_plot(ui, &bar::build(ctx, &state.bar)),
        ChartKind::Correlation => heatmap_plot(ui, ctx, &heatmap::build(ctx, &state.heatmap)),
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, series: &scatter::ScatterSeries) {
    ui.heading(series.title.as_str());

    // One Points item per colour, in first-seen order.
    let mut groups: Vec<(Color32, Vec<[f64; 2]>)> = Vec::new();
    for ((&x, &y), &c) in series.x.iter().zip(&series.y).zip(&series.colors) {
        let color = to_color32(c);
        match groups.iter_mut().find(|(gc, _)| *gc == color) {
            Some((_, pts)) => pts.push([x, y]),
            None => groups.push((color, vec![[x, y]])),
        }
    }

    Plot::new("scatter_plot")
        .x_axis_label(series.x_label.clone())
        .y_axis_label(series.y_label.clone())
        .show(ui, |plot_ui| {
            for (color, pts) in groups {
                plot_ui.points(Points::new(pts).radius(6.0).color(color));
            }
            for ((&x, &y), name) in series.x.iter().zip(&series.y).zip(&series.labels) {
                plot_ui.text(
                    Text::new(PlotPoint::new(x, y), name.as_str())
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(Color32::LIGHT_GRAY),
                );
            }
            if let Some(trend) = &series.trendline {
                let points: PlotPoints = vec![[trend.x[0], trend.y[0]], [trend.x[1], trend.y[1]]].into();
                plot_ui.line(
                    Line::new(points)
                        .name("Trendline")
                        .color(to_color32(hex(NEON_PALETTE[1])))
                        .style(LineStyle::dashed_dense())
                        .width(2.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Parallel coordinates
// ---------------------------------------------------------------------------

fn parallel_plot(ui: &mut Ui, series: &parallel::ParallelSeries) {
    ui.heading("Parallel Coordinates Plot");
    let palette = generate_palette(series.line_color.len());

    Plot::new("parallel_plot")
        .show_axes([false, false])
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (i, dim) in series.dimensions.iter().enumerate() {
                let x = i as f64;
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[x, 0.0], [x, 1.0]]))
                        .color(Color32::GRAY)
                        .width(1.0),
                );
                plot_ui.text(Text::new(PlotPoint::new(x, -0.05), dim.label.as_str()).anchor(Align2::CENTER_TOP));
                plot_ui.text(
                    Text::new(PlotPoint::new(x, 1.02), format!("{:.2}", dim.range.max))
                        .anchor(Align2::CENTER_BOTTOM),
                );
            }

            for (row, &c) in palette.iter().enumerate() {
                let pts: Vec<[f64; 2]> = series
                    .dimensions
                    .iter()
                    .enumerate()
                    .filter(|(_, d)| !d.values[row].is_nan())
                    .map(|(i, d)| [i as f64, normalize_min_max(d.values[row], d.range.min, d.range.max)])
                    .collect();
                let mut line = Line::new(PlotPoints::from(pts)).color(to_color32(c)).width(3.0);
                if let Some(name) = series.names.get(row) {
                    line = line.name(name);
                }
                plot_ui.line(line);
            }
        });
}

// ---------------------------------------------------------------------------
// Radar
// ---------------------------------------------------------------------------

fn radar_plot(ui: &mut Ui, series: &radar::RadarSeries) {
    ui.heading("Radar Chart (Normalized)");
    let axes = radar::RADAR_PROPERTIES.len();
    let angle = |k: usize| FRAC_PI_2 - TAU * k as f64 / axes as f64;
    let polar = |k: usize, r: f64| {
        let r = if r.is_finite() { r } else { 0.0 };
        [r * angle(k).cos(), r * angle(k).sin()]
    };

    Plot::new("radar_plot")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for k in 0..axes {
                plot_ui.line(Line::new(PlotPoints::from(vec![[0.0, 0.0], polar(k, 1.0)])).color(Color32::DARK_GRAY));
            }
            for ring in [0.25, 0.5, 0.75, 1.0] {
                let pts: Vec<[f64; 2]> = (0..=axes).map(|k| polar(k % axes, ring)).collect();
                plot_ui.line(Line::new(PlotPoints::from(pts)).color(Color32::DARK_GRAY).width(0.5));
            }
            if let Some(first) = series.polygons.first() {
                for (k, label) in first.theta.iter().take(axes).enumerate() {
                    let [x, y] = polar(k, 1.1);
                    plot_ui.text(Text::new(PlotPoint::new(x, y), label.as_str()));
                }
            }

            for (n, poly) in series.polygons.iter().enumerate() {
                let color = if poly.is_average {
                    to_color32(hex(NEON_PALETTE[0]))
                } else {
                    to_color32(hex(NEON_PALETTE[(n + 1) % NEON_PALETTE.len()]))
                };
                // The closing vertex is implicit for a polygon.
                let pts: Vec<[f64; 2]> = poly.r.iter().take(axes).enumerate().map(|(k, &r)| polar(k, r)).collect();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(pts))
                        .name(&poly.name)
                        .fill_color(color.gamma_multiply(0.25))
                        .stroke(Stroke::new(2.0, color)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar chart
// ---------------------------------------------------------------------------

fn bar_plot(ui: &mut Ui, series: &bar::BarSeries) {
    ui.heading(series.title.as_str());
    let names = series.names.clone();
    let bars: Vec<Bar> = series
        .values
        .iter()
        .zip(&series.names)
        .enumerate()
        .map(|(i, (&v, name))| Bar::new(i as f64, v).name(name))
        .collect();
    let neon = to_color32(hex(NEON_PALETTE[0]));

    let plot_height = (ui.available_height() - 60.0).max(100.0);
    Plot::new("bar_plot")
        .height(plot_height)
        .y_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() < 1e-6 && i >= 0.0 {
                names.get(i as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).horizontal().color(neon));
            for (i, (&v, label)) in series.values.iter().zip(&series.value_labels).enumerate() {
                plot_ui.text(Text::new(PlotPoint::new(v, i as f64), label.as_str()).anchor(Align2::LEFT_CENTER));
            }
        });

    ui.separator();
    ui.label(series.explanation.as_str());
}

// ---------------------------------------------------------------------------
// Correlation heatmap and report
// ---------------------------------------------------------------------------

fn heatmap_plot(ui: &mut Ui, ctx: &DashboardContext, series: &heatmap::HeatmapSeries) {
    ui.heading("Correlation Heatmap");
    let n = series.keys.len();
    let x_labels = series.labels.clone();
    let y_labels = series.labels.clone();
    let axis_label = |labels: &[String], value: f64| {
        let i = value.round();
        if (value - i).abs() < 1e-6 && i >= 0.0 {
            labels.get(i as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    Plot::new("heatmap_plot")
        .height(ui.available_height() * 0.65)
        .data_aspect(1.0)
        .show_grid(false)
        .allow_drag(false)
        .x_axis_formatter(move |mark, _range| axis_label(&x_labels, mark.value))
        .y_axis_formatter(move |mark, _range| axis_label(&y_labels, mark.value))
        .show(ui, |plot_ui| {
            for (i, row) in series.matrix.iter().enumerate() {
                for (j, cell) in row.iter().enumerate() {
                    let fill = match cell {
                        Some(v) => to_color32(correlation_color(*v)),
                        None => Color32::from_gray(34),
                    };
                    // Row 0 at the top.
                    let (x, y) = (j as f64, (n - 1 - i) as f64);
                    let square = vec![
                        [x - 0.5, y - 0.5],
                        [x + 0.5, y - 0.5],
                        [x + 0.5, y + 0.5],
                        [x - 0.5, y + 0.5],
                    ];
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(square))
                            .fill_color(fill)
                            .stroke(Stroke::new(0.5, Color32::from_gray(51))),
                    );
                }
            }
        });

    ui.separator();
    correlation_report(ui, ctx, series.report.as_ref());
}

fn correlation_report(ui: &mut Ui, ctx: &DashboardContext, report: Option<&heatmap::CorrelationReport>) {
    ui.strong("Correlation Analysis Report");
    let Some(report) = report else {
        ui.label(RichText::new("Not enough numeric properties to correlate.").italics());
        return;
    };
    let pair = |p: &heatmap::CellPair| {
        format!(
            "{} and {} ({:.2})",
            ctx.display_name(&p.row_key),
            ctx.display_name(&p.col_key),
            p.value
        )
    };
    let rows = [
        ("Average Correlation", format!("{:.2}", report.mean)),
        ("Median Correlation", format!("{:.2}", report.median)),
        ("Standard Deviation", format!("{:.2}", report.std_dev)),
        ("Strongest Positive", pair(&report.strongest_positive)),
        ("Strongest Negative", pair(&report.strongest_negative)),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .body(|mut body| {
            for (name, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}
