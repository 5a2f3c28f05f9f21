use eframe::egui::{self, Color32, ComboBox, RichText, ScrollArea, Ui};

use material_dashboard::charts::bar::AnalysisMode;
use material_dashboard::charts::radar::{self, MAX_SELECTIONS};
use material_dashboard::charts::ChartKind;
use material_dashboard::data::filter::Selection;
use material_dashboard::DashboardContext;

use crate::state::AppState;
use crate::ui::to_color32;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open units…").clicked() {
                open_units_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open properties…").clicked() {
                open_properties_dialog(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.context.is_some(), egui::Button::new("Export chart data…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for kind in ChartKind::ALL {
            if ui.selectable_label(state.active == kind, kind.title()).clicked() {
                state.active = kind;
            }
        }

        ui.separator();

        if let Some(sources) = state.sources_label() {
            ui.label(RichText::new(sources).weak());
        }

        if let Some(ctx) = &state.context {
            ui.label(format!(
                "{} materials, {} technologies",
                ctx.len(),
                ctx.technologies.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – info area and the active chart's filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(state.active.title());
    for line in state.active.help() {
        ui.label(format!("• {line}"));
    }
    ui.separator();

    let Some(ctx) = state.context.as_ref() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.active {
            ChartKind::Scatter => {
                let f = &mut state.scatter;
                property_combo(ui, ctx, "scatter_x", "X axis", &mut f.x_key);
                property_combo(ui, ctx, "scatter_y", "Y axis", &mut f.y_key);
                selection_combo(ui, "scatter_tech", "Technology", &ctx.technologies, &mut f.technology);
                ui.checkbox(&mut f.show_names, "Show Materials");
                ui.checkbox(&mut f.show_trendline, "Show Trendline");
                ui.separator();
                legend(ui, ctx);
            }
            ChartKind::Parallel => {
                let f = &mut state.parallel;
                selection_combo(ui, "parallel_tech", "Technology", &ctx.technologies, &mut f.technology);
                ui.add(egui::Slider::new(&mut f.percent, 1..=100).text("% of materials"));
                ui.checkbox(&mut f.show_names, "Show names on hover");
            }
            ChartKind::Radar => {
                let f = &mut state.radar;
                selection_combo(ui, "radar_cat", "Category", &ctx.categories, &mut f.category);
                ui.checkbox(&mut f.show_average, "Show Average");
                ui.label(format!("Select up to {MAX_SELECTIONS} materials (Ctrl-click for multiple):"));
                ui.horizontal_wrapped(|ui: &mut Ui| {
                    for (index, name) in radar::buttons(ctx, &f.category) {
                        let selected = f.selected.contains(&index);
                        let response = ui.selectable_label(selected, name);
                        if response.clicked() {
                            if ui.input(|i| i.modifiers.command) {
                                f.toggle(index);
                            } else {
                                f.select_only(index);
                            }
                        }
                    }
                });
            }
            ChartKind::Bar => {
                let f = &mut state.bar;
                property_combo(ui, ctx, "bar_prop", "Property", &mut f.key);
                ComboBox::from_label("Analysis")
                    .selected_text(f.mode.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for mode in AnalysisMode::ALL {
                            ui.selectable_value(&mut f.mode, mode, mode.label());
                        }
                    });
                selection_combo(ui, "bar_tech", "Technology", &ctx.technologies, &mut f.technology);
            }
            ChartKind::Correlation => {
                let f = &mut state.heatmap;
                selection_combo(ui, "corr_tech", "Technology", &ctx.technologies, &mut f.technology);
            }
        });
}

/// Dropdown over the numeric properties of the first material.
fn property_combo(ui: &mut Ui, ctx: &DashboardContext, id: &str, label: &str, key: &mut String) {
    ui.strong(label);
    ComboBox::from_id_salt(id)
        .selected_text(ctx.label_with_unit(key))
        .show_ui(ui, |ui: &mut Ui| {
            for k in ctx.numeric_keys() {
                let text = ctx.label_with_unit(&k);
                ui.selectable_value(key, k, text);
            }
        });
}

/// "All" plus every distinct value of a categorical column.
fn selection_combo(ui: &mut Ui, id: &str, label: &str, values: &[String], selection: &mut Selection) {
    ui.strong(label);
    ComboBox::from_id_salt(id)
        .selected_text(selection.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(selection, Selection::All, "All");
            for v in values {
                ui.selectable_value(selection, Selection::Only(v.clone()), v.as_str());
            }
        });
}

fn legend(ui: &mut Ui, ctx: &DashboardContext) {
    ui.strong("Technologies");
    for (tech, color) in ctx.colors.legend_entries() {
        ui.label(RichText::new(tech).color(to_color32(color)));
    }
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_units_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open material units")
        .add_filter("CSV", &["csv"])
        .pick_file();
    if let Some(path) = file {
        state.open_units(&path);
    }
}

pub fn open_properties_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open material properties")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();
    if let Some(path) = file {
        state.open_properties(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("chart.json")
        .save_file();
    if let Some(path) = file {
        state.export_active(&path);
    }
}
