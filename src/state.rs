use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use material_dashboard::charts::bar::BarFilter;
use material_dashboard::charts::heatmap::HeatmapFilter;
use material_dashboard::charts::parallel::ParallelFilter;
use material_dashboard::charts::radar::RadarFilter;
use material_dashboard::charts::scatter::ScatterFilter;
use material_dashboard::charts::{bar, heatmap, parallel, radar, scatter, ChartKind};
use material_dashboard::data::loader::{load_properties, load_units, DEFAULT_PROPERTIES_FILE, DEFAULT_UNITS_FILE};
use material_dashboard::data::model::UnitRow;
use material_dashboard::DashboardContext;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Session context (None until both files load and yield materials).
    pub context: Option<DashboardContext>,

    /// Units rows read so far; kept so a new properties file can reuse them.
    pub units: Vec<UnitRow>,
    pub units_path: Option<PathBuf>,
    pub properties_path: Option<PathBuf>,

    /// Chart shown in the central panel.
    pub active: ChartKind,

    /// Per-chart selections.
    pub scatter: ScatterFilter,
    pub parallel: ParallelFilter,
    pub radar: RadarFilter,
    pub bar: BarFilter,
    pub heatmap: HeatmapFilter,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            context: None,
            units: Vec::new(),
            units_path: None,
            properties_path: None,
            active: ChartKind::Scatter,
            scatter: ScatterFilter::default(),
            parallel: ParallelFilter::default(),
            radar: RadarFilter::default(),
            bar: BarFilter::default(),
            heatmap: HeatmapFilter::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Load `Material Units.csv` and `Material Properties.csv` from the
    /// working directory when both exist.
    pub fn with_default_files() -> Self {
        let mut state = Self::default();
        let units = Path::new(DEFAULT_UNITS_FILE);
        let properties = Path::new(DEFAULT_PROPERTIES_FILE);
        if units.exists() && properties.exists() {
            state.open_units(units);
            state.open_properties(properties);
        } else {
            log::info!("No default data files in working directory; waiting for File → Open");
        }
        state
    }

    /// Read a units file. Rebuilds the context if properties are already known.
    pub fn open_units(&mut self, path: &Path) {
        match load_units(path) {
            Ok(rows) => {
                log::info!("Loaded {} unit rows from {}", rows.len(), path.display());
                self.units = rows;
                self.units_path = Some(path.to_path_buf());
                self.status_message = None;
                if let Some(props) = self.properties_path.clone() {
                    self.open_properties(&props);
                }
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Read a properties file and build a fresh context from it.
    pub fn open_properties(&mut self, path: &Path) {
        self.properties_path = Some(path.to_path_buf());
        let table = match load_properties(path) {
            Ok(table) => table,
            Err(e) => return self.report_error(e),
        };
        log::info!(
            "Loaded {} rows with columns {:?}",
            table.rows.len(),
            table.headers
        );
        match DashboardContext::build(&self.units, &table) {
            Ok(ctx) => self.set_context(ctx),
            Err(e) => {
                self.context = None;
                self.report_error(e.into());
            }
        }
    }

    /// Ingest a newly built context and reset every chart's selections.
    pub fn set_context(&mut self, ctx: DashboardContext) {
        self.scatter = ScatterFilter::initial(&ctx);
        self.parallel = ParallelFilter::default();
        self.radar = RadarFilter::default();
        self.bar = BarFilter::initial(&ctx);
        self.heatmap = HeatmapFilter::default();
        self.context = Some(ctx);
        self.status_message = None;
    }

    /// File names of the loaded sources, for the top bar.
    pub fn sources_label(&self) -> Option<String> {
        let name = |p: &Option<PathBuf>| {
            p.as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
        };
        match (name(&self.units_path), name(&self.properties_path)) {
            (None, None) => None,
            (units, props) => Some(format!(
                "{} + {}",
                units.as_deref().unwrap_or("no units"),
                props.as_deref().unwrap_or("no properties")
            )),
        }
    }

    fn report_error(&mut self, e: anyhow::Error) {
        log::error!("{e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }

    /// The active chart's series as pretty JSON.
    pub fn active_series_json(&self) -> Result<String> {
        let ctx = self.context.as_ref().context("no dataset loaded")?;
        let json = match self.active {
            ChartKind::Scatter => serde_json::to_string_pretty(&scatter::build(ctx, &self.scatter)),
            ChartKind::Parallel => serde_json::to_string_pretty(&parallel::build(ctx, &self.parallel)),
            ChartKind::Radar => serde_json::to_string_pretty(&radar::build(ctx, &self.radar)),
            ChartKind::Bar => serde_json::to_string_pretty(&bar::build(ctx, &self.bar)),
            ChartKind::Correlation => serde_json::to_string_pretty(&heatmap::build(ctx, &self.heatmap)),
        };
        json.context("serializing chart data")
    }

    /// Write the active chart's series to `path`.
    pub fn export_active(&mut self, path: &Path) {
        let result = self
            .active_series_json()
            .and_then(|json| std::fs::write(path, json).context("writing export file"));
        match result {
            Ok(()) => {
                log::info!("Exported {} data to {}", self.active.title(), path.display());
                self.status_message = None;
            }
            Err(e) => self.report_error(e),
        }
    }
}
