use std::path::PathBuf;

use eframe::egui::Color32;

use crate::chart::ChartData;
use crate::color::series_colors;
use crate::experiment::{Suite, SuiteKind, SuiteResult};
use crate::pipeline::PipelineOverride;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    /// Folder holding one sub-directory per experiment variant.
    pub root: PathBuf,

    /// Which comparison is shown.
    pub suite: Suite,

    /// Partial pipeline parameters from `--config`, merged onto each suite's preset.
    pub pipeline_override: Option<PipelineOverride>,

    /// Result of the last run (None until the first successful run).
    pub result: Option<SuiteResult>,

    /// Padded, transposed chart rows (cached).
    pub chart: Option<ChartData>,

    /// One colour per series.
    pub colors: Vec<Color32>,

    /// Per-series visibility toggles.
    pub visible: Vec<bool>,

    /// Metric (0..3) shown in the central plot.
    pub metric: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(root: PathBuf, kind: SuiteKind, pipeline_override: Option<PipelineOverride>) -> Self {
        let mut state = Self {
            root,
            suite: Suite::new(kind),
            pipeline_override,
            result: None,
            chart: None,
            colors: Vec::new(),
            visible: Vec::new(),
            metric: 0,
            status_message: None,
        };
        state.apply_override();
        state
    }

    /// Build state around an already computed result.
    pub fn with_result(mut self, result: SuiteResult) -> Self {
        self.set_result(result);
        self
    }

    /// Expects `suite` to hold its own preset; call once per fresh suite.
    fn apply_override(&mut self) {
        if let Some(over) = &self.pipeline_override {
            let merged = over.apply_to(&self.suite.pipeline);
            self.suite = self.suite.clone().with_pipeline(merged);
        }
    }

    /// Ingest a suite result, rebuild chart rows and colours.
    pub fn set_result(&mut self, result: SuiteResult) {
        let chart = ChartData::from_suite(&self.suite, &result);
        let specs: Vec<Option<&str>> = chart.series.iter().map(|s| s.color.as_deref()).collect();
        self.colors = series_colors(&specs);
        self.visible = vec![true; chart.series.len()];
        self.chart = Some(chart);
        self.result = Some(result);
        self.status_message = None;
    }

    /// Re-run the suite over `root`.
    pub fn reload(&mut self) {
        match self.suite.run(&self.root) {
            Ok(result) => {
                log::info!(
                    "Loaded {} series from {}",
                    result.series.len(),
                    self.root.display()
                );
                self.set_result(result);
            }
            Err(e) => {
                log::error!("Failed to process {}: {e:#}", self.root.display());
                self.result = None;
                self.chart = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Switch suite and re-run.
    pub fn set_suite(&mut self, kind: SuiteKind) {
        if self.suite.kind == kind {
            return;
        }
        self.suite = Suite::new(kind);
        self.apply_override();
        self.reload();
    }

    /// Point at a new root folder and re-run.
    pub fn set_root(&mut self, root: PathBuf) {
        self.root = root;
        self.reload();
    }

    pub fn toggle_series(&mut self, idx: usize) {
        if let Some(v) = self.visible.get_mut(idx) {
            *v = !*v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reload_empty_root() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = AppState::new(temp_dir.path().to_path_buf(), SuiteKind::Performance, None);
        state.reload();

        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.series.len(), 6);
        assert_eq!(chart.category_count(), 0);
        assert_eq!(state.colors.len(), 6);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_colors_follow_series_hex() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = AppState::new(temp_dir.path().to_path_buf(), SuiteKind::Performance, None);
        state.reload();

        assert_eq!(state.colors[0], Color32::from_rgb(0x1f, 0x77, 0xb4));
        assert_eq!(
            state.colors[5],
            Color32::from_rgba_unmultiplied(0xd7, 0xee, 0x05, 0x92)
        );
    }

    #[test]
    fn test_switch_suite_and_toggle() {
        let temp_dir = TempDir::new().unwrap();
        let mut state = AppState::new(temp_dir.path().to_path_buf(), SuiteKind::Performance, None);
        state.reload();
        state.set_suite(SuiteKind::Metrics);
        assert_eq!(state.visible.len(), 5);

        state.toggle_series(1);
        assert!(!state.visible[1]);
        state.toggle_series(99);
    }

    #[test]
    fn test_override_merges_onto_each_suite() {
        let temp_dir = TempDir::new().unwrap();
        let over = PipelineOverride {
            max_gap: Some(5),
            ..PipelineOverride::default()
        };
        let mut state = AppState::new(temp_dir.path().to_path_buf(), SuiteKind::Performance, Some(over));
        assert_eq!(state.suite.pipeline.max_gap, 5);
        assert_eq!(state.suite.pipeline.file_suffix, "_performance.csv");

        state.set_suite(SuiteKind::Metrics);
        assert_eq!(state.suite.pipeline.max_gap, 5);
        assert_eq!(state.suite.pipeline.file_suffix, "_net_metrics.csv");
        assert_eq!(state.suite.pipeline.validity_threshold, 10000.0);
    }
}
