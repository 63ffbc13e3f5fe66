//! Experiment suites: which sibling directories are compared and how
//! their averages are labelled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::{GroupReport, Triple};
use crate::pipeline::{get_group_averages, PipelineConfig};

/// Hour labels of the performance comparison.
pub const HOUR_LABELS: [&str; 16] = [
    "0:00", "1:00", "3:00", "5:00", "7:00", "8:00", "9:00", "10:00", "11:00", "12:00", "13:00",
    "15:00", "17:00", "19:00", "21:00", "23:00",
];

const SERIES_COLORS: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#0ab1cc", "#9467bd", "#d7ee0592",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SuiteKind {
    Performance,
    Metrics,
}

/// Adjustment applied to every average of one series after the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeriesAdjust {
    None,
    /// Element 1 × 100.
    PercentSecond,
    /// Swap elements 1 and 2, then element 1 × 100.
    SwapThenPercentSecond,
}

impl SeriesAdjust {
    pub fn apply(self, mut avg: Triple) -> Triple {
        match self {
            SeriesAdjust::None => {}
            SeriesAdjust::PercentSecond => avg[1] *= 100.0,
            SeriesAdjust::SwapThenPercentSecond => {
                avg.swap(1, 2);
                avg[1] *= 100.0;
            }
        }
        avg
    }
}

/// How bar-chart categories are labelled.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryLabels {
    /// A fixed list; extra categories get empty labels.
    Fixed(Vec<String>),
    /// `"<prefix> 1"`, `"<prefix> 2"`, …
    Numbered(String),
}

impl CategoryLabels {
    pub fn labels(&self, count: usize) -> Vec<String> {
        match self {
            CategoryLabels::Fixed(fixed) => (0..count)
                .map(|i| fixed.get(i).cloned().unwrap_or_default())
                .collect(),
            CategoryLabels::Numbered(prefix) => {
                (1..=count).map(|i| format!("{prefix} {i}")).collect()
            }
        }
    }
}

/// One experiment variant of a suite.
#[derive(Debug, Clone)]
pub struct SeriesSpec {
    /// Directory name under the root, e.g. `hops`.
    pub dir: String,
    /// Legend label.
    pub label: String,
    /// Hex colour, `#rrggbb` or `#rrggbbaa`.
    pub color: Option<String>,
    pub adjust: SeriesAdjust,
}

impl SeriesSpec {
    fn new(dir: &str, label: &str, color: &str, adjust: SeriesAdjust) -> Self {
        Self {
            dir: dir.to_string(),
            label: label.to_string(),
            color: Some(color.to_string()),
            adjust,
        }
    }
}

/// A set of experiment variants compared in one chart set.
#[derive(Debug, Clone)]
pub struct Suite {
    pub kind: SuiteKind,
    pub pipeline: PipelineConfig,
    /// Sub-directory inside every series directory.
    pub data_subdir: String,
    pub series: Vec<SeriesSpec>,
    pub categories: CategoryLabels,
    /// Titles of the three metrics (last three CSV columns, post-adjustment).
    pub metric_names: [String; 3],
    pub x_label: String,
    /// Fixed y label; `None` uses the metric name.
    pub y_label: Option<String>,
}

impl Suite {
    pub fn new(kind: SuiteKind) -> Self {
        match kind {
            SuiteKind::Performance => Self::performance(),
            SuiteKind::Metrics => Self::metrics(),
        }
    }

    pub fn performance() -> Self {
        let dirs = [
            ("hops", "hops"),
            ("loss", "loss"),
            ("delay", "delay"),
            ("bandwidtha", "bandwidtha"),
            ("q-learning", "ql"),
            ("q-learning-with-flow", "qlwf"),
        ];
        Self {
            kind: SuiteKind::Performance,
            pipeline: PipelineConfig::performance(),
            data_subdir: "performance".to_string(),
            series: dirs
                .iter()
                .zip(SERIES_COLORS)
                .map(|(&(dir, label), color)| SeriesSpec::new(dir, label, color, SeriesAdjust::None))
                .collect(),
            categories: CategoryLabels::Fixed(HOUR_LABELS.iter().map(|s| s.to_string()).collect()),
            metric_names: [
                "Average of mean link throughput(Mbps)".to_string(),
                "Delay(ms)".to_string(),
                "loss(%)".to_string(),
            ],
            x_label: "Hour".to_string(),
            y_label: None,
        }
    }

    pub fn metrics() -> Self {
        let dirs = [
            ("dr", "DR", SeriesAdjust::SwapThenPercentSecond),
            ("loss", "Loss", SeriesAdjust::PercentSecond),
            ("delay", "Delay", SeriesAdjust::PercentSecond),
            ("bandwidtha", "bandwidtha", SeriesAdjust::PercentSecond),
            ("comp", "Comp", SeriesAdjust::PercentSecond),
        ];
        Self {
            kind: SuiteKind::Metrics,
            pipeline: PipelineConfig::metrics(),
            data_subdir: "Metrics".to_string(),
            series: dirs
                .iter()
                .zip(SERIES_COLORS)
                .map(|(&(dir, label, adjust), color)| SeriesSpec::new(dir, label, color, adjust))
                .collect(),
            categories: CategoryLabels::Numbered("matrix".to_string()),
            metric_names: ["throughput".to_string(), "loss".to_string(), "delay".to_string()],
            x_label: "time".to_string(),
            y_label: Some("value".to_string()),
        }
    }

    /// Replace the pipeline parameters, keeping the series layout.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn series_dir(&self, root: &Path, series: &SeriesSpec) -> PathBuf {
        root.join(&series.dir).join(&self.data_subdir)
    }

    /// Run the pipeline for every series, in order.
    ///
    /// A selection-phase failure in any series aborts the whole run.
    pub fn run(&self, root: &Path) -> Result<SuiteResult> {
        let mut series = Vec::with_capacity(self.series.len());
        for spec in &self.series {
            let dir = self.series_dir(root, spec);
            let mut report = get_group_averages(&dir, &self.pipeline)
                .with_context(|| format!("processing series '{}'", spec.label))?;
            for avg in &mut report.averages {
                *avg = spec.adjust.apply(*avg);
            }
            series.push(SeriesResult {
                spec: spec.clone(),
                report,
            });
        }

        Ok(SuiteResult {
            root: root.to_path_buf(),
            series,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SeriesResult {
    pub spec: SeriesSpec,
    pub report: GroupReport,
}

/// Averages of every series of a suite, in series order.
#[derive(Debug, Clone)]
pub struct SuiteResult {
    pub root: PathBuf,
    pub series: Vec<SeriesResult>,
}

impl SuiteResult {
    /// Longest series length; the number of chart categories.
    pub fn max_len(&self) -> usize {
        self.series.iter().map(|s| s.report.len()).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineOverride;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn write_run(dir: &Path, name: &str, row: [f64; 3]) {
        fs::create_dir_all(dir).unwrap();
        let mut file = File::create(dir.join(name)).unwrap();
        writeln!(file, "t,a,b,c").unwrap();
        writeln!(file, "0,{},{},{}", row[0], row[1], row[2]).unwrap();
    }

    #[test]
    fn test_series_adjust() {
        assert_eq!(SeriesAdjust::None.apply([1.0, 2.0, 3.0]), [1.0, 2.0, 3.0]);
        assert_eq!(SeriesAdjust::PercentSecond.apply([1.0, 0.5, 3.0]), [1.0, 50.0, 3.0]);
        assert_eq!(
            SeriesAdjust::SwapThenPercentSecond.apply([1.0, 2.0, 0.25]),
            [1.0, 25.0, 2.0]
        );
    }

    #[test]
    fn test_category_labels() {
        let fixed = CategoryLabels::Fixed(vec!["a".into(), "b".into()]);
        assert_eq!(fixed.labels(3), vec!["a", "b", ""]);
        assert_eq!(fixed.labels(1), vec!["a"]);

        let numbered = CategoryLabels::Numbered("matrix".into());
        assert_eq!(numbered.labels(2), vec!["matrix 1", "matrix 2"]);
    }

    #[test]
    fn test_suite_layouts() {
        let perf = Suite::performance();
        assert_eq!(perf.series.len(), 6);
        assert_eq!(perf.series[5].dir, "q-learning-with-flow");
        assert_eq!(perf.series[5].color.as_deref(), Some("#d7ee0592"));

        let metrics = Suite::metrics();
        assert_eq!(metrics.series.len(), 5);
        assert_eq!(metrics.series[0].adjust, SeriesAdjust::SwapThenPercentSecond);
        assert_eq!(
            metrics.series_dir(Path::new("/data"), &metrics.series[4]),
            PathBuf::from("/data/comp/Metrics")
        );
    }

    #[test]
    fn test_run_metrics_suite() {
        let temp_dir = TempDir::new().unwrap();
        let suite = Suite::metrics();
        let dr = suite.series_dir(temp_dir.path(), &suite.series[0]);
        let loss = suite.series_dir(temp_dir.path(), &suite.series[1]);
        for n in 1..=4 {
            write_run(&dr, &format!("{n}_net_metrics.csv"), [50000.0, 0.5, 0.01]);
            write_run(&loss, &format!("{n}_net_metrics.csv"), [20000.0, 0.5, 0.01]);
        }

        let result = suite.run(temp_dir.path()).unwrap();
        assert_eq!(result.series.len(), 5);
        assert_eq!(result.max_len(), 1);
        assert_eq!(result.series[0].report.averages, vec![[5.0, 1.0, 0.5]]);
        assert_eq!(result.series[1].report.averages, vec![[2.0, 50.0, 0.01]]);
        assert!(result.series[2].report.is_empty());
    }

    #[test]
    fn test_partial_override_keeps_metrics_preset() {
        let temp_dir = TempDir::new().unwrap();
        let base = Suite::metrics();
        let over = PipelineOverride {
            max_gap: Some(3),
            ..PipelineOverride::default()
        };
        let merged = over.apply_to(&base.pipeline);
        let suite = base.with_pipeline(merged);
        let dr = suite.series_dir(temp_dir.path(), &suite.series[0]);
        for n in 1..=5 {
            write_run(&dr, &format!("{n}_net_metrics.csv"), [50000.0, 0.5, 0.01]);
        }

        let result = suite.run(temp_dir.path()).unwrap();
        assert_eq!(result.series[0].report.averages, vec![[5.0, 1.0, 0.5]]);
    }

    #[test]
    fn test_run_aborts_on_bad_selection_file() {
        let temp_dir = TempDir::new().unwrap();
        let suite = Suite::performance();
        let delay = suite.series_dir(temp_dir.path(), &suite.series[2]);
        fs::create_dir_all(&delay).unwrap();
        fs::write(delay.join("1_performance.csv"), "a,b,c\nx,y,z\n").unwrap();

        let err = suite.run(temp_dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("delay"));
    }
}
