//! Pipeline configuration and the directory-level orchestrator.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::average::average_group;
use crate::data::group::{group_by_gap, sort_by_index};
use crate::data::model::{GroupReport, RunIndex, Triple};
use crate::data::select::select_valid_files;

// ---------------------------------------------------------------------------
// Post-processing of a kept group average
// ---------------------------------------------------------------------------

/// Transform applied to each group average after it is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostProcess {
    /// Keep the average unchanged.
    Identity,
    /// Multiply element 0 by `factor`; always keep.
    ScaleFirst { factor: f64 },
    /// Keep only if element 0 exceeds `threshold`, then divide it by `divisor`.
    KeepIfFirstAbove { threshold: f64, divisor: f64 },
}

impl PostProcess {
    /// `None` means the group is rejected.
    pub fn apply(&self, mut avg: Triple) -> Option<Triple> {
        match *self {
            PostProcess::Identity => Some(avg),
            PostProcess::ScaleFirst { factor } => {
                avg[0] *= factor;
                Some(avg)
            }
            PostProcess::KeepIfFirstAbove { threshold, divisor } => {
                if avg[0] > threshold {
                    avg[0] /= divisor;
                    Some(avg)
                } else {
                    None
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineConfig
// ---------------------------------------------------------------------------

/// Parameters of one pipeline variant. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Human-readable variant name used in log lines.
    pub name: String,
    /// File name suffix after the index, e.g. `_performance.csv`.
    pub file_suffix: String,
    /// A file is selected when its third-from-last column exceeds this.
    pub validity_threshold: f64,
    /// Largest index difference allowed inside one group.
    pub max_gap: RunIndex,
    /// Groups with `last - first` below this are dropped.
    pub min_span: RunIndex,
    pub post_process: PostProcess,
}

impl PipelineConfig {
    /// Per-run performance logs (`<n>_performance.csv`).
    pub fn performance() -> Self {
        Self {
            name: "performance".to_string(),
            file_suffix: "_performance.csv".to_string(),
            validity_threshold: 1000.0,
            max_gap: 1,
            min_span: 3,
            post_process: PostProcess::ScaleFirst {
                factor: 2.0 / 1000.0 * 100.0,
            },
        }
    }

    /// Per-run network metrics (`<n>_net_metrics.csv`).
    pub fn metrics() -> Self {
        Self {
            name: "metrics".to_string(),
            file_suffix: "_net_metrics.csv".to_string(),
            validity_threshold: 10000.0,
            max_gap: 2,
            min_span: 3,
            post_process: PostProcess::KeepIfFirstAbove {
                threshold: 10000.0,
                divisor: 10000.0,
            },
        }
    }

    /// Expected file name for run `index`.
    pub fn file_name(&self, index: RunIndex) -> String {
        format!("{index}{}", self.file_suffix)
    }
}

// ---------------------------------------------------------------------------
// PipelineOverride – partial config from a JSON file
// ---------------------------------------------------------------------------

/// Fields to replace on top of a suite's own pipeline preset.
/// Absent fields keep the preset value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineOverride {
    pub name: Option<String>,
    pub file_suffix: Option<String>,
    pub validity_threshold: Option<f64>,
    pub max_gap: Option<RunIndex>,
    pub min_span: Option<RunIndex>,
    pub post_process: Option<PostProcess>,
}

impl PipelineOverride {
    pub fn from_json(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Merge onto `base`, leaving it untouched.
    pub fn apply_to(&self, base: &PipelineConfig) -> PipelineConfig {
        let base = base.clone();
        PipelineConfig {
            name: self.name.clone().unwrap_or(base.name),
            file_suffix: self.file_suffix.clone().unwrap_or(base.file_suffix),
            validity_threshold: self.validity_threshold.unwrap_or(base.validity_threshold),
            max_gap: self.max_gap.unwrap_or(base.max_gap),
            min_span: self.min_span.unwrap_or(base.min_span),
            post_process: self.post_process.clone().unwrap_or(base.post_process),
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Run select → sort → cluster → average over one directory.
///
/// A missing directory yields an empty report. A file that cannot be parsed
/// during selection is an error; during averaging it is recorded in
/// [`GroupReport::diagnostics`] and skipped.
pub fn get_group_averages(dir: &Path, config: &PipelineConfig) -> Result<GroupReport> {
    if !dir.exists() {
        log::info!("{} directory does not exist: {}", config.name, dir.display());
        return Ok(GroupReport::default());
    }

    let mut files = select_valid_files(dir, config.validity_threshold)?;
    sort_by_index(&mut files);
    let groups = group_by_gap(&files, config.max_gap);

    let mut report = GroupReport {
        selected_files: files.len(),
        groups_total: groups.len(),
        ..GroupReport::default()
    };

    for group in &groups {
        let first = group.first_index();
        let last = group.last_index();

        let outcome = average_group(dir, first, last, config.min_span, |n| config.file_name(n));
        report.diagnostics.extend(outcome.diagnostics);

        let Some(avg) = outcome.value else {
            log::debug!("skipping group {group}: span below {}", config.min_span);
            report.groups_dropped_span += 1;
            continue;
        };

        match config.post_process.apply(avg) {
            Some(kept) => {
                log::debug!("group {group}: {} interior files used", outcome.files_used);
                report.averages.push(kept);
            }
            None => {
                log::debug!("group {group}: rejected by post-filter ({:.3})", avg[0]);
                report.groups_dropped_filter += 1;
            }
        }
    }

    log::info!(
        "{}: {} files selected, {} groups, {} kept",
        dir.display(),
        report.selected_files,
        report.groups_total,
        report.averages.len()
    );

    Ok(report)
}
