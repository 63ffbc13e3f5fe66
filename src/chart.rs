//! Bar-chart data: series padded to a common length and transposed to
//! one row per metric.

use crate::data::model::{Triple, ZERO_TRIPLE};
use crate::experiment::{Suite, SuiteResult};

/// Append `[0, 0, 0]` until `list` has `len` entries.
pub fn pad_to(list: &[Triple], len: usize) -> Vec<Triple> {
    let mut padded = list.to_vec();
    if padded.len() < len {
        padded.resize(len, ZERO_TRIPLE);
    }
    padded
}

/// Turn N triples into three rows of N values.
pub fn transpose(list: &[Triple]) -> [Vec<f64>; 3] {
    let mut rows: [Vec<f64>; 3] = Default::default();
    for avg in list {
        for (row, &v) in rows.iter_mut().zip(avg.iter()) {
            row.push(v);
        }
    }
    rows
}

/// One bar series ready for drawing.
#[derive(Debug, Clone)]
pub struct ChartSeries {
    pub label: String,
    pub color: Option<String>,
    /// `metrics[m][c]`: metric `m` at category `c`.
    pub metrics: [Vec<f64>; 3],
}

/// Everything needed to draw the three grouped bar charts of a suite.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<ChartSeries>,
    pub metric_names: [String; 3],
    pub x_label: String,
    pub y_label: Option<String>,
}

impl ChartData {
    pub fn from_suite(suite: &Suite, result: &SuiteResult) -> Self {
        let len = result.max_len();
        let series = result
            .series
            .iter()
            .map(|s| ChartSeries {
                label: s.spec.label.clone(),
                color: s.spec.color.clone(),
                metrics: transpose(&pad_to(&s.report.averages, len)),
            })
            .collect();

        ChartData {
            categories: suite.categories.labels(len),
            series,
            metric_names: suite.metric_names.clone(),
            x_label: suite.x_label.clone(),
            y_label: suite.y_label.clone(),
        }
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Y-axis label of metric `m`.
    pub fn y_label_for(&self, m: usize) -> &str {
        self.y_label.as_deref().unwrap_or(&self.metric_names[m])
    }
}
