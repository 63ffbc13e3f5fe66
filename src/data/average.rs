use std::ops::RangeInclusive;
use std::path::Path;

use super::loader::read_table;
use super::model::{Diagnostic, RunIndex, Triple, ZERO_TRIPLE};

/// Result of averaging one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAverage {
    /// `None` when the group span was too narrow to average.
    pub value: Option<Triple>,
    /// Interior files that existed but could not be read.
    pub diagnostics: Vec<Diagnostic>,
    /// Interior files that contributed rows.
    pub files_used: usize,
}

/// Indices strictly between the span endpoints.
pub fn interior_indices(first: RunIndex, last: RunIndex) -> RangeInclusive<RunIndex> {
    first.saturating_add(1)..=last.saturating_sub(1)
}

/// Average the last three columns over every interior file of a span.
///
/// The endpoints `first` and `last` are warm-up and cool-down runs and are
/// never read. Interior files are located by index through `file_name`, so
/// files that were not selected still contribute if present on disk.
pub fn average_group<F>(
    dir: &Path,
    first: RunIndex,
    last: RunIndex,
    min_span: RunIndex,
    file_name: F,
) -> GroupAverage
where
    F: Fn(RunIndex) -> String,
{
    if last.saturating_sub(first) < min_span {
        return GroupAverage {
            value: None,
            diagnostics: Vec::new(),
            files_used: 0,
        };
    }

    let mut rows: Vec<Triple> = Vec::new();
    let mut diagnostics = Vec::new();
    let mut files_used = 0;

    for n in interior_indices(first, last) {
        let name = file_name(n);
        let path = dir.join(&name);
        if !path.exists() {
            log::debug!("{name}: not on disk, skipped");
            continue;
        }

        match read_table(&path) {
            Ok(table) => {
                if let Some(tail) = table.tail3() {
                    files_used += 1;
                    rows.extend(tail);
                }
            }
            Err(e) => {
                log::warn!("could not read {name}: {e}");
                diagnostics.push(Diagnostic {
                    file: name,
                    reason: e.to_string(),
                });
            }
        }
    }

    GroupAverage {
        value: Some(column_means(&rows)),
        diagnostics,
        files_used,
    }
}

/// Column-wise mean ignoring `NaN` cells. No rows at all gives `[0, 0, 0]`.
pub fn column_means(rows: &[Triple]) -> Triple {
    if rows.is_empty() {
        return ZERO_TRIPLE;
    }

    let mut sums = [0.0; 3];
    let mut counts = [0usize; 3];
    for row in rows {
        for (col, &v) in row.iter().enumerate() {
            if !v.is_nan() {
                sums[col] += v;
                counts[col] += 1;
            }
        }
    }

    let mut means = [f64::NAN; 3];
    for col in 0..3 {
        if counts[col] > 0 {
            means[col] = sums[col] / counts[col] as f64;
        }
    }
    means
}
