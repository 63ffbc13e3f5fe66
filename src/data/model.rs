use std::fmt;

// ---------------------------------------------------------------------------
// RunIndex – the numeric prefix of a run file name
// ---------------------------------------------------------------------------

/// Index encoded in a run file name (`<index>_performance.csv`).
pub type RunIndex = i64;

/// Placeholder index for names without a parseable prefix.
/// Larger than any real index, so such files sort last.
pub const UNINDEXED: RunIndex = i64::MAX;

// ---------------------------------------------------------------------------
// Triple – one group average (last three columns)
// ---------------------------------------------------------------------------

/// Column-wise mean of the last three columns of a group.
pub type Triple = [f64; 3];

/// Fallback average for groups without any readable interior rows,
/// also used as chart padding.
pub const ZERO_TRIPLE: Triple = [0.0, 0.0, 0.0];

// ---------------------------------------------------------------------------
// Table – one parsed measurement file
// ---------------------------------------------------------------------------

/// A parsed measurement CSV: header names and numeric rows.
/// Empty cells are stored as `NaN`.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Values of column `idx` across all rows.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[idx])
    }

    /// The third-from-last column, if the table has at least three columns.
    pub fn third_from_last(&self) -> Option<Vec<f64>> {
        let n = self.column_count();
        if n < 3 {
            return None;
        }
        Some(self.column(n - 3).collect())
    }

    /// Last three values of every row, or `None` for tables narrower than three.
    pub fn tail3(&self) -> Option<Vec<Triple>> {
        let n = self.column_count();
        if n < 3 {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|row| [row[n - 3], row[n - 2], row[n - 1]])
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// FileGroup – a contiguous run of indexed files
// ---------------------------------------------------------------------------

/// Index-sorted, non-empty run of file names whose consecutive indices
/// differ by no more than the clustering gap.
#[derive(Debug, Clone, PartialEq)]
pub struct FileGroup {
    pub files: Vec<String>,
    pub indices: Vec<RunIndex>,
}

impl FileGroup {
    pub(crate) fn start(file: String, index: RunIndex) -> Self {
        FileGroup {
            files: vec![file],
            indices: vec![index],
        }
    }

    pub(crate) fn push(&mut self, file: String, index: RunIndex) {
        self.files.push(file);
        self.indices.push(index);
    }

    pub fn first_index(&self) -> RunIndex {
        self.indices[0]
    }

    pub fn last_index(&self) -> RunIndex {
        self.indices[self.indices.len() - 1]
    }

    /// Width of the inclusive `[first, last]` range.
    pub fn span(&self) -> RunIndex {
        self.last_index().saturating_sub(self.first_index())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

impl fmt::Display for FileGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}] ({} files)",
            self.first_index(),
            self.last_index(),
            self.len()
        )
    }
}

// ---------------------------------------------------------------------------
// Diagnostics and reports
// ---------------------------------------------------------------------------

/// A recoverable per-file failure collected while averaging.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub file: String,
    pub reason: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not read {}: {}", self.file, self.reason)
    }
}

/// Outcome of one pipeline invocation over a directory.
#[derive(Debug, Clone, Default)]
pub struct GroupReport {
    /// Surviving group averages, in index order.
    pub averages: Vec<Triple>,
    /// Per-file read failures that were skipped.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files passing the validity threshold.
    pub selected_files: usize,
    pub groups_total: usize,
    /// Groups whose span was below the minimum.
    pub groups_dropped_span: usize,
    /// Groups rejected by the post-processing filter.
    pub groups_dropped_filter: usize,
}

impl GroupReport {
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tail3_requires_three_columns() {
        let narrow = Table {
            columns: vec!["a".into(), "b".into()],
            rows: vec![vec![1.0, 2.0]],
        };
        assert!(narrow.tail3().is_none());
        assert!(narrow.third_from_last().is_none());

        let wide = Table {
            columns: vec!["t".into(), "a".into(), "b".into(), "c".into()],
            rows: vec![vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 4.0, 5.0, 6.0]],
        };
        assert_eq!(wide.tail3().unwrap(), vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(wide.third_from_last().unwrap(), vec![1.0, 4.0]);
    }

    #[test]
    fn test_group_span_saturates() {
        let mut group = FileGroup::start("-5_x.csv".into(), -5);
        group.push("bad.csv".into(), UNINDEXED);
        assert_eq!(group.span(), UNINDEXED);
        assert_eq!(group.len(), 2);
    }
}
