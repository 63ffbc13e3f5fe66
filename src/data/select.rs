use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::loader::read_table;

// ---------------------------------------------------------------------------
// File selection: which runs carry real traffic
// ---------------------------------------------------------------------------

/// Return the names of CSV files in `dir` whose third-from-last column holds
/// at least one value strictly greater than `threshold`.
///
/// * Files with fewer than three columns are never selected.
/// * The first file that cannot be parsed aborts the whole scan.
/// * The returned order follows the directory listing and is not meaningful.
pub fn select_valid_files(dir: &Path, threshold: f64) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?;

    let mut selected = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".csv") {
            continue;
        }

        let table = read_table(&entry.path())
            .with_context(|| format!("selecting runs in {}", dir.display()))?;

        let Some(column) = table.third_from_last() else {
            log::debug!("{name}: fewer than 3 columns, skipped");
            continue;
        };

        if column.iter().any(|&v| v > threshold) {
            selected.push(name);
        }
    }

    Ok(selected)
}
