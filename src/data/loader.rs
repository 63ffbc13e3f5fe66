use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::Table;

/// Errors raised while reading a measurement CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} has no header row")]
    Empty { path: PathBuf },

    #[error("{path}, row {row}, column '{column}': '{value}' is not a number")]
    NotNumeric {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Missing-value markers read as `NaN` (the pandas `read_csv` defaults).
const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Columns counted from the end that the pipeline reads.
const USED_TAIL: usize = 3;

/// CSV layout: header row with column names, then rows.
///
/// Only the last three columns are required to be numeric; a non-numeric
/// value there is an error. Cells of other columns that do not parse, and
/// NA markers anywhere, are stored as `NaN`.
pub fn read_table(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if columns.is_empty() || (columns.len() == 1 && columns[0].is_empty()) {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let first_used = if columns.len() >= USED_TAIL {
        columns.len() - USED_TAIL
    } else {
        columns.len()
    };

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

        let row = record
            .iter()
            .enumerate()
            .map(|(col_idx, cell)| {
                if col_idx < first_used {
                    return Ok(parse_cell(cell).unwrap_or(f64::NAN));
                }
                parse_cell(cell).ok_or_else(|| LoadError::NotNumeric {
                    path: path.to_path_buf(),
                    row: row_no,
                    column: columns[col_idx].clone(),
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, LoadError>>()?;

        rows.push(row);
    }

    Ok(Table { columns, rows })
}

fn parse_cell(s: &str) -> Option<f64> {
    if NA_TOKENS.contains(&s) {
        return Some(f64::NAN);
    }
    s.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        write!(file, "{body}").unwrap();
        path
    }

    #[test]
    fn test_read_table() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "1_performance.csv",
            "time,tx,delay,loss\n0,1500,2.5,0.1\n1, 2500 ,3.5,0.2\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.columns, vec!["time", "tx", "delay", "loss"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec![1.0, 2500.0, 3.5, 0.2]);
    }

    #[test]
    fn test_empty_cell_is_nan() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "a,b,c\n1,,3\n");

        let table = read_table(&path).unwrap();
        assert!(table.rows[0][1].is_nan());
        assert_eq!(table.rows[0][2], 3.0);
    }

    #[test]
    fn test_header_only_has_no_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "a,b,c\n");

        let table = read_table(&path).unwrap();
        assert_eq!(table.column_count(), 3);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_empty_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "");

        assert!(matches!(read_table(&path), Err(LoadError::Empty { .. })));
    }

    #[test]
    fn test_na_markers_are_nan() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "2_performance.csv",
            "t,tx,d,l\n0,5000,NA,1\n1,n/a,null,#N/A\n",
        );

        let table = read_table(&path).unwrap();
        assert_eq!(table.rows[0][1], 5000.0);
        assert!(table.rows[0][2].is_nan());
        assert!(table.rows[1][1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_text_in_leading_column_is_allowed() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(
            temp_dir.path(),
            "2_performance.csv",
            "node,tx,d,l\nh1,5000,1,1\n",
        );

        let table = read_table(&path).unwrap();
        assert!(table.rows[0][0].is_nan());
        assert_eq!(table.tail3().unwrap(), vec![[5000.0, 1.0, 1.0]]);
    }

    #[test]
    fn test_narrow_table_never_fails_on_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "host,x\nh1,fast\n");

        let table = read_table(&path).unwrap();
        assert_eq!(table.column_count(), 2);
        assert!(table.rows[0].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_text_cell_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "a,b,c\n1,oops,3\n");

        match read_table(&path) {
            Err(LoadError::NotNumeric { row, column, value, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "b");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "a.csv", "a,b,c\n1,2\n");

        assert!(matches!(read_table(&path), Err(LoadError::Csv { .. })));
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.csv");

        assert!(matches!(read_table(&path), Err(LoadError::Open { .. })));
    }
}
