//! Console summary of a suite run.

use std::io::{self, Write};

use crate::experiment::SuiteResult;

/// Print per-series group counts and averages with six decimals.
pub fn write_summary<W: Write>(out: &mut W, result: &SuiteResult) -> io::Result<()> {
    writeln!(out, "root: {}", result.root.display())?;
    for series in &result.series {
        let report = &series.report;
        writeln!(out)?;
        writeln!(out, " len({}): {}", series.spec.label, report.len())?;
        writeln!(
            out,
            "{}: {} files selected, {} groups ({} too short, {} filtered)",
            series.spec.label,
            report.selected_files,
            report.groups_total,
            report.groups_dropped_span,
            report.groups_dropped_filter
        )?;
        for avg in &report.averages {
            writeln!(out, "  {:.6}, {:.6}, {:.6}", avg[0], avg[1], avg[2])?;
        }
        for diag in &report.diagnostics {
            writeln!(out, "  warning: {diag}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Diagnostic, GroupReport};
    use crate::experiment::{SeriesResult, Suite};
    use std::path::PathBuf;

    #[test]
    fn test_write_summary() {
        let suite = Suite::performance();
        let result = SuiteResult {
            root: PathBuf::from("."),
            series: vec![SeriesResult {
                spec: suite.series[0].clone(),
                report: GroupReport {
                    averages: vec![[12.5, 3.0, 0.125]],
                    diagnostics: vec![Diagnostic {
                        file: "3_performance.csv".into(),
                        reason: "bad row".into(),
                    }],
                    selected_files: 7,
                    groups_total: 2,
                    groups_dropped_span: 1,
                    groups_dropped_filter: 0,
                },
            }],
        };

        let mut buf = Vec::new();
        write_summary(&mut buf, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("root: ."));
        assert!(text.contains(" len(hops): 1"));
        assert!(text.contains("  12.500000, 3.000000, 0.125000"));
        assert!(text.contains("7 files selected, 2 groups (1 too short, 0 filtered)"));
        assert!(text.contains("warning: could not read 3_performance.csv: bad row"));
    }
}
