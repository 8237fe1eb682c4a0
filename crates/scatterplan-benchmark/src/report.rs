//! Report generation for suite results.

use std::fmt::{self, Write as _};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::config::SuiteConfig;
use crate::error::SuiteError;
use crate::result::SuiteResult;

/// CSV exporter for suite results.
///
/// One row per outcome, in run order.
///
/// # Example
///
/// ```
/// use scatterplan_benchmark::{CsvExporter, SuiteResult};
///
/// let csv = CsvExporter::to_string(&SuiteResult::new("Empty"));
/// assert!(csv.starts_with("strategy,rank_size,plane_num,validity"));
/// ```
pub struct CsvExporter;

impl CsvExporter {
    /// Exports the result to a CSV string.
    pub fn to_string(result: &SuiteResult) -> String {
        let mut output = String::new();
        let _ = Self::render(result, &mut output);
        output
    }

    fn render(result: &SuiteResult, output: &mut String) -> fmt::Result {
        writeln!(
            output,
            "strategy,rank_size,plane_num,validity,phase_count,transfers,estimated_time,min_time,score,construction_us"
        )?;

        for outcome in &result.outcomes {
            let estimated = outcome
                .evaluation
                .estimated_time
                .map(|t| format!("{:e}", t))
                .unwrap_or_default();
            writeln!(
                output,
                "{},{},{},{},{},{},{},{:e},{:.4},{}",
                outcome.strategy,
                outcome.case.rank_size,
                outcome.case.plane_num,
                outcome.evaluation.validity.name(),
                outcome.evaluation.phase_count,
                outcome.transfers,
                estimated,
                outcome.evaluation.min_time,
                outcome.score(),
                outcome.construction_time.as_micros(),
            )?;
        }
        Ok(())
    }

    /// Exports the result to a CSV file.
    pub fn to_file(result: &SuiteResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(result))
    }

    /// Writes the result as CSV to a writer.
    pub fn write<W: Write>(result: &SuiteResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(result).as_bytes())
    }
}

/// Markdown report generator.
///
/// Renders a per-strategy summary followed by a table of every case.
///
/// # Example
///
/// ```
/// use scatterplan_benchmark::{MarkdownReport, SuiteResult};
///
/// let md = MarkdownReport::to_string(&SuiteResult::new("Nightly"));
/// assert!(md.contains("# Suite: Nightly"));
/// assert!(md.contains("*No cases evaluated.*"));
/// ```
pub struct MarkdownReport;

impl MarkdownReport {
    /// Generates a Markdown report string.
    pub fn to_string(result: &SuiteResult) -> String {
        let mut output = String::new();
        let _ = Self::render(result, &mut output);
        output
    }

    fn render(result: &SuiteResult, output: &mut String) -> fmt::Result {
        writeln!(output, "# Suite: {}", result.name)?;
        writeln!(output)?;
        writeln!(output, "- **Outcomes**: {}", result.outcomes.len())?;
        writeln!(
            output,
            "- **Duration**: {:.2} ms",
            result.duration.as_secs_f64() * 1000.0
        )?;
        writeln!(output)?;

        writeln!(output, "## Summary")?;
        writeln!(output)?;

        let summaries = result.summaries();
        if summaries.is_empty() {
            writeln!(output, "*No cases evaluated.*")?;
            return Ok(());
        }

        writeln!(
            output,
            "| Strategy | Cases | Valid | Total Score | Average | Rating |"
        )?;
        writeln!(
            output,
            "|----------|-------|-------|-------------|---------|--------|"
        )?;
        for summary in &summaries {
            writeln!(
                output,
                "| {} | {} | {} | {:.2}/{} | {:.2} | {} |",
                summary.strategy,
                summary.case_count,
                summary.valid_count,
                summary.total_score,
                summary.case_count * 100,
                summary.average_score,
                summary.rating,
            )?;
        }
        if let Some(best) = result.best_strategy() {
            writeln!(output)?;
            writeln!(output, "Best strategy: **{}**", best)?;
        }
        writeln!(output)?;

        writeln!(output, "## Case Details")?;
        writeln!(output)?;
        writeln!(
            output,
            "| Strategy | N | P | Phases | Validity | T (s) | T_min (s) | Score | Build (us) |"
        )?;
        writeln!(
            output,
            "|----------|---|---|--------|----------|-------|-----------|-------|------------|"
        )?;
        for outcome in &result.outcomes {
            let estimated = outcome
                .evaluation
                .estimated_time
                .map(|t| format!("{:.6}", t))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {:.6} | {:.2} | {} |",
                outcome.strategy,
                outcome.case.rank_size,
                outcome.case.plane_num,
                outcome.evaluation.phase_count,
                outcome.evaluation.validity.name(),
                estimated,
                outcome.evaluation.min_time,
                outcome.score(),
                outcome.construction_time.as_micros(),
            )?;
        }

        Ok(())
    }

    /// Writes the Markdown report to a file.
    pub fn to_file(result: &SuiteResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(result))
    }

    /// Writes the Markdown report to a writer.
    pub fn write<W: Write>(result: &SuiteResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(result).as_bytes())
    }
}

/// Writes the CSV and Markdown outputs configured in `config`.
///
/// Does nothing for outputs without a path.
pub fn write_reports(result: &SuiteResult, config: &SuiteConfig) -> Result<(), SuiteError> {
    if let Some(path) = config.csv_output_path() {
        CsvExporter::to_file(result, path)?;
    }
    if let Some(path) = config.markdown_output_path() {
        MarkdownReport::to_file(result, path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestCase;
    use crate::runner::Suite;
    use scatterplan::StrategyKind;

    fn sample() -> SuiteResult {
        let config = SuiteConfig::new("sample")
            .with_cases(vec![TestCase::new(4, 2), TestCase::new(6, 1)])
            .with_strategies(vec![StrategyKind::Ring])
            .with_warmup_count(0)
            .with_run_count(1);
        Suite::new(config).run().unwrap()
    }

    #[test]
    fn test_csv_rows() {
        let csv = CsvExporter::to_string(&sample());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("ring,4,2,VALID,3,24,"));
        // Infeasible rows leave the estimated time empty.
        assert!(lines[2].starts_with("ring,6,1,CAPACITY_INFEASIBLE,5,30,,"));
    }

    #[test]
    fn test_markdown_sections() {
        let md = MarkdownReport::to_string(&sample());

        assert!(md.contains("## Summary"));
        assert!(md.contains("| ring | 2 | 1 |"));
        assert!(md.contains("Best strategy: **ring**"));
        assert!(md.contains("## Case Details"));
        assert!(md.contains("| ring | 6 | 1 | 5 | CAPACITY_INFEASIBLE | - |"));
    }

    #[test]
    fn test_write_to_writer() {
        let mut buffer = Vec::new();
        CsvExporter::write(&sample(), &mut buffer).unwrap();
        assert!(String::from_utf8(buffer).unwrap().contains("VALID"));
    }

    #[test]
    fn test_write_reports() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("out.csv");
        let md = dir.path().join("out.md");
        let config = SuiteConfig::new("files")
            .with_csv_output(csv.to_string_lossy())
            .with_markdown_output(md.to_string_lossy());

        write_reports(&sample(), &config).unwrap();

        assert!(fs::read_to_string(&csv).unwrap().contains("ring,4,2"));
        assert!(fs::read_to_string(&md).unwrap().contains("# Suite: sample"));
    }

    #[test]
    fn test_write_reports_without_paths() {
        assert!(write_reports(&sample(), &SuiteConfig::default()).is_ok());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = SuiteConfig::new("bad")
            .with_csv_output(dir.path().join("missing/out.csv").to_string_lossy());
        assert!(matches!(
            write_reports(&sample(), &config),
            Err(SuiteError::Io(_))
        ));
    }
}
