//! Suite configuration and case lists.

use std::fs;
use std::io;
use std::path::Path;

use scatterplan::{EvaluationConfig, StrategyKind};
use serde::{Deserialize, Serialize};

use crate::error::SuiteError;

/// One `(N, P)` problem of a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TestCase {
    /// Number of ranks `N`.
    pub rank_size: u32,
    /// Number of planes `P`.
    pub plane_num: u32,
}

/// On-disk shape of a case list.
#[derive(Debug, Default, Deserialize, Serialize)]
struct CaseList {
    test_case_list: Vec<TestCase>,
}

impl TestCase {
    /// Cases evaluated when no case list is supplied.
    pub const DEFAULTS: [TestCase; 10] = [
        TestCase::new(4, 2),
        TestCase::new(4, 6),
        TestCase::new(5, 2),
        TestCase::new(5, 4),
        TestCase::new(10, 4),
        TestCase::new(10, 10),
        TestCase::new(32, 6),
        TestCase::new(33, 4),
        TestCase::new(64, 8),
        TestCase::new(128, 18),
    ];

    pub const fn new(rank_size: u32, plane_num: u32) -> Self {
        Self {
            rank_size,
            plane_num,
        }
    }

    /// Parses a `{"test_case_list": [...]}` document.
    ///
    /// # Example
    ///
    /// ```
    /// use scatterplan_benchmark::TestCase;
    ///
    /// let cases = TestCase::list_from_json_str(r#"{
    ///     "test_case_list": [
    ///         {"rank_size": 4, "plane_num": 2},
    ///         {"rank_size": 33, "plane_num": 4}
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(cases, vec![TestCase::new(4, 2), TestCase::new(33, 4)]);
    /// ```
    pub fn list_from_json_str(s: &str) -> Result<Vec<TestCase>, SuiteError> {
        let list: CaseList = serde_json::from_str(s)?;
        Ok(list.test_case_list)
    }

    /// Reads a case list from a JSON file.
    pub fn load_list(path: impl AsRef<Path>) -> Result<Vec<TestCase>, SuiteError> {
        let contents = fs::read_to_string(path)?;
        Self::list_from_json_str(&contents)
    }

    /// Reads a case list, falling back to [`TestCase::DEFAULTS`] when the
    /// file does not exist.
    pub fn load_list_or_default(path: impl AsRef<Path>) -> Result<Vec<TestCase>, SuiteError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::list_from_json_str(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::DEFAULTS.to_vec()),
            Err(err) => Err(err.into()),
        }
    }

    /// Serializes cases into the `{"test_case_list": [...]}` shape.
    pub fn list_to_json_string(cases: &[TestCase]) -> Result<String, SuiteError> {
        let list = CaseList {
            test_case_list: cases.to_vec(),
        };
        Ok(serde_json::to_string_pretty(&list)?)
    }
}

/// Configuration for a suite run.
///
/// Controls the cases, the strategies compared on them, warmup and timing
/// iterations, and optional report paths.
///
/// # Example
///
/// ```
/// use scatterplan::StrategyKind;
/// use scatterplan_benchmark::{SuiteConfig, TestCase};
///
/// let config = SuiteConfig::new("Reduce-scatter")
///     .with_cases(vec![TestCase::new(8, 4)])
///     .with_strategies(vec![StrategyKind::Ring])
///     .with_warmup_count(0)
///     .with_csv_output("results.csv");
///
/// assert_eq!(config.name(), "Reduce-scatter");
/// assert_eq!(config.cases().len(), 1);
/// assert_eq!(config.run_count(), 3);
/// assert_eq!(config.csv_output_path(), Some("results.csv"));
/// ```
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    name: String,
    cases: Vec<TestCase>,
    strategies: Vec<StrategyKind>,
    evaluation: EvaluationConfig,
    warmup_count: usize,
    run_count: usize,
    csv_output_path: Option<String>,
    markdown_output_path: Option<String>,
}

impl SuiteConfig {
    /// Creates a suite configuration with the given name.
    ///
    /// Defaults:
    /// - cases: [`TestCase::DEFAULTS`]
    /// - strategies: every [`StrategyKind`]
    /// - warmup_count: 1
    /// - run_count: 3
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: TestCase::DEFAULTS.to_vec(),
            strategies: StrategyKind::ALL.to_vec(),
            evaluation: EvaluationConfig::default(),
            warmup_count: 1,
            run_count: 3,
            csv_output_path: None,
            markdown_output_path: None,
        }
    }

    /// Replaces the case list.
    pub fn with_cases(mut self, cases: Vec<TestCase>) -> Self {
        self.cases = cases;
        self
    }

    /// Replaces the case list with the contents of a JSON file.
    pub fn with_case_file(mut self, path: impl AsRef<Path>) -> Result<Self, SuiteError> {
        self.cases = TestCase::load_list(path)?;
        Ok(self)
    }

    /// Sets the strategies to compare.
    pub fn with_strategies(mut self, strategies: Vec<StrategyKind>) -> Self {
        self.strategies = strategies;
        self
    }

    /// Sets the evaluation configuration; its strategy is overridden per run.
    pub fn with_evaluation(mut self, evaluation: EvaluationConfig) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Sets the number of untimed constructions per strategy.
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets the number of timed constructions per case, at least 1.
    pub fn with_run_count(mut self, count: usize) -> Self {
        self.run_count = count.max(1);
        self
    }

    /// Sets the output path for CSV export.
    pub fn with_csv_output(mut self, path: impl Into<String>) -> Self {
        self.csv_output_path = Some(path.into());
        self
    }

    /// Sets the output path for the Markdown report.
    pub fn with_markdown_output(mut self, path: impl Into<String>) -> Self {
        self.markdown_output_path = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cases(&self) -> &[TestCase] {
        &self.cases
    }

    pub fn strategies(&self) -> &[StrategyKind] {
        &self.strategies
    }

    pub fn evaluation(&self) -> &EvaluationConfig {
        &self.evaluation
    }

    pub fn warmup_count(&self) -> usize {
        self.warmup_count
    }

    pub fn run_count(&self) -> usize {
        self.run_count
    }

    /// Returns the CSV output path, if set.
    pub fn csv_output_path(&self) -> Option<&str> {
        self.csv_output_path.as_deref()
    }

    /// Returns the Markdown output path, if set.
    pub fn markdown_output_path(&self) -> Option<&str> {
        self.markdown_output_path.as_deref()
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::new("Suite")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SuiteConfig::default();
        assert_eq!(config.cases(), &TestCase::DEFAULTS);
        assert_eq!(config.strategies(), &StrategyKind::ALL);
        assert_eq!(config.warmup_count(), 1);
        assert_eq!(config.csv_output_path(), None);
    }

    #[test]
    fn test_run_count_is_at_least_one() {
        assert_eq!(SuiteConfig::default().with_run_count(0).run_count(), 1);
    }

    #[test]
    fn test_malformed_json() {
        let err = TestCase::list_from_json_str(r#"{"cases": []}"#).unwrap_err();
        assert!(matches!(err, SuiteError::Json(_)));
    }

    #[test]
    fn test_json_string_parses_back() {
        let json = TestCase::list_to_json_string(&TestCase::DEFAULTS[..2]).unwrap();
        assert!(json.contains("\"test_case_list\""));
        assert_eq!(
            TestCase::list_from_json_str(&json).unwrap(),
            TestCase::DEFAULTS[..2]
        );
    }

    #[test]
    fn test_case_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"test_case_list": [{{"rank_size": 7, "plane_num": 3}}]}}"#
        )
        .unwrap();

        let config = SuiteConfig::new("file").with_case_file(file.path()).unwrap();
        assert_eq!(config.cases(), &[TestCase::new(7, 3)]);
    }

    #[test]
    fn test_missing_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.json");

        assert!(matches!(
            TestCase::load_list(&path),
            Err(SuiteError::Io(_))
        ));
        assert_eq!(
            TestCase::load_list_or_default(&path).unwrap(),
            TestCase::DEFAULTS.to_vec()
        );
    }
}
