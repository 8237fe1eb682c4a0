//! Evaluation suites for ScatterPlan.
//!
//! Runs schedule strategies against lists of `(N, P)` cases, aggregates
//! the scores and exports reports.
//!
//! # Overview
//!
//! The suite runner allows you to:
//! - Load case lists from `{"test_case_list": [...]}` JSON files
//! - Compare several strategies on the same cases
//! - Time blueprint construction with warmup runs
//! - Grade average scores and export CSV and Markdown reports
//!
//! # Example
//!
//! ```
//! use scatterplan::StrategyKind;
//! use scatterplan_benchmark::{MarkdownReport, Rating, Suite, SuiteConfig, TestCase};
//!
//! let config = SuiteConfig::new("Smoke")
//!     .with_cases(vec![TestCase::new(1, 4)])
//!     .with_strategies(vec![StrategyKind::Ring])
//!     .with_warmup_count(0);
//!
//! let result = Suite::new(config).run().unwrap();
//! assert_eq!(result.rating(StrategyKind::Ring), Rating::Excellent);
//!
//! let report = MarkdownReport::to_string(&result);
//! assert!(report.contains("# Suite: Smoke"));
//! ```

mod config;
mod error;
mod report;
mod result;
mod runner;

pub use config::{SuiteConfig, TestCase};
pub use error::SuiteError;
pub use report::{write_reports, CsvExporter, MarkdownReport};
pub use result::{CaseOutcome, Rating, StrategySummary, SuiteResult};
pub use runner::Suite;
