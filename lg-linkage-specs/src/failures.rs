//! Expected failures tracking via TOML file.
//!
//! ```toml
//! [[pending]]
//! file = "parses-en.txt"
//! line = 42
//! reason = "new diagram layout"
//! ```

use crate::runner::{CheckFailure, FileReport};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Loaded expected failures configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpectedFailures {
    /// Known failures (won't fix soon).
    #[serde(default)]
    pub known: Vec<FailureEntry>,
    /// Pending failures (awaiting fix).
    #[serde(default)]
    pub pending: Vec<FailureEntry>,
}

/// A single expected failure entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureEntry {
    /// Expected-results file name.
    pub file: String,
    /// Line the failure is reported at.
    pub line: usize,
    /// Human-readable reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Date added (YYYY-MM-DD).
    #[serde(default)]
    pub added: Option<String>,
    /// Related issue URL.
    #[serde(default)]
    pub issue: Option<String>,
}

impl FailureEntry {
    fn matches(&self, file: &str, line: usize) -> bool {
        self.file == file && self.line == line
    }
}

/// Failure lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureState {
    /// Known limitation, won't fix soon.
    Known,
    /// Awaiting fix, not blocking.
    Pending,
    /// Expected to pass - failure is a regression.
    Regression,
}

impl ExpectedFailures {
    /// Load from a TOML file. A missing file means no expected failures.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        toml::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }

    /// Check if a failure at `file:line` is expected.
    pub fn is_expected(&self, file: &str, line: usize) -> FailureState {
        if self.known.iter().any(|e| e.matches(file, line)) {
            return FailureState::Known;
        }
        if self.pending.iter().any(|e| e.matches(file, line)) {
            return FailureState::Pending;
        }
        FailureState::Regression
    }

    pub fn classify(&self, failure: &CheckFailure) -> FailureState {
        self.is_expected(failure.file_name(), failure.line)
    }

    /// Count total expected failures.
    pub fn count(&self) -> usize {
        self.known.len() + self.pending.len()
    }

    /// Get entry for a specific failure (if expected).
    pub fn get_entry(&self, file: &str, line: usize) -> Option<&FailureEntry> {
        self.known
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.matches(file, line))
    }
}

/// Result of running the harness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessResult {
    /// Total comparisons made.
    pub total: usize,
    /// Passed comparisons.
    pub passed: usize,
    /// Expected failures (known + pending).
    pub expected_failures: usize,
    /// Regressions (unexpected failures).
    pub regressions: usize,
    /// Suite cases not run.
    pub skipped: usize,
}

impl HarnessResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the exit code (0 = pass, 1 = regressions).
    pub fn exit_code(&self) -> i32 {
        if self.regressions > 0 {
            1
        } else {
            0
        }
    }

    /// Check if all tests passed (no regressions).
    pub fn success(&self) -> bool {
        self.regressions == 0
    }

    /// Record a passed comparison.
    pub fn record_pass(&mut self) {
        self.total += 1;
        self.passed += 1;
    }

    /// Record a failed comparison with its state.
    pub fn record_failure(&mut self, state: FailureState) {
        self.total += 1;
        match state {
            FailureState::Known | FailureState::Pending => {
                self.expected_failures += 1;
            }
            FailureState::Regression => {
                self.regressions += 1;
            }
        }
    }

    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Record every check of a file, classifying its failures.
    pub fn record_report(&mut self, report: &FileReport, expected: &ExpectedFailures) {
        for _ in 0..report.passed {
            self.record_pass();
        }
        for failure in &report.failures {
            self.record_failure(expected.classify(failure));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::FailureKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn entry(file: &str, line: usize) -> FailureEntry {
        FailureEntry {
            file: file.to_string(),
            line,
            reason: None,
            added: None,
            issue: None,
        }
    }

    #[test]
    fn test_load_empty() {
        let failures = ExpectedFailures::default();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_is_expected_regression() {
        let failures = ExpectedFailures::default();
        assert_eq!(
            failures.is_expected("parses-en.txt", 12),
            FailureState::Regression
        );
    }

    #[test]
    fn test_is_expected_known_and_pending() {
        let failures = ExpectedFailures {
            known: vec![entry("parses-en.txt", 12)],
            pending: vec![entry("parses-en.txt", 30)],
        };

        assert_eq!(failures.is_expected("parses-en.txt", 12), FailureState::Known);
        assert_eq!(failures.is_expected("parses-en.txt", 30), FailureState::Pending);
        assert_eq!(
            failures.is_expected("parses-lt.txt", 12),
            FailureState::Regression
        );
    }

    #[test]
    fn test_classify_uses_file_name() {
        let failures = ExpectedFailures {
            known: vec![],
            pending: vec![entry("parses-en.txt", 7)],
        };
        let failure = CheckFailure {
            path: "tests/data/parses-en.txt".to_string(),
            line: 7,
            sentence: Some("this is a test".to_string()),
            linkage: 1,
            kind: FailureKind::TooFewLinkages,
        };
        assert_eq!(failures.classify(&failure), FailureState::Pending);
    }

    #[test]
    fn test_harness_result_exit_code() {
        let mut result = HarnessResult::new();
        assert_eq!(result.exit_code(), 0);

        result.regressions = 1;
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_harness_result_record() {
        let mut result = HarnessResult::new();

        result.record_pass();
        assert_eq!(result.total, 1);
        assert_eq!(result.passed, 1);

        result.record_failure(FailureState::Known);
        assert_eq!(result.total, 2);
        assert_eq!(result.expected_failures, 1);

        result.record_skip();
        assert_eq!(result.total, 2);
        assert_eq!(result.skipped, 1);
        assert!(result.success());

        result.record_failure(FailureState::Regression);
        assert_eq!(result.total, 3);
        assert_eq!(result.regressions, 1);

        assert!(!result.success());
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[pending]]
file = "parses-en.txt"
line = 14
reason = "Awaiting dictionary update"
added = "2026-10-01"

[[known]]
file = "parses-pos-spell-en.txt"
line = 5
reason = "Speller dependent"
issue = "https://github.com/example/issues/123"
"#
        )
        .unwrap();

        let failures = ExpectedFailures::load(file.path()).unwrap();
        assert_eq!(failures.count(), 2);
        assert_eq!(failures.pending.len(), 1);
        assert_eq!(failures.known.len(), 1);

        assert_eq!(
            failures.is_expected("parses-en.txt", 14),
            FailureState::Pending
        );
        assert_eq!(
            failures.is_expected("parses-pos-spell-en.txt", 5),
            FailureState::Known
        );
    }

    #[test]
    fn test_load_nonexistent_returns_empty() {
        let failures = ExpectedFailures::load(Path::new("/nonexistent/path.toml")).unwrap();
        assert_eq!(failures.count(), 0);
    }

    #[test]
    fn test_load_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[known]]\nfile = 3").unwrap();
        let err = ExpectedFailures::load(file.path()).unwrap_err();
        assert!(err.starts_with("Failed to parse"));
    }

    #[test]
    fn test_get_entry() {
        let mut known = entry("parses-en.txt", 3);
        known.reason = Some("Known issue".to_string());
        let failures = ExpectedFailures {
            known: vec![known],
            pending: vec![],
        };

        let entry = failures.get_entry("parses-en.txt", 3);
        assert!(entry.is_some());
        assert_eq!(entry.unwrap().reason, Some("Known issue".to_string()));

        assert!(failures.get_entry("parses-en.txt", 4).is_none());
    }
}
