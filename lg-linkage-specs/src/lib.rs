//! Expected-results oracle for link-grammar linkages.
//!
//! Replays `parses-*.txt` files through a [`Dictionary`](lg_linkage::Dictionary)
//! and checks every recorded linkage: its diagram, its constituent tree and
//! the character and byte spans of its words.
//!
//! ## Overview
//!
//! An expected-results file is a sequence of one-character opcodes. `I`
//! starts a sentence, `N` moves to its next linkage, and `O`, `C` and `P`
//! lines accumulate the expected diagram, constituents and word positions of
//! the current linkage. `-` lines change parse options and `%` lines are
//! comments.
//!
//! ```text
//! Ithis is a test
//! O
//! O    +--Wd---+Ss-+
//! O    |       |   |
//! OLEFT-WALL this is
//! O
//! ```
//!
//! ## Modules
//!
//! - [`scanner`] - Splits a file into opcode-classified lines
//! - [`section`] - Accumulates multi-line expected sections
//! - [`validator`] - Rejects sections left open across records
//! - [`cursor`] - Forward cursor over the linkages of a sentence
//! - [`matcher`] - Renders linkages and compares them, retrying spelling guesses
//! - [`directive`] - The option directive language
//! - [`runner`] - Drives one expected-results file
//! - [`suite`] - Suite manifest and case runner
//! - [`loader`] - File naming and discovery
//! - [`config`] - Oracle configuration
//! - [`errors`] - Error types for the oracle
//! - [`formatter`] - Failure reports with line diffs
//! - [`failures`] - Expected failures tracking via TOML

pub mod config;
pub mod cursor;
pub mod directive;
pub mod errors;
pub mod failures;
pub mod formatter;
pub mod loader;
pub mod matcher;
pub mod runner;
pub mod scanner;
pub mod section;
pub mod suite;
pub mod validator;

// Re-exports for convenient access to core types
pub use config::{CandidateOrder, OptionOverrides, OracleConfig, DATA_DIR_ENV, SRCDIR_ENV};
pub use cursor::LinkageCursor;
pub use directive::{parse_directive, Directive, DirectiveError};
pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use formatter::{format_failure, format_summary};
pub use loader::{
    discover_expected_results, expected_results_name, expected_results_path,
    parse_expected_results_name, ExpectedResultsFile,
};
pub use matcher::{word_positions, FailureKind, AMBIGUITY_MARKERS};
pub use runner::{run_expected_bytes, run_expected_results, CheckFailure, FileReport};
pub use scanner::{Opcode, RecordScanner, ScannedLine};
pub use section::{SectionKind, NO_LINKAGE_SENTINEL};
pub use suite::{run_suite, CaseOutcome, Suite, SuiteCase};
pub use validator::{OpcodeValidator, ValidationError};

#[cfg(test)]
mod test_support;
