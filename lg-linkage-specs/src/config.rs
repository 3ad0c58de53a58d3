//! Oracle configuration.

use lg_linkage::ParseOptions;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the directory with expected-results files.
pub const SRCDIR_ENV: &str = "srcdir";

/// Environment variable naming the dictionary data directory.
pub const DATA_DIR_ENV: &str = "LINK_GRAMMAR_DATA";

/// Order in which the oracle sees the linkages of a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrder {
    /// As produced by the engine.
    Engine,
    /// Runs of equal-cost linkages sorted by diagram.
    EqualCost,
}

impl Default for CandidateOrder {
    fn default() -> Self {
        CandidateOrder::EqualCost
    }
}

/// Options forced onto every parse, for debugging development engines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionOverrides {
    pub test: Option<String>,
    pub debug: Option<String>,
    pub verbosity: Option<i32>,
}

impl OptionOverrides {
    pub fn is_empty(&self) -> bool {
        self.test.is_none() && self.debug.is_none() && self.verbosity.is_none()
    }

    pub fn apply(&self, options: &mut ParseOptions) {
        if let Some(test) = &self.test {
            options.test = test.clone();
        }
        if let Some(debug) = &self.debug {
            options.debug = debug.clone();
        }
        if let Some(verbosity) = self.verbosity {
            options.verbosity = verbosity;
        }
    }
}

/// Configuration for an oracle run.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Directory holding `parses-*.txt` files.
    pub srcdir: PathBuf,
    pub order: CandidateOrder,
    /// End a file at its first failed comparison instead of moving on to the
    /// next sentence.
    pub stop_on_failure: bool,
    pub overrides: OptionOverrides,
}

impl OracleConfig {
    /// Files in the working directory, equal-cost ordering, no overrides.
    pub fn standard() -> Self {
        Self {
            srcdir: PathBuf::from("."),
            order: CandidateOrder::EqualCost,
            stop_on_failure: false,
            overrides: OptionOverrides::default(),
        }
    }

    /// Standard configuration with `srcdir` taken from the environment.
    pub fn from_env() -> Self {
        let mut config = Self::standard();
        if let Some(srcdir) = env::var_os(SRCDIR_ENV).filter(|dir| !dir.is_empty()) {
            config.srcdir = PathBuf::from(srcdir);
        }
        config
    }

    pub fn with_srcdir(mut self, srcdir: impl Into<PathBuf>) -> Self {
        self.srcdir = srcdir.into();
        self
    }

    pub fn with_order(mut self, order: CandidateOrder) -> Self {
        self.order = order;
        self
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let overrides = OptionOverrides {
            test: Some("auto-next-linkage".to_string()),
            debug: None,
            verbosity: Some(3),
        };
        assert!(!overrides.is_empty());

        let mut options = ParseOptions::default();
        options.debug = "kept".to_string();
        overrides.apply(&mut options);
        assert_eq!(options.test, "auto-next-linkage");
        assert_eq!(options.debug, "kept");
        assert_eq!(options.verbosity, 3);
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let overrides = OptionOverrides::default();
        assert!(overrides.is_empty());
        let mut options = ParseOptions::default();
        overrides.apply(&mut options);
        assert_eq!(options, ParseOptions::default());
    }

    #[test]
    fn test_standard() {
        let config = OracleConfig::standard()
            .with_srcdir("tests")
            .with_order(CandidateOrder::Engine);
        assert_eq!(config.srcdir, PathBuf::from("tests"));
        assert_eq!(config.order, CandidateOrder::Engine);
        assert!(!config.stop_on_failure);
        assert_eq!(CandidateOrder::default(), CandidateOrder::EqualCost);
    }
}
