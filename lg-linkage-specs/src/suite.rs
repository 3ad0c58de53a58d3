//! Suite manifest: which expected-results files to run, with which options.
//!
//! ```toml
//! [[case]]
//! lang = "en"
//!
//! [[case]]
//! lang = "en"
//! desc = "pos-spell"
//! requires_spell_guess = true
//! options = { spell_guess = 99 }
//!
//! [[case]]
//! lang = "lt"
//! path = "lt/parses-lt.txt"
//! ```

use crate::config::OracleConfig;
use crate::errors::{SpecError, SpecResult};
use crate::loader::{discover_expected_results, expected_results_name, expected_results_path};
use crate::runner::{run_expected_results, FileReport};
use lg_linkage::{Dictionary, OptionValue, ParseOptions};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    #[serde(rename = "case", default)]
    pub cases: Vec<SuiteCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteCase {
    pub lang: String,
    #[serde(default)]
    pub desc: Option<String>,
    /// Skip the case when the dictionary cannot guess spellings.
    #[serde(default)]
    pub requires_spell_guess: bool,
    /// Applied to default parse options before the file runs.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
    /// File location relative to the source directory, when it is not
    /// `parses-{desc-}{lang}.txt` at its top level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl SuiteCase {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            desc: None,
            requires_spell_guess: false,
            options: BTreeMap::new(),
            path: None,
        }
    }

    /// Expected-results file name.
    pub fn name(&self) -> String {
        expected_results_name(&self.lang, self.desc.as_deref())
    }

    fn covers(&self, relative: &Path) -> bool {
        match &self.path {
            Some(path) => path == relative,
            None => Path::new(&self.name()) == relative,
        }
    }

    pub fn parse_options(&self) -> Result<ParseOptions, String> {
        let mut options = ParseOptions::default();
        for (name, value) in &self.options {
            let value = match value {
                toml::Value::Boolean(b) => OptionValue::Bool(*b),
                toml::Value::Integer(i) => OptionValue::Int(*i),
                toml::Value::Float(f) => OptionValue::Float(*f),
                toml::Value::String(s) => OptionValue::Str(s.clone()),
                other => {
                    return Err(format!(
                        "option `{}` must be a scalar, found {}",
                        name,
                        other.type_str()
                    ))
                }
            };
            options.set(name, value).map_err(|e| e.to_string())?;
        }
        Ok(options)
    }
}

impl Suite {
    /// `parses-en.txt`, then `parses-pos-spell-en.txt` with a high guess limit.
    pub fn standard() -> Self {
        let mut spell = SuiteCase::new("en");
        spell.desc = Some("pos-spell".to_string());
        spell.requires_spell_guess = true;
        spell
            .options
            .insert("spell_guess".to_string(), toml::Value::Integer(99));
        Self {
            cases: vec![SuiteCase::new("en"), spell],
        }
    }

    /// Load a manifest; every case's options are checked up front.
    pub fn load(path: &Path) -> SpecResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| SpecError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let suite: Suite = toml::from_str(&content).map_err(|e| SpecError::Suite {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        for case in &suite.cases {
            case.parse_options().map_err(|message| SpecError::Suite {
                path: path.display().to_string(),
                message: format!("{}: {}", case.name(), message),
            })?;
        }
        Ok(suite)
    }

    /// Add a case with default options for every expected-results file under
    /// `srcdir` that no case covers yet. Returns how many were added.
    pub fn add_discovered(&mut self, srcdir: &Path) -> SpecResult<usize> {
        let mut added = 0;
        for file in discover_expected_results(srcdir)? {
            let relative = PathBuf::from(&file.relative);
            if self.cases.iter().any(|case| case.covers(&relative)) {
                continue;
            }
            tracing::debug!(file = %file.relative, "discovered expected results");
            let mut case = SuiteCase::new(file.lang);
            case.desc = file.desc;
            case.path = Some(relative);
            self.cases.push(case);
            added += 1;
        }
        Ok(added)
    }

    /// Keep only cases for `lang`.
    pub fn retain_lang(&mut self, lang: &str) {
        self.cases.retain(|case| case.lang == lang);
    }
}

/// What happened to one suite case.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseOutcome {
    Skipped { name: String, reason: String },
    Ran(FileReport),
}

/// Run every case of `suite`, opening a dictionary per case with `open`.
///
/// Fatal errors stop the suite; check failures are collected in the reports.
pub fn run_suite<D, F>(
    suite: &Suite,
    config: &OracleConfig,
    mut open: F,
) -> SpecResult<Vec<CaseOutcome>>
where
    D: Dictionary,
    F: FnMut(&str) -> SpecResult<D>,
{
    let mut outcomes = Vec::with_capacity(suite.cases.len());
    for case in &suite.cases {
        let name = case.name();
        let mut options = case.parse_options().map_err(|message| SpecError::Suite {
            path: name.clone(),
            message,
        })?;
        config.overrides.apply(&mut options);

        let dict = open(&case.lang)?;
        if case.requires_spell_guess {
            let reason = if !dict.has_spell_guess() {
                Some("dictionary has no spell guesser")
            } else if options.spell_guess == 0 {
                Some("spell guessing is disabled")
            } else {
                None
            };
            if let Some(reason) = reason {
                tracing::info!(case = %name, reason, "skipping");
                outcomes.push(CaseOutcome::Skipped {
                    name,
                    reason: reason.to_string(),
                });
                continue;
            }
        }

        let path = match &case.path {
            Some(relative) => config.srcdir.join(relative),
            None => expected_results_path(&config.srcdir, &case.lang, case.desc.as_deref()),
        };
        let report = run_expected_results(&dict, &mut options, config, &path)?;
        outcomes.push(CaseOutcome::Ran(report));
    }
    Ok(outcomes)
}
