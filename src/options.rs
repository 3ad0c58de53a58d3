//! Parse options, addressable by name.
//!
//! Expected-results files mutate options through directive lines such as
//! `-spell_guess=0`, so every field is reachable through [`ParseOptions::set`]
//! and [`ParseOptions::get`] as well as directly.

use std::convert::TryFrom;
use std::fmt;
use thiserror::Error;

/// A scalar option value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl OptionValue {
    pub fn kind(&self) -> OptionKind {
        match self {
            OptionValue::Bool(_) => OptionKind::Bool,
            OptionValue::Int(_) => OptionKind::Int,
            OptionValue::Float(_) => OptionKind::Float,
            OptionValue::Str(_) => OptionKind::Str,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(true) => f.write_str("True"),
            OptionValue::Bool(false) => f.write_str("False"),
            OptionValue::Int(value) => write!(f, "{}", value),
            OptionValue::Float(value) => write!(f, "{:?}", value),
            OptionValue::Str(value) => write!(f, "{:?}", value),
        }
    }
}

/// The type of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Bool,
    Int,
    Float,
    Str,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptionKind::Bool => "a boolean",
            OptionKind::Int => "an integer",
            OptionKind::Float => "a number",
            OptionKind::Str => "a string",
        })
    }
}

/// Errors raised when setting or reading an option by name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionError {
    #[error("unknown parse option `{0}`")]
    UnknownOption(String),

    #[error("parse option `{name}` expects {expected}, found {found}")]
    TypeMismatch {
        name: String,
        expected: OptionKind,
        found: OptionKind,
    },

    #[error("parse option `{name}` out of range: {value}")]
    OutOfRange { name: String, value: i64 },
}

/// Options passed to the engine for every sentence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParseOptions {
    pub verbosity: i32,
    pub linkage_limit: usize,
    pub min_null_count: usize,
    pub max_null_count: usize,
    pub islands_ok: bool,
    pub short_length: usize,
    pub all_short_connectors: bool,
    pub display_morphology: bool,
    /// Maximum number of spelling guesses per unknown word; 0 disables guessing.
    pub spell_guess: usize,
    pub disjunct_cost: f64,
    /// Seconds; negative means unlimited.
    pub max_parse_time: i32,
    pub repeatable_rand: bool,
    pub test: String,
    pub debug: String,
    pub dialect: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            verbosity: 0,
            linkage_limit: 100,
            min_null_count: 0,
            max_null_count: 0,
            islands_ok: false,
            short_length: 16,
            all_short_connectors: false,
            display_morphology: true,
            spell_guess: 7,
            disjunct_cost: 2.7,
            max_parse_time: -1,
            repeatable_rand: true,
            test: String::new(),
            debug: String::new(),
            dialect: String::new(),
        }
    }
}

const OPTION_NAMES: &[&str] = &[
    "verbosity",
    "linkage_limit",
    "min_null_count",
    "max_null_count",
    "islands_ok",
    "short_length",
    "all_short_connectors",
    "display_morphology",
    "spell_guess",
    "disjunct_cost",
    "max_parse_time",
    "repeatable_rand",
    "test",
    "debug",
    "dialect",
];

impl ParseOptions {
    /// All option names accepted by [`set`](Self::set) and [`get`](Self::get).
    pub fn names() -> &'static [&'static str] {
        OPTION_NAMES
    }

    /// Restore every option to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Set an option by name.
    pub fn set(&mut self, name: &str, value: OptionValue) -> Result<(), OptionError> {
        match name {
            "verbosity" => self.verbosity = small_int(name, &value)?,
            "linkage_limit" => self.linkage_limit = count(name, &value)?,
            "min_null_count" => self.min_null_count = count(name, &value)?,
            "max_null_count" => self.max_null_count = count(name, &value)?,
            "islands_ok" => self.islands_ok = boolean(name, &value)?,
            "short_length" => self.short_length = count(name, &value)?,
            "all_short_connectors" => self.all_short_connectors = boolean(name, &value)?,
            "display_morphology" => self.display_morphology = boolean(name, &value)?,
            "spell_guess" => self.spell_guess = count(name, &value)?,
            "disjunct_cost" => self.disjunct_cost = float(name, &value)?,
            "max_parse_time" => self.max_parse_time = small_int(name, &value)?,
            "repeatable_rand" => self.repeatable_rand = boolean(name, &value)?,
            "test" => self.test = string(name, value)?,
            "debug" => self.debug = string(name, value)?,
            "dialect" => self.dialect = string(name, value)?,
            _ => return Err(OptionError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Read an option by name.
    pub fn get(&self, name: &str) -> Result<OptionValue, OptionError> {
        Ok(match name {
            "verbosity" => OptionValue::Int(self.verbosity.into()),
            "linkage_limit" => OptionValue::Int(self.linkage_limit as i64),
            "min_null_count" => OptionValue::Int(self.min_null_count as i64),
            "max_null_count" => OptionValue::Int(self.max_null_count as i64),
            "islands_ok" => OptionValue::Bool(self.islands_ok),
            "short_length" => OptionValue::Int(self.short_length as i64),
            "all_short_connectors" => OptionValue::Bool(self.all_short_connectors),
            "display_morphology" => OptionValue::Bool(self.display_morphology),
            "spell_guess" => OptionValue::Int(self.spell_guess as i64),
            "disjunct_cost" => OptionValue::Float(self.disjunct_cost),
            "max_parse_time" => OptionValue::Int(self.max_parse_time.into()),
            "repeatable_rand" => OptionValue::Bool(self.repeatable_rand),
            "test" => OptionValue::Str(self.test.clone()),
            "debug" => OptionValue::Str(self.debug.clone()),
            "dialect" => OptionValue::Str(self.dialect.clone()),
            _ => return Err(OptionError::UnknownOption(name.to_string())),
        })
    }
}

fn mismatch(name: &str, expected: OptionKind, value: &OptionValue) -> OptionError {
    OptionError::TypeMismatch {
        name: name.to_string(),
        expected,
        found: value.kind(),
    }
}

fn boolean(name: &str, value: &OptionValue) -> Result<bool, OptionError> {
    match value {
        OptionValue::Bool(b) => Ok(*b),
        other => Err(mismatch(name, OptionKind::Bool, other)),
    }
}

fn integer(name: &str, value: &OptionValue) -> Result<i64, OptionError> {
    match value {
        OptionValue::Int(i) => Ok(*i),
        other => Err(mismatch(name, OptionKind::Int, other)),
    }
}

fn small_int(name: &str, value: &OptionValue) -> Result<i32, OptionError> {
    let raw = integer(name, value)?;
    i32::try_from(raw).map_err(|_| OptionError::OutOfRange {
        name: name.to_string(),
        value: raw,
    })
}

fn count(name: &str, value: &OptionValue) -> Result<usize, OptionError> {
    let raw = integer(name, value)?;
    usize::try_from(raw).map_err(|_| OptionError::OutOfRange {
        name: name.to_string(),
        value: raw,
    })
}

fn float(name: &str, value: &OptionValue) -> Result<f64, OptionError> {
    match value {
        OptionValue::Float(f) => Ok(*f),
        OptionValue::Int(i) => Ok(*i as f64),
        other => Err(mismatch(name, OptionKind::Float, other)),
    }
}

fn string(name: &str, value: OptionValue) -> Result<String, OptionError> {
    match value {
        OptionValue::Str(s) => Ok(s),
        other => Err(mismatch(name, OptionKind::Str, &other)),
    }
}
