//! Replays an expected-results file against a dictionary.

use crate::config::OracleConfig;
use crate::cursor::LinkageCursor;
use crate::directive::parse_directive;
use crate::errors::{SpecError, SpecResult};
use crate::matcher::{
    check_constituents, check_diagram, check_no_linkage, check_word_positions, FailureKind,
};
use crate::scanner::{Opcode, RecordScanner, ScannedLine};
use crate::section::{Feed, SectionKind, Sections};
use crate::validator::{OpcodeValidator, ValidationError};
use lg_linkage::{Dictionary, ParseOptions};
use std::fs;
use std::path::Path;

/// A comparison that did not hold.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckFailure {
    pub path: String,
    /// Line of the expected-results file that triggered the comparison.
    pub line: usize,
    pub sentence: Option<String>,
    /// 1-based ordinal of the linkage compared, 0 if none was current.
    pub linkage: usize,
    pub kind: FailureKind,
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

impl CheckFailure {
    /// File name without directories, as used in `expected-failures.toml`.
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }

    /// `file:line`
    pub fn reference(&self) -> String {
        format!("{}:{}", self.file_name(), self.line)
    }
}

/// Outcome of one expected-results file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileReport {
    pub path: String,
    pub sentences: usize,
    pub checks: usize,
    pub passed: usize,
    pub failures: Vec<CheckFailure>,
    /// The file ended at its first failure.
    pub stopped_early: bool,
}

impl FileReport {
    pub fn file_name(&self) -> &str {
        file_name(&self.path)
    }

    pub fn success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Flow {
    Continue,
    Stop,
}

struct Oracle<'a, D: Dictionary> {
    dict: &'a D,
    options: &'a mut ParseOptions,
    baseline: ParseOptions,
    config: &'a OracleConfig,
    sections: Sections,
    validator: OpcodeValidator,
    cursor: LinkageCursor<D>,
    sentence: Option<String>,
    /// Set after a failure; cleared by the next sentence.
    skipping: bool,
    last_line: usize,
    report: FileReport,
}

impl<'a, D: Dictionary> Oracle<'a, D> {
    fn new(
        dict: &'a D,
        options: &'a mut ParseOptions,
        config: &'a OracleConfig,
        path: &str,
    ) -> Self {
        let baseline = options.clone();
        Self {
            dict,
            options,
            baseline,
            config,
            sections: Sections::new(),
            validator: OpcodeValidator::new(),
            cursor: LinkageCursor::new(),
            sentence: None,
            skipping: false,
            last_line: 0,
            report: FileReport {
                path: path.to_string(),
                ..FileReport::default()
            },
        }
    }

    fn run(mut self, content: &[u8]) -> SpecResult<FileReport> {
        let path = self.report.path.clone();
        for line in RecordScanner::new(&path, content) {
            let line = line?;
            self.last_line = line.number;
            if let Flow::Stop = self.line(line)? {
                self.report.stopped_early = true;
                return Ok(self.report);
            }
        }
        let line = self.last_line;
        self.validator
            .finish(&self.sections)
            .map_err(|e| self.validation_error(line, e))?;
        Ok(self.report)
    }

    fn line(&mut self, line: ScannedLine<'_>) -> SpecResult<Flow> {
        self.validator
            .check(&self.sections, line.opcode)
            .map_err(|e| self.validation_error(line.number, e))?;

        match line.opcode {
            Opcode::Comment => Ok(Flow::Continue),
            Opcode::Directive => {
                self.directive(line)?;
                Ok(Flow::Continue)
            }
            Opcode::Sentence => {
                self.sentence(line)?;
                Ok(Flow::Continue)
            }
            Opcode::Next => self.next_linkage(line),
            Opcode::Diagram => self.section_line(SectionKind::Diagram, line),
            Opcode::Constituents => self.section_line(SectionKind::Constituents, line),
            Opcode::WordPositions => self.section_line(SectionKind::WordPositions, line),
        }
    }

    fn directive(&mut self, line: ScannedLine<'_>) -> SpecResult<()> {
        let directive =
            parse_directive(line.text).map_err(|e| self.structure(line.number, e.to_string()))?;
        directive
            .apply(self.options, &self.baseline)
            .map_err(|e| self.structure(line.number, e.to_string()))?;
        tracing::debug!(line = line.number, directive = line.text.trim(), "applied directive");
        Ok(())
    }

    fn sentence(&mut self, line: ScannedLine<'_>) -> SpecResult<()> {
        let text = line.text.trim_end_matches(|c| c == '\r' || c == '\n');
        self.sections.start_all();
        self.skipping = false;
        self.sentence = Some(text.to_string());
        self.report.sentences += 1;
        if self.options.verbosity > 1 {
            tracing::info!(line = line.number, sentence = text, "parsing");
        }

        let (dict, options, order) = (self.dict, &*self.options, self.config.order);
        self.cursor
            .start(dict, text, options, order)
            .map_err(|source| SpecError::Engine {
                path: self.report.path.clone(),
                line: line.number,
                source,
            })
    }

    fn next_linkage(&mut self, line: ScannedLine<'_>) -> SpecResult<Flow> {
        if !self.cursor.is_started() {
            return Err(self.structure(line.number, "next linkage requested before any sentence"));
        }
        self.sections.start_all();
        if self.skipping {
            return Ok(Flow::Continue);
        }
        if self.cursor.advance().is_some() {
            Ok(Flow::Continue)
        } else {
            Ok(self.fail(line.number, FailureKind::TooFewLinkages))
        }
    }

    fn section_line(&mut self, kind: SectionKind, line: ScannedLine<'_>) -> SpecResult<Flow> {
        let feed = self.sections.get_mut(kind).feed(line.text);
        let outcome = match feed {
            Feed::Continue => return Ok(Flow::Continue),
            Feed::NotOpen => {
                return Err(self.structure(
                    line.number,
                    format!("{} line outside an open {} entry", kind.opcode(), kind),
                ))
            }
            _ if self.skipping => return Ok(Flow::Continue),
            Feed::NoLinkage => check_no_linkage(self.cursor.current()),
            Feed::Complete(expected) => match kind {
                SectionKind::Diagram => check_diagram(self.cursor.current(), &expected),
                SectionKind::Constituents => {
                    check_constituents(self.cursor.current(), &expected)
                }
                SectionKind::WordPositions => {
                    check_word_positions(&mut self.cursor, &expected)
                }
            },
        };

        match outcome {
            Ok(()) => {
                self.report.checks += 1;
                self.report.passed += 1;
                tracing::trace!(line = line.number, section = %kind, "check passed");
                Ok(Flow::Continue)
            }
            Err(kind) => Ok(self.fail(line.number, kind)),
        }
    }

    fn fail(&mut self, line: usize, kind: FailureKind) -> Flow {
        let failure = CheckFailure {
            path: self.report.path.clone(),
            line,
            sentence: self.sentence.clone(),
            linkage: self.cursor.ordinal(),
            kind,
        };
        tracing::debug!(at = %failure.reference(), failure = %failure.kind, "check failed");
        self.report.checks += 1;
        self.report.failures.push(failure);
        self.skipping = true;
        if self.config.stop_on_failure {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn structure(&self, line: usize, message: impl Into<String>) -> SpecError {
        SpecError::Structure {
            path: self.report.path.clone(),
            line,
            message: message.into(),
        }
    }

    fn validation_error(&self, line: usize, error: ValidationError) -> SpecError {
        match error {
            ValidationError::Unfinished(_) => self.structure(line, error.to_string()),
            ValidationError::MissingOpcode | ValidationError::MissingComparison => {
                SpecError::Format {
                    path: self.report.path.clone(),
                    line,
                    message: error.to_string(),
                }
            }
        }
    }
}

/// Run the expected-results file at `path`.
///
/// Directives in the file mutate `options` in place; the options passed in
/// are what `reset()` restores.
pub fn run_expected_results<D: Dictionary>(
    dict: &D,
    options: &mut ParseOptions,
    config: &OracleConfig,
    path: &Path,
) -> SpecResult<FileReport> {
    let shown = path.display().to_string();
    // an absent or unreadable file is a format error at line 0
    let content = fs::read(path).map_err(|e| SpecError::Format {
        path: shown.clone(),
        line: 0,
        message: format!("cannot read expected results: {}", e),
    })?;
    let report = run_expected_bytes(dict, options, config, &shown, &content)?;
    tracing::info!(
        path = %shown,
        sentences = report.sentences,
        checks = report.checks,
        failed = report.failures.len(),
        "expected results replayed"
    );
    Ok(report)
}

/// Run expected results already in memory. `name` attributes errors and failures.
pub fn run_expected_bytes<D: Dictionary>(
    dict: &D,
    options: &mut ParseOptions,
    config: &OracleConfig,
    name: &str,
    content: &[u8],
) -> SpecResult<FileReport> {
    Oracle::new(dict, options, config, name).run(content)
}
