//! Human-readable reports for check failures.

use crate::failures::FailureState;
use crate::matcher::{has_ambiguity_marker, FailureKind};
use crate::runner::CheckFailure;
use crate::section::SectionKind;
use similar::{ChangeTag, TextDiff};
use std::fmt::Write;

/// Format a failed check with its sentence, a line diff and a hint.
pub fn format_failure(failure: &CheckFailure, state: FailureState) -> String {
    let mut output = String::new();

    // Header
    let label = match state {
        FailureState::Regression => "FAIL",
        FailureState::Known => "FAIL (known)",
        FailureState::Pending => "FAIL (pending)",
    };
    push(&mut output, format!("\n{}: {}", label, failure.reference()));
    push(&mut output, String::new());

    if let Some(sentence) = &failure.sentence {
        push(
            &mut output,
            format!("  sentence: {:?} (linkage {})", sentence, failure.linkage),
        );
        push(&mut output, String::new());
    }

    // Main failure message
    push(&mut output, format!("  {}", failure.kind));
    match &failure.kind {
        FailureKind::Mismatch {
            expected, actual, ..
        } => diff_lines(&mut output, expected, actual),
        FailureKind::NoMatchingCandidate { expected, .. } => {
            for line in expected.lines() {
                push(&mut output, format!("    - {}", line));
            }
        }
        _ => {}
    }

    if let Some(hint) = generate_hint(&failure.kind) {
        push(&mut output, String::new());
        push(&mut output, format!("  hint: {}", hint));
    }

    output
}

/// Format a summary of one expected-results file.
pub fn format_summary(
    file_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let mut output = String::new();

    let status = if regressions > 0 { "FAIL" } else { "PASS" };

    push(&mut output, format!("\n{}: {}", status, file_name));
    push(
        &mut output,
        format!(
            "  {} passed, {} failed ({} expected, {} regressions)",
            passed, failed, expected_failures, regressions
        ),
    );

    output
}

fn push(output: &mut String, line: String) {
    // writing to a String cannot fail
    let _ = writeln!(output, "{}", line.trim_end());
}

/// Line diff of expected against actual: removed lines `-`, added lines `+`,
/// shared lines indented.
fn diff_lines(output: &mut String, expected: &str, actual: &str) {
    let diff = TextDiff::from_lines(expected, actual);
    for change in diff.iter_all_changes() {
        let line = change.value().trim_end_matches(|c| c == '\n' || c == '\r');
        match change.tag() {
            ChangeTag::Equal => push(output, format!("      {}", line)),
            ChangeTag::Delete => push_changed(output, "-", line),
            ChangeTag::Insert => push_changed(output, "+", line),
        }
    }
}

/// Changed lines keep their trailing whitespace, shown as `·`.
fn push_changed(output: &mut String, sign: &str, line: &str) {
    let text = line.trim_end();
    let trailing = line[text.len()..].chars().count();
    let marked = format!("    {} {}", sign, text);
    let _ = writeln!(output, "{}{}", marked.trim_end(), "·".repeat(trailing));
}

fn generate_hint(kind: &FailureKind) -> Option<String> {
    match kind {
        FailureKind::Mismatch {
            section: SectionKind::WordPositions,
            expected,
            actual,
        } if has_ambiguity_marker(actual) && !has_ambiguity_marker(expected) => Some(
            "the engine guessed a spelling; mark the guessed word with [~] so all candidates are searched"
                .to_string(),
        ),
        FailureKind::Mismatch {
            expected, actual, ..
        } if strip_trailing(expected) == strip_trailing(actual) => {
            Some("lines differ only in trailing whitespace".to_string())
        }
        FailureKind::NoLinkage { .. } => Some(
            "the engine found no linkage; check max_null_count and the dictionary version"
                .to_string(),
        ),
        FailureKind::UnexpectedLinkage => {
            Some("the file asserts this sentence has no linkage at all".to_string())
        }
        FailureKind::TooFewLinkages => Some(
            "the file expects more linkages than the engine produced; check linkage_limit"
                .to_string(),
        ),
        FailureKind::NoMatchingCandidate { .. } => Some(
            "no candidate had these word positions; spell_guess may be too low".to_string(),
        ),
        FailureKind::Mismatch { .. } => None,
    }
}

fn strip_trailing(text: &str) -> Vec<&str> {
    text.lines().map(str::trim_end).collect()
}
