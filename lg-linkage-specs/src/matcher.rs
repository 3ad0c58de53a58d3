//! Comparison of rendered linkages against expected sections.

use crate::cursor::LinkageCursor;
use crate::section::SectionKind;
use lg_linkage::{Dictionary, Linkage};
use std::fmt::Write;
use thiserror::Error;

/// Characters in expected word positions marking a spelling-guess candidate
/// whose rank among equal-scoring guesses depends on the installed speller.
pub const AMBIGUITY_MARKERS: [char; 2] = ['~', '&'];

/// Why a comparison failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FailureKind {
    #[error("{section} mismatch")]
    Mismatch {
        section: SectionKind,
        expected: String,
        actual: String,
    },

    #[error("Sentence has no linkages")]
    NoLinkage { section: SectionKind },

    #[error("Sentence has a linkage where none was expected")]
    UnexpectedLinkage,

    #[error("Sentence has too few linkages")]
    TooFewLinkages,

    #[error("no candidate linkage matched the expected word positions ({tried} tried)")]
    NoMatchingCandidate { expected: String, tried: usize },
}

/// Character spans on the first line, byte spans on the second:
/// `LEFT-WALL(0, 0) this(0, 4) is(5, 7)`.
pub fn word_positions<L: Linkage>(linkage: &L) -> String {
    let mut chars = String::new();
    let mut bytes = String::new();
    for (idx, word) in linkage.words().iter().enumerate() {
        if idx > 0 {
            chars.push(' ');
            bytes.push(' ');
        }
        // writing to a String cannot fail
        let _ = write!(chars, "{}({}, {})", word.text, word.chars.start, word.chars.end);
        let _ = write!(bytes, "{}({}, {})", word.text, word.bytes.start, word.bytes.end);
    }
    format!("{}\n{}\n", chars, bytes)
}

pub fn has_ambiguity_marker(expected: &str) -> bool {
    expected.contains(&AMBIGUITY_MARKERS[..])
}

/// The sentence must have no linkage at all.
pub fn check_no_linkage<L: Linkage>(current: Option<&L>) -> Result<(), FailureKind> {
    match current {
        None => Ok(()),
        Some(_) => Err(FailureKind::UnexpectedLinkage),
    }
}

pub fn check_diagram<L: Linkage>(current: Option<&L>, expected: &str) -> Result<(), FailureKind> {
    let linkage = current.ok_or(FailureKind::NoLinkage {
        section: SectionKind::Diagram,
    })?;
    compare(SectionKind::Diagram, expected, linkage.diagram())
}

pub fn check_constituents<L: Linkage>(
    current: Option<&L>,
    expected: &str,
) -> Result<(), FailureKind> {
    let linkage = current.ok_or(FailureKind::NoLinkage {
        section: SectionKind::Constituents,
    })?;
    compare(SectionKind::Constituents, expected, linkage.constituent_tree())
}

/// Compare word positions of the current linkage.
///
/// Without an ambiguity marker the current linkage must match. With one, the
/// cursor moves forward until a linkage matches; running out of linkages is
/// a failure. The cursor is left on the matching linkage.
pub fn check_word_positions<D: Dictionary>(
    cursor: &mut LinkageCursor<D>,
    expected: &str,
) -> Result<(), FailureKind> {
    let actual = match cursor.current() {
        Some(linkage) => word_positions(linkage),
        None => {
            return Err(FailureKind::NoLinkage {
                section: SectionKind::WordPositions,
            })
        }
    };
    if actual == expected {
        return Ok(());
    }
    if !has_ambiguity_marker(expected) {
        return compare(SectionKind::WordPositions, expected, actual);
    }

    let mut tried = 1;
    while let Some(linkage) = cursor.advance() {
        tried += 1;
        let candidate = word_positions(linkage);
        tracing::debug!(tried, candidate = %candidate.trim_end(), "retrying ambiguous word positions");
        if candidate == expected {
            return Ok(());
        }
    }
    Err(FailureKind::NoMatchingCandidate {
        expected: expected.to_string(),
        tried,
    })
}

fn compare(section: SectionKind, expected: &str, actual: String) -> Result<(), FailureKind> {
    if actual == expected {
        Ok(())
    } else {
        Err(FailureKind::Mismatch {
            section,
            expected: expected.to_string(),
            actual,
        })
    }
}
