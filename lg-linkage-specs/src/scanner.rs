//! Line scanner for expected-results files.
//!
//! Each line starts with an opcode character:
//!
//! | Opcode | Meaning |
//! |---|---|
//! | `I` | input sentence |
//! | `N` | next linkage of the current sentence |
//! | `O` | diagram line |
//! | `C` | constituent tree line |
//! | `P` | word-position line |
//! | `-` | parse option directive |
//! | `%`, CR, LF | comment or blank |

use crate::errors::{SpecError, SpecResult};
use crate::section::SectionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Sentence,
    Next,
    Diagram,
    Constituents,
    WordPositions,
    Directive,
    Comment,
}

impl Opcode {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Opcode::Sentence),
            'N' => Some(Opcode::Next),
            'O' => Some(Opcode::Diagram),
            'C' => Some(Opcode::Constituents),
            'P' => Some(Opcode::WordPositions),
            '-' => Some(Opcode::Directive),
            '%' | '\r' | '\n' => Some(Opcode::Comment),
            _ => None,
        }
    }

    /// The section whose lines carry this opcode.
    pub fn section(self) -> Option<SectionKind> {
        match self {
            Opcode::Diagram => Some(SectionKind::Diagram),
            Opcode::Constituents => Some(SectionKind::Constituents),
            Opcode::WordPositions => Some(SectionKind::WordPositions),
            _ => None,
        }
    }

    /// Opcodes that make up records (`I`, `N`, `O`, `C`, `P`).
    pub fn is_record(self) -> bool {
        matches!(
            self,
            Opcode::Sentence
                | Opcode::Next
                | Opcode::Diagram
                | Opcode::Constituents
                | Opcode::WordPositions
        )
    }
}

/// A classified line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// 1-based.
    pub number: usize,
    pub opcode: Opcode,
    /// Everything after the opcode character, line terminator included.
    pub text: &'a str,
}

impl<'a> ScannedLine<'a> {
    /// True for a bare terminator: nothing after the opcode but the line end.
    pub fn is_blank(&self) -> bool {
        is_blank(self.text)
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    matches!(text, "" | "\n" | "\r\n")
}

/// Splits a buffered file into classified lines.
pub struct RecordScanner<'a> {
    path: &'a str,
    lines: std::slice::SplitInclusive<'a, u8, fn(&u8) -> bool>,
    number: usize,
}

fn is_newline(byte: &u8) -> bool {
    *byte == b'\n'
}

impl<'a> RecordScanner<'a> {
    /// `path` is only used to attribute errors.
    pub fn new(path: &'a str, content: &'a [u8]) -> Self {
        Self {
            path,
            lines: content.split_inclusive(is_newline as fn(&u8) -> bool),
            number: 0,
        }
    }

    fn classify(&self, raw: &'a [u8]) -> SpecResult<ScannedLine<'a>> {
        let line = std::str::from_utf8(raw).map_err(|e| SpecError::Format {
            path: self.path.to_string(),
            line: self.number,
            message: format!("line is not valid UTF-8: {}", e),
        })?;

        let mut chars = line.chars();
        // split_inclusive never yields an empty slice
        let lead = chars.next().unwrap_or('\n');
        let opcode = Opcode::from_char(lead).ok_or_else(|| SpecError::Format {
            path: self.path.to_string(),
            line: self.number,
            message: format!("Invalid opcode \"{}\" (ord={})", lead, lead as u32),
        })?;

        Ok(ScannedLine {
            number: self.number,
            opcode,
            text: chars.as_str(),
        })
    }
}

impl<'a> Iterator for RecordScanner<'a> {
    type Item = SpecResult<ScannedLine<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.lines.next()?;
        self.number += 1;
        Some(self.classify(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(content: &str) -> SpecResult<Vec<(usize, Opcode, String)>> {
        RecordScanner::new("parses-en.txt", content.as_bytes())
            .map(|line| line.map(|l| (l.number, l.opcode, l.text.to_string())))
            .collect()
    }

    #[test]
    fn test_classifies_lines() {
        let lines = scan("% comment\nIthis is a test\r\nO\n\nC(S)\nPx\n-verbosity=1\nN").unwrap();
        assert_eq!(
            lines,
            vec![
                (1, Opcode::Comment, " comment\n".to_string()),
                (2, Opcode::Sentence, "this is a test\r\n".to_string()),
                (3, Opcode::Diagram, "\n".to_string()),
                (4, Opcode::Comment, "".to_string()),
                (5, Opcode::Constituents, "(S)\n".to_string()),
                (6, Opcode::WordPositions, "x\n".to_string()),
                (7, Opcode::Directive, "verbosity=1\n".to_string()),
                (8, Opcode::Next, "".to_string()),
            ]
        );
    }

    #[test]
    fn test_carriage_return_is_comment() {
        let lines = scan("\r\n").unwrap();
        assert_eq!(lines, vec![(1, Opcode::Comment, "\n".to_string())]);
    }

    #[test]
    fn test_invalid_opcode() {
        let err = scan("Ia\nXbad\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "parses-en.txt:2: Invalid opcode \"X\" (ord=88)"
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let bytes = b"Iok\nI\xff\xfe\n";
        let err = RecordScanner::new("parses-en.txt", bytes)
            .collect::<SpecResult<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(err, SpecError::Format { line: 2, .. }));
    }

    #[test]
    fn test_multibyte_opcode_reported() {
        let err = scan("ébad\n").unwrap_err();
        assert!(err.to_string().contains("(ord=233)"));
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank("\n"));
        assert!(is_blank("\r\n"));
        assert!(is_blank(""));
        assert!(!is_blank(" \n"));
    }

    #[test]
    fn test_opcode_sections() {
        assert_eq!(Opcode::Diagram.section(), Some(SectionKind::Diagram));
        assert_eq!(Opcode::Next.section(), None);
        assert!(Opcode::Next.is_record());
        assert!(!Opcode::Directive.is_record());
        assert!(!Opcode::Comment.is_record());
    }
}
