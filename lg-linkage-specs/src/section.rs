//! Accumulation of multi-line expected sections.
//!
//! A record can carry a diagram (`O`), a constituent tree (`C`) and a
//! word-position block (`P`). Their lines may interleave, so each section
//! keeps its own buffer. A section is opened for every linkage (`I` and `N`
//! lines), accumulates lines, and closes on a bare terminator line.

use crate::scanner::is_blank;
use std::fmt;

/// Diagram text asserting that a sentence has no linkage at all.
pub const NO_LINKAGE_SENTINEL: &str = "C\nC\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Diagram,
    Constituents,
    WordPositions,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Diagram,
        SectionKind::Constituents,
        SectionKind::WordPositions,
    ];

    pub fn opcode(self) -> char {
        match self {
            SectionKind::Diagram => 'O',
            SectionKind::Constituents => 'C',
            SectionKind::WordPositions => 'P',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionKind::Diagram => "diagram",
            SectionKind::Constituents => "constituents",
            SectionKind::WordPositions => "word-position",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of feeding one line to a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// More lines expected.
    Continue,
    /// The diagram equals [`NO_LINKAGE_SENTINEL`]; the section is closed.
    NoLinkage,
    /// The section closed with this expected text.
    Complete(String),
    /// The section is not open, so the line belongs to no entry.
    NotOpen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Closed,
    Accumulating(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    kind: SectionKind,
    state: State,
}

impl Section {
    pub fn new(kind: SectionKind) -> Self {
        Self {
            kind,
            state: State::Closed,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.kind
    }

    /// Reset to accumulating, empty.
    pub fn start(&mut self) {
        self.state = State::Accumulating(String::new());
    }

    /// Append a line remainder. Ignored when the section is closed.
    pub fn append(&mut self, text: &str) {
        if let State::Accumulating(buffer) = &mut self.state {
            buffer.push_str(text);
        }
    }

    /// Whether `text` ends the section.
    ///
    /// Diagrams keep their terminating blank line, so for them the check is
    /// made after the line has been appended and needs more than the blank
    /// line plus the leading one. Other sections check before appending.
    pub fn is_terminator(&self, text: &str) -> bool {
        let threshold = match self.kind {
            SectionKind::Diagram => 2,
            SectionKind::Constituents | SectionKind::WordPositions => 1,
        };
        match &self.state {
            State::Accumulating(buffer) => is_blank(text) && buffer.len() > threshold,
            State::Closed => false,
        }
    }

    /// Take the accumulated text and close the section.
    pub fn close(&mut self) -> String {
        match std::mem::replace(&mut self.state, State::Closed) {
            State::Accumulating(buffer) => buffer,
            State::Closed => String::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Accumulating(_))
    }

    /// Open with content that no terminator has closed yet.
    pub fn is_pending(&self) -> bool {
        matches!(&self.state, State::Accumulating(buffer) if !buffer.is_empty())
    }

    pub fn buffer(&self) -> Option<&str> {
        match &self.state {
            State::Accumulating(buffer) => Some(buffer),
            State::Closed => None,
        }
    }

    /// Route one line remainder of this section's opcode.
    pub fn feed(&mut self, text: &str) -> Feed {
        if !self.is_open() {
            return Feed::NotOpen;
        }
        match self.kind {
            SectionKind::Diagram => {
                self.append(text);
                if self.buffer() == Some(NO_LINKAGE_SENTINEL) {
                    self.close();
                    Feed::NoLinkage
                } else if self.is_terminator(text) {
                    Feed::Complete(self.close())
                } else {
                    Feed::Continue
                }
            }
            SectionKind::Constituents | SectionKind::WordPositions => {
                if self.is_terminator(text) {
                    Feed::Complete(self.close())
                } else {
                    self.append(text);
                    Feed::Continue
                }
            }
        }
    }
}

/// The three sections of the current record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    diagram: Section,
    constituents: Section,
    word_positions: Section,
}

impl Sections {
    pub fn new() -> Self {
        Self {
            diagram: Section::new(SectionKind::Diagram),
            constituents: Section::new(SectionKind::Constituents),
            word_positions: Section::new(SectionKind::WordPositions),
        }
    }

    pub fn get(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Diagram => &self.diagram,
            SectionKind::Constituents => &self.constituents,
            SectionKind::WordPositions => &self.word_positions,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut Section {
        match kind {
            SectionKind::Diagram => &mut self.diagram,
            SectionKind::Constituents => &mut self.constituents,
            SectionKind::WordPositions => &mut self.word_positions,
        }
    }

    /// Open all three sections for a new linkage.
    pub fn start_all(&mut self) {
        self.diagram.start();
        self.constituents.start();
        self.word_positions.start();
    }

    /// Sections holding unterminated content.
    pub fn pending(&self) -> impl Iterator<Item = SectionKind> + '_ {
        SectionKind::ALL
            .iter()
            .copied()
            .filter(move |&kind| self.get(kind).is_pending())
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(kind: SectionKind) -> Section {
        let mut section = Section::new(kind);
        section.start();
        section
    }

    #[test]
    fn test_diagram_keeps_terminator() {
        let mut section = open(SectionKind::Diagram);
        assert_eq!(section.feed("\n"), Feed::Continue);
        assert_eq!(section.feed("    +-Wd-+\n"), Feed::Continue);
        assert_eq!(section.feed("LEFT-WALL a\n"), Feed::Continue);
        assert_eq!(
            section.feed("\n"),
            Feed::Complete("\n    +-Wd-+\nLEFT-WALL a\n\n".to_string())
        );
        assert!(!section.is_open());
    }

    #[test]
    fn test_diagram_leading_blank_does_not_close() {
        let mut section = open(SectionKind::Diagram);
        assert_eq!(section.feed("\n"), Feed::Continue);
        assert_eq!(section.feed("\n"), Feed::Continue);
        assert!(section.is_pending());
        // a third blank brings the buffer past the threshold
        assert_eq!(section.feed("\n"), Feed::Complete("\n\n\n".to_string()));
    }

    #[test]
    fn test_no_linkage_sentinel() {
        let mut section = open(SectionKind::Diagram);
        assert_eq!(section.feed("C\n"), Feed::Continue);
        assert_eq!(section.feed("C\n"), Feed::NoLinkage);
        assert!(!section.is_open());
    }

    #[test]
    fn test_constituents_drop_terminator() {
        let mut section = open(SectionKind::Constituents);
        assert_eq!(section.feed("(S (NP a))\n"), Feed::Continue);
        assert_eq!(section.feed("\n"), Feed::Complete("(S (NP a))\n".to_string()));
    }

    #[test]
    fn test_blank_on_empty_is_content() {
        let mut section = open(SectionKind::WordPositions);
        assert_eq!(section.feed("\n"), Feed::Continue);
        assert_eq!(section.buffer(), Some("\n"));
        // one byte is not enough content to close on
        assert_eq!(section.feed("\n"), Feed::Continue);
        assert_eq!(section.feed("\n"), Feed::Complete("\n\n".to_string()));
    }

    #[test]
    fn test_closed_section_rejects_lines() {
        let mut section = Section::new(SectionKind::Constituents);
        assert_eq!(section.feed("(S)\n"), Feed::NotOpen);
        assert_eq!(section.feed("\n"), Feed::NotOpen);
        assert_eq!(section.close(), "");
    }

    #[test]
    fn test_pending_sections() {
        let mut sections = Sections::new();
        assert_eq!(sections.pending().count(), 0);

        sections.start_all();
        assert_eq!(sections.pending().count(), 0);

        sections.get_mut(SectionKind::WordPositions).feed("a(0, 1)\n");
        sections.get_mut(SectionKind::Diagram).feed("\n");
        assert_eq!(
            sections.pending().collect::<Vec<_>>(),
            vec![SectionKind::Diagram, SectionKind::WordPositions]
        );
    }
}
