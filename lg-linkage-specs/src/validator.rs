//! Structural checks over the opcode stream.

use crate::scanner::Opcode;
use crate::section::{SectionKind, Sections};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A section still holds content when a line of another kind, or the
    /// end of the file, arrives.
    #[error("Unfinished {0} entry")]
    Unfinished(SectionKind),

    /// The file has no record lines at all.
    #[error("Missing opcode")]
    MissingOpcode,

    /// The last record line is not a diagram, constituent or word-position line.
    #[error("Missing result comparison")]
    MissingComparison,
}

/// Tracks the last record opcode and guards section transitions.
#[derive(Debug, Clone, Default)]
pub struct OpcodeValidator {
    last_record: Option<Opcode>,
}

impl OpcodeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check a line before it is routed. Runs for every line, comments included:
    /// only the section's own opcode may follow pending content.
    pub fn check(&mut self, sections: &Sections, opcode: Opcode) -> Result<(), ValidationError> {
        let owner = opcode.section();
        if let Some(kind) = sections.pending().find(|&kind| Some(kind) != owner) {
            return Err(ValidationError::Unfinished(kind));
        }
        if opcode.is_record() {
            self.last_record = Some(opcode);
        }
        Ok(())
    }

    /// Check the end of the file.
    pub fn finish(&self, sections: &Sections) -> Result<(), ValidationError> {
        if let Some(kind) = sections.pending().next() {
            return Err(ValidationError::Unfinished(kind));
        }
        match self.last_record {
            None => Err(ValidationError::MissingOpcode),
            Some(Opcode::Diagram) | Some(Opcode::Constituents) | Some(Opcode::WordPositions) => {
                Ok(())
            }
            Some(_) => Err(ValidationError::MissingComparison),
        }
    }

    pub fn last_record(&self) -> Option<Opcode> {
        self.last_record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagram_pending() -> Sections {
        let mut sections = Sections::new();
        sections.start_all();
        sections.get_mut(SectionKind::Diagram).feed("\n");
        sections
    }

    #[test]
    fn test_own_opcode_may_continue() {
        let mut validator = OpcodeValidator::new();
        assert_eq!(validator.check(&diagram_pending(), Opcode::Diagram), Ok(()));
    }

    #[test]
    fn test_other_opcodes_rejected() {
        let sections = diagram_pending();
        for &opcode in &[
            Opcode::Constituents,
            Opcode::WordPositions,
            Opcode::Sentence,
            Opcode::Next,
            Opcode::Directive,
            Opcode::Comment,
        ] {
            let mut validator = OpcodeValidator::new();
            assert_eq!(
                validator.check(&sections, opcode),
                Err(ValidationError::Unfinished(SectionKind::Diagram)),
                "{:?}",
                opcode
            );
        }
    }

    #[test]
    fn test_empty_open_sections_are_fine() {
        let mut sections = Sections::new();
        sections.start_all();
        let mut validator = OpcodeValidator::new();
        assert_eq!(validator.check(&sections, Opcode::Sentence), Ok(()));
    }

    #[test]
    fn test_finish() {
        let sections = Sections::new();
        let mut validator = OpcodeValidator::new();
        assert_eq!(validator.finish(&sections), Err(ValidationError::MissingOpcode));

        validator.check(&sections, Opcode::Sentence).unwrap();
        validator.check(&sections, Opcode::Comment).unwrap();
        assert_eq!(
            validator.finish(&sections),
            Err(ValidationError::MissingComparison)
        );

        validator.check(&sections, Opcode::WordPositions).unwrap();
        validator.check(&sections, Opcode::Directive).unwrap();
        assert_eq!(validator.last_record(), Some(Opcode::WordPositions));
        assert_eq!(validator.finish(&sections), Ok(()));
    }

    #[test]
    fn test_finish_with_pending_section() {
        let mut validator = OpcodeValidator::new();
        validator.check(&Sections::new(), Opcode::Diagram).unwrap();
        assert_eq!(
            validator.finish(&diagram_pending()),
            Err(ValidationError::Unfinished(SectionKind::Diagram))
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::Unfinished(SectionKind::WordPositions).to_string(),
            "Unfinished word-position entry"
        );
        assert_eq!(
            ValidationError::Unfinished(SectionKind::Constituents).to_string(),
            "Unfinished constituents entry"
        );
    }
}
