use crate::{Linkage, ParseOptions};
use thiserror::Error;

/// Errors raised by an engine while preparing a sentence.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no linkages available for {lang} sentence {sentence:?}")]
    UnknownSentence { lang: String, sentence: String },

    #[error("{0}")]
    Other(String),
}

/// A language-tagged dictionary able to parse sentences.
///
/// `parse` hands back a lazy sequence: each call to `next` may do real work,
/// so callers pull linkages only when they need them.
pub trait Dictionary {
    type Linkage: Linkage;
    type Linkages: Iterator<Item = Self::Linkage>;

    fn lang(&self) -> &str;

    /// Whether the engine behind this dictionary can produce spelling guesses.
    fn has_spell_guess(&self) -> bool {
        true
    }

    fn parse(&self, sentence: &str, options: &ParseOptions) -> Result<Self::Linkages, EngineError>;
}
