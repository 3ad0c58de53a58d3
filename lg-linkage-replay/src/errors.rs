//! Errors raised while loading a recorded corpus.

use lg_linkage::DiagramError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    /// The corpus file could not be read.
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The corpus file is not valid RON for the corpus schema.
    #[error("failed to parse corpus {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("corpus {path} records language `{found}`, expected `{expected}`")]
    LangMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("sentence {sentence:?} is recorded more than once")]
    DuplicateSentence { sentence: String },

    #[error("sentence {sentence:?}, linkage {linkage}: {source}")]
    Diagram {
        sentence: String,
        linkage: usize,
        #[source]
        source: DiagramError,
    },

    /// Recorded words could not be placed in the sentence text.
    #[error("sentence {sentence:?}, linkage {linkage}: {message}")]
    Alignment {
        sentence: String,
        linkage: usize,
        message: String,
    },
}
