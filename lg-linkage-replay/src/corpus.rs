//! Serialized corpus format.

use crate::errors::CorpusError;
use lg_linkage::LinkageMetrics;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Corpus file name inside each language directory.
pub const CORPUS_FILE: &str = "linkages.ron";

/// All recorded sentences of one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    pub lang: String,
    /// Whether the recording engine had a spelling guesser.
    #[serde(default = "default_spell_guess")]
    pub spell_guess: bool,
    #[serde(default)]
    pub sentences: Vec<RecordedSentence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSentence {
    pub text: String,
    /// In the order the engine produced them. Empty when the sentence has no linkage.
    #[serde(default)]
    pub linkages: Vec<RecordedLinkage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedLinkage {
    pub words: Vec<String>,
    /// Character spans for every word; derived from the sentence text when absent.
    #[serde(default)]
    pub spans: Option<Vec<(usize, usize)>>,
    /// `(left word, right word, label)`.
    #[serde(default)]
    pub links: Vec<(usize, usize, String)>,
    #[serde(default)]
    pub constituents: String,
    #[serde(default)]
    pub metrics: LinkageMetrics,
    /// Produced only with spelling guesses enabled.
    #[serde(default)]
    pub spell_guess: bool,
}

fn default_spell_guess() -> bool {
    true
}

impl Corpus {
    /// Location of the corpus for `lang` under a data directory.
    pub fn path_for(data_dir: &Path, lang: &str) -> PathBuf {
        data_dir.join(lang).join(CORPUS_FILE)
    }

    /// Load a corpus file.
    pub fn load(path: &Path) -> Result<Self, CorpusError> {
        let content = fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_string(&content).map_err(|source| CorpusError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Deserialize from a RON string.
    pub fn from_ron_string(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    pub fn linkage_count(&self) -> usize {
        self.sentences.iter().map(|s| s.linkages.len()).sum()
    }
}
