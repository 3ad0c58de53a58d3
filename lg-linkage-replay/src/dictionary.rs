//! The replaying `Dictionary` implementation.

use crate::corpus::{Corpus, RecordedLinkage};
use crate::errors::CorpusError;
use crate::spans::{align_words, explicit_spans};
use lg_linkage::{
    Dictionary, EngineError, LinkDiagram, Linkage, LinkageMetrics, LinkageWord, ParseOptions,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug)]
struct Recorded {
    words: Vec<LinkageWord>,
    diagram: LinkDiagram,
    constituents: String,
    metrics: LinkageMetrics,
    spell_guess: bool,
}

/// A linkage served from the corpus. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ReplayLinkage(Arc<Recorded>);

impl ReplayLinkage {
    /// Whether this linkage exists only because of a spelling guess.
    pub fn is_spell_guess(&self) -> bool {
        self.0.spell_guess
    }
}

impl Linkage for ReplayLinkage {
    fn words(&self) -> &[LinkageWord] {
        &self.0.words
    }

    fn diagram(&self) -> String {
        self.0.diagram.render()
    }

    fn constituent_tree(&self) -> String {
        format!("{}\n", self.0.constituents.trim_end())
    }

    fn metrics(&self) -> LinkageMetrics {
        self.0.metrics
    }
}

/// A dictionary that replays recorded linkages.
#[derive(Debug)]
pub struct ReplayDictionary {
    lang: String,
    spell_guess: bool,
    sentences: HashMap<String, Arc<[ReplayLinkage]>>,
}

impl ReplayDictionary {
    /// Open the corpus for `lang` under `data_dir`.
    pub fn open(data_dir: &Path, lang: &str) -> Result<Self, CorpusError> {
        let path = Corpus::path_for(data_dir, lang);
        let corpus = Corpus::load(&path)?;
        if corpus.lang != lang {
            return Err(CorpusError::LangMismatch {
                path: path.display().to_string(),
                expected: lang.to_string(),
                found: corpus.lang,
            });
        }
        let dict = Self::from_corpus(corpus)?;
        tracing::debug!(
            lang,
            sentences = dict.sentences.len(),
            path = %path.display(),
            "loaded recorded linkages"
        );
        Ok(dict)
    }

    /// Prepare every recorded linkage: word spans are aligned and diagrams
    /// validated up front so that `parse` cannot fail on corpus content.
    pub fn from_corpus(corpus: Corpus) -> Result<Self, CorpusError> {
        let mut sentences: HashMap<String, Arc<[ReplayLinkage]>> =
            HashMap::with_capacity(corpus.sentences.len());
        for sentence in corpus.sentences {
            let mut prepared = Vec::with_capacity(sentence.linkages.len());
            for (idx, recorded) in sentence.linkages.into_iter().enumerate() {
                prepared.push(prepare(&sentence.text, idx, recorded)?);
            }
            match sentences.entry(sentence.text) {
                Entry::Occupied(entry) => {
                    return Err(CorpusError::DuplicateSentence {
                        sentence: entry.key().clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(Arc::from(prepared));
                }
            }
        }

        Ok(Self {
            lang: corpus.lang,
            spell_guess: corpus.spell_guess,
            sentences,
        })
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn contains(&self, sentence: &str) -> bool {
        self.sentences.contains_key(sentence)
    }
}

fn prepare(text: &str, idx: usize, recorded: RecordedLinkage) -> Result<ReplayLinkage, CorpusError> {
    let words = match &recorded.spans {
        Some(spans) => explicit_spans(text, &recorded.words, spans),
        None => align_words(text, &recorded.words),
    }
    .map_err(|message| CorpusError::Alignment {
        sentence: text.to_string(),
        linkage: idx,
        message,
    })?;

    let mut diagram = LinkDiagram::new(recorded.words);
    for (left, right, label) in recorded.links {
        diagram
            .link(left, right, label)
            .map_err(|source| CorpusError::Diagram {
                sentence: text.to_string(),
                linkage: idx,
                source,
            })?;
    }

    Ok(ReplayLinkage(Arc::new(Recorded {
        words,
        diagram,
        constituents: recorded.constituents,
        metrics: recorded.metrics,
        spell_guess: recorded.spell_guess,
    })))
}

impl Dictionary for ReplayDictionary {
    type Linkage = ReplayLinkage;
    type Linkages = Linkages;

    fn lang(&self) -> &str {
        &self.lang
    }

    fn has_spell_guess(&self) -> bool {
        self.spell_guess
    }

    fn parse(&self, sentence: &str, options: &ParseOptions) -> Result<Linkages, EngineError> {
        let recorded = self
            .sentences
            .get(sentence)
            .ok_or_else(|| EngineError::UnknownSentence {
                lang: self.lang.clone(),
                sentence: sentence.to_string(),
            })?;
        tracing::debug!(
            lang = %self.lang,
            sentence,
            recorded = recorded.len(),
            "replaying sentence"
        );
        Ok(Linkages {
            recorded: Arc::clone(recorded),
            next: 0,
            remaining: options.linkage_limit,
            spell_guess: self.spell_guess && options.spell_guess > 0,
            null_counts: options.min_null_count..=options.max_null_count,
        })
    }
}

/// Lazy sequence of the recorded linkages admitted by a set of parse options.
#[derive(Debug, Clone)]
pub struct Linkages {
    recorded: Arc<[ReplayLinkage]>,
    next: usize,
    remaining: usize,
    spell_guess: bool,
    null_counts: RangeInclusive<usize>,
}

impl Linkages {
    fn admits(&self, linkage: &ReplayLinkage) -> bool {
        if linkage.is_spell_guess() && !self.spell_guess {
            return false;
        }
        let nulls = usize::try_from(linkage.metrics().unused_word_cost).unwrap_or(0);
        self.null_counts.contains(&nulls)
    }
}

impl Iterator for Linkages {
    type Item = ReplayLinkage;

    fn next(&mut self) -> Option<ReplayLinkage> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(linkage) = self.recorded.get(self.next) {
            self.next += 1;
            if self.admits(linkage) {
                self.remaining -= 1;
                return Some(linkage.clone());
            }
        }
        None
    }
}
