//! In-memory dictionary for oracle tests. Counts every pull from its
//! linkage sequences.

use lg_linkage::{
    Dictionary, EngineError, Linkage, LinkageMetrics, LinkageWord, ParseOptions,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct FakeLinkage {
    name: &'static str,
    cost: f64,
    words: Vec<LinkageWord>,
    constituents: String,
}

/// A linkage whose diagram is its name wrapped in the usual blank lines.
pub fn linkage(name: &'static str, cost: f64) -> FakeLinkage {
    FakeLinkage {
        name,
        cost,
        words: Vec::new(),
        constituents: format!("({})\n", name),
    }
}

impl FakeLinkage {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// ASCII words: char and byte spans coincide.
    pub fn words_at(mut self, words: &[(&str, usize, usize)]) -> Self {
        self.words = words
            .iter()
            .map(|&(text, start, end)| LinkageWord::new(text, start..end, start..end))
            .collect();
        self
    }
}

impl Linkage for FakeLinkage {
    fn words(&self) -> &[LinkageWord] {
        &self.words
    }

    fn diagram(&self) -> String {
        format!("\n{}\n\n", self.name)
    }

    fn constituent_tree(&self) -> String {
        self.constituents.clone()
    }

    fn metrics(&self) -> LinkageMetrics {
        LinkageMetrics {
            disjunct_cost: self.cost,
            ..LinkageMetrics::default()
        }
    }
}

pub struct FakeDictionary {
    sentences: HashMap<&'static str, Vec<FakeLinkage>>,
    pulls: Rc<Cell<usize>>,
    spell_guess: bool,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self {
            sentences: HashMap::new(),
            pulls: Rc::new(Cell::new(0)),
            spell_guess: true,
        }
    }

    pub fn sentence(mut self, text: &'static str, linkages: Vec<FakeLinkage>) -> Self {
        self.sentences.insert(text, linkages);
        self
    }

    pub fn without_spell_guess(mut self) -> Self {
        self.spell_guess = false;
        self
    }

    /// Total `next` calls made on sequences of this dictionary.
    pub fn pulls(&self) -> usize {
        self.pulls.get()
    }
}

pub struct FakeLinkages {
    items: std::vec::IntoIter<FakeLinkage>,
    pulls: Rc<Cell<usize>>,
}

impl Iterator for FakeLinkages {
    type Item = FakeLinkage;

    fn next(&mut self) -> Option<FakeLinkage> {
        self.pulls.set(self.pulls.get() + 1);
        self.items.next()
    }
}

impl Dictionary for FakeDictionary {
    type Linkage = FakeLinkage;
    type Linkages = FakeLinkages;

    fn lang(&self) -> &str {
        "en"
    }

    fn has_spell_guess(&self) -> bool {
        self.spell_guess
    }

    fn parse(&self, sentence: &str, options: &ParseOptions) -> Result<FakeLinkages, EngineError> {
        let mut linkages = self
            .sentences
            .get(sentence)
            .cloned()
            .ok_or_else(|| EngineError::UnknownSentence {
                lang: "en".to_string(),
                sentence: sentence.to_string(),
            })?;
        linkages.truncate(options.linkage_limit);
        Ok(FakeLinkages {
            items: linkages.into_iter(),
            pulls: Rc::clone(&self.pulls),
        })
    }
}
