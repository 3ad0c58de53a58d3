//! Forward cursor over the linkages of the current sentence.

use crate::config::CandidateOrder;
use lg_linkage::{Dictionary, EngineError, EqCostOrder, Linkage, ParseOptions};

/// The linkage sequence of one sentence, in the configured order.
pub enum Sequence<I: Iterator> {
    Engine(I),
    EqualCost(EqCostOrder<I>),
}

impl<I> Sequence<I>
where
    I: Iterator,
    I::Item: Linkage,
{
    pub fn new(linkages: I, order: CandidateOrder) -> Self {
        match order {
            CandidateOrder::Engine => Sequence::Engine(linkages),
            CandidateOrder::EqualCost => Sequence::EqualCost(EqCostOrder::new(linkages)),
        }
    }
}

impl<I> Iterator for Sequence<I>
where
    I: Iterator,
    I::Item: Linkage,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Sequence::Engine(linkages) => linkages.next(),
            Sequence::EqualCost(linkages) => linkages.next(),
        }
    }
}

/// Holds the sequence of the current sentence and the linkage it points at.
///
/// Linkages are pulled one at a time, only on [`start`](Self::start) and
/// [`advance`](Self::advance); once the sequence runs dry it is never
/// pulled again.
pub struct LinkageCursor<D: Dictionary> {
    sequence: Option<Sequence<D::Linkages>>,
    current: Option<D::Linkage>,
    position: usize,
}

impl<D: Dictionary> LinkageCursor<D> {
    pub fn new() -> Self {
        Self {
            sequence: None,
            current: None,
            position: 0,
        }
    }

    /// Parse `sentence` and point at its first linkage, dropping any
    /// previous sentence.
    pub fn start(
        &mut self,
        dict: &D,
        sentence: &str,
        options: &ParseOptions,
        order: CandidateOrder,
    ) -> Result<(), EngineError> {
        self.sequence = None;
        self.current = None;
        self.position = 0;

        let linkages = dict.parse(sentence, options)?;
        self.sequence = Some(Sequence::new(linkages, order));
        self.pull();
        Ok(())
    }

    pub fn current(&self) -> Option<&D::Linkage> {
        self.current.as_ref()
    }

    /// Move to the next linkage. Returns `None` once the sequence is exhausted.
    pub fn advance(&mut self) -> Option<&D::Linkage> {
        if self.current.is_some() {
            self.position += 1;
            self.pull();
        }
        self.current.as_ref()
    }

    /// Ordinal of the current linkage, starting at 1; 0 before any sentence.
    pub fn ordinal(&self) -> usize {
        if self.sequence.is_some() {
            self.position + 1
        } else {
            0
        }
    }

    pub fn is_started(&self) -> bool {
        self.sequence.is_some()
    }

    fn pull(&mut self) {
        self.current = match &mut self.sequence {
            Some(sequence) => sequence.next(),
            None => None,
        };
    }
}

impl<D: Dictionary> Default for LinkageCursor<D> {
    fn default() -> Self {
        Self::new()
    }
}
