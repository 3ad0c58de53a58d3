use crate::Linkage;
use std::collections::VecDeque;

/// Reorders a linkage sequence so that linkages with identical metrics come
/// out sorted by their diagram.
///
/// Engines agree on the ranking of linkages by cost but not on the order
/// within a run of equal cost, which makes positional expectations brittle
/// across releases. Only the run being emitted is buffered: one element past
/// the end of the run is pulled to detect its boundary and held back.
pub struct EqCostOrder<I: Iterator> {
    inner: I,
    lookahead: Option<I::Item>,
    run: VecDeque<I::Item>,
}

impl<I> EqCostOrder<I>
where
    I: Iterator,
    I::Item: Linkage,
{
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            lookahead: None,
            run: VecDeque::new(),
        }
    }

    fn fill_run(&mut self) -> Option<()> {
        let first = self.lookahead.take().or_else(|| self.inner.next())?;
        let metrics = first.metrics();
        let mut run = vec![first];
        for linkage in &mut self.inner {
            if linkage.metrics() == metrics {
                run.push(linkage);
            } else {
                self.lookahead = Some(linkage);
                break;
            }
        }
        run.sort_by_cached_key(|linkage| linkage.diagram());
        self.run.extend(run);
        Some(())
    }
}

impl<I> Iterator for EqCostOrder<I>
where
    I: Iterator,
    I::Item: Linkage,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.run.is_empty() {
            self.fill_run()?;
        }
        self.run.pop_front()
    }
}
