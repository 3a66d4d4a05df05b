// src/delta.rs

use crate::models::{Block, ChainSnapshot};

/// Returns the suffix of `chain` not yet observed and the count to record once it is rendered.
///
/// A chain that did not grow, or shrank, yields an empty slice and leaves the count as is.
pub fn compute_delta(chain: &[Block], observed: usize) -> (&[Block], usize) {
    if chain.len() <= observed {
        return (&[], observed);
    }
    (&chain[observed..], chain.len())
}

/// The unseen part of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta<'a> {
    pub entries: &'a [Block],
    /// Observed count before this delta.
    pub from: usize,
    /// Observed count once this delta has been rendered.
    pub to: usize,
}

impl Delta<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remembers how many blocks have already made it into the log.
#[derive(Debug, Default)]
pub struct DeltaTracker {
    observed: usize,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Borrows the unseen suffix of `snapshot`. Does not touch the count.
    pub fn delta<'a>(&self, snapshot: &'a ChainSnapshot) -> Delta<'a> {
        let (entries, to) = compute_delta(&snapshot.chain, self.observed);
        if snapshot.len() < self.observed {
            log::warn!(
                "ledger shrank from {} to {} blocks; ignoring snapshot",
                self.observed,
                snapshot.len()
            );
        }
        Delta {
            entries,
            from: self.observed,
            to,
        }
    }

    /// Records a rendered delta. The count never goes backwards.
    pub fn commit(&mut self, delta: &Delta<'_>) {
        if delta.from == self.observed && delta.to > self.observed {
            self.observed = delta.to;
        }
    }
}
