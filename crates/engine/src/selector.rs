//! Bounded top-K result selector.
//!
//! Keeps at most `CAPACITY` candidates at a time and a cached `min_score` so
//! callers can skip the DP scorer entirely for paths that cannot possibly
//! unseat the current worst kept candidate once the selector is full.

use crate::path_index::EntryId;
use std::cmp::Ordering;

/// Maximum number of results the selector retains.
pub const CAPACITY: usize = 512;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub entry: EntryId,
    pub score: i32,
    pub depth: u8,
    pub basename_len: u32,
    pub path: String,
    /// Byte offsets of the matched query characters, already adjusted to be
    /// relative to the full path (not the basename suffix that may have been
    /// scored instead of it).
    pub positions: Vec<usize>,
}

/// Total order over candidates: score descending, then depth ascending,
/// then basename length ascending, then path ascending byte-lexicographic.
fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.depth.cmp(&b.depth))
        .then_with(|| a.basename_len.cmp(&b.basename_len))
        .then_with(|| a.path.as_bytes().cmp(b.path.as_bytes()))
}

#[derive(Debug, Default)]
pub struct Selector {
    heap: Vec<Candidate>,
    /// Cached score of the current worst kept candidate once at capacity.
    /// `None` while there is still room for more candidates regardless of
    /// score.
    min_score: Option<i32>,
}

impl Selector {
    pub fn new() -> Self {
        Selector {
            heap: Vec::with_capacity(CAPACITY),
            min_score: None,
        }
    }

    /// The score a new candidate must beat (or tie, then win on the
    /// secondary keys) to be worth scoring at all. `None` means every
    /// candidate is still worth scoring.
    pub fn cutoff(&self) -> Option<i32> {
        self.min_score
    }

    /// Inserts `candidate`, keeping the set within `CAPACITY` by dropping the
    /// single worst-ranked candidate (by `candidate_order`) when over
    /// capacity. No-ops if the selector is already full and `candidate`
    /// would rank worse than everything currently kept.
    pub fn insert(&mut self, candidate: Candidate) {
        if self.heap.len() >= CAPACITY
            && let Some(min) = self.min_score
            && candidate.score <= min
        {
            return;
        }

        self.heap.push(candidate);

        if self.heap.len() > CAPACITY {
            self.heap.sort_unstable_by(candidate_order);
            self.heap.truncate(CAPACITY);
        }

        if self.heap.len() >= CAPACITY {
            self.min_score = self.heap.iter().map(|c| c.score).min();
        }
    }

    /// Consumes the selector, returning candidates in final rank order.
    pub fn finalize(mut self) -> Vec<Candidate> {
        self.heap.sort_unstable_by(candidate_order);
        self.heap
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
