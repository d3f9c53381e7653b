use std::iter::FusedIterator;

/// Lazily enumerates every size-`k` subset of `0..n` as ascending index
/// tuples, in lexicographic order. Yields `C(n, k)` items and nothing when
/// `k > n`.
#[derive(Debug, Clone)]
pub struct KSubsets {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

impl KSubsets {
    pub fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            indices: (0..k).collect(),
            started: false,
            exhausted: k > n,
        }
    }

    /// Moves to the next tuple in place. Returns false once exhausted.
    fn advance(&mut self) -> bool {
        let k = self.indices.len();
        // Position i may go as far as n - k + i.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.n - k + i) else {
            return false;
        };
        self.indices[i] += 1;
        for j in (i + 1)..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for KSubsets {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
        } else if !self.advance() {
            self.exhausted = true;
            return None;
        }
        Some(self.indices.clone())
    }
}

impl FusedIterator for KSubsets {}
