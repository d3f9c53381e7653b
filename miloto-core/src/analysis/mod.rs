pub mod combinations;
pub mod combinator;
pub mod frequency;
pub mod probability;
pub mod subcombinations;

pub use combinations::{count_combinations, DEFAULT_COMBINATION_LIMIT};
pub use frequency::{aggregate_frequency, find_number};
pub use probability::{estimate_probabilities, tag_probabilities};
pub use subcombinations::{mine_subcombinations, subset_count, MAX_ARITY, MIN_ARITY, TOP_SUBCOMBINATIONS};

use std::collections::HashMap;
use std::hash::Hash;

/// Per-key accumulator that remembers the order in which keys were first
/// seen. Rankings sort its entries with a stable sort, so equal counts keep
/// first-seen order.
pub(crate) struct Tally<K, V> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K: Hash + Eq + Clone, V: Default> Tally<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, key: K) -> &mut V {
        let idx = match self.slots.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.slots.insert(key.clone(), idx);
                self.entries.push((key, V::default()));
                idx
            }
        };
        &mut self.entries[idx].1
    }

    /// Entries in first-seen order.
    pub(crate) fn into_entries(self) -> Vec<(K, V)> {
        self.entries
    }
}

/// Highest counts first, ties in first-seen order, at most `limit` entries.
pub(crate) fn rank_counts<K>(tally: Tally<K, u32>, limit: usize) -> Vec<(K, u32)>
where
    K: Hash + Eq + Clone,
{
    let mut ranked = tally.into_entries();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// `count / total * 100`, rounded to two decimals. Zero when nothing was observed.
pub(crate) fn percentage(count: u32, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
