use super::combinator::KSubsets;
use super::{rank_counts, Tally};
use crate::error::StatsError;
use crate::models::{present_numbers, CombinationCount, CombinationKey, DrawTable};

pub const MIN_ARITY: usize = 2;
pub const MAX_ARITY: usize = 5;
pub const TOP_SUBCOMBINATIONS: usize = 10;

/// Counts every size-`k` subset of every draw and returns the ten most
/// frequent, ties in first-seen order.
///
/// A draw with `m` distinct present values contributes `C(m, k)` subsets
/// (see [`subset_count`]), so cost grows combinatorially with draw width.
/// Subsets are generated lazily, one draw at a time.
pub fn mine_subcombinations(table: &DrawTable, k: usize) -> Result<Vec<CombinationCount>, StatsError> {
    if !(MIN_ARITY..=MAX_ARITY).contains(&k) {
        return Err(StatsError::InvalidParameter {
            arity: k,
            min: MIN_ARITY,
            max: MAX_ARITY,
        });
    }

    let mut tally: Tally<CombinationKey, u32> = Tally::new();

    for draw in table.draws() {
        let numbers = CombinationKey::from_numbers(present_numbers(draw));
        let numbers = numbers.numbers();
        for indices in KSubsets::new(numbers.len(), k) {
            // Ascending indices over a sorted set stay sorted.
            let key = CombinationKey::from_sorted(indices.iter().map(|&i| numbers[i]).collect());
            *tally.entry(key) += 1;
        }
    }

    Ok(rank_counts(tally, TOP_SUBCOMBINATIONS)
        .into_iter()
        .map(|(key, count)| CombinationCount { key, count })
        .collect())
}

/// `C(m, k)`, saturating at `u128::MAX`.
pub fn subset_count(m: usize, k: usize) -> u128 {
    if k > m {
        return 0;
    }
    let k = k.min(m - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (m - i) is always divisible by (i + 1) at this step
        acc = match acc.checked_mul((m - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    acc
}
