use super::{rank_counts, Tally};
use crate::models::{present_numbers, CombinationCount, CombinationKey, DrawTable};

pub const DEFAULT_COMBINATION_LIMIT: usize = 1000;

/// Counts how often each draw's full set of numbers occurred.
///
/// Column order is irrelevant: a draw is reduced to its [`CombinationKey`].
/// Draws with no present value are skipped. Returns at most `limit` keys,
/// highest count first, ties in first-seen order.
pub fn count_combinations(table: &DrawTable, limit: usize) -> Vec<CombinationCount> {
    let mut tally: Tally<CombinationKey, u32> = Tally::new();

    for draw in table.draws() {
        let key = CombinationKey::from_numbers(present_numbers(draw));
        if key.is_empty() {
            continue;
        }
        *tally.entry(key) += 1;
    }

    rank_counts(tally, limit)
        .into_iter()
        .map(|(key, count)| CombinationCount { key, count })
        .collect()
}
