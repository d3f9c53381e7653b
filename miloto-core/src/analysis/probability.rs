use super::{percentage, Tally};
use crate::error::StatsError;
use crate::models::{present_numbers, DrawTable, Number, NumberProbability, ProbabilityTag};

/// Relative deviation from the uniform share beyond which a number is tagged.
const TAG_THRESHOLD: f64 = 0.3;

/// Empirical share of each number among all present cells, in percent.
///
/// Sorted by probability descending, ties in first-seen order. Tags are left
/// at `Normal`; see [`tag_probabilities`].
pub fn estimate_probabilities(table: &DrawTable) -> Result<Vec<NumberProbability>, StatsError> {
    let mut tally: Tally<Number, u32> = Tally::new();
    let mut total: u64 = 0;

    for draw in table.draws() {
        for number in present_numbers(draw) {
            *tally.entry(number) += 1;
            total += 1;
        }
    }

    if total == 0 {
        return Err(StatsError::InsufficientData);
    }

    let mut probs: Vec<NumberProbability> = tally
        .into_entries()
        .into_iter()
        .map(|(number, count)| NumberProbability {
            number,
            probability: percentage(count, total),
            tag: ProbabilityTag::Normal,
        })
        .collect();

    probs.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(probs)
}

/// Marks numbers well above or below the uniform share over the observed numbers.
pub fn tag_probabilities(probs: &mut [NumberProbability]) {
    if probs.is_empty() {
        return;
    }
    let uniform = 100.0 / probs.len() as f64;

    for p in probs.iter_mut() {
        let deviation = (p.probability - uniform) / uniform;
        p.tag = if deviation > TAG_THRESHOLD {
            ProbabilityTag::Hot
        } else if deviation < -TAG_THRESHOLD {
            ProbabilityTag::Cold
        } else {
            ProbabilityTag::Normal
        };
    }
}
