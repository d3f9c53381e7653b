//! Property tests for the draw statistics engine.

use chrono::NaiveDate;
use miloto_core::analysis::{
    aggregate_frequency, count_combinations, estimate_probabilities, mine_subcombinations,
    DEFAULT_COMBINATION_LIMIT,
};
use miloto_core::models::{CombinationKey, DrawDate, DrawTable, Slot};
use miloto_core::StatsError;
use proptest::prelude::*;

const WIDTH: usize = 5;

fn arb_slot() -> impl Strategy<Value = Slot> {
    prop_oneof![
        1 => Just(None),
        4 => (1u32..=39).prop_map(Some),
    ]
}

fn arb_date() -> impl Strategy<Value = DrawDate> {
    prop_oneof![
        1 => Just(None),
        4 => (0i64..3650).prop_map(|offset| {
            NaiveDate::from_ymd_opt(2015, 1, 1).map(|d| d + chrono::Duration::days(offset))
        }),
    ]
}

/// A table of 0..40 draws with aligned dates.
fn arb_table() -> impl Strategy<Value = (DrawTable, Vec<DrawDate>)> {
    prop::collection::vec(
        (prop::collection::vec(arb_slot(), WIDTH), arb_date()),
        0..40,
    )
    .prop_map(|rows| {
        let columns = (1..=WIDTH).map(|i| format!("N{}", i)).collect();
        let (draws, dates): (Vec<Vec<Slot>>, Vec<DrawDate>) = rows.into_iter().unzip();
        (DrawTable::new(columns, draws).unwrap(), dates)
    })
}

proptest! {
    #[test]
    fn counts_sum_to_present_cells((table, dates) in arb_table()) {
        let records = aggregate_frequency(&table, &dates).unwrap();
        let total: u32 = records.iter().map(|r| r.count).sum();
        prop_assert_eq!(total as usize, table.present_cells());
    }

    #[test]
    fn percentages_sum_to_hundred((table, dates) in arb_table()) {
        let records = aggregate_frequency(&table, &dates).unwrap();
        if table.present_cells() > 0 {
            let sum: f64 = records.iter().map(|r| r.percentage).sum();
            // each of at most 39 values is off by at most 0.005
            prop_assert!((sum - 100.0).abs() <= 0.2, "sum = {}", sum);
        } else {
            prop_assert!(records.is_empty());
        }
    }

    #[test]
    fn frequency_is_ranked_and_dates_descend((table, dates) in arb_table()) {
        let records = aggregate_frequency(&table, &dates).unwrap();
        prop_assert!(records.windows(2).all(|w| w[0].count >= w[1].count));
        for r in &records {
            prop_assert!(r.occurrence_dates.len() <= r.count as usize);
            prop_assert!(r.occurrence_dates.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn probabilities_fail_only_without_observations((table, _) in arb_table()) {
        match estimate_probabilities(&table) {
            Ok(probs) => {
                prop_assert!(table.present_cells() > 0);
                prop_assert!(probs.windows(2).all(|w| w[0].probability >= w[1].probability));
            }
            Err(err) => {
                prop_assert_eq!(err, StatsError::InsufficientData);
                prop_assert_eq!(table.present_cells(), 0);
            }
        }
    }

    #[test]
    fn aggregators_are_deterministic((table, dates) in arb_table(), k in 2usize..=5) {
        prop_assert_eq!(
            aggregate_frequency(&table, &dates).unwrap(),
            aggregate_frequency(&table, &dates).unwrap()
        );
        prop_assert_eq!(estimate_probabilities(&table), estimate_probabilities(&table));
        prop_assert_eq!(
            count_combinations(&table, DEFAULT_COMBINATION_LIMIT),
            count_combinations(&table, DEFAULT_COMBINATION_LIMIT)
        );
        prop_assert_eq!(mine_subcombinations(&table, k), mine_subcombinations(&table, k));
    }

    #[test]
    fn combination_key_ignores_order(mut numbers in prop::collection::vec(1u32..=39, 0..8)) {
        let forward = CombinationKey::from_numbers(numbers.clone());
        numbers.reverse();
        prop_assert_eq!(forward, CombinationKey::from_numbers(numbers));
    }

    #[test]
    fn mined_keys_have_requested_arity((table, _) in arb_table(), k in 2usize..=5) {
        let mined = mine_subcombinations(&table, k).unwrap();
        prop_assert!(mined.len() <= 10);
        prop_assert!(mined.iter().all(|c| c.key.arity() == k));
        prop_assert!(mined.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn arity_outside_bounds_rejected((table, _) in arb_table(), k in prop_oneof![0usize..2, 6usize..64]) {
        let is_invalid = matches!(
            mine_subcombinations(&table, k),
            Err(StatsError::InvalidParameter { .. })
        );
        prop_assert!(is_invalid);
    }
}
