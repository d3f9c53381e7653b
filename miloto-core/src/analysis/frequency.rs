use chrono::NaiveDate;

use super::{percentage, Tally};
use crate::error::StatsError;
use crate::models::{present_numbers, DrawDate, DrawTable, Number, NumberFrequency};

/// Counts every present cell per number and collects the dates it was drawn on.
///
/// Cells are scanned draw by draw, left to right. The result is ordered by
/// count descending; numbers with equal counts keep the order in which the
/// scan first met them. Draws without a date still count, they only add
/// nothing to `occurrence_dates`.
pub fn aggregate_frequency(
    table: &DrawTable,
    dates: &[DrawDate],
) -> Result<Vec<NumberFrequency>, StatsError> {
    table.ensure_aligned(dates)?;

    let mut tally: Tally<Number, (u32, Vec<NaiveDate>)> = Tally::new();
    let mut total: u64 = 0;

    for (draw, date) in table.draws().iter().zip(dates) {
        for number in present_numbers(draw) {
            let (count, seen) = tally.entry(number);
            *count += 1;
            if let Some(date) = date {
                seen.push(*date);
            }
            total += 1;
        }
    }

    let mut records: Vec<NumberFrequency> = tally
        .into_entries()
        .into_iter()
        .map(|(number, (count, mut occurrence_dates))| {
            occurrence_dates.sort_unstable_by(|a, b| b.cmp(a));
            NumberFrequency {
                number,
                count,
                occurrence_dates,
                percentage: percentage(count, total),
            }
        })
        .collect();

    records.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(records)
}

pub fn find_number(records: &[NumberFrequency], number: Number) -> Option<&NumberFrequency> {
    records.iter().find(|r| r.number == number)
}
