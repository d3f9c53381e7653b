use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: u32,
}

/// Buckets occurrence dates by calendar month, oldest month first.
pub fn monthly_counts(dates: &[NaiveDate]) -> Vec<MonthCount> {
    let mut buckets: BTreeMap<String, u32> = BTreeMap::new();
    for date in dates {
        *buckets.entry(date.format("%Y-%m").to_string()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect()
}
