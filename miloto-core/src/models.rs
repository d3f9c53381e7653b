use chrono::NaiveDate;
use serde::Serialize;

use crate::error::StatsError;

/// A drawn value. The engine never assumes a range; distinct values are
/// discovered from the table.
pub type Number = u32;

/// One column of a draw. `None` marks a missing value.
pub type Slot = Option<Number>;

/// Date of a draw, `None` when the source date could not be parsed.
pub type DrawDate = Option<NaiveDate>;

/// Historical draws, one row per draw and one slot per column.
///
/// Every draw holds exactly `columns().len()` slots; the constructor
/// rejects anything else so the aggregators never see a ragged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawTable {
    columns: Vec<String>,
    draws: Vec<Vec<Slot>>,
}

impl DrawTable {
    pub fn new(columns: Vec<String>, draws: Vec<Vec<Slot>>) -> Result<Self, StatsError> {
        for (i, draw) in draws.iter().enumerate() {
            if draw.len() != columns.len() {
                return Err(StatsError::MalformedInput(format!(
                    "draw {} has {} slots, expected {}",
                    i,
                    draw.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, draws })
    }

    /// Builds a table from draws of varying length, padding the short ones
    /// with absent slots. Columns are labelled `N1`, `N2`, ...
    pub fn from_ragged(rows: Vec<Vec<Number>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = (1..=width).map(|i| format!("N{}", i)).collect();
        let draws = rows
            .into_iter()
            .map(|row| {
                let mut slots: Vec<Slot> = row.into_iter().map(Some).collect();
                slots.resize(width, None);
                slots
            })
            .collect();
        Self { columns, draws }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn draws(&self) -> &[Vec<Slot>] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Total number of present (non-absent) cells.
    pub fn present_cells(&self) -> usize {
        self.draws.iter().map(|d| present_numbers(d).count()).sum()
    }

    /// Largest present-value count of any single draw.
    pub fn widest_draw(&self) -> usize {
        self.draws
            .iter()
            .map(|d| present_numbers(d).count())
            .max()
            .unwrap_or(0)
    }

    /// Fails unless there is exactly one date per draw.
    pub fn ensure_aligned(&self, dates: &[DrawDate]) -> Result<(), StatsError> {
        if dates.len() != self.draws.len() {
            return Err(StatsError::MalformedInput(format!(
                "{} draws but {} dates",
                self.draws.len(),
                dates.len()
            )));
        }
        Ok(())
    }
}

/// Present values of one draw, in column order.
pub fn present_numbers(draw: &[Slot]) -> impl Iterator<Item = Number> + '_ {
    draw.iter().flatten().copied()
}

/// Canonical, order-independent form of a set of numbers: sorted ascending
/// with duplicates removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CombinationKey(Vec<Number>);

impl CombinationKey {
    pub fn from_numbers(numbers: impl IntoIterator<Item = Number>) -> Self {
        let mut numbers: Vec<Number> = numbers.into_iter().collect();
        numbers.sort_unstable();
        numbers.dedup();
        Self(numbers)
    }

    /// Caller guarantees `numbers` is strictly ascending.
    pub(crate) fn from_sorted(numbers: Vec<Number>) -> Self {
        debug_assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        Self(numbers)
    }

    pub fn numbers(&self) -> &[Number] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CombinationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

/// Per-number aggregate produced by the frequency scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFrequency {
    pub number: Number,
    pub count: u32,
    /// Most recent first. Shorter than `count` when some draws had no date.
    pub occurrence_dates: Vec<NaiveDate>,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberProbability {
    pub number: Number,
    pub probability: f64,
    pub tag: ProbabilityTag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbabilityTag {
    Hot,
    Cold,
    Normal,
}

impl std::fmt::Display for ProbabilityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbabilityTag::Hot => write!(f, "HOT"),
            ProbabilityTag::Cold => write!(f, "COLD"),
            ProbabilityTag::Normal => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationCount {
    pub key: CombinationKey,
    pub count: u32,
}

/// Three draws over columns A-E dated one month apart:
/// `[1,2,3,4,5]`, `[1,2,3,4,5]`, `[6,7,8,9,10]`.
#[cfg(test)]
pub(crate) fn make_test_table() -> (DrawTable, Vec<DrawDate>) {
    let columns = ["A", "B", "C", "D", "E"].iter().map(|c| c.to_string()).collect();
    let rows = vec![[1, 2, 3, 4, 5], [1, 2, 3, 4, 5], [6, 7, 8, 9, 10]];
    let draws = rows
        .iter()
        .map(|r| r.iter().map(|&n| Some(n)).collect())
        .collect();
    let table = DrawTable::new(columns, draws).unwrap();
    let dates = vec![
        NaiveDate::from_ymd_opt(2024, 1, 1),
        NaiveDate::from_ymd_opt(2024, 2, 1),
        NaiveDate::from_ymd_opt(2024, 3, 1),
    ];
    (table, dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inconsistent_width() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let draws = vec![vec![Some(1), Some(2)], vec![Some(3)]];
        let err = DrawTable::new(columns, draws).unwrap_err();
        assert_eq!(err, StatsError::MalformedInput("draw 1 has 1 slots, expected 2".to_string()));
    }

    #[test]
    fn test_from_ragged_pads_with_absent() {
        let table = DrawTable::from_ragged(vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.columns(), &["N1", "N2", "N3"]);
        assert_eq!(table.draws()[1], vec![Some(4), None, None]);
        assert_eq!(table.present_cells(), 4);
        assert_eq!(table.widest_draw(), 3);
    }

    #[test]
    fn test_empty_table() {
        let table = DrawTable::from_ragged(vec![]);
        assert!(table.is_empty());
        assert_eq!(table.width(), 0);
        assert_eq!(table.widest_draw(), 0);
        assert!(table.ensure_aligned(&[]).is_ok());
    }

    #[test]
    fn test_ensure_aligned_detects_mismatch() {
        let (table, mut dates) = make_test_table();
        assert!(table.ensure_aligned(&dates).is_ok());
        dates.pop();
        assert!(matches!(
            table.ensure_aligned(&dates),
            Err(StatsError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_present_numbers_skips_absent() {
        let draw = vec![Some(7), None, Some(3), None];
        assert_eq!(present_numbers(&draw).collect::<Vec<_>>(), vec![7, 3]);
    }

    #[test]
    fn test_combination_key_is_order_independent() {
        let a = CombinationKey::from_numbers([3, 1, 2]);
        let b = CombinationKey::from_numbers([1, 2, 3]);
        assert_eq!(a, b);
        assert_eq!(a.numbers(), &[1, 2, 3]);
    }

    #[test]
    fn test_combination_key_sorts_numerically_and_dedups() {
        let key = CombinationKey::from_numbers([10, 2, 2, 33]);
        assert_eq!(key.numbers(), &[2, 10, 33]);
        assert_eq!(key.arity(), 3);
        assert_eq!(key.to_string(), "2-10-33");
    }

    #[test]
    fn test_combination_key_serializes_as_array() {
        let key = CombinationKey::from_numbers([5, 1]);
        assert_eq!(serde_json::to_string(&key).unwrap(), "[1,5]");
    }

    #[test]
    fn test_probability_tag_display() {
        assert_eq!(ProbabilityTag::Hot.to_string(), "HOT");
        assert_eq!(ProbabilityTag::Cold.to_string(), "COLD");
        assert_eq!(ProbabilityTag::Normal.to_string(), "-");
    }
}
