//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can
//! be:
//!
//! - held in-memory while the pipeline runs
//! - exported to CSV
//! - inspected easily in tests

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of either input file: the number of articles on a date.
///
/// Counts are carried as `f64` because every derived quantity (ratio, moving
/// average) is floating point; the loader still rejects non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: f64,
}

/// A date present in both inputs, with the derived per-1,000 ratio.
///
/// Invariant (enforced by the joiner): `total > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JoinedDay {
    pub date: NaiveDate,
    /// All articles published on this date.
    pub total: f64,
    /// Articles mentioning the topic on this date.
    pub topic: f64,
    /// `topic * 1000 / total`, i.e. articles per 1,000 published articles.
    pub ratio: f64,
}

/// A joined day plus the trailing moving average of its ratio.
///
/// `ratio_ma` is `None` for the first `window - 1` positions of the
/// continuous date-ordered series (the window is never padded).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothedDay {
    pub day: JoinedDay,
    pub ratio_ma: Option<f64>,
}

impl SmoothedDay {
    pub fn date(&self) -> NaiveDate {
        self.day.date
    }

    pub fn year(&self) -> i32 {
        self.day.date.year()
    }
}

/// One (raw, smoothed) ratio pair for a single year at a given (month, day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearCell {
    pub raw: f64,
    pub smoothed: Option<f64>,
}

/// One pivot row: a calendar (month, day) with at most one cell per year.
#[derive(Debug, Clone)]
pub struct PivotRow {
    pub month: u32,
    pub day: u32,
    /// The same (month, day) placed in the target year, giving every year a
    /// shared x-axis for plotting.
    pub plot_date: NaiveDate,
    pub cells: BTreeMap<i32, YearCell>,
}

impl PivotRow {
    pub fn cell(&self, year: i32) -> Option<&YearCell> {
        self.cells.get(&year)
    }
}

/// The full year-over-year pivot, rows sorted by (month, day).
#[derive(Debug, Clone)]
pub struct PivotTable {
    /// Distinct calendar years present in the data, ascending.
    pub years: Vec<i32>,
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Years other than the target year, ascending (the historical baseline).
    pub fn history_years(&self, target_year: i32) -> Vec<i32> {
        self.years
            .iter()
            .copied()
            .filter(|&y| y != target_year)
            .collect()
    }
}
