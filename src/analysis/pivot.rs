//! Year-over-year pivot.
//!
//! Reshapes the single date-indexed series into one (raw, smoothed) column
//! pair per calendar year, keyed by (month, day), so all years can be drawn
//! on one shared x-axis. Each row carries the (month, day) placed into the
//! target year (`plot_date`); Feb 29 rows only exist for years that had one.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};

use crate::domain::{PivotRow, PivotTable, SmoothedDay, YearCell};
use crate::error::AppError;

/// Pivot the smoothed series by calendar year.
///
/// Exactly one cell is allowed per (year, month, day); a duplicate means the
/// upstream series was not daily and is rejected rather than overwritten.
pub fn pivot_by_year(days: &[SmoothedDay], target_year: i32) -> Result<PivotTable, AppError> {
    let mut years = BTreeSet::new();
    let mut cells: BTreeMap<(u32, u32), BTreeMap<i32, YearCell>> = BTreeMap::new();

    for s in days {
        let year = s.year();
        years.insert(year);

        let key = (s.date().month(), s.date().day());
        let cell = YearCell {
            raw: s.day.ratio,
            smoothed: s.ratio_ma,
        };
        if cells.entry(key).or_default().insert(year, cell).is_some() {
            return Err(AppError::new(
                3,
                format!("Duplicate value for {year}-{:02}-{:02} in the pivot", key.0, key.1),
            ));
        }
    }

    let mut rows = Vec::with_capacity(cells.len());
    for ((month, day), year_cells) in cells {
        let plot_date = NaiveDate::from_ymd_opt(target_year, month, day).ok_or_else(|| {
            AppError::new(
                3,
                format!("{month:02}-{day:02} does not exist in plot year {target_year}"),
            )
        })?;
        rows.push(PivotRow {
            month,
            day,
            plot_date,
            cells: year_cells,
        });
    }

    Ok(PivotTable {
        years: years.into_iter().collect(),
        rows,
    })
}
