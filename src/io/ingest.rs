//! CSV ingest and validation.
//!
//! Both inputs are Genios exports with a header row and two columns: a date
//! and an article count. The header text varies between exports, so columns
//! are taken positionally and the header row is skipped.
//!
//! Design goals:
//! - **Fail fast**: any unreadable file, unparseable date or bad count aborts
//!   the run (no partial-success mode)
//! - **Useful diagnostics**: errors name the file and the 1-based line
//! - **Deterministic parsing**: dates use an explicit day-first format list
//!   instead of sniffing

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::DailyCount;
use crate::error::AppError;

/// Accepted date formats, day-first per the Genios export convention, with
/// ISO as a fallback.
const DATE_FORMATS: [&str; 4] = ["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Load one input file into a date-ascending series of daily counts.
pub fn load_daily_counts(path: &Path) -> Result<Vec<DailyCount>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(2, format!("Failed to open input CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header and CSV lines are 1-based.
        let line = idx + 2;

        let record = result.map_err(|e| {
            AppError::new(
                2,
                format!("{}:{line}: CSV parse error: {e}", path.display()),
            )
        })?;

        let date_field = record.get(0).ok_or_else(|| {
            AppError::new(2, format!("{}:{line}: missing date column", path.display()))
        })?;
        let count_field = record.get(1).ok_or_else(|| {
            AppError::new(2, format!("{}:{line}: missing count column", path.display()))
        })?;

        let date = parse_day_first_date(date_field).map_err(|e| {
            AppError::new(2, format!("{}:{line}: {e}", path.display()))
        })?;
        let count = parse_count(count_field).map_err(|e| {
            AppError::new(2, format!("{}:{line}: {e}", path.display()))
        })?;

        rows.push(DailyCount { date, count });
    }

    if rows.is_empty() {
        return Err(AppError::new(
            3,
            format!("Input CSV '{}' contains no data rows", path.display()),
        ));
    }

    // The joiner and smoother both assume ascending date order, and duplicate
    // dates would silently inflate the join.
    rows.sort_by_key(|r| r.date);
    for pair in rows.windows(2) {
        if pair[0].date == pair[1].date {
            return Err(AppError::new(
                3,
                format!(
                    "Input CSV '{}' contains date {} more than once",
                    path.display(),
                    pair[0].date
                ),
            ));
        }
    }

    Ok(rows)
}

/// Parse a date, trying each accepted format in order.
fn parse_day_first_date(s: &str) -> Result<NaiveDate, String> {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first cell; strip it so the first data row parses.
    let s = s.trim().trim_start_matches('\u{feff}');
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }
    Err(format!("unparseable date '{s}' (expected day-first, e.g. 31.01.2020)"))
}

/// Parse an article count. Counts are whole numbers in the exports but are
/// carried as `f64`; non-finite values are rejected.
fn parse_count(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("unparseable article count '{s}'"))?;
    if !value.is_finite() {
        return Err(format!("non-finite article count '{s}'"));
    }
    Ok(value)
}
