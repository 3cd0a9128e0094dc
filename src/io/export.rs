//! Export the workable dataset to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: semicolon-separated, UTF-8, ISO dates, one row per joined date in
//! ascending order. It is written from the full joined dataset, before the
//! outlier removal that only affects the figure.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::JoinedDay;
use crate::error::AppError;

/// Write `(date, absolute count, per-1,000 ratio)` rows to a semicolon CSV.
pub fn write_ratio_csv(path: &Path, days: &[JoinedDay]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "date;violence_absolute;violence_relative")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for day in days {
        writeln!(
            file,
            "{};{};{}",
            day.date.format("%Y-%m-%d"),
            fmt_count(day.topic),
            day.ratio,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Counts are whole numbers in the source data; print them without a
/// fractional part so the export matches the integer-typed source column.
fn fmt_count(count: f64) -> String {
    if count.fract() == 0.0 {
        format!("{}", count as i64)
    } else {
        format!("{count}")
    }
}
