//! The data pipeline shared by the binary and the tests.
//!
//! Stage order matters and matches the published analysis:
//! load -> join/derive -> export CSV -> drop outlier -> moving average -> pivot
//!
//! The export deliberately happens before the outlier removal, so the
//! workable dataset keeps every joined date while the figure does not. The
//! figure itself is rendered by the caller; everything here is testable
//! without a drawing backend.

use crate::analysis::{drop_outlier, join_and_derive, moving_average, pivot_by_year};
use crate::config::RunConfig;
use crate::domain::{JoinedDay, PivotTable, SmoothedDay};
use crate::error::AppError;
use crate::io::{load_daily_counts, write_ratio_csv};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Rows read from the totals input.
    pub totals_read: usize,
    /// Rows read from the topic input.
    pub topic_read: usize,
    /// Joined rows as exported (outlier still present).
    pub joined: Vec<JoinedDay>,
    /// Outlier-free, smoothed series feeding the pivot.
    pub smoothed: Vec<SmoothedDay>,
    pub table: PivotTable,
}

/// Execute the pipeline through the pivot and return the computed outputs.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let totals = load_daily_counts(&config.totals_path())?;
    let topic = load_daily_counts(&config.topic_path())?;

    let joined = join_and_derive(&totals, &topic)?;

    // Export first: the workable dataset reflects the full unsmoothed join.
    write_ratio_csv(&config.export_path(), &joined)?;

    let trimmed = drop_outlier(&joined, config.outlier_date)?;
    let smoothed = moving_average(&trimmed, config.ma_window);
    let table = pivot_by_year(&smoothed, config.target_year)?;

    Ok(RunOutput {
        totals_read: totals.len(),
        topic_read: topic.len(),
        joined,
        smoothed,
        table,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;

    use chrono::{Datelike, Days, NaiveDate};

    use super::*;

    /// A config rooted in a temp dir, with both inputs written from closures
    /// over a date range.
    fn fixture(
        dir: &tempfile::TempDir,
        from: NaiveDate,
        days: u64,
        total: impl Fn(NaiveDate) -> f64,
        topic: impl Fn(NaiveDate) -> f64,
    ) -> RunConfig {
        let config = RunConfig {
            input_dir: dir.path().join("data"),
            output_dir: dir.path().join("output"),
            figures_dir: dir.path().join("output"),
            ..RunConfig::default()
        };
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::create_dir_all(&config.output_dir).unwrap();

        let mut totals_file = fs::File::create(config.totals_path()).unwrap();
        let mut topic_file = fs::File::create(config.topic_path()).unwrap();
        writeln!(totals_file, "date,count").unwrap();
        writeln!(topic_file, "date,count").unwrap();
        for offset in 0..days {
            let date = from + Days::new(offset);
            let stamp = date.format("%d.%m.%Y");
            writeln!(totals_file, "{stamp},{}", total(date)).unwrap();
            writeln!(topic_file, "{stamp},{}", topic(date)).unwrap();
        }
        config
    }

    #[test]
    fn pipeline_runs_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        // Dec 2018 through Feb 2020: covers the outlier date and two years.
        let from = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
        let config = fixture(&dir, from, 430, |_| 200.0, |d| 1.0 + d.day() as f64);

        let output = run_pipeline(&config).unwrap();

        assert_eq!(output.totals_read, 430);
        assert_eq!(output.joined.len(), 430);
        // Exactly the outlier row is gone from the smoothed series.
        assert_eq!(output.smoothed.len(), 429);
        assert!(output.smoothed.iter().all(|s| s.date() != config.outlier_date));
        // 2018, 2019 and 2020 all appear in the pivot.
        assert_eq!(output.table.years, vec![2018, 2019, 2020]);

        // The export exists, is semicolon-separated and keeps the outlier.
        let body = fs::read_to_string(config.export_path()).unwrap();
        assert!(body.starts_with("date;violence_absolute;violence_relative"));
        assert!(body.contains("2019-01-01;"));
        assert_eq!(body.lines().count(), 431);
    }

    #[test]
    fn export_rows_recompute_to_the_same_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
        let config = fixture(&dir, from, 60, |d| 100.0 + d.day() as f64, |d| d.day() as f64);

        let output = run_pipeline(&config).unwrap();

        for day in &output.joined {
            assert_eq!(day.ratio, day.topic * 1000.0 / day.total);
        }
        let body = fs::read_to_string(config.export_path()).unwrap();
        assert_eq!(body.lines().count(), output.joined.len() + 1);
    }

    #[test]
    fn outlier_removal_does_not_rewrite_the_export() {
        let dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
        let config = fixture(&dir, from, 60, |_| 200.0, |_| 2.0);

        run_pipeline(&config).unwrap();
        let body = fs::read_to_string(config.export_path()).unwrap();

        // The exported dataset still contains the outlier date even though
        // the in-memory series does not.
        assert!(body.contains("2019-01-01;2;10"));
    }

    #[test]
    fn missing_outlier_date_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        // June 2019 only: the hardcoded 2019-01-01 outlier cannot be found.
        let from = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
        let config = fixture(&dir, from, 30, |_| 200.0, |_| 2.0);

        let err = run_pipeline(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);

        // Fail-fast, but the export was already written by the earlier stage.
        assert!(config.export_path().exists());
    }

    #[test]
    fn smoothed_series_starts_after_the_window_fills() {
        let dir = tempfile::tempdir().unwrap();
        let from = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
        let config = fixture(&dir, from, 60, |_| 200.0, |d| d.day() as f64);

        let output = run_pipeline(&config).unwrap();
        let window = config.ma_window;
        for (i, s) in output.smoothed.iter().enumerate() {
            assert_eq!(s.ratio_ma.is_some(), i + 1 >= window, "position {i}");
        }
    }
}
