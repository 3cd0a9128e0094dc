//! Outlier removal and trailing moving-average smoothing.
//!
//! Both operate on the single continuous date-ordered series, so the
//! smoothing window deliberately spans year boundaries (late-December values
//! feed the first January averages).

use chrono::NaiveDate;

use crate::domain::{JoinedDay, SmoothedDay};
use crate::error::AppError;

/// Remove the single known-bad date from the series.
///
/// The exported dataset keeps the outlier; only the smoothed/plotted series
/// drops it. A missing outlier date is a hard error: it means the inputs are
/// not the dataset this analysis was written for.
pub fn drop_outlier(days: &[JoinedDay], outlier: NaiveDate) -> Result<Vec<JoinedDay>, AppError> {
    let kept: Vec<JoinedDay> = days.iter().filter(|d| d.date != outlier).copied().collect();
    if kept.len() == days.len() {
        return Err(AppError::new(
            3,
            format!("Outlier date {outlier} is not present in the joined series"),
        ));
    }
    Ok(kept)
}

/// Trailing simple moving average of the ratio over `window` samples.
///
/// The first `window - 1` positions have no average (`ratio_ma = None`); the
/// window is taken over sample positions, not calendar distance, so gaps in
/// the date series do not reset it.
pub fn moving_average(days: &[JoinedDay], window: usize) -> Vec<SmoothedDay> {
    days.iter()
        .enumerate()
        .map(|(i, &day)| {
            let ratio_ma = if window > 0 && i + 1 >= window {
                let sum: f64 = days[i + 1 - window..=i].iter().map(|d| d.ratio).sum();
                Some(sum / window as f64)
            } else {
                None
            };
            SmoothedDay { day, ratio_ma }
        })
        .collect()
}
