//! Inner join of the two daily series and ratio derivation.

use std::collections::BTreeMap;

use crate::domain::{DailyCount, JoinedDay};
use crate::error::AppError;

/// Inner-join the totals and topic series on date and derive the ratio.
///
/// Only dates present in both series survive. The output keeps the ascending
/// date order of the totals series (both inputs are sorted by the loader).
///
/// A joined date with a non-positive total count is a hard error: the ratio
/// would be infinite or meaningless, and silently carrying it would poison
/// both the export and the figure.
pub fn join_and_derive(
    totals: &[DailyCount],
    topic: &[DailyCount],
) -> Result<Vec<JoinedDay>, AppError> {
    let topic_by_date: BTreeMap<_, _> = topic.iter().map(|r| (r.date, r.count)).collect();

    let mut joined = Vec::new();
    for total in totals {
        let Some(&topic_count) = topic_by_date.get(&total.date) else {
            continue;
        };
        if total.count <= 0.0 {
            return Err(AppError::new(
                3,
                format!(
                    "Total article count is {} on {}; cannot derive a per-1,000 ratio",
                    total.count, total.date
                ),
            ));
        }
        joined.push(JoinedDay {
            date: total.date,
            total: total.count,
            topic: topic_count,
            ratio: topic_count * 1000.0 / total.count,
        });
    }

    if joined.is_empty() {
        return Err(AppError::new(
            3,
            "The two inputs share no dates; nothing to analyze",
        ));
    }

    Ok(joined)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn series(days: &[(NaiveDate, f64)]) -> Vec<DailyCount> {
        days.iter()
            .map(|&(date, count)| DailyCount { date, count })
            .collect()
    }

    #[test]
    fn ratio_is_per_thousand_articles() {
        let totals = series(&[(d(2019, 6, 1), 100.0)]);
        let topic = series(&[(d(2019, 6, 1), 5.0)]);

        let joined = join_and_derive(&totals, &topic).unwrap();
        assert_eq!(joined.len(), 1);
        assert_eq!(joined[0].ratio, 50.0);
        assert_eq!(joined[0].total, 100.0);
        assert_eq!(joined[0].topic, 5.0);
    }

    #[test]
    fn join_keeps_only_shared_dates() {
        // Topic covers Jan 1-5, totals cover Jan 2-6: the overlap is Jan 2-5.
        let topic = series(&(1..=5).map(|i| (d(2019, 1, i), 1.0)).collect::<Vec<_>>());
        let totals = series(&(2..=6).map(|i| (d(2019, 1, i), 10.0)).collect::<Vec<_>>());

        let joined = join_and_derive(&totals, &topic).unwrap();
        let dates: Vec<_> = joined.iter().map(|j| j.date).collect();
        assert_eq!(dates, vec![d(2019, 1, 2), d(2019, 1, 3), d(2019, 1, 4), d(2019, 1, 5)]);
    }

    #[test]
    fn joined_output_is_date_ascending() {
        let totals = series(&[(d(2019, 1, 1), 10.0), (d(2019, 1, 2), 10.0), (d(2019, 1, 3), 10.0)]);
        let topic = series(&[(d(2019, 1, 1), 1.0), (d(2019, 1, 2), 2.0), (d(2019, 1, 3), 3.0)]);

        let joined = join_and_derive(&totals, &topic).unwrap();
        assert!(joined.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn zero_total_count_is_rejected() {
        let totals = series(&[(d(2019, 1, 1), 0.0)]);
        let topic = series(&[(d(2019, 1, 1), 1.0)]);

        let err = join_and_derive(&totals, &topic).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("2019-01-01"));
    }

    #[test]
    fn disjoint_inputs_are_an_error() {
        let totals = series(&[(d(2019, 1, 1), 10.0)]);
        let topic = series(&[(d(2020, 1, 1), 1.0)]);

        let err = join_and_derive(&totals, &topic).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
