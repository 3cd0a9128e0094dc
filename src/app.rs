//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - runs the data pipeline (load, join, export, smooth, pivot)
//! - renders the comparison figure
//! - prints a short run summary

use std::fs;

use crate::config::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `coverage` binary.
pub fn run() -> Result<(), AppError> {
    let config = RunConfig::default();

    // The input directory must already exist; the output directories are
    // created on demand so a fresh checkout runs end to end.
    for dir in [&config.output_dir, &config.figures_dir] {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to create output directory '{}': {e}", dir.display()),
            )
        })?;
    }

    let output = pipeline::run_pipeline(&config)?;
    crate::plot::render_figure(&config.figure_path(), &output.table, &config)?;

    println!("{}", format_run_summary(&output, &config));
    Ok(())
}

fn format_run_summary(output: &pipeline::RunOutput, config: &RunConfig) -> String {
    let years = &output.table.years;
    let year_span = match (years.first(), years.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
        (Some(only), _) => only.to_string(),
        _ => "none".to_string(),
    };

    format!(
        "Joined {} dates ({} total-count rows, {} topic rows)\n\
         Wrote dataset: {}\n\
         Wrote figure:  {}\n\
         Years plotted: {} (target {})",
        output.joined.len(),
        output.totals_read,
        output.topic_read,
        config.export_path().display(),
        config.figure_path().display(),
        year_span,
        config.target_year,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{moving_average, pivot_by_year};
    use crate::domain::JoinedDay;
    use chrono::NaiveDate;

    #[test]
    fn summary_names_both_outputs() {
        let days: Vec<JoinedDay> = (1..=6)
            .map(|i| {
                let date = NaiveDate::from_ymd_opt(2020, 1, i).unwrap();
                JoinedDay { date, total: 100.0, topic: 1.0, ratio: 10.0 }
            })
            .collect();
        let smoothed = moving_average(&days, 5);
        let table = pivot_by_year(&smoothed, 2020).unwrap();

        let output = pipeline::RunOutput {
            totals_read: 6,
            topic_read: 6,
            joined: days,
            smoothed,
            table,
        };
        let summary = format_run_summary(&output, &RunConfig::default());
        assert!(summary.contains("articles_domestic_violence.csv"));
        assert!(summary.contains("domestic_violence__2020_vs_2015-2019.jpg"));
        assert!(summary.contains("Joined 6 dates"));
        assert!(summary.contains("target 2020"));
    }
}
