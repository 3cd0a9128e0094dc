//! The year-over-year comparison figure.
//!
//! Layout (matching the published chart):
//! - shaded vertical band over the period of interest (dark green, 15% alpha)
//! - one muted grey smoothed line per historical year, drawn only through the
//!   end of the configured cutoff month
//! - the target year's raw ratio as a thin line and its smoothed ratio as a
//!   thick line, both over the full available range
//! - month-name ticks on a shared x-axis in the target year
//!
//! The figure is written as a JPEG and silently overwrites any existing file
//! at the fixed path.

use std::path::Path;

use chrono::NaiveDate;
use plotters::prelude::*;

use crate::config::RunConfig;
use crate::domain::PivotTable;
use crate::error::AppError;

/// Palette of the published chart.
const GREY: RGBColor = RGBColor(169, 169, 169);
const SHADE_GREEN: RGBColor = RGBColor(0, 100, 0);
const RAW_BLUE: RGBColor = RGBColor(31, 119, 180);
const SMOOTH_ORANGE: RGBColor = RGBColor(255, 127, 14);

/// Render the comparison chart to `path`.
pub fn render_figure(path: &Path, table: &PivotTable, config: &RunConfig) -> Result<(), AppError> {
    let (x0, x1) = x_range(table)?;
    let y_max = y_upper_bound(table)?;

    let root = BitMapBackend::new(path, config.figure_size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render_err(path, e))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d((x0..x1).monthly(), 0.0..y_max)
        .map_err(|e| render_err(path, e))?;

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .x_label_formatter(&|d| d.format("%b").to_string())
        .x_desc(format!("Date ({})", config.target_year))
        .y_desc("Articles covering domestic violence, per 1,000 articles")
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| render_err(path, e))?;

    // Shaded period of interest, behind all series.
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(config.shade_from, 0.0), (config.shade_to, y_max)],
            SHADE_GREEN.mix(0.15).filled(),
        )))
        .map_err(|e| render_err(path, e))?;

    // Historical years: smoothed only, truncated after the cutoff month, one
    // shared legend entry.
    let history = table.history_years(config.target_year);
    let mut history_labeled = false;
    for &year in &history {
        let segments = year_segments(table, year, Some(config.history_cutoff_month), true);
        for segment in segments {
            let series = chart
                .draw_series(LineSeries::new(segment, GREY.mix(0.7).stroke_width(2)))
                .map_err(|e| render_err(path, e))?;
            if !history_labeled {
                series
                    .label(history_label(&history))
                    .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREY));
                history_labeled = true;
            }
        }
    }

    // Target year: raw (thin) and smoothed (thick), full range.
    let mut raw_labeled = false;
    for segment in year_segments(table, config.target_year, None, false) {
        let series = chart
            .draw_series(LineSeries::new(segment, RAW_BLUE.mix(0.6).stroke_width(2)))
            .map_err(|e| render_err(path, e))?;
        if !raw_labeled {
            series
                .label(format!("{} unsmoothed", config.target_year))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RAW_BLUE));
            raw_labeled = true;
        }
    }

    let mut smooth_labeled = false;
    for segment in year_segments(table, config.target_year, None, true) {
        let series = chart
            .draw_series(LineSeries::new(segment, SMOOTH_ORANGE.stroke_width(4)))
            .map_err(|e| render_err(path, e))?;
        if !smooth_labeled {
            series
                .label(format!("{} smoothed", config.target_year))
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SMOOTH_ORANGE));
            smooth_labeled = true;
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .label_font(("sans-serif", 16))
        .draw()
        .map_err(|e| render_err(path, e))?;

    root.present().map_err(|e| render_err(path, e))?;
    Ok(())
}

fn render_err(path: &Path, e: impl std::fmt::Display) -> AppError {
    AppError::new(2, format!("Failed to render figure '{}': {e}", path.display()))
}

/// Shared x-axis span: first to last pivot row, in target-year dates.
fn x_range(table: &PivotTable) -> Result<(NaiveDate, NaiveDate), AppError> {
    let (Some(first), Some(last)) = (table.rows.first(), table.rows.last()) else {
        return Err(AppError::new(3, "Pivot table is empty; nothing to plot"));
    };
    if first.plot_date >= last.plot_date {
        return Err(AppError::new(
            3,
            "Pivot table spans a single day; nothing to plot",
        ));
    }
    Ok((first.plot_date, last.plot_date))
}

/// Upper y bound: the largest raw or smoothed value plus 10% headroom.
fn y_upper_bound(table: &PivotTable) -> Result<f64, AppError> {
    let max = table
        .rows
        .iter()
        .flat_map(|row| row.cells.values())
        .flat_map(|cell| [Some(cell.raw), cell.smoothed])
        .flatten()
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return Err(AppError::new(3, "No positive ratio values to plot"));
    }
    Ok(max * 1.1)
}

/// Extract one year's line as contiguous segments of present values.
///
/// A segment breaks wherever the year has no value at a (month, day): a date
/// that year never had, a leading un-smoothed position, or anything past the
/// cutoff month. Gaps break the line; they are never interpolated.
fn year_segments(
    table: &PivotTable,
    year: i32,
    cutoff_month: Option<u32>,
    smoothed: bool,
) -> Vec<Vec<(NaiveDate, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(NaiveDate, f64)> = Vec::new();

    for row in &table.rows {
        let past_cutoff = cutoff_month.is_some_and(|m| row.month > m);
        let value = if past_cutoff {
            None
        } else {
            row.cell(year)
                .and_then(|cell| if smoothed { cell.smoothed } else { Some(cell.raw) })
        };

        match value {
            Some(v) => current.push((row.plot_date, v)),
            None => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Legend text for the historical baseline, e.g. "2015-2019 smoothed".
fn history_label(history: &[i32]) -> String {
    match (history.first(), history.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last} smoothed"),
        (Some(only), _) => format!("{only} smoothed"),
        _ => "history smoothed".to_string(),
    }
}
