//! Fixed run configuration.
//!
//! This tool deliberately has no CLI flags and no environment variables: the
//! input files, output files and plot parameters are constants of the study.
//! Everything lives in one `RunConfig` value so the pipeline and the tests
//! share a single source of truth for paths and tuning knobs.

use std::path::PathBuf;

use chrono::NaiveDate;

/// Topic input: daily counts of articles mentioning the topic.
const TOPIC_INPUT: &str = "genios_articles_häusliche_Gewalt.csv";

/// Totals input: daily counts of all published articles.
const TOTALS_INPUT: &str = "genios_articles_all.csv";

/// Exported workable dataset (semicolon-separated).
const EXPORT_FILE: &str = "articles_domestic_violence.csv";

/// Figure file name parts. The double underscore between prefix and suffix is
/// intentional and part of the published file name.
const FIGURE_PREFIX: &str = "domestic_violence_";
const FIGURE_SUFFIX: &str = "_2020_vs_2015-2019.jpg";

/// All fixed inputs of a run: file locations, the outlier to drop, smoothing
/// window, and figure parameters.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the two Genios export CSVs.
    pub input_dir: PathBuf,
    /// Directory the cleaned dataset is written to.
    pub output_dir: PathBuf,
    /// Directory the comparison figure is written to.
    pub figures_dir: PathBuf,

    /// Single known-bad date removed before smoothing/plotting (a reporting
    /// artifact in the source data). The exported dataset keeps it.
    pub outlier_date: NaiveDate,
    /// Trailing moving-average window (samples).
    pub ma_window: usize,

    /// Year drawn highlighted over the historical baseline.
    pub target_year: i32,
    /// Historical years are only drawn through the end of this month.
    pub history_cutoff_month: u32,
    /// Shaded period of interest on the shared x-axis.
    pub shade_from: NaiveDate,
    pub shade_to: NaiveDate,
    /// Figure raster size in pixels.
    pub figure_size: (u32, u32),
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("output"),
            figures_dir: PathBuf::from("output"),
            outlier_date: ymd(2019, 1, 1),
            ma_window: 5,
            target_year: 2020,
            history_cutoff_month: 4,
            shade_from: ymd(2020, 3, 23),
            shade_to: ymd(2020, 4, 30),
            figure_size: (1280, 800),
        }
    }
}

impl RunConfig {
    pub fn topic_path(&self) -> PathBuf {
        self.input_dir.join(TOPIC_INPUT)
    }

    pub fn totals_path(&self) -> PathBuf {
        self.input_dir.join(TOTALS_INPUT)
    }

    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(EXPORT_FILE)
    }

    pub fn figure_path(&self) -> PathBuf {
        self.figures_dir
            .join(format!("{FIGURE_PREFIX}{FIGURE_SUFFIX}"))
    }
}

/// Construct a hardcoded calendar date.
///
/// Only used for compile-time constants above; the values are known-valid.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hardcoded date is valid")
}
