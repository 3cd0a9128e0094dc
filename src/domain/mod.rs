//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input rows (`DailyCount`)
//! - joined/derived rows (`JoinedDay`) and their smoothed form (`SmoothedDay`)
//! - the year-over-year pivot (`PivotTable`, `PivotRow`, `YearCell`)

pub mod types;

pub use types::*;
