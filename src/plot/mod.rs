//! Figure rendering.
//!
//! One chart: the target year (raw + smoothed) drawn over the grey smoothed
//! historical years, with a shaded period of interest.

pub mod figure;

pub use figure::*;
