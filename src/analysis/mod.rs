//! The derivation stages of the pipeline.
//!
//! - inner join + per-1,000 ratio (`join`)
//! - outlier removal + trailing moving average (`smooth`)
//! - year-over-year pivot (`pivot`)

pub mod join;
pub mod pivot;
pub mod smooth;

pub use join::*;
pub use pivot::*;
pub use smooth::*;
