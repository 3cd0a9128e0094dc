//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - workable-dataset export (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
