//! `coverage-curves` library crate.
//!
//! The binary (`coverage`) is a thin wrapper around this library so that:
//!
//! - each pipeline stage (join, export, smoothing, pivot) is testable without
//!   spawning processes or touching the figure backend
//! - the analysis code stays separate from orchestration and rendering

pub mod analysis;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
