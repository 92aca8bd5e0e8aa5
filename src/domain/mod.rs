//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the closed set of supported series (`Series`)
//! - state resolution (`State`) and observation points (`DataPoint`)
//! - aggregation output (`StateYearMean`)
//! - the per-run configuration (`RunConfig`) and year bounds

pub mod types;

pub use types::*;
