//! Output helpers.
//!
//! - aggregated-table CSV export (`export`)

pub mod export;

pub use export::*;
