//! Chart rendering.
//!
//! Rendering itself is delegated to Plotters; this module only shapes the
//! aggregated table into one bar chart per year and writes PNG files.

pub mod bars;

pub use bars::*;
