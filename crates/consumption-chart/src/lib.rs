//! Rendering layer for the NAF consumption charts.
//!
//! Draws the two-panel cumulative chart with [`plotters`] to a PNG and an
//! SVG file, and formats the weekly text summary printed to the terminal.

pub mod chart;
pub mod fonts;
pub mod summary;
pub mod themes;

pub use consumption_core as core;
