//! Report ingestion layer for the NAF consumption charting tool.
//!
//! Responsible for discovering weekly summary PDFs, extracting their first
//! page text, turning each into a weekly record and assembling the padded
//! time series handed to the chart renderer.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use consumption_core as core;
