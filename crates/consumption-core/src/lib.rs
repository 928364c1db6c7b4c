//! Core types and pure logic for the NAF consumption charting tool.
//!
//! Holds the weekly record model, the error type, the report field
//! extractor, date normalisation, gap filling and cumulative sums, plus the
//! command-line settings shared by the binary.

pub mod calculations;
pub mod error;
pub mod extractor;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{ConsumptionError, Result};
pub use models::{RecordField, WeeklyRecord};
