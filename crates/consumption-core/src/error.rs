use std::path::PathBuf;
use thiserror::Error;

use crate::models::RecordField;

/// All errors produced while building a consumption chart.
#[derive(Error, Debug)]
pub enum ConsumptionError {
    /// A required field pattern was not found in a report's text.
    #[error("Field '{field}' not found in report text")]
    MissingField { field: RecordField },

    /// The text matched for a field is not a valid number.
    #[error("Field '{field}' has an invalid number: {raw:?}")]
    InvalidNumber { field: RecordField, raw: String },

    /// A metric was reported with a negative sign.
    #[error("Field '{field}' is negative: {value}")]
    NegativeValue { field: RecordField, value: f64 },

    /// A date fragment was found but is not a valid calendar date.
    #[error("Invalid date {fragment:?}: {reason}")]
    DateParse { fragment: String, reason: String },

    /// A report document could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The text layer of a report document could not be extracted.
    #[error("Failed to extract text from {path}: {message}")]
    TextExtraction { path: PathBuf, message: String },

    /// Extraction failed for a specific report document.
    #[error("Failed to extract record from {path}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: Box<ConsumptionError>,
    },

    /// The chart backend failed to draw or save an artifact.
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// The JSON export could not be serialised.
    #[error("Failed to write JSON export: {0}")]
    JsonExport(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConsumptionError {
    /// Attach the report path to an extraction error.
    pub fn in_document(self, path: impl Into<PathBuf>) -> Self {
        ConsumptionError::Document {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

/// Convenience alias used throughout the consumption crates.
pub type Result<T> = std::result::Result<T, ConsumptionError>;
