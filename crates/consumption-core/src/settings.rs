use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::{ConsumptionError, Result};

/// Filename prefix of the weekly consumption reports.
pub const DEFAULT_REPORT_PREFIX: &str = "NAF consumption summary";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Cumulative NAF consumption charts from weekly summary reports
///
/// Every flag has a default, so running without arguments reads the reports
/// in the current directory and writes `plot.png` and `plot.svg` next to them.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "naf-consumption",
    about = "Cumulative NAF consumption charts from weekly summary reports",
    version
)]
pub struct Settings {
    /// Directory searched (non-recursively) for report PDFs
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Filename prefix of the report PDFs
    #[arg(long, default_value = DEFAULT_REPORT_PREFIX)]
    pub prefix: String,

    /// Output path without extension; `.png` and `.svg` are appended
    #[arg(long, default_value = "plot")]
    pub output: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u32).range(200..=10000))]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u32).range(200..=10000))]
    pub height: u32,

    /// Also write the padded series and running totals as JSON
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// TrueType font for chart text (default: first system font found)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Do not print the weekly summary table
    #[arg(long)]
    pub quiet: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::parse().resolve()
    }

    /// Apply the `--debug` override.
    pub fn resolve(mut self) -> Self {
        if self.debug {
            self.log_level = "DEBUG".to_string();
        }
        self
    }

    /// Reject values that parse but cannot produce a run.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.trim().is_empty() {
            return Err(ConsumptionError::Config(
                "--prefix must not be empty".to_string(),
            ));
        }
        if self.output.file_name().is_none() {
            return Err(ConsumptionError::Config(
                "--output must name a file".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the raster chart.
    pub fn png_path(&self) -> PathBuf {
        with_suffix(&self.output, "png")
    }

    /// Path of the vector chart.
    pub fn svg_path(&self) -> PathBuf {
        with_suffix(&self.output, "svg")
    }
}

/// Append `.ext` to `stem` without replacing an existing dot in the name.
fn with_suffix(stem: &Path, ext: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
