//! Main analysis pipeline for the consumption charts.
//!
//! Discovers the report PDFs, extracts and sorts their records, fills
//! missing weeks and computes the running totals, returning a
//! [`ConsumptionReport`] ready for the chart layer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use consumption_core::calculations::{cumulative_sums, GapFiller};
use consumption_core::error::Result;
use consumption_core::models::{CumulativeSeries, TimeSeries};
use serde::Serialize;
use tracing::{info, warn};

use crate::aggregator::ReportAggregator;
use crate::reader::{find_report_files, PageTextSource, PdfTextSource};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the report.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when this report was generated.
    pub generated_at: String,
    /// Directory that was searched for reports.
    pub input_dir: PathBuf,
    /// Number of report documents read.
    pub reports_processed: usize,
    /// Wall-clock seconds spent extracting records.
    pub load_time_seconds: f64,
}

/// The complete output of [`analyze_reports`].
#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionReport {
    /// Recipient name shown in the chart title, if any.
    pub display_name: Option<String>,
    /// Number of zero-valued records inserted for missing reports.
    pub weeks_missing: usize,
    /// Evenly spaced weekly records, ascending by week.
    pub records: TimeSeries,
    /// Running totals of `records`.
    pub cumulative: CumulativeSeries,
    /// Report documents the records were extracted from.
    pub sources: Vec<PathBuf>,
    pub metadata: AnalysisMetadata,
}

impl ConsumptionReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline on the PDFs named `<prefix>*.pdf` in `input_dir`.
pub fn analyze_reports(input_dir: &Path, prefix: &str) -> Result<ConsumptionReport> {
    analyze_reports_with(input_dir, prefix, &PdfTextSource)
}

/// Same as [`analyze_reports`] with an explicit text source.
///
/// 1. Discover report files.
/// 2. Extract one record per file (any failure aborts the run).
/// 3. Sort by week and fill missing weeks with zero records.
/// 4. Compute running totals.
pub fn analyze_reports_with<S>(
    input_dir: &Path,
    prefix: &str,
    source: &S,
) -> Result<ConsumptionReport>
where
    S: PageTextSource + ?Sized,
{
    // ── Step 1: Discover ──────────────────────────────────────────────────────
    let files = find_report_files(input_dir, prefix);
    if files.is_empty() {
        warn!(
            "No '{prefix}*.pdf' reports found in {}; the chart will be empty",
            input_dir.display()
        );
    }

    // ── Step 2: Extract ───────────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let loaded = ReportAggregator::load(&files, source)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 3: Pad ───────────────────────────────────────────────────────────
    let padded = GapFiller::pad_missing_weeks(&loaded.records);
    if let (Some(first), Some(last)) = (padded.records.first(), padded.records.last()) {
        info!(
            "{} report(s) from {} to {}, {} week(s) missing",
            loaded.records.len(),
            first.week,
            last.week,
            padded.weeks_missing
        );
    }

    // ── Step 4: Running totals ────────────────────────────────────────────────
    let cumulative = cumulative_sums(&padded.records);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        input_dir: input_dir.to_path_buf(),
        reports_processed: files.len(),
        load_time_seconds: load_time,
    };

    Ok(ConsumptionReport {
        display_name: loaded.display_name,
        weeks_missing: padded.weeks_missing,
        records: padded.records,
        cumulative,
        sources: loaded.sources,
        metadata,
    })
}

/// Write `report` to `path` as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &ConsumptionReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;
    info!("Wrote {}", path.display());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
