//! Assembly of weekly records from a batch of report documents.

use std::path::PathBuf;

use consumption_core::calculations::{duplicate_weeks, sort_by_week};
use consumption_core::error::Result;
use consumption_core::extractor::{extract_display_name, extract_record};
use consumption_core::models::TimeSeries;
use tracing::{debug, warn};

use crate::reader::PageTextSource;

// ── LoadedReports ─────────────────────────────────────────────────────────────

/// Records extracted from every report of a batch, before gap filling.
#[derive(Debug, Clone, Default)]
pub struct LoadedReports {
    /// One record per report, sorted ascending by week.
    pub records: TimeSeries,
    /// Recipient name from the salutation of the last report read.
    pub display_name: Option<String>,
    /// Report paths in the order they were read.
    pub sources: Vec<PathBuf>,
}

// ── ReportAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that turns report documents into a sorted series.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Extract one record per file and sort the result by week.
    ///
    /// The first file that cannot be read or parsed aborts the whole batch;
    /// the error names that file. The display name comes from the last file.
    pub fn load<S>(files: &[PathBuf], source: &S) -> Result<LoadedReports>
    where
        S: PageTextSource + ?Sized,
    {
        let mut records: TimeSeries = Vec::with_capacity(files.len());
        let mut last_text: Option<String> = None;

        for path in files {
            let text = source.first_page_text(path)?;
            let record = extract_record(&text).map_err(|e| e.in_document(path))?;
            debug!("{}: week {}", path.display(), record.week);
            records.push(record);
            last_text = Some(text);
        }

        sort_by_week(&mut records);

        for week in duplicate_weeks(&records) {
            warn!("More than one report for week {week}; keeping all of them");
        }

        let display_name = last_text.as_deref().and_then(extract_display_name);
        if display_name.is_none() && !files.is_empty() {
            warn!("No salutation found in the last report; chart title will omit the name");
        }

        Ok(LoadedReports {
            records,
            display_name,
            sources: files.to_vec(),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
