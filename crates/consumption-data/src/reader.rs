//! Report discovery and text extraction.
//!
//! Finds the weekly summary PDFs in a directory and reads the text of their
//! first page for the field extractor.

use std::path::{Path, PathBuf};

use consumption_core::error::{ConsumptionError, Result};
use tracing::{debug, warn};

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Find all `<prefix>*.pdf` files directly inside `dir`, sorted by path.
///
/// Subdirectories are not searched. A missing directory yields no files.
pub fn find_report_files(dir: &Path, prefix: &str) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Report directory does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .map(|name| name.starts_with(prefix))
                    .unwrap_or(false)
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "pdf")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!("Found {} report(s) in {}", files.len(), dir.display());
    files
}

// ── Text extraction ───────────────────────────────────────────────────────────

/// Source of the first-page text of a report document.
pub trait PageTextSource {
    fn first_page_text(&self, path: &Path) -> Result<String>;
}

impl<F> PageTextSource for F
where
    F: Fn(&Path) -> Result<String>,
{
    fn first_page_text(&self, path: &Path) -> Result<String> {
        self(path)
    }
}

/// Reads the text layer of PDF reports with `pdf-extract`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PageTextSource for PdfTextSource {
    fn first_page_text(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path).map_err(|source| ConsumptionError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let pages = pdf_extract::extract_text_from_mem_by_pages(&bytes).map_err(|e| {
            ConsumptionError::TextExtraction {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;
        debug!("{}: {} page(s) of text", path.display(), pages.len());

        pages
            .into_iter()
            .next()
            .ok_or_else(|| ConsumptionError::TextExtraction {
                path: path.to_path_buf(),
                message: "document has no pages".to_string(),
            })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
