//! Font discovery for chart labels.
//!
//! Plotters rasterises text with `ab_glyph`, which needs the font bytes
//! registered up front. A TrueType font is taken from an explicit path or
//! searched for in the usual system font directories. DejaVu Sans is
//! compiled into the binary and used when neither yields a font.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};
use tracing::{debug, warn};

/// Family name every chart text style refers to.
pub const CHART_FONT_FAMILY: &str = "sans-serif";

/// Preferred fonts, best first. Any other `.ttf` is used as a last resort.
const PREFERRED_FONTS: &[&str] = &[
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
    "NotoSans-Regular.ttf",
    "FreeSans.ttf",
    "Arial.ttf",
    "arial.ttf",
    "Helvetica.ttf",
];

/// DejaVu Sans, see `assets/DejaVuSans.LICENSE`.
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Where the registered chart font came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartFont {
    File(PathBuf),
    Bundled,
}

static REGISTERED: OnceLock<Option<ChartFont>> = OnceLock::new();

/// Directories searched for fonts on this platform.
fn font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
        PathBuf::from("C:\\Windows\\Fonts"),
    ];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(Path::new(&home).join(".fonts"));
        dirs.push(Path::new(&home).join(".local/share/fonts"));
    }
    dirs
}

/// Pick the best TrueType font below `dirs`.
pub fn find_font_in(dirs: &[PathBuf]) -> Option<PathBuf> {
    let mut fallback: Option<PathBuf> = None;
    let mut best: Option<(usize, PathBuf)> = None;

    for dir in dirs.iter().filter(|d| d.is_dir()) {
        for entry in walkdir::WalkDir::new(dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if let Some(rank) = PREFERRED_FONTS.iter().position(|p| *p == name) {
                if best.as_ref().map_or(true, |(r, _)| rank < *r) {
                    best = Some((rank, entry.path().to_path_buf()));
                }
            } else if fallback.is_none() && name.to_ascii_lowercase().ends_with(".ttf") {
                fallback = Some(entry.path().to_path_buf());
            }
        }
    }

    best.map(|(_, path)| path).or(fallback)
}

/// Register the chart font once per process.
///
/// Uses `explicit` when given, otherwise the best system font, and falls
/// back to the bundled font when the chosen file cannot be loaded. Returns
/// `true` when text can be drawn.
pub fn ensure_chart_font(explicit: Option<&Path>) -> bool {
    registered_font(explicit).is_some()
}

/// The font registered by the first call, registering it if needed.
pub fn registered_font(explicit: Option<&Path>) -> Option<&'static ChartFont> {
    REGISTERED
        .get_or_init(|| {
            let candidate = match explicit {
                Some(path) => Some(path.to_path_buf()),
                None => find_font_in(&font_dirs()),
            };
            if let Some(path) = candidate {
                match load_font_file(&path) {
                    Ok(()) => {
                        debug!("Chart font: {}", path.display());
                        return Some(ChartFont::File(path));
                    }
                    Err(reason) => {
                        warn!("Cannot use font {}: {reason}", path.display());
                    }
                }
            }
            match register_font(CHART_FONT_FAMILY, FontStyle::Normal, BUNDLED_FONT) {
                Ok(()) => {
                    debug!("Chart font: bundled DejaVu Sans");
                    Some(ChartFont::Bundled)
                }
                Err(_) => {
                    warn!("Bundled font is invalid; charts will be drawn without labels");
                    None
                }
            }
        })
        .as_ref()
}

fn load_font_file(path: &Path) -> Result<(), String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    // Registered fonts must live for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(CHART_FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| "not a valid TrueType font".to_string())
}
