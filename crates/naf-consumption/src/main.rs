mod bootstrap;

use anyhow::{Context, Result};
use consumption_chart::chart::{render_cumulative_chart, ChartSpec};
use consumption_chart::fonts::ensure_chart_font;
use consumption_chart::summary::format_summary;
use consumption_chart::themes::ChartTheme;
use consumption_core::settings::Settings;
use consumption_data::analysis::{analyze_reports, write_report_json};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;
    settings.validate()?;

    tracing::info!("NAF consumption v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::debug!(
        "Input: {}, prefix: {:?}, output: {}",
        settings.input_dir.display(),
        settings.prefix,
        settings.output.display()
    );

    let report = analyze_reports(&settings.input_dir, &settings.prefix).with_context(|| {
        format!(
            "failed to read reports from {}",
            settings.input_dir.display()
        )
    })?;

    let png = settings.png_path();
    let svg = settings.svg_path();

    let theme = ChartTheme::default();
    let spec = ChartSpec {
        cumulative: &report.cumulative,
        weeks_missing: report.weeks_missing,
        display_name: report.display_name.as_deref(),
        size: (settings.width, settings.height),
        theme: &theme,
        labels: ensure_chart_font(settings.font.as_deref()),
    };
    render_cumulative_chart(&spec, &png, &svg).context("failed to render chart")?;

    if let Some(path) = &settings.export_json {
        write_report_json(path, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if !settings.quiet {
        print!(
            "{}",
            format_summary(
                &report.records,
                &report.cumulative,
                report.weeks_missing,
                report.display_name.as_deref(),
            )
        );
    }

    Ok(())
}
