//! Two-panel cumulative consumption chart.
//!
//! The upper panel plots cumulative CO2 (left axis) and energy (right
//! axis); the lower panel plots cumulative CPU hours (left axis) and the
//! equivalent driving distance (right axis). The same drawing code runs on
//! a bitmap backend for the PNG and on the SVG backend for the vector file.

use std::path::Path;

use chrono::{Duration, Local, NaiveDate};
use consumption_core::error::{ConsumptionError, Result};
use consumption_core::formatting::{format_axis_value, format_week};
use consumption_core::models::CumulativeSeries;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::fonts::CHART_FONT_FAMILY;
use crate::themes::ChartTheme;

/// Headroom above the largest value on every y axis.
const Y_HEADROOM: f64 = 1.05;

const PANEL_MARGIN: u32 = 12;
const Y_LABEL_AREA: u32 = 70;

/// Everything needed to draw one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec<'a> {
    pub cumulative: &'a CumulativeSeries,
    pub weeks_missing: usize,
    pub display_name: Option<&'a str>,
    /// Pixel size of the raster output; the SVG uses the same user units.
    pub size: (u32, u32),
    pub theme: &'a ChartTheme,
    /// Draw titles, axes and tick labels. Requires a registered font, see
    /// [`crate::fonts::ensure_chart_font`].
    pub labels: bool,
}

/// One panel: a primary series on the left axis, a secondary on the right.
struct Panel<'a> {
    primary: &'a [f64],
    primary_desc: &'a str,
    secondary: &'a [f64],
    secondary_desc: &'a str,
    color: RGBColor,
    /// Only the bottom panel carries date labels.
    date_axis: bool,
}

/// Main chart title.
pub fn chart_title(display_name: Option<&str>) -> String {
    match display_name {
        Some(name) if !name.is_empty() => format!("Cumulative NAF Consumption {name}"),
        _ => "Cumulative NAF Consumption".to_string(),
    }
}

/// Upper bound for a y axis: the largest value plus headroom, never zero.
pub fn axis_upper(values: &[f64]) -> f64 {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * Y_HEADROOM
    } else {
        1.0
    }
}

/// Date span of the x axis. Empty or single-week series widen to one week.
pub fn week_range(weeks: &[NaiveDate]) -> (NaiveDate, NaiveDate) {
    let week = Duration::days(7);
    match (weeks.first(), weeks.last()) {
        (Some(&first), Some(&last)) if last > first => (first, last),
        (Some(&first), _) => (first, first + week),
        _ => {
            let today = Local::now().date_naive();
            (today, today + week)
        }
    }
}

/// Render the chart to `png` and `svg`, creating parent directories.
pub fn render_cumulative_chart(spec: &ChartSpec<'_>, png: &Path, svg: &Path) -> Result<()> {
    for path in [png, svg] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    {
        let root = BitMapBackend::new(png, spec.size).into_drawing_area();
        draw_chart(&root, spec).map_err(chart_error)?;
        root.present().map_err(chart_error)?;
    }
    info!("Wrote {}", png.display());

    {
        let root = SVGBackend::new(svg, spec.size).into_drawing_area();
        draw_chart(&root, spec).map_err(chart_error)?;
        root.present().map_err(chart_error)?;
    }
    info!("Wrote {}", svg.display());

    Ok(())
}

fn chart_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> ConsumptionError {
    ConsumptionError::Chart(err.to_string())
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec<'_>,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let theme = spec.theme;
    root.fill(&theme.canvas)?;

    let body = if spec.labels {
        root.titled(
            &chart_title(spec.display_name),
            (CHART_FONT_FAMILY, 26).into_font().color(&theme.text),
        )?
    } else {
        root.clone()
    };

    let panels = body.split_evenly((2, 1));
    let series = spec.cumulative;

    let upper = Panel {
        primary: &series.co2,
        primary_desc: "kg CO2",
        secondary: &series.kwh,
        secondary_desc: "kWh",
        color: theme.upper,
        date_axis: false,
    };
    let lower = Panel {
        primary: &series.hours,
        primary_desc: "CPU hours",
        secondary: &series.km,
        secondary_desc: "VW Golf km",
        color: theme.lower,
        date_axis: true,
    };

    let caption = format!("Weeks Missing: {}", spec.weeks_missing);
    draw_panel(&panels[0], spec, &upper, Some(&caption))?;
    draw_panel(&panels[1], spec, &lower, None)?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    spec: &ChartSpec<'_>,
    panel: &Panel<'_>,
    caption: Option<&str>,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let theme = spec.theme;
    let weeks = &spec.cumulative.weeks;
    let (start, end) = week_range(weeks);
    let x_max = (end - start).num_days() as f64;
    let xs: Vec<f64> = weeks
        .iter()
        .map(|w| (*w - start).num_days() as f64)
        .collect();

    let mut builder = ChartBuilder::on(area);
    builder.margin(PANEL_MARGIN);
    if spec.labels {
        builder
            .x_label_area_size(if panel.date_axis { 50 } else { 10 })
            .y_label_area_size(Y_LABEL_AREA)
            .right_y_label_area_size(Y_LABEL_AREA);
        if let Some(text) = caption {
            builder.margin_top(PANEL_MARGIN + 20);
            area.draw(&Text::new(
                text.to_string(),
                ((PANEL_MARGIN + Y_LABEL_AREA) as i32 + 4, PANEL_MARGIN as i32 / 2),
                (CHART_FONT_FAMILY, 16).into_font().color(&theme.text),
            ))?;
        }
    }

    let mut chart = builder
        .build_cartesian_2d(0f64..x_max, 0f64..axis_upper(panel.primary))?
        .set_secondary_coord(0f64..x_max, 0f64..axis_upper(panel.secondary));

    chart.plotting_area().fill(&theme.background)?;

    if spec.labels {
        let date_label = |v: &f64| format_week(start + Duration::days(v.round() as i64));
        let no_label = |_: &f64| String::new();
        let value_label = |v: &f64| format_axis_value(*v);

        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(&theme.grid)
            .light_line_style(&TRANSPARENT)
            .axis_style(&theme.tick)
            .label_style((CHART_FONT_FAMILY, 13).into_font().color(&theme.tick))
            .axis_desc_style((CHART_FONT_FAMILY, 15).into_font().color(&panel.color))
            .x_labels(8)
            .y_labels(6)
            .y_desc(panel.primary_desc)
            .y_label_formatter(&value_label);
        if panel.date_axis {
            mesh.x_desc("Date").x_label_formatter(&date_label);
        } else {
            mesh.x_label_formatter(&no_label);
        }
        mesh.draw()?;

        chart
            .configure_secondary_axes()
            .axis_style(&theme.tick)
            .label_style((CHART_FONT_FAMILY, 13).into_font().color(&theme.tick))
            .axis_desc_style((CHART_FONT_FAMILY, 15).into_font().color(&panel.color))
            .y_labels(6)
            .y_desc(panel.secondary_desc)
            .y_label_formatter(&value_label)
            .draw()?;
    }

    chart.draw_series(LineSeries::new(
        xs.iter().copied().zip(panel.primary.iter().copied()),
        panel.color.stroke_width(2),
    ))?;
    chart.draw_secondary_series(LineSeries::new(
        xs.iter().copied().zip(panel.secondary.iter().copied()),
        panel.color.mix(theme.secondary_alpha).stroke_width(2),
    ))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use consumption_core::calculations::{cumulative_sums, GapFiller};
    use consumption_core::models::WeeklyRecord;
    use tempfile::TempDir;

    use crate::fonts::ensure_chart_font;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_series() -> (CumulativeSeries, usize) {
        let records = vec![
            WeeklyRecord::new(date(2023, 1, 1), 10.0, 2.0, 5.0, 12.0),
            WeeklyRecord::new(date(2023, 1, 22), 20.0, 3.5, 8.0, 20.0),
            WeeklyRecord::new(date(2023, 1, 29), 5.0, 1.0, 2.5, 6.0),
        ];
        let padded = GapFiller::pad_missing_weeks(&records);
        (cumulative_sums(&padded.records), padded.weeks_missing)
    }

    fn spec<'a>(series: &'a CumulativeSeries, missing: usize, theme: &'a ChartTheme) -> ChartSpec<'a> {
        ChartSpec {
            cumulative: series,
            weeks_missing: missing,
            display_name: Some("Ada Lovelace"),
            size: (400, 300),
            theme,
            labels: false,
        }
    }

    #[test]
    fn test_chart_title() {
        assert_eq!(
            chart_title(Some("Ada Lovelace")),
            "Cumulative NAF Consumption Ada Lovelace"
        );
        assert_eq!(chart_title(None), "Cumulative NAF Consumption");
        assert_eq!(chart_title(Some("")), "Cumulative NAF Consumption");
    }

    #[test]
    fn test_axis_upper() {
        assert!((axis_upper(&[1.0, 10.0, 4.0]) - 10.5).abs() < 1e-9);
        assert_eq!(axis_upper(&[]), 1.0);
        assert_eq!(axis_upper(&[0.0, 0.0]), 1.0);
    }

    #[test]
    fn test_week_range() {
        let weeks = [date(2023, 1, 1), date(2023, 1, 8), date(2023, 1, 29)];
        assert_eq!(week_range(&weeks), (date(2023, 1, 1), date(2023, 1, 29)));
        assert_eq!(
            week_range(&[date(2023, 3, 5)]),
            (date(2023, 3, 5), date(2023, 3, 12))
        );
        let (start, end) = week_range(&[]);
        assert_eq!((end - start).num_days(), 7);
    }

    #[test]
    fn test_render_writes_png_and_svg() {
        let dir = TempDir::new().unwrap();
        let (series, missing) = sample_series();
        assert_eq!(missing, 2);
        let theme = ChartTheme::classic();
        let png = dir.path().join("out").join("plot.png");
        let svg = dir.path().join("out").join("plot.svg");

        render_cumulative_chart(&spec(&series, missing, &theme), &png, &svg).unwrap();

        let png_bytes = std::fs::read(&png).unwrap();
        assert_eq!(&png_bytes[1..4], b"PNG");
        let svg_text = std::fs::read_to_string(&svg).unwrap();
        assert!(svg_text.contains("<svg"));
    }

    #[test]
    fn test_render_empty_series() {
        let dir = TempDir::new().unwrap();
        let series = CumulativeSeries::default();
        let theme = ChartTheme::classic();
        let png = dir.path().join("empty.png");
        let svg = dir.path().join("empty.svg");

        render_cumulative_chart(&spec(&series, 0, &theme), &png, &svg).unwrap();

        assert!(png.exists());
        assert!(svg.exists());
    }

    #[test]
    fn test_render_labelled_chart_text() {
        assert!(ensure_chart_font(None));
        let dir = TempDir::new().unwrap();
        let records = vec![
            WeeklyRecord::new(date(2023, 1, 1), 10.0, 2.0, 5.0, 12.0),
            WeeklyRecord::new(date(2023, 1, 22), 20.0, 3.5, 8.0, 20.0),
        ];
        let padded = GapFiller::pad_missing_weeks(&records);
        let series = cumulative_sums(&padded.records);
        let theme = ChartTheme::classic();
        let chart = ChartSpec {
            size: (800, 600),
            labels: true,
            ..spec(&series, padded.weeks_missing, &theme)
        };
        let png = dir.path().join("labelled.png");
        let svg = dir.path().join("labelled.svg");

        render_cumulative_chart(&chart, &png, &svg).unwrap();

        let svg_text = std::fs::read_to_string(&svg).unwrap();
        assert!(svg_text.contains("Weeks Missing: 2"), "{svg_text}");
        assert!(svg_text.contains("Cumulative NAF Consumption Ada Lovelace"));
        assert!(svg_text.contains("kg CO2"));
        assert!(svg_text.contains("VW Golf km"));
        assert!(svg_text.contains("2023-01-01"));
        assert!(png.exists());
    }

    #[test]
    fn test_render_labelled_empty_series() {
        assert!(ensure_chart_font(None));
        let dir = TempDir::new().unwrap();
        let series = CumulativeSeries::default();
        let theme = ChartTheme::classic();
        let chart = ChartSpec {
            size: (800, 600),
            labels: true,
            display_name: None,
            ..spec(&series, 0, &theme)
        };
        let svg = dir.path().join("empty.svg");

        render_cumulative_chart(&chart, &dir.path().join("empty.png"), &svg).unwrap();

        let svg_text = std::fs::read_to_string(&svg).unwrap();
        assert!(svg_text.contains("Weeks Missing: 0"));
        assert!(svg_text.contains("Cumulative NAF Consumption"));
    }
}
