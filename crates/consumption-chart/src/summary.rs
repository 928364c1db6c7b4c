//! Plain-text weekly table printed after the chart is written.
//!
//! One row per week (padding weeks are marked), followed by a totals row.

use std::fmt::Write as _;

use consumption_core::formatting::{format_quantity, format_week};
use consumption_core::models::{CumulativeSeries, RecordField, WeeklyRecord};

use crate::chart::chart_title;

const HEADERS: [&str; 7] = ["Week", "CPU h", "kg CO2", "kWh", "km", "Σ kg CO2", ""];

/// Render the weekly table with a header, the rows and a totals row.
pub fn format_summary(
    records: &[WeeklyRecord],
    cumulative: &CumulativeSeries,
    weeks_missing: usize,
    display_name: Option<&str>,
) -> String {
    let rows: Vec<[String; 7]> = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            [
                format_week(r.week),
                format_quantity(r.hours, 1),
                format_quantity(r.co2, 2),
                format_quantity(r.kwh, 2),
                format_quantity(r.km, 1),
                format_quantity(cumulative.co2.get(i).copied().unwrap_or_default(), 2),
                if r.is_padding { "missing".into() } else { String::new() },
            ]
        })
        .collect();

    let reported = records.iter().filter(|r| !r.is_padding).count();
    let totals: [String; 7] = [
        "Total".into(),
        format_quantity(cumulative.total(RecordField::Hours), 1),
        format_quantity(cumulative.total(RecordField::Co2), 2),
        format_quantity(cumulative.total(RecordField::Kwh), 2),
        format_quantity(cumulative.total(RecordField::Km), 1),
        String::new(),
        format!("{reported} reported"),
    ];

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows.iter().chain(std::iter::once(&totals)) {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", chart_title(display_name));
    let _ = writeln!(out, "Weeks Missing: {weeks_missing}");
    let _ = writeln!(out);

    let header: Vec<String> = HEADERS.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);

    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    push_row(&mut out, &rule, &widths);
    push_row(&mut out, &totals, &widths);
    out
}

/// Week column left-aligned, numbers right-aligned, marker left-aligned.
fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let last = cells.len() - 1;
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = width.saturating_sub(cell.chars().count());
        if i > 0 {
            line.push_str("  ");
        }
        if i == 0 || i == last {
            line.push_str(cell);
            line.extend(std::iter::repeat(' ').take(pad));
        } else {
            line.extend(std::iter::repeat(' ').take(pad));
            line.push_str(cell);
        }
    }
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use consumption_core::calculations::{cumulative_sums, GapFiller};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_lists_every_week_and_totals() {
        let records = vec![
            WeeklyRecord::new(date(2023, 1, 1), 10.0, 2.0, 5.0, 12.0),
            WeeklyRecord::new(date(2023, 1, 15), 1200.0, 3.5, 8.0, 20.0),
        ];
        let padded = GapFiller::pad_missing_weeks(&records);
        let cumulative = cumulative_sums(&padded.records);

        let text = format_summary(&padded.records, &cumulative, padded.weeks_missing, Some("Ada"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Cumulative NAF Consumption Ada");
        assert_eq!(lines[1], "Weeks Missing: 1");
        assert!(lines[3].starts_with("Week"));
        assert!(lines[5].starts_with("2023-01-01"));
        assert!(lines[6].starts_with("2023-01-08"));
        assert!(lines[6].ends_with("missing"));
        assert!(lines[7].starts_with("2023-01-15"));
        assert!(lines[7].contains("1,200.0"));

        let totals = lines.last().unwrap();
        assert!(totals.starts_with("Total"));
        assert!(totals.contains("1,210.0"));
        assert!(totals.contains("5.50"));
        assert!(totals.ends_with("2 reported"));
    }

    #[test]
    fn test_summary_empty_series() {
        let text = format_summary(&[], &CumulativeSeries::default(), 0, None);
        assert!(text.starts_with("Cumulative NAF Consumption\n"));
        let totals = text.lines().last().unwrap();
        assert!(totals.starts_with("Total"));
        assert!(totals.ends_with("0 reported"));
    }

    #[test]
    fn test_columns_are_aligned() {
        let records = vec![
            WeeklyRecord::new(date(2023, 1, 1), 1.0, 0.5, 0.5, 1.0),
            WeeklyRecord::new(date(2023, 1, 8), 12_345.0, 0.5, 0.5, 1.0),
        ];
        let cumulative = cumulative_sums(&records);
        let text = format_summary(&records, &cumulative, 0, None);
        let data: Vec<&str> = text.lines().skip(5).take(2).collect();
        let col = |line: &str| line.find("0.50").unwrap();
        assert_eq!(col(data[0]), col(data[1]));
    }
}
