use chrono::NaiveDate;

/// Format a quantity with a fixed number of decimals and `,` thousands
/// separators.
///
/// # Examples
///
/// ```
/// use consumption_core::formatting::format_quantity;
///
/// assert_eq!(format_quantity(1234.5, 1), "1,234.5");
/// assert_eq!(format_quantity(1234567.0, 0), "1,234,567");
/// assert_eq!(format_quantity(0.0, 2), "0.00");
/// assert_eq!(format_quantity(-9876.54, 1), "-9,876.5");
/// ```
pub fn format_quantity(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Compact axis label: `950`, `1.2k`, `3.4M`.
///
/// # Examples
///
/// ```
/// use consumption_core::formatting::format_axis_value;
///
/// assert_eq!(format_axis_value(950.0), "950");
/// assert_eq!(format_axis_value(1240.0), "1.2k");
/// assert_eq!(format_axis_value(3_400_000.0), "3.4M");
/// assert_eq!(format_axis_value(0.25), "0.25");
/// ```
pub fn format_axis_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if abs >= 10.0 || value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

/// ISO label for a reporting week.
pub fn format_week(week: NaiveDate) -> String {
    week.format("%Y-%m-%d").to_string()
}
