//! Field extraction from the text layer of a weekly consumption report.
//!
//! Every field is located with its own pattern and only the first match in
//! the text is used; later occurrences are ignored.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::{ConsumptionError, Result};
use crate::models::{RecordField, WeeklyRecord};
use crate::time_utils::parse_report_date;

static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\s+[A-Z][a-z]+\s+\d+").expect("valid date regex"));

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| metric_regex(r"\s+hours\b"));
static CO2_RE: LazyLock<Regex> = LazyLock::new(|| metric_regex(r"\s*kg\s+CO2"));
static KM_RE: LazyLock<Regex> = LazyLock::new(|| metric_regex(r"\s+km\b"));
static KWH_RE: LazyLock<Regex> = LazyLock::new(|| metric_regex(r"\s*kWh\b"));

static SALUTATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Dear (.*)For").expect("valid salutation regex"));

/// Number (optionally signed, dot as decimal separator) followed by `unit`.
fn metric_regex(unit: &str) -> Regex {
    Regex::new(&format!(r"(-?\d+(?:\.\d+)?){unit}")).expect("valid metric regex")
}

/// Build a [`WeeklyRecord`] from the text of one report.
pub fn extract_record(text: &str) -> Result<WeeklyRecord> {
    let fragment = DATE_RE
        .find(text)
        .ok_or(ConsumptionError::MissingField {
            field: RecordField::Week,
        })?
        .as_str();
    let week = parse_report_date(fragment)?;

    let record = WeeklyRecord::new(
        week,
        extract_metric(text, &HOURS_RE, RecordField::Hours)?,
        extract_metric(text, &CO2_RE, RecordField::Co2)?,
        extract_metric(text, &KWH_RE, RecordField::Kwh)?,
        extract_metric(text, &KM_RE, RecordField::Km)?,
    );

    debug!(
        "Extracted week {}: {} hours, {} kg CO2, {} kWh, {} km",
        record.week, record.hours, record.co2, record.kwh, record.km
    );

    Ok(record)
}

/// Recover the recipient name from the `"Dear <name>For ..."` salutation.
///
/// The match does not cross line breaks. Returns `None` when the
/// salutation is absent or the name is blank.
pub fn extract_display_name(text: &str) -> Option<String> {
    let name = SALUTATION_RE.captures(text)?.get(1)?.as_str().trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn extract_metric(text: &str, re: &Regex, field: RecordField) -> Result<f64> {
    let raw = re
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or(ConsumptionError::MissingField { field })?
        .as_str();

    let value: f64 = raw.parse().map_err(|_| ConsumptionError::InvalidNumber {
        field,
        raw: raw.to_string(),
    })?;

    if value.is_sign_negative() && value != 0.0 {
        return Err(ConsumptionError::NegativeValue { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const REPORT: &str = "\
NAF consumption summary
Dear Ada LovelaceFor the week starting 3. March 2023 you used
12.5 hours of CPU time, which corresponds to 3.2 kg CO2.
That is the same as driving 10.0 km in a VW Golf.
The energy used was 7.1 kWh.
";

    #[test]
    fn test_extract_record_full_report() {
        let record = extract_record(REPORT).unwrap();
        assert_eq!(record.week, NaiveDate::from_ymd_opt(2023, 3, 3).unwrap());
        assert_eq!(record.hours, 12.5);
        assert_eq!(record.co2, 3.2);
        assert_eq!(record.km, 10.0);
        assert_eq!(record.kwh, 7.1);
        assert!(!record.is_padding);
    }

    #[test]
    fn test_extract_record_first_match_wins() {
        let text = format!("{REPORT}\nLast week: 2. January 2022, 99.0 hours, 9.9 kg CO2");
        let record = extract_record(&text).unwrap();
        assert_eq!(record.week, NaiveDate::from_ymd_opt(2023, 3, 3).unwrap());
        assert_eq!(record.hours, 12.5);
        assert_eq!(record.co2, 3.2);
    }

    #[test]
    fn test_extract_record_whitespace_tolerant_co2() {
        let text = REPORT.replace("3.2 kg CO2", "3.2kg\nCO2");
        assert_eq!(extract_record(&text).unwrap().co2, 3.2);
    }

    #[test]
    fn test_extract_record_integer_values() {
        let text = REPORT.replace("10.0 km", "10 km");
        assert_eq!(extract_record(&text).unwrap().km, 10.0);
    }

    #[test]
    fn test_extract_record_missing_each_field() {
        let cases = [
            ("3. March 2023", RecordField::Week),
            ("12.5 hours", RecordField::Hours),
            ("3.2 kg CO2", RecordField::Co2),
            ("7.1 kWh", RecordField::Kwh),
            ("10.0 km", RecordField::Km),
        ];
        for (needle, expected) in cases {
            let text = REPORT.replace(needle, "n/a");
            match extract_record(&text) {
                Err(ConsumptionError::MissingField { field }) => assert_eq!(field, expected),
                other => panic!("expected missing {expected}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_extract_record_rejects_negative_metric() {
        let text = REPORT.replace("7.1 kWh", "-7.1 kWh");
        match extract_record(&text) {
            Err(ConsumptionError::NegativeValue { field, value }) => {
                assert_eq!(field, RecordField::Kwh);
                assert_eq!(value, -7.1);
            }
            other => panic!("expected negative kwh, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_record_bad_date_is_date_error() {
        let text = REPORT.replace("3. March 2023", "31. April 2023");
        assert!(matches!(
            extract_record(&text),
            Err(ConsumptionError::DateParse { .. })
        ));
    }

    #[test]
    fn test_extract_display_name() {
        assert_eq!(extract_display_name(REPORT).as_deref(), Some("Ada Lovelace"));
        assert_eq!(extract_display_name("no salutation here"), None);
        assert_eq!(extract_display_name("Dear  For you"), None);
    }

    #[test]
    fn test_extract_display_name_single_line() {
        let text = "Dear Ada\nLovelace For the week";
        assert_eq!(extract_display_name(text), None);
    }
}
