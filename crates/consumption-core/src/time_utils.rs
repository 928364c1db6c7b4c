//! Conversion of report date fragments such as `"3. March 2023"` into
//! calendar dates.

use chrono::NaiveDate;

use crate::error::{ConsumptionError, Result};

/// English month names, indexed from January.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 1-based month number for a full, capitalised English month name.
pub fn month_index(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

/// Parse a date fragment made of a day, a month name and a year.
///
/// The fragment is split into tokens on whitespace, `.` and `,`. The year is
/// the first all-digit token of three or more digits, the day the first
/// all-digit token of one or two digits and the month the first alphabetic
/// token. Token order does not matter, so `"3. March 2023"` and
/// `"March 3, 2023"` give the same date.
pub fn parse_report_date(fragment: &str) -> Result<NaiveDate> {
    let fail = |reason: &str| ConsumptionError::DateParse {
        fragment: fragment.to_string(),
        reason: reason.to_string(),
    };

    let tokens: Vec<&str> = fragment
        .split(|c: char| c.is_whitespace() || c == '.' || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    let is_digits = |t: &&str| t.chars().all(|c| c.is_ascii_digit());

    let year_token = tokens
        .iter()
        .find(|t| is_digits(t) && t.len() >= 3)
        .ok_or_else(|| fail("no year"))?;
    let day_token = tokens
        .iter()
        .find(|t| is_digits(t) && t.len() <= 2)
        .ok_or_else(|| fail("no day"))?;
    let month_token = tokens
        .iter()
        .find(|t| t.chars().all(char::is_alphabetic))
        .ok_or_else(|| fail("no month name"))?;

    let year: i32 = year_token
        .parse()
        .map_err(|_| fail("year out of range"))?;
    let day: u32 = day_token.parse().map_err(|_| fail("day out of range"))?;
    let month =
        month_index(month_token).ok_or_else(|| fail(&format!("unknown month {month_token:?}")))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| fail("not a calendar date"))
}
