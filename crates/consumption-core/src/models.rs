use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names the fields of a [`WeeklyRecord`] in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Week,
    Hours,
    Co2,
    Kwh,
    Km,
}

impl RecordField {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordField::Week => "week",
            RecordField::Hours => "hours",
            RecordField::Co2 => "co2",
            RecordField::Kwh => "kwh",
            RecordField::Km => "km",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Consumption reported for one 7-day reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    /// Label date of the reporting period; the sort key of a series.
    pub week: NaiveDate,
    /// CPU hours consumed.
    pub hours: f64,
    /// Kilograms of CO2 attributed to the CPU hours.
    pub co2: f64,
    /// Kilowatt hours consumed.
    pub kwh: f64,
    /// Equivalent driving distance in kilometres.
    pub km: f64,
    /// `true` for zero-valued records inserted for a missing report.
    #[serde(default)]
    pub is_padding: bool,
}

impl WeeklyRecord {
    pub fn new(week: NaiveDate, hours: f64, co2: f64, kwh: f64, km: f64) -> Self {
        Self {
            week,
            hours,
            co2,
            kwh,
            km,
            is_padding: false,
        }
    }

    /// A zero-valued stand-in for a week without a report.
    pub fn padding(week: NaiveDate) -> Self {
        Self {
            week,
            hours: 0.0,
            co2: 0.0,
            kwh: 0.0,
            km: 0.0,
            is_padding: true,
        }
    }
}

/// Weekly records in ascending `week` order.
pub type TimeSeries = Vec<WeeklyRecord>;

/// Running totals of every metric, one entry per record of a series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CumulativeSeries {
    pub weeks: Vec<NaiveDate>,
    pub hours: Vec<f64>,
    pub co2: Vec<f64>,
    pub kwh: Vec<f64>,
    pub km: Vec<f64>,
}

impl CumulativeSeries {
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Final running total of `field`, or 0.0 for an empty series.
    pub fn total(&self, field: RecordField) -> f64 {
        let column = match field {
            RecordField::Week => return 0.0,
            RecordField::Hours => &self.hours,
            RecordField::Co2 => &self.co2,
            RecordField::Kwh => &self.kwh,
            RecordField::Km => &self.km,
        };
        column.last().copied().unwrap_or(0.0)
    }
}
