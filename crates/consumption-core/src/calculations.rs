use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::models::{CumulativeSeries, TimeSeries, WeeklyRecord};

/// Length of one reporting period in days.
pub const REPORT_PERIOD_DAYS: i64 = 7;

// ── GapFiller ─────────────────────────────────────────────────────────────────

/// Result of padding a series: the evenly spaced records plus how many
/// zero-valued records were inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedSeries {
    pub records: TimeSeries,
    pub weeks_missing: usize,
}

/// Stateless helper that fills missing reporting weeks with zero records.
pub struct GapFiller;

impl GapFiller {
    /// Insert zero-valued records for reporting weeks without a report.
    ///
    /// `records` must be sorted ascending by `week`. For every consecutive
    /// pair, records are synthesised every 7 days after the earlier week
    /// while the step stays strictly before the later week. Nothing is
    /// added after the last record, and a series of fewer than two records
    /// is returned unchanged.
    pub fn pad_missing_weeks(records: &[WeeklyRecord]) -> PaddedSeries {
        let step = Duration::days(REPORT_PERIOD_DAYS);
        let mut padded: TimeSeries = Vec::with_capacity(records.len());
        let mut weeks_missing = 0usize;

        for pair in records.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            padded.push(current.clone());

            let mut cursor = current.week;
            while cursor + step < next.week {
                cursor += step;
                debug!("No report for week {cursor}; inserting zero record");
                padded.push(WeeklyRecord::padding(cursor));
                weeks_missing += 1;
            }
        }
        if let Some(last) = records.last() {
            padded.push(last.clone());
        }

        PaddedSeries {
            records: padded,
            weeks_missing,
        }
    }
}

// ── Series helpers ────────────────────────────────────────────────────────────

/// Sort records ascending by `week`, keeping input order for equal weeks.
pub fn sort_by_week(records: &mut [WeeklyRecord]) {
    records.sort_by_key(|r| r.week);
}

/// Weeks that occur more than once in a sorted series.
pub fn duplicate_weeks(records: &[WeeklyRecord]) -> Vec<NaiveDate> {
    let mut duplicates: Vec<NaiveDate> = records
        .windows(2)
        .filter(|pair| pair[0].week == pair[1].week)
        .map(|pair| pair[0].week)
        .collect();
    duplicates.dedup();
    duplicates
}

/// Running totals of every metric over a chronologically ordered series.
pub fn cumulative_sums(records: &[WeeklyRecord]) -> CumulativeSeries {
    let mut out = CumulativeSeries {
        weeks: Vec::with_capacity(records.len()),
        hours: Vec::with_capacity(records.len()),
        co2: Vec::with_capacity(records.len()),
        kwh: Vec::with_capacity(records.len()),
        km: Vec::with_capacity(records.len()),
    };

    let (mut hours, mut co2, mut kwh, mut km) = (0.0, 0.0, 0.0, 0.0);
    for record in records {
        hours += record.hours;
        co2 += record.co2;
        kwh += record.kwh;
        km += record.km;

        out.weeks.push(record.week);
        out.hours.push(hours);
        out.co2.push(co2);
        out.kwh.push(kwh);
        out.km.push(km);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
