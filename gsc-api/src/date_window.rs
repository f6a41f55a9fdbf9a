use chrono::{NaiveDate, TimeDelta};

/// Nominal chunk size for window planning, in months.
pub const CHUNK_MONTHS: u32 = 3;

/// Default lookback horizon, in months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 16;

/// A contiguous date range over which one query is issued.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    /// Window length in days.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Plan query windows covering the past `months` months from `today`,
/// most recent first.
///
/// The horizon is split into chunks of [`CHUNK_MONTHS`] months, the final
/// chunk covering the remainder when `months` is not an exact multiple.
/// Consecutive windows are contiguous: each window's start date is the
/// next (older) window's end date.
///
/// Months are approximated as 30 days. The windows stay contiguous under
/// that arithmetic but drift from true calendar months over long
/// horizons; kept as-is so exports line up with earlier runs.
pub fn plan_windows(today: NaiveDate, months: u32) -> Vec<DateWindow> {
    let mut windows = Vec::new();
    let mut i = 0;
    while i < months {
        let end_date = today - TimeDelta::days(i as i64 * 30);
        let chunk_months = CHUNK_MONTHS.min(months - i);
        let start_date = end_date - TimeDelta::days(chunk_months as i64 * 30);
        windows.push(DateWindow {
            start_date,
            end_date,
        });
        i += CHUNK_MONTHS;
    }
    windows
}
