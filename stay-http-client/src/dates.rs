//! Normalization of the server's array-shaped dates
//!
//! The API serializes `LocalDate` values as `[YYYY, MM, DD]` and timestamps as
//! `[YYYY, MM, DD, hh, mm, ss, nanos]` with trailing zero fields omitted.
//! [`DateParts`] is the only type that holds that shape; everything past this
//! module works with `NaiveDate` or `YYYY-MM-DD` strings.

use crate::error::DateError;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Canonical request date format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date or timestamp as the server encodes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateParts(pub Vec<i64>);

impl DateParts {
    /// Interpret as a calendar date; exactly three components are required
    pub fn to_naive_date(&self) -> Result<NaiveDate, DateError> {
        match self.0.as_slice() {
            [year, month, day] => ymd(*year, *month, *day).ok_or_else(|| self.out_of_range()),
            _ => Err(self.length_error("3")),
        }
    }

    /// Convert `[YYYY, MM, DD]` to `YYYY-MM-DD`
    pub fn normalize(&self) -> Result<String, DateError> {
        self.to_naive_date().map(format_date)
    }

    /// Interpret as a timestamp with 3 to 7 components
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime, DateError> {
        let parts = self.0.as_slice();
        if !(3..=7).contains(&parts.len()) {
            return Err(self.length_error("3..=7"));
        }

        let date = ymd(parts[0], parts[1], parts[2]).ok_or_else(|| self.out_of_range())?;
        let field = |index: usize| parts.get(index).copied().unwrap_or(0);
        let time = hms_nano(field(3), field(4), field(5), field(6))
            .ok_or_else(|| self.out_of_range())?;

        Ok(date.and_time(time))
    }

    fn length_error(&self, expected: &'static str) -> DateError {
        DateError::Length {
            expected,
            actual: self.0.len(),
            parts: self.0.clone(),
        }
    }

    fn out_of_range(&self) -> DateError {
        DateError::OutOfRange(self.0.clone())
    }
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        DateParts(vec![
            i64::from(date.year()),
            i64::from(date.month()),
            i64::from(date.day()),
        ])
    }
}

fn ymd(year: i64, month: i64, day: i64) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

fn hms_nano(hour: i64, minute: i64, second: i64, nano: i64) -> Option<NaiveTime> {
    NaiveTime::from_hms_nano_opt(
        u32::try_from(hour).ok()?,
        u32::try_from(minute).ok()?,
        u32::try_from(second).ok()?,
        u32::try_from(nano).ok()?,
    )
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD` string
pub fn parse_date(value: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DateError::Format(value.to_string()))
}

/// Shift a `YYYY-MM-DD` string by a signed number of days
pub fn add_days(value: &str, days: i64) -> Result<String, DateError> {
    let date = parse_date(value)?;
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted
        .map(format_date)
        .ok_or_else(|| DateError::Format(value.to_string()))
}

/// Shift both ends of an interval by the same number of days
pub fn shift_interval(start: &str, end: &str, days: i64) -> Result<(String, String), DateError> {
    Ok((add_days(start, days)?, add_days(end, days)?))
}

/// Today's date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current UTC instant as `YYYY-MM-DDThh:mm:ss.sssZ`
pub fn current_utc_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
