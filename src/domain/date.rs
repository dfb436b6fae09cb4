//! Calendar dates
//!
//! Civil dates built from day/month/year input strings. Component shape is
//! checked first, then the triple must name a real calendar date (leap years
//! included) before a value can exist.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur when building a calendar date
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("Date component {0} must contain only digits")]
    NotNumeric(&'static str),

    #[error("Date component {0} has an invalid length")]
    BadLength(&'static str),

    #[error("Month must be between 1 and 12 (got {0})")]
    MonthOutOfRange(u32),

    #[error("Day {day} does not exist in month {month} of year {year}")]
    NotACalendarDate { day: u32, month: u32, year: i32 },
}

/// A validated calendar date, displayed as `dd/mm/yyyy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from numeric components.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::MonthOutOfRange(month));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::NotACalendarDate { day, month, year })
    }

    /// Build a date from day/month/year input strings.
    ///
    /// Components are trimmed and must be digits only; day and month take one
    /// or two characters, the year exactly four.
    pub fn from_parts(day: &str, month: &str, year: &str) -> Result<Self, DateError> {
        let day = parse_component(day, "day", 1, 2)?;
        let month = parse_component(month, "month", 1, 2)?;
        let year = parse_component(year, "year", 4, 4)?;
        Self::new(year as i32, month, day)
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

fn parse_component(
    raw: &str,
    name: &'static str,
    min_len: usize,
    max_len: usize,
) -> Result<u32, DateError> {
    let raw = raw.trim();
    if raw.len() < min_len || raw.len() > max_len {
        return Err(DateError::BadLength(name));
    }
    if !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateError::NotNumeric(name));
    }
    raw.parse().map_err(|_| DateError::NotNumeric(name))
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}
