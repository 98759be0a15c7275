//! Common type definitions for the extension helpers
//!
//! [`Instant`] is the date/time value every helper in
//! [`utils::dates`](crate::utils::dates) consumes and produces. It pairs a
//! wall-clock reading with the [`DateKind`] it was taken in, and every derived
//! value keeps that kind.

use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc,
    Weekday,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// The clock an [`Instant`] was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DateKind {
    /// Neither local nor UTC
    #[default]
    Unspecified,
    /// Coordinated universal time
    Utc,
    /// The host's local time zone
    Local,
}

impl DateKind {
    /// Convert kind to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unspecified => "unspecified",
            Self::Utc => "utc",
            Self::Local => "local",
        }
    }

    /// Parse kind from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "unspecified" => Some(Self::Unspecified),
            "utc" => Some(Self::Utc),
            "local" => Some(Self::Local),
            _ => None,
        }
    }
}

/// A wall-clock date and time tagged with its [`DateKind`]
///
/// Arithmetic on an `Instant` is plain wall-clock arithmetic: adding a day
/// always moves the reading by 24 hours, with no daylight-saving adjustment.
/// Ordering compares the readings first and the kinds second.
///
/// # Example
///
/// ```rust
/// use useful_extensions::types::{DateKind, Instant};
/// use chrono::{TimeDelta, TimeZone, Utc};
///
/// let now = Instant::from(Utc.with_ymd_and_hms(2024, 2, 28, 12, 0, 0).unwrap());
/// let later = now + TimeDelta::days(1);
/// assert_eq!(later.kind(), DateKind::Utc);
/// assert_eq!(later.to_string(), "2024-02-29 12:00:00 (utc)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant {
    value: NaiveDateTime,
    kind: DateKind,
}

impl Instant {
    /// Create an instant from a wall-clock reading and its kind
    pub const fn new(value: NaiveDateTime, kind: DateKind) -> Self {
        Self { value, kind }
    }

    /// Create an instant of [`DateKind::Unspecified`] kind
    pub const fn unspecified(value: NaiveDateTime) -> Self {
        Self::new(value, DateKind::Unspecified)
    }

    /// Create an unspecified-kind instant at midnight of the given date
    ///
    /// Returns `None` when the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(Self::unspecified)
    }

    /// The wall-clock reading
    pub const fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// The kind this instant was read in
    pub const fn kind(&self) -> DateKind {
        self.kind
    }

    /// The calendar date part
    pub fn date(&self) -> NaiveDate {
        self.value.date()
    }

    /// The day of the week
    pub fn weekday(&self) -> Weekday {
        self.value.weekday()
    }

    pub fn year(&self) -> i32 {
        self.value.year()
    }

    pub fn month(&self) -> u32 {
        self.value.month()
    }

    pub fn day(&self) -> u32 {
        self.value.day()
    }

    pub fn hour(&self) -> u32 {
        self.value.hour()
    }

    /// Replace the reading while keeping this instant's kind
    #[must_use]
    pub const fn with_value(&self, value: NaiveDateTime) -> Self {
        Self::new(value, self.kind)
    }

    /// View a UTC instant as a `DateTime<Utc>`
    ///
    /// Returns `None` for any other kind.
    pub fn as_utc(&self) -> Option<DateTime<Utc>> {
        match self.kind {
            DateKind::Utc => Some(Utc.from_utc_datetime(&self.value)),
            _ => None,
        }
    }

    /// View a local instant as a `DateTime<Local>`
    ///
    /// Returns `None` for any other kind, or when the reading falls into a
    /// daylight-saving gap. Ambiguous readings resolve to the earlier offset.
    pub fn as_local(&self) -> Option<DateTime<Local>> {
        match self.kind {
            DateKind::Local => Local.from_local_datetime(&self.value).earliest(),
            _ => None,
        }
    }
}

impl From<NaiveDateTime> for Instant {
    fn from(value: NaiveDateTime) -> Self {
        Self::unspecified(value)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value.naive_utc(), DateKind::Utc)
    }
}

impl From<DateTime<Local>> for Instant {
    fn from(value: DateTime<Local>) -> Self {
        Self::new(value.naive_local(), DateKind::Local)
    }
}

impl Add<TimeDelta> for Instant {
    type Output = Self;

    fn add(self, rhs: TimeDelta) -> Self {
        self.with_value(self.value + rhs)
    }
}

impl Sub<TimeDelta> for Instant {
    type Output = Self;

    fn sub(self, rhs: TimeDelta) -> Self {
        self.with_value(self.value - rhs)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.kind.as_str())
    }
}
