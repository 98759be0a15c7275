//! Date and time helper functions
//!
//! Period boundaries, weekday navigation and month enumeration over
//! [`Instant`]. Every function returns an instant of the same
//! [`DateKind`](crate::types::DateKind) as its input.
//!
//! The end of a period is the start of the next one minus one [`tick`], so
//! `end_of_day` of any instant on 2024-03-10 is `2024-03-10 23:59:59.999999999`.

use crate::error::{Error, Result};
use crate::types::Instant;
use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

/// The smallest step an [`Instant`] can take
pub fn tick() -> TimeDelta {
    TimeDelta::nanoseconds(1)
}

fn days_until(from: Weekday, to: Weekday) -> i64 {
    i64::from((to.num_days_from_sunday() + 7 - from.num_days_from_sunday()) % 7)
}

fn last_before(next_start: Option<NaiveDateTime>) -> NaiveDateTime {
    // No next period means this one runs to the end of the representable range
    next_start.map_or(NaiveDateTime::MAX, |start| start - tick())
}

/// The first `weekday` on or after `date`
///
/// Returns `date` unchanged when it already falls on `weekday`; otherwise
/// advances one to six days. The time of day is kept.
///
/// # Panics
///
/// Panics if the result is outside the representable range.
///
/// # Example
///
/// ```rust
/// use useful_extensions::types::Instant;
/// use useful_extensions::utils::dates::next;
/// use chrono::Weekday;
///
/// let wednesday = Instant::from_ymd(2024, 5, 15).unwrap();
/// assert_eq!(next(wednesday, Weekday::Fri).day(), 17);
/// assert_eq!(next(wednesday, Weekday::Wed), wednesday);
/// assert_eq!(next(wednesday, Weekday::Mon).day(), 20);
/// ```
pub fn next(date: Instant, weekday: Weekday) -> Instant {
    date + TimeDelta::days(days_until(date.weekday(), weekday))
}

/// `next(date - 7 days, weekday)`
///
/// For a `date` not on `weekday` this is the latest `weekday` before it; for
/// a `date` on `weekday` it is exactly one week earlier.
///
/// # Panics
///
/// Panics if the result is outside the representable range.
pub fn previous(date: Instant, weekday: Weekday) -> Instant {
    next(date - TimeDelta::days(7), weekday)
}

/// Move `date` by `weeks` whole weeks, backwards when negative
///
/// # Panics
///
/// Panics if the result is outside the representable range.
pub fn add_weeks(date: Instant, weeks: i32) -> Instant {
    date + TimeDelta::weeks(i64::from(weeks))
}

/// Start of the hour containing `date`
pub fn beginning_of_hour(date: Instant) -> Instant {
    let value = date.value();
    date.with_value(value.date().and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(value.hour())))
}

/// Last tick of the hour containing `date`
pub fn end_of_hour(date: Instant) -> Instant {
    let start = beginning_of_hour(date).value();
    date.with_value(last_before(start.checked_add_signed(TimeDelta::hours(1))))
}

/// Midnight at the start of the day containing `date`
pub fn beginning_of_day(date: Instant) -> Instant {
    date.with_value(date.date().and_time(NaiveTime::MIN))
}

/// Last tick of the day containing `date`
pub fn end_of_day(date: Instant) -> Instant {
    let start = beginning_of_day(date).value();
    date.with_value(last_before(start.checked_add_signed(TimeDelta::days(1))))
}

/// Midnight on the first day of the month containing `date`
pub fn beginning_of_month(date: Instant) -> Instant {
    let day = date.date();
    let first = day - Days::new(u64::from(day.day0()));
    date.with_value(first.and_time(NaiveTime::MIN))
}

/// Last tick of the month containing `date`
pub fn end_of_month(date: Instant) -> Instant {
    let start = beginning_of_month(date).value();
    date.with_value(last_before(start.checked_add_months(Months::new(1))))
}

/// Midnight on January 1st of the year containing `date`
pub fn beginning_of_year(date: Instant) -> Instant {
    let day = date.date();
    let first = day - Days::new(u64::from(day.ordinal0()));
    date.with_value(first.and_time(NaiveTime::MIN))
}

/// Last tick of the year containing `date`
pub fn end_of_year(date: Instant) -> Instant {
    let start = beginning_of_year(date).value();
    date.with_value(last_before(start.checked_add_months(Months::new(12))))
}

/// The `n`-th `weekday` of the month containing `date`, at midnight
///
/// Computed as the first `weekday` of the month plus `n - 1` weeks. A large
/// `n` runs into the following month; it is not clamped.
///
/// # Panics
///
/// Panics if the result is outside the representable range.
///
/// # Example
///
/// ```rust
/// use useful_extensions::types::Instant;
/// use useful_extensions::utils::dates::nth_weekday_of_month;
/// use chrono::Weekday;
///
/// // Thanksgiving 2024: fourth Thursday of November
/// let november = Instant::from_ymd(2024, 11, 1).unwrap();
/// assert_eq!(nth_weekday_of_month(november, 4, Weekday::Thu).day(), 28);
/// ```
pub fn nth_weekday_of_month(date: Instant, n: i32, weekday: Weekday) -> Instant {
    add_weeks(next(beginning_of_month(date), weekday), n.saturating_sub(1))
}

/// Which occurrence of `weekday` within its month `date` is
///
/// Counts the days of the month that fall on `weekday` up to and including
/// `date`. The result is never below 1, even when `date` itself is not on
/// `weekday` and no earlier match exists.
pub fn day_of_week_occurrence(date: Instant, weekday: Weekday) -> usize {
    month_dates_of(date)
        .into_iter()
        .filter(|day| day.weekday() == weekday && *day <= date)
        .count()
        .max(1)
}

/// Check whether `date` falls on a Saturday or Sunday
pub fn is_weekend(date: Instant) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn days_of_month(first: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let month = first.month();
    first.iter_days().take_while(move |day| day.month() == month)
}

/// Every day of `month` in `year` at midnight, ascending
///
/// The instants are of unspecified kind.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] when `month` is not 1-12 or `year` is out
/// of range.
///
/// # Example
///
/// ```rust
/// use useful_extensions::utils::dates::month_dates;
///
/// let february = month_dates(2, 2024).unwrap();
/// assert_eq!(february.len(), 29);
/// assert!(month_dates(13, 2024).is_err());
/// ```
pub fn month_dates(month: u32, year: i32) -> Result<Vec<Instant>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidDate(format!("year {year}, month {month}")))?;

    Ok(days_of_month(first)
        .map(|day| Instant::unspecified(day.and_time(NaiveTime::MIN)))
        .collect())
}

/// Every day of the month containing `date` at midnight, ascending
///
/// The instants keep the kind of `date`.
pub fn month_dates_of(date: Instant) -> Vec<Instant> {
    days_of_month(beginning_of_month(date).date())
        .map(|day| date.with_value(day.and_time(NaiveTime::MIN)))
        .collect()
}
