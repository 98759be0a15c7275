//! Date helper behaviour through the public API
//!
//! Run: cargo test --test date_extensions

mod common;

use chrono::{Months, NaiveDate, TimeDelta, TimeZone, Utc, Weekday};
use pretty_assertions::assert_eq;
use useful_extensions::utils::dates::{
    add_weeks, beginning_of_day, beginning_of_hour, beginning_of_month, beginning_of_year,
    day_of_week_occurrence, end_of_day, end_of_hour, end_of_month, end_of_year, is_weekend,
    month_dates, month_dates_of, next, nth_weekday_of_month, previous, tick,
};
use useful_extensions::{DateKind, Error, Instant};

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A spread of instants: every 37 hours and 13 minutes across two years
fn samples() -> impl Iterator<Item = Instant> {
    let start: Instant = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap().into();
    (0..475).map(move |i| start + TimeDelta::minutes(i * (37 * 60 + 13)))
}

fn ymd(year: i32, month: u32, day: u32) -> Instant {
    Instant::from_ymd(year, month, day).unwrap()
}

// ── Period boundaries ──────────────────────────────────────────────────────

#[test]
fn end_of_day_is_idempotent_over_the_day() {
    common::init_tracing();

    for d in samples() {
        assert_eq!(end_of_day(beginning_of_day(d)), end_of_day(d));
        assert_eq!(end_of_day(end_of_day(d)), end_of_day(d));
    }
}

#[test]
fn end_of_month_is_next_month_minus_one_tick() {
    for d in samples() {
        let start = beginning_of_month(d);
        let expected = start.value().checked_add_months(Months::new(1)).unwrap() - tick();
        assert_eq!(end_of_month(d), start.with_value(expected));
    }
}

#[test]
fn boundaries_bracket_the_instant() {
    for d in samples() {
        assert!(beginning_of_hour(d) <= d && d <= end_of_hour(d));
        assert!(beginning_of_day(d) <= d && d <= end_of_day(d));
        assert!(beginning_of_month(d) <= d && d <= end_of_month(d));
        assert!(beginning_of_year(d) <= d && d <= end_of_year(d));
        assert_eq!(end_of_year(d).value() + tick(), beginning_of_year(d).value().checked_add_months(Months::new(12)).unwrap());
    }
}

#[test]
fn boundaries_preserve_kind() {
    for kind in [DateKind::Unspecified, DateKind::Utc, DateKind::Local] {
        let d = Instant::new(ymd(2024, 7, 4).value() + TimeDelta::hours(13), kind);
        for result in [
            beginning_of_hour(d),
            end_of_hour(d),
            beginning_of_day(d),
            end_of_day(d),
            beginning_of_month(d),
            end_of_month(d),
            beginning_of_year(d),
            end_of_year(d),
            next(d, Weekday::Sun),
            previous(d, Weekday::Sun),
            add_weeks(d, -3),
            nth_weekday_of_month(d, 2, Weekday::Tue),
        ] {
            assert_eq!(result.kind(), kind);
        }
        assert!(month_dates_of(d).iter().all(|day| day.kind() == kind));
    }
}

// ── Weekday navigation ─────────────────────────────────────────────────────

#[test]
fn next_is_identity_on_matching_weekday() {
    for d in samples() {
        assert_eq!(next(d, d.weekday()), d);
    }
}

#[test]
fn next_lands_within_a_week() {
    for d in samples() {
        for weekday in WEEKDAYS {
            let found = next(d, weekday);
            assert_eq!(found.weekday(), weekday);
            assert!(found >= d);
            assert!(found.value() - d.value() < TimeDelta::days(7));
        }
    }
}

#[test]
fn previous_is_next_from_a_week_earlier() {
    for d in samples() {
        for weekday in WEEKDAYS {
            let found = previous(d, weekday);
            assert_eq!(found, next(d - TimeDelta::days(7), weekday));
            assert_eq!(found.weekday(), weekday);
            assert!(found < d);
        }
    }

    // Already on the weekday: one full week back
    let monday = ymd(2024, 6, 10);
    assert_eq!(previous(monday, Weekday::Mon), ymd(2024, 6, 3));
    assert_eq!(previous(monday, Weekday::Fri), ymd(2024, 6, 7));
}

#[test]
fn add_weeks_moves_by_seven_days() {
    let d = ymd(2024, 2, 26);
    assert_eq!(add_weeks(d, 1), ymd(2024, 3, 4));
    assert_eq!(add_weeks(d, -8), ymd(2024, 1, 1));
    assert_eq!(add_weeks(d, 0), d);
}

#[test]
fn nth_weekday_and_occurrence_agree() {
    // September 2024 starts on a Sunday and has five Mondays
    let september = ymd(2024, 9, 1);
    for n in 1..=5 {
        let monday = nth_weekday_of_month(september, n, Weekday::Mon);
        assert_eq!(monday.month(), 9);
        assert_eq!(day_of_week_occurrence(monday, Weekday::Mon), usize::try_from(n).unwrap());
    }

    // Overflows into October rather than clamping
    assert_eq!(nth_weekday_of_month(september, 6, Weekday::Mon), ymd(2024, 10, 7));

    // Never below one
    assert_eq!(day_of_week_occurrence(september, Weekday::Fri), 1);
}

#[test]
fn weekend_detection_for_every_weekday() {
    // 2024-06-10 is a Monday
    for (offset, weekday) in WEEKDAYS.iter().enumerate() {
        let d = ymd(2024, 6, 10) + TimeDelta::days(i64::try_from(offset).unwrap());
        assert_eq!(d.weekday(), *weekday);
        assert_eq!(is_weekend(d), matches!(weekday, Weekday::Sat | Weekday::Sun));
    }
}

// ── Month enumeration ──────────────────────────────────────────────────────

#[test]
fn leap_february_has_29_dates() {
    let dates = month_dates(2, 2024).unwrap();
    assert_eq!(dates.len(), 29);
    assert_eq!(dates.first().map(Instant::day), Some(1));
    assert_eq!(dates.last().map(Instant::day), Some(29));
    assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(dates.iter().all(|d| d.kind() == DateKind::Unspecified));
}

#[test]
fn month_lengths() {
    let lengths: Vec<usize> = (1..=12).map(|m| month_dates(m, 2023).unwrap().len()).collect();
    assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
}

#[test]
fn invalid_month_is_rejected() {
    assert!(matches!(month_dates(0, 2024), Err(Error::InvalidDate(_))));
    assert!(matches!(month_dates(13, 2024), Err(Error::InvalidDate(_))));
}

#[test]
fn month_dates_of_starts_at_midnight() {
    let d = Instant::from(NaiveDate::from_ymd_opt(2024, 4, 17).unwrap().and_hms_opt(18, 30, 0).unwrap());
    let dates = month_dates_of(d);
    assert_eq!(dates.len(), 30);
    assert_eq!(dates[0], ymd(2024, 4, 1));
    assert!(dates.iter().all(|day| day.hour() == 0));
}
