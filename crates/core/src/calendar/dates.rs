//! Year-dependent date arithmetic.
//!
//! Months are 1-based here, matching chrono. Every function is pure and works
//! at day granularity in the proleptic Gregorian calendar.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Returns the first day of the given month.
pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Returns the last day of the given month.
pub fn last_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first = first_of_month(year, month)?;
    let next = if month == 12 {
        first_of_month(year + 1, 1)?
    } else {
        first_of_month(year, month + 1)?
    };
    next.pred_opt()
}

/// Returns the number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    last_of_month(year, month).map(|d| d.day())
}

/// Builds a date, rolling a day past the end of the month into the next one.
///
/// `day` must be between 1 and 31. February 29 on a common year becomes
/// March 1, and April 31 becomes May 1.
pub fn date_with_rollover(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=31).contains(&day) {
        return None;
    }
    first_of_month(year, month)?.checked_add_days(Days::new(u64::from(day - 1)))
}

/// Returns the `n`-th occurrence of `weekday` in the given month.
///
/// When the month has fewer than `n` such weekdays the result spills into the
/// following month (the fifth Monday of a four-Monday month is the first
/// Monday after it). Returns `None` for `n == 0` or an invalid month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first = first_of_month(year, month)?;
    let offset = (weekday.num_days_from_sunday() + 7 - first.weekday().num_days_from_sunday()) % 7;
    first.checked_add_days(Days::new(u64::from(offset + (n - 1) * 7)))
}

/// Returns the last occurrence of `weekday` in the given month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let last = last_of_month(year, month)?;
    let offset = (last.weekday().num_days_from_sunday() + 7 - weekday.num_days_from_sunday()) % 7;
    last.checked_sub_days(Days::new(u64::from(offset)))
}

/// Computes Gregorian Easter Sunday (anonymous Meeus/Jones/Butcher algorithm).
pub fn easter_date(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Returns Good Friday, two days before Easter Sunday.
pub fn good_friday(year: i32) -> Option<NaiveDate> {
    easter_date(year)?.checked_sub_days(Days::new(2))
}

/// Returns the date `offset` days away from Easter Sunday.
pub fn easter_offset(year: i32, offset: i64) -> Option<NaiveDate> {
    let easter = easter_date(year)?;
    let days = Days::new(offset.unsigned_abs());
    if offset >= 0 {
        easter.checked_add_days(days)
    } else {
        easter.checked_sub_days(days)
    }
}
