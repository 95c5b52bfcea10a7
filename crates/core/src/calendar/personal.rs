//! Parsing of user-supplied personal dates.
//!
//! Parsing is lenient: a birth date or anniversary that cannot be read is
//! treated as absent, and an additional-dates line that matches no supported
//! format is skipped. Every parsed date is re-anchored onto the target year.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::dates::date_with_rollover;
use super::types::{Event, EventKind};

pub const BIRTHDAY_ID: &str = "birthday";
pub const ANNIVERSARY_ID: &str = "anniversary";

const BIRTHDAY_COLOR: &str = "#3b82f6";
const ANNIVERSARY_COLOR: &str = "#ec4899";
const PERSONAL_COLOR: &str = "#059669";

/// `YYYY-MM-DD - title`
static ISO_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})-(\d{2})-(\d{2})\s*-\s*(.+?)\s*$").expect("valid iso line regex"));
/// `MM/DD/YYYY - title`
static US_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{2})/(\d{2})/(\d{4})\s*-\s*(.+?)\s*$").expect("valid us line regex"));
/// `MM-DD - title`, always recurring
static YEARLESS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{2})-(\d{2})\s*-\s*(.+?)\s*$").expect("valid yearless line regex"));

/// A month/day pair read from user input, before it is anchored to a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    fn new(month: u32, day: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { month, day })
    }

    /// Anchors this month/day onto `year`, rolling overflow days forward.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        date_with_rollover(year, self.month, self.day)
    }
}

/// Reads a single date in `YYYY-MM-DD` or `MM/DD/YYYY` form.
pub fn parse_single_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%m/%d/%Y"))
        .ok()
}

/// Parses one additional-dates line into a month/day and a trimmed title.
///
/// Patterns are tried in order: `YYYY-MM-DD`, `MM/DD/YYYY`, `MM-DD`. The year
/// of the first two forms is read but not kept.
pub fn parse_dated_line(line: &str) -> Option<(MonthDay, String)> {
    let number = |s: &str| s.parse::<u32>().ok();

    let (month, day, title) = if let Some(caps) = ISO_LINE.captures(line) {
        (number(&caps[2])?, number(&caps[3])?, caps[4].to_string())
    } else if let Some(caps) = US_LINE.captures(line) {
        (number(&caps[1])?, number(&caps[2])?, caps[4].to_string())
    } else if let Some(caps) = YEARLESS_LINE.captures(line) {
        (number(&caps[1])?, number(&caps[2])?, caps[3].to_string())
    } else {
        return None;
    };

    let title = title.trim();
    if title.is_empty() {
        return None;
    }
    Some((MonthDay::new(month, day)?, title.to_string()))
}

/// Re-anchors a full date onto `year`.
fn anchor(date: NaiveDate, year: i32) -> Option<NaiveDate> {
    date_with_rollover(year, date.month(), date.day())
}

/// Converts the three free-form personal inputs into events for `year`.
///
/// Additional-date events get ids `personal-<n>`, where `n` counts non-blank
/// lines from zero.
pub fn parse_personal_dates(
    birthdate: &str,
    anniversary: &str,
    additional_dates: &str,
    year: i32,
) -> Vec<Event> {
    let mut events = Vec::new();

    if let Some(date) = parse_single_date(birthdate).and_then(|d| anchor(d, year)) {
        events.push(
            Event::new(BIRTHDAY_ID, "Birthday", EventKind::Birthday, date)
                .with_color(BIRTHDAY_COLOR)
                .with_description(format!("Born on {}", birthdate.trim())),
        );
    }

    if let Some(date) = parse_single_date(anniversary).and_then(|d| anchor(d, year)) {
        events.push(
            Event::new(ANNIVERSARY_ID, "Anniversary", EventKind::Anniversary, date)
                .with_color(ANNIVERSARY_COLOR)
                .with_description(format!("Anniversary since {}", anniversary.trim())),
        );
    }

    let lines = additional_dates.lines().filter(|line| !line.trim().is_empty());
    for (index, line) in lines.enumerate() {
        let Some((month_day, title)) = parse_dated_line(line) else {
            continue;
        };
        let Some(date) = month_day.in_year(year) else {
            continue;
        };
        events.push(
            Event::new(format!("personal-{index}"), title, EventKind::Personal, date)
                .with_color(PERSONAL_COLOR),
        );
    }

    events
}
