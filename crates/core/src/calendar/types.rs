use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::error::CategoryError;

/// Full month names, indexed by 0-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short weekday labels for a Sunday-first grid header.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Number of cells in a month grid (6 weeks of 7 days).
pub const GRID_CELLS: usize = 42;

/// The kind of an event, determining how it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Holiday,
    Birthday,
    Anniversary,
    Personal,
}

impl EventKind {
    /// Returns the stable wire identifier for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Holiday => "holiday",
            EventKind::Birthday => "birthday",
            EventKind::Anniversary => "anniversary",
            EventKind::Personal => "personal",
        }
    }
}

/// Stable identifiers for the holiday categories a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HolidayCategoryId {
    IndianNational,
    IndianCultural,
    HinduFestivals,
    IslamicFestivals,
    ChristianFestivals,
    SikhFestivals,
    BuddhistFestivals,
    International,
}

impl HolidayCategoryId {
    /// All category identifiers in catalog order.
    pub const ALL: [HolidayCategoryId; 8] = [
        HolidayCategoryId::IndianNational,
        HolidayCategoryId::IndianCultural,
        HolidayCategoryId::HinduFestivals,
        HolidayCategoryId::IslamicFestivals,
        HolidayCategoryId::ChristianFestivals,
        HolidayCategoryId::SikhFestivals,
        HolidayCategoryId::BuddhistFestivals,
        HolidayCategoryId::International,
    ];

    /// Returns the stable wire identifier for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayCategoryId::IndianNational => "indian-national",
            HolidayCategoryId::IndianCultural => "indian-cultural",
            HolidayCategoryId::HinduFestivals => "hindu-festivals",
            HolidayCategoryId::IslamicFestivals => "islamic-festivals",
            HolidayCategoryId::ChristianFestivals => "christian-festivals",
            HolidayCategoryId::SikhFestivals => "sikh-festivals",
            HolidayCategoryId::BuddhistFestivals => "buddhist-festivals",
            HolidayCategoryId::International => "international",
        }
    }
}

impl fmt::Display for HolidayCategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HolidayCategoryId {
    type Err = CategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HolidayCategoryId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| CategoryError::Unknown(s.to_string()))
    }
}

/// A named group of holidays that can be enabled or disabled as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCategory {
    pub id: HolidayCategoryId,
    pub name: String,
    pub description: String,
    pub enabled_by_default: bool,
}

impl HolidayCategory {
    pub fn new(
        id: HolidayCategoryId,
        name: impl Into<String>,
        description: impl Into<String>,
        enabled_by_default: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            enabled_by_default,
        }
    }
}

/// A single dated occurrence resolved for one target year.
///
/// Recurrence belongs to the rule that produced the event. A different target
/// year means deriving new events, never moving an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<HolidayCategoryId>,
    #[serde(default = "default_recurring")]
    pub recurring: bool,
    /// Display color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_recurring() -> bool {
    true
}

impl Event {
    /// Creates a recurring event with no category, color or description.
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: EventKind, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            date,
            category: None,
            recurring: true,
            color: None,
            description: None,
        }
    }

    /// Creates a holiday event tagged with its category.
    pub fn holiday(
        id: impl Into<String>,
        title: impl Into<String>,
        category: HolidayCategoryId,
        date: NaiveDate,
    ) -> Self {
        Self {
            category: Some(category),
            ..Self::new(id, title, EventKind::Holiday, date)
        }
    }

    /// Sets the display color for this event.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets the description for this event.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if this event falls on the given day.
    pub fn falls_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// One of the 42 cells of a month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDate {
    pub date: NaiveDate,
    pub day: u32,
    /// 0-based month of this cell's date.
    pub month: u32,
    pub year: i32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_weekend: bool,
    pub events: Vec<Event>,
}

impl CalendarDate {
    /// Builds a cell for `date` as seen from the grid of `month_index`.
    pub fn new(date: NaiveDate, month_index: u32, today: NaiveDate, events: Vec<Event>) -> Self {
        Self {
            date,
            day: date.day(),
            month: date.month0(),
            year: date.year(),
            is_current_month: date.month0() == month_index,
            is_today: date == today,
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            events,
        }
    }

    /// Returns true if any event in this cell has the given id.
    pub fn has_event_id(&self, id: &str) -> bool {
        self.events.iter().any(|e| e.id == id)
    }
}

/// A month laid out as a fixed 6-week grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    /// 0-based month index.
    pub month: u32,
    pub year: i32,
    pub month_name: String,
    pub dates: Vec<CalendarDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CalendarMonth {
    /// Iterates over the cells that belong to this month.
    pub fn current_month_dates(&self) -> impl Iterator<Item = &CalendarDate> {
        self.dates.iter().filter(|d| d.is_current_month)
    }

    /// Returns the total number of events attached to in-month cells.
    pub fn event_count(&self) -> usize {
        self.current_month_dates().map(|d| d.events.len()).sum()
    }
}

/// Twelve months in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCalendar {
    pub year: i32,
    pub months: Vec<CalendarMonth>,
}

impl YearCalendar {
    /// Looks up a month by its display name.
    pub fn month_by_name(&self, name: &str) -> Option<&CalendarMonth> {
        self.months.iter().find(|m| m.month_name.eq_ignore_ascii_case(name))
    }
}
