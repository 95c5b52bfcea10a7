//! The holiday catalog.
//!
//! A catalog is built once and shared read-only. Each definition carries a
//! [`DateRule`] that is evaluated per target year, so holidays are derived
//! fresh for every year instead of being moved between years.
//!
//! Festivals that follow a lunar calendar are stored as approximate fixed
//! dates. They are flagged with [`DateRule::Approximate`] and listed by
//! [`HolidayCatalog::approximate_ids`] so callers can mark them as such.

use chrono::{NaiveDate, Weekday};
use serde::Serialize;

use super::dates::{easter_offset, last_weekday_of_month, nth_weekday_of_month};
use super::types::{Event, HolidayCategory, HolidayCategoryId};

/// How a holiday's date is derived for a given year. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum DateRule {
    /// Same month and day every year.
    Fixed { month: u32, day: u32 },
    /// A fixed stand-in for a date that really moves with a lunar calendar.
    Approximate { month: u32, day: u32 },
    /// The `n`-th `weekday` of the month.
    NthWeekday { month: u32, weekday: Weekday, n: u32 },
    /// The last `weekday` of the month.
    LastWeekday { month: u32, weekday: Weekday },
    /// A day count relative to Gregorian Easter Sunday.
    EasterOffset { days: i64 },
}

impl DateRule {
    /// Evaluates the rule for `year`.
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            DateRule::Fixed { month, day } | DateRule::Approximate { month, day } => {
                NaiveDate::from_ymd_opt(year, month, day)
            }
            DateRule::NthWeekday { month, weekday, n } => nth_weekday_of_month(year, month, weekday, n),
            DateRule::LastWeekday { month, weekday } => last_weekday_of_month(year, month, weekday),
            DateRule::EasterOffset { days } => easter_offset(year, days),
        }
    }

    /// Returns true if this rule only approximates the real date.
    pub fn is_approximate(&self) -> bool {
        matches!(self, DateRule::Approximate { .. })
    }
}

/// A holiday definition: identity, presentation and date rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub category: HolidayCategoryId,
    pub rule: DateRule,
    pub color: &'static str,
    pub description: &'static str,
}

impl HolidayDefinition {
    /// Produces the event for `year`, or `None` if the rule has no date that year.
    pub fn event_for(&self, year: i32) -> Option<Event> {
        let date = self.rule.resolve(year)?;
        Some(
            Event::holiday(self.id, self.title, self.category, date)
                .with_color(self.color)
                .with_description(self.description),
        )
    }
}

const fn fixed(month: u32, day: u32) -> DateRule {
    DateRule::Fixed { month, day }
}

const fn approx(month: u32, day: u32) -> DateRule {
    DateRule::Approximate { month, day }
}

const fn def(
    id: &'static str,
    title: &'static str,
    category: HolidayCategoryId,
    rule: DateRule,
    color: &'static str,
    description: &'static str,
) -> HolidayDefinition {
    HolidayDefinition {
        id,
        title,
        category,
        rule,
        color,
        description,
    }
}

/// Immutable table of holiday categories and definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCatalog {
    categories: Vec<HolidayCategory>,
    definitions: Vec<HolidayDefinition>,
}

impl HolidayCatalog {
    /// Builds a catalog from explicit parts.
    pub fn new(categories: Vec<HolidayCategory>, definitions: Vec<HolidayDefinition>) -> Self {
        Self {
            categories,
            definitions,
        }
    }

    /// The built-in catalog of national, cultural, religious and international days.
    pub fn standard() -> Self {
        Self::new(standard_categories(), standard_definitions())
    }

    pub fn categories(&self) -> &[HolidayCategory] {
        &self.categories
    }

    pub fn definitions(&self) -> &[HolidayDefinition] {
        &self.definitions
    }

    /// Categories enabled when the user has not picked any.
    pub fn default_enabled_categories(&self) -> Vec<HolidayCategoryId> {
        self.categories
            .iter()
            .filter(|c| c.enabled_by_default)
            .map(|c| c.id)
            .collect()
    }

    /// Looks up a category's metadata.
    pub fn category(&self, id: HolidayCategoryId) -> Option<&HolidayCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Every holiday in catalog order, dated for `year`.
    pub fn all_holidays(&self, year: i32) -> Vec<Event> {
        self.definitions
            .iter()
            .filter_map(|definition| definition.event_for(year))
            .collect()
    }

    /// Holidays for `year` whose category is in `categories`.
    pub fn holidays_for_categories(&self, year: i32, categories: &[HolidayCategoryId]) -> Vec<Event> {
        self.all_holidays(year)
            .into_iter()
            .filter(|h| h.category.is_some_and(|c| categories.contains(&c)))
            .collect()
    }

    /// Ids of holidays whose dates are approximations.
    pub fn approximate_ids(&self) -> Vec<&'static str> {
        self.definitions
            .iter()
            .filter(|d| d.rule.is_approximate())
            .map(|d| d.id)
            .collect()
    }
}

impl Default for HolidayCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_categories() -> Vec<HolidayCategory> {
    use HolidayCategoryId::*;

    vec![
        HolidayCategory::new(
            IndianNational,
            "Indian National Holidays",
            "Official Indian government holidays",
            true,
        ),
        HolidayCategory::new(
            IndianCultural,
            "Indian Cultural Festivals",
            "Popular Indian cultural celebrations",
            true,
        ),
        HolidayCategory::new(
            HinduFestivals,
            "Hindu Festivals",
            "Major Hindu religious festivals",
            true,
        ),
        HolidayCategory::new(IslamicFestivals, "Islamic Festivals", "Major Islamic festivals", false),
        HolidayCategory::new(
            ChristianFestivals,
            "Christian Festivals",
            "Major Christian celebrations",
            false,
        ),
        HolidayCategory::new(SikhFestivals, "Sikh Festivals", "Major Sikh celebrations", false),
        HolidayCategory::new(
            BuddhistFestivals,
            "Buddhist Festivals",
            "Major Buddhist celebrations",
            false,
        ),
        HolidayCategory::new(
            International,
            "International Days",
            "UN and international observances",
            false,
        ),
    ]
}

fn standard_definitions() -> Vec<HolidayDefinition> {
    use HolidayCategoryId::*;

    vec![
        // Indian national
        def(
            "republic-day",
            "Republic Day",
            IndianNational,
            fixed(1, 26),
            "#ff6b35",
            "Celebrates the adoption of the Indian Constitution",
        ),
        def(
            "independence-day",
            "Independence Day",
            IndianNational,
            fixed(8, 15),
            "#ff6b35",
            "Celebrates India's independence from British rule",
        ),
        def(
            "gandhi-jayanti",
            "Gandhi Jayanti",
            IndianNational,
            fixed(10, 2),
            "#ff6b35",
            "Birthday of Mahatma Gandhi",
        ),
        // Hindu
        def("diwali", "Diwali", HinduFestivals, approx(10, 24), "#ffd700", "Festival of Lights"),
        def("holi", "Holi", HinduFestivals, approx(3, 13), "#ff69b4", "Festival of Colors"),
        def(
            "dussehra",
            "Dussehra",
            HinduFestivals,
            approx(10, 12),
            "#ff4500",
            "Victory of good over evil",
        ),
        def("navratri", "Navratri", HinduFestivals, approx(10, 3), "#ff1493", "Nine nights festival"),
        def(
            "karva-chauth",
            "Karva Chauth",
            HinduFestivals,
            approx(10, 20),
            "#dc143c",
            "Festival for married women",
        ),
        def(
            "raksha-bandhan",
            "Raksha Bandhan",
            HinduFestivals,
            approx(8, 19),
            "#ff6347",
            "Festival celebrating brother-sister bond",
        ),
        def(
            "janmashtami",
            "Janmashtami",
            HinduFestivals,
            approx(8, 26),
            "#4169e1",
            "Birthday of Lord Krishna",
        ),
        def(
            "ganesh-chaturthi",
            "Ganesh Chaturthi",
            HinduFestivals,
            approx(9, 7),
            "#ff8c00",
            "Festival of Lord Ganesha",
        ),
        // Indian cultural
        def(
            "baisakhi",
            "Baisakhi",
            IndianCultural,
            fixed(4, 13),
            "#32cd32",
            "Harvest festival and Sikh New Year",
        ),
        def(
            "onam",
            "Onam",
            IndianCultural,
            approx(9, 5),
            "#ffd700",
            "Kerala harvest festival (lunar date, usually late August or September)",
        ),
        def("pongal", "Pongal", IndianCultural, fixed(1, 14), "#ff6347", "Tamil harvest festival"),
        def(
            "durga-puja",
            "Durga Puja",
            IndianCultural,
            approx(10, 15),
            "#dc143c",
            "Bengali festival honoring Goddess Durga",
        ),
        // Islamic
        def(
            "eid-ul-fitr",
            "Eid ul-Fitr",
            IslamicFestivals,
            approx(4, 21),
            "#00ced1",
            "Festival marking end of Ramadan",
        ),
        def(
            "eid-ul-adha",
            "Eid ul-Adha",
            IslamicFestivals,
            approx(6, 28),
            "#00ced1",
            "Festival of Sacrifice",
        ),
        def("muharram", "Muharram", IslamicFestivals, approx(8, 17), "#2f4f4f", "Islamic New Year"),
        // Christian
        def(
            "christmas",
            "Christmas Day",
            ChristianFestivals,
            fixed(12, 25),
            "#dc143c",
            "Birth of Jesus Christ",
        ),
        def(
            "easter",
            "Easter Sunday",
            ChristianFestivals,
            DateRule::EasterOffset { days: 0 },
            "#8b5cf6",
            "Resurrection of Jesus Christ",
        ),
        def(
            "good-friday",
            "Good Friday",
            ChristianFestivals,
            DateRule::EasterOffset { days: -2 },
            "#8b5cf6",
            "Crucifixion of Jesus Christ",
        ),
        // Sikh
        def(
            "guru-nanak-jayanti",
            "Guru Nanak Jayanti",
            SikhFestivals,
            approx(11, 15),
            "#ff8c00",
            "Birthday of Guru Nanak",
        ),
        def(
            "guru-gobind-singh-jayanti",
            "Guru Gobind Singh Jayanti",
            SikhFestivals,
            fixed(1, 5),
            "#ff8c00",
            "Birthday of Guru Gobind Singh",
        ),
        // Buddhist
        def(
            "buddha-purnima",
            "Buddha Purnima",
            BuddhistFestivals,
            approx(5, 16),
            "#ffd700",
            "Birthday of Lord Buddha",
        ),
        // International
        def(
            "new-year",
            "New Year's Day",
            International,
            fixed(1, 1),
            "#dc2626",
            "Beginning of the calendar year",
        ),
        def(
            "womens-day",
            "International Women's Day",
            International,
            fixed(3, 8),
            "#ec4899",
            "Celebrating women's achievements",
        ),
        def(
            "earth-day",
            "Earth Day",
            International,
            fixed(4, 22),
            "#059669",
            "Environmental awareness day",
        ),
        def(
            "mothers-day",
            "Mother's Day",
            International,
            DateRule::NthWeekday {
                month: 5,
                weekday: Weekday::Sun,
                n: 2,
            },
            "#ec4899",
            "Honoring mothers and motherhood",
        ),
        def(
            "fathers-day",
            "Father's Day",
            International,
            DateRule::NthWeekday {
                month: 6,
                weekday: Weekday::Sun,
                n: 3,
            },
            "#2563eb",
            "Honoring fathers and fatherhood",
        ),
        def(
            "friendship-day",
            "Friendship Day",
            International,
            DateRule::NthWeekday {
                month: 8,
                weekday: Weekday::Sun,
                n: 1,
            },
            "#f59e0b",
            "Celebrating friendship",
        ),
        def(
            "day-of-the-deaf",
            "International Day of the Deaf",
            International,
            DateRule::LastWeekday {
                month: 9,
                weekday: Weekday::Sun,
            },
            "#0891b2",
            "Awareness of deaf culture and sign languages",
        ),
    ]
}
