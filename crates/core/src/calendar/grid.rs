//! Month and year grid construction.
//!
//! A month is always 42 cells starting on the Sunday on or before the 1st, so
//! every month renders with the same shape.

use std::collections::HashMap;

use chrono::{Datelike, Days, Local, Month, NaiveDate};

use super::dates::first_of_month;
use super::holidays::HolidayCatalog;
use super::types::{CalendarDate, CalendarMonth, Event, YearCalendar, GRID_CELLS, MONTH_NAMES};

/// Groups events by date, keeping their relative order.
pub fn group_events_by_date(events: &[Event]) -> HashMap<NaiveDate, Vec<&Event>> {
    let mut grouped: HashMap<NaiveDate, Vec<&Event>> = HashMap::new();
    for event in events {
        grouped.entry(event.date).or_default().push(event);
    }
    grouped
}

/// Returns the first date shown in the grid of the given month.
pub fn grid_start(year: i32, month: Month) -> Option<NaiveDate> {
    let first = first_of_month(year, month.number_from_month())?;
    first.checked_sub_days(Days::new(u64::from(first.weekday().num_days_from_sunday())))
}

/// Builds a month grid, flagging today's cell from the wall clock.
pub fn build_month(
    month: Month,
    year: i32,
    events: &[Event],
    image: Option<String>,
) -> Option<CalendarMonth> {
    build_month_as_of(month, year, events, image, Local::now().date_naive())
}

/// Builds a month grid with an explicit `today`.
pub fn build_month_as_of(
    month: Month,
    year: i32,
    events: &[Event],
    image: Option<String>,
    today: NaiveDate,
) -> Option<CalendarMonth> {
    let start = grid_start(year, month)?;
    let month_index = month.number_from_month() - 1;
    let grouped = group_events_by_date(events);

    let dates = (0..GRID_CELLS as u64)
        .map(|offset| {
            let date = start.checked_add_days(Days::new(offset))?;
            let day_events: Vec<Event> = grouped
                .get(&date)
                .map(|refs| refs.iter().map(|e| (*e).clone()).collect())
                .unwrap_or_default();
            Some(CalendarDate::new(date, month_index, today, day_events))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(CalendarMonth {
        month: month_index,
        year,
        month_name: MONTH_NAMES[month_index as usize].to_string(),
        dates,
        image,
    })
}

/// Builds all twelve months from an already-resolved event list.
///
/// `images` is keyed by full month name ("January").
pub fn build_year_with_events(
    year: i32,
    events: &[Event],
    images: &HashMap<String, String>,
    today: NaiveDate,
) -> Option<YearCalendar> {
    let months = (1..=12u8)
        .map(|number| {
            let month = Month::try_from(number).ok()?;
            let image = images.get(month.name()).cloned();
            build_month_as_of(month, year, events, image, today)
        })
        .collect::<Option<Vec<_>>>()?;

    Some(YearCalendar { year, months })
}

/// Builds the year from every catalog holiday plus `personal_events`.
///
/// Holidays are not filtered by category here. Callers that honor a category
/// selection resolve events first and use [`build_year_with_events`].
pub fn build_year(
    catalog: &HolidayCatalog,
    year: i32,
    personal_events: &[Event],
    images: &HashMap<String, String>,
) -> Option<YearCalendar> {
    let mut events = catalog.all_holidays(year);
    events.extend_from_slice(personal_events);
    build_year_with_events(year, &events, images, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::dates::days_in_month;
    use crate::calendar::types::{EventKind, HolidayCategoryId};
    use chrono::Weekday;

    fn make_date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn month(number: u8) -> Month {
        Month::try_from(number).unwrap()
    }

    #[test]
    fn test_every_month_has_42_cells_and_correct_in_month_count() {
        let today = make_date(2026, 10, 19);
        for year in [1900, 2000, 2024, 2026, 2027, 2100] {
            for number in 1..=12u8 {
                let grid = build_month_as_of(month(number), year, &[], None, today).unwrap();
                assert_eq!(grid.dates.len(), 42);
                let in_month = grid.dates.iter().filter(|d| d.is_current_month).count();
                assert_eq!(
                    in_month as u32,
                    days_in_month(year, u32::from(number)).unwrap(),
                    "{year}-{number}"
                );
                assert_eq!(grid.dates[0].date.weekday(), Weekday::Sun);
            }
        }
    }

    #[test]
    fn test_november_2026_grid() {
        let today = make_date(2026, 10, 19);
        let grid = build_month_as_of(Month::November, 2026, &[], None, today).unwrap();

        assert_eq!(grid.month, 10);
        assert_eq!(grid.month_name, "November");
        // November 1, 2026 is a Sunday, so the grid starts on it
        assert_eq!(grid.dates[0].date, make_date(2026, 11, 1));
        assert!(grid.dates[0].is_current_month);
        assert_eq!(grid.dates[41].date, make_date(2026, 12, 12));
        assert!(!grid.dates[41].is_current_month);
    }

    #[test]
    fn test_grid_starts_on_previous_sunday() {
        let today = make_date(2026, 10, 19);
        let grid = build_month_as_of(Month::October, 2026, &[], None, today).unwrap();

        // October 1, 2026 is a Thursday
        assert_eq!(grid.dates[0].date, make_date(2026, 9, 27));
        assert!(!grid.dates[0].is_current_month);
        assert_eq!(grid.dates[4].date, make_date(2026, 10, 1));
        assert!(grid.dates[4].is_current_month);
    }

    #[test]
    fn test_today_and_weekend_flags() {
        let today = make_date(2026, 10, 19);
        let grid = build_month_as_of(Month::October, 2026, &[], None, today).unwrap();

        let todays: Vec<_> = grid.dates.iter().filter(|d| d.is_today).collect();
        assert_eq!(todays.len(), 1);
        assert_eq!(todays[0].date, today);

        assert!(grid.dates.iter().all(|d| {
            d.is_weekend == matches!(d.date.weekday(), Weekday::Sat | Weekday::Sun)
        }));
    }

    #[test]
    fn test_events_attach_to_matching_cells_in_order() {
        let today = make_date(2026, 1, 1);
        let date = make_date(2026, 3, 8);
        let events = vec![
            Event::new("a", "First", EventKind::Personal, date),
            Event::new("b", "Elsewhere", EventKind::Personal, make_date(2026, 3, 9)),
            Event::new("c", "Second", EventKind::Personal, date),
            Event::new("d", "Other year", EventKind::Personal, make_date(2025, 3, 8)),
        ];

        let grid = build_month_as_of(Month::March, 2026, &events, None, today).unwrap();
        let cell = grid.dates.iter().find(|d| d.date == date).unwrap();

        let ids: Vec<_> = cell.events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_overflow_cells_carry_adjacent_month_events() {
        let today = make_date(2026, 1, 1);
        let events = vec![Event::new("x", "Eve", EventKind::Personal, make_date(2026, 9, 30))];

        let grid = build_month_as_of(Month::October, 2026, &events, None, today).unwrap();
        let cell = grid.dates.iter().find(|d| d.date == make_date(2026, 9, 30)).unwrap();

        assert!(!cell.is_current_month);
        assert_eq!(cell.events.len(), 1);
        assert_eq!(grid.event_count(), 0);
    }

    #[test]
    fn test_build_year_attaches_images_and_all_holidays() {
        let catalog = HolidayCatalog::standard();
        let mut images = HashMap::new();
        images.insert("March".to_string(), "photos/march.jpg".to_string());

        let year = build_year(&catalog, 2026, &[], &images).unwrap();

        assert_eq!(year.months.len(), 12);
        for (index, month) in year.months.iter().enumerate() {
            assert_eq!(month.month as usize, index);
            assert_eq!(month.month_name, MONTH_NAMES[index]);
        }
        assert_eq!(year.months[2].image.as_deref(), Some("photos/march.jpg"));
        assert!(year.months[0].image.is_none());

        // Every category is present regardless of any selection
        let december = year.month_by_name("December").unwrap();
        let christmas = december
            .dates
            .iter()
            .find(|d| d.date == make_date(2026, 12, 25))
            .unwrap();
        assert!(christmas
            .events
            .iter()
            .any(|e| e.category == Some(HolidayCategoryId::ChristianFestivals)));
    }
}
