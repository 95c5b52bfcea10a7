//! Merging of holidays, parsed personal dates and externally supplied events.

use super::holidays::HolidayCatalog;
use super::personal::parse_personal_dates;
use super::types::{Event, HolidayCategoryId};

/// Raw personal-date inputs as typed by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalInputs<'a> {
    pub birthdate: &'a str,
    pub anniversary: &'a str,
    pub additional_dates: &'a str,
}

/// Merges derived personal events with external ones.
///
/// An external event is dropped when a derived event has the same date and
/// title. Derived events come first.
pub fn merge_personal_events(parsed: Vec<Event>, external: &[Event]) -> Vec<Event> {
    let extra: Vec<Event> = external
        .iter()
        .filter(|event| {
            !parsed
                .iter()
                .any(|p| p.date == event.date && p.title == event.title)
        })
        .cloned()
        .collect();

    let mut merged = parsed;
    merged.extend(extra);
    merged
}

/// Resolves every event for `year`.
///
/// Returns the enabled-category holidays, then the parsed personal events,
/// then the external events that do not duplicate a parsed one.
pub fn resolve_events(
    catalog: &HolidayCatalog,
    year: i32,
    enabled_categories: &[HolidayCategoryId],
    inputs: PersonalInputs<'_>,
    external_events: &[Event],
) -> Vec<Event> {
    let holidays = catalog.holidays_for_categories(year, enabled_categories);
    let parsed = parse_personal_dates(
        inputs.birthdate,
        inputs.anniversary,
        inputs.additional_dates,
        year,
    );

    let mut events = holidays;
    events.extend(merge_personal_events(parsed, external_events));
    events
}
