//! The calendar request payload handed over by the form layer.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::RequestError;
use super::grid::build_year_with_events;
use super::holidays::HolidayCatalog;
use super::layout::TemplateStyle;
use super::resolver::{resolve_events, PersonalInputs};
use super::types::{Event, HolidayCategoryId, YearCalendar, MONTH_NAMES};
use crate::serde::{deserialize_nullable_string, deserialize_optional_string};

/// Everything needed to produce one personalized calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRequest {
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub name: String,
    /// `YYYY-MM-DD`, or empty when absent.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub birthdate: String,
    /// `YYYY-MM-DD`, or empty when absent.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub anniversary: String,
    /// Newline-separated `date - title` entries.
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub additional_dates: String,
    pub year: i32,
    /// Image references keyed by full month name.
    #[serde(default)]
    pub images: HashMap<String, String>,
    /// Raw category identifiers. Unknown ones are ignored.
    #[serde(default)]
    pub enabled_holiday_categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub template: Option<String>,
    /// Ad-hoc events added outside the free-text field.
    #[serde(default)]
    pub personal_events: Vec<Event>,
}

impl CalendarRequest {
    /// Create a request with just a name and a year.
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
            ..Default::default()
        }
    }

    pub fn with_birthdate(mut self, birthdate: impl Into<String>) -> Self {
        self.birthdate = birthdate.into();
        self
    }

    pub fn with_anniversary(mut self, anniversary: impl Into<String>) -> Self {
        self.anniversary = anniversary.into();
        self
    }

    pub fn with_additional_dates(mut self, additional_dates: impl Into<String>) -> Self {
        self.additional_dates = additional_dates.into();
        self
    }

    pub fn with_image(mut self, month_name: impl Into<String>, reference: impl Into<String>) -> Self {
        self.images.insert(month_name.into(), reference.into());
        self
    }

    pub fn with_categories(mut self, categories: &[HolidayCategoryId]) -> Self {
        self.enabled_holiday_categories = categories.iter().map(|c| c.as_str().to_string()).collect();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_personal_event(mut self, event: Event) -> Self {
        self.personal_events.push(event);
        self
    }

    /// Parses and validates a JSON payload.
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        let request: Self =
            serde_json::from_str(json).map_err(|e| RequestError::Payload(e.to_string()))?;
        request.validate()?;
        Ok(request)
    }

    /// Checks the year range and image keys.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(1..=9999).contains(&self.year) {
            return Err(RequestError::YearOutOfRange(self.year));
        }
        for key in self.images.keys() {
            canonical_month_name(key).ok_or_else(|| RequestError::UnknownMonth(key.clone()))?;
        }
        Ok(())
    }

    /// Splits the category list into recognized ids and unknown strings.
    pub fn categories(&self) -> (Vec<HolidayCategoryId>, Vec<String>) {
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for raw in &self.enabled_holiday_categories {
            match raw.parse::<HolidayCategoryId>() {
                Ok(id) if !known.contains(&id) => known.push(id),
                Ok(_) => {}
                Err(_) => unknown.push(raw.clone()),
            }
        }
        (known, unknown)
    }

    /// Image references re-keyed by canonical month name.
    pub fn normalized_images(&self) -> HashMap<String, String> {
        self.images
            .iter()
            .filter_map(|(key, reference)| {
                canonical_month_name(key).map(|name| (name.to_string(), reference.clone()))
            })
            .collect()
    }

    pub fn template_style(&self) -> TemplateStyle {
        TemplateStyle::from_name(self.template.as_deref())
    }

    pub fn personal_inputs(&self) -> PersonalInputs<'_> {
        PersonalInputs {
            birthdate: &self.birthdate,
            anniversary: &self.anniversary,
            additional_dates: &self.additional_dates,
        }
    }

    /// Resolves holidays for the enabled categories plus all personal events.
    pub fn resolve_events(&self, catalog: &HolidayCatalog) -> Vec<Event> {
        let (categories, _) = self.categories();
        resolve_events(
            catalog,
            self.year,
            &categories,
            self.personal_inputs(),
            &self.personal_events,
        )
    }

    /// Resolves events and builds the year grid.
    pub fn build_calendar(&self, catalog: &HolidayCatalog, today: NaiveDate) -> Option<YearCalendar> {
        let events = self.resolve_events(catalog);
        build_year_with_events(self.year, &events, &self.normalized_images(), today)
    }

    /// `<name>_Calendar_<year>.pdf`
    pub fn output_file_name(&self) -> String {
        output_file_name(&self.name, self.year, "pdf")
    }
}

/// Returns the canonical spelling of a month name, ignoring case.
pub fn canonical_month_name(name: &str) -> Option<&'static str> {
    MONTH_NAMES
        .iter()
        .copied()
        .find(|m| m.eq_ignore_ascii_case(name.trim()))
}

/// Builds `<name>_Calendar_<year>.<ext>`.
///
/// Whitespace runs in the name become a single `_`, and any other character
/// that is not alphanumeric, `-` or `_` becomes `_`, so the result is always a
/// plain file name inside the output directory.
pub fn output_file_name(name: &str, year: i32, extension: &str) -> String {
    let words: Vec<String> = name.split_whitespace().map(sanitize_file_word).collect();
    let stem = if words.is_empty() {
        "Calendar".to_string()
    } else {
        format!("{}_Calendar", words.join("_"))
    };
    format!("{stem}_{year}.{extension}")
}

fn sanitize_file_word(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
