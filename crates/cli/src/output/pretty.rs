//! Pretty output formatting.

use calprint_core::calendar::{
    CalendarMonth, Event, HolidayCategory, YearCalendar, DAY_NAMES,
};

use crate::commands::RenderSummary;

/// Format holiday categories for display.
pub fn format_categories(categories: &[HolidayCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    let mut output = format!("CATEGORIES ({})\n", categories.len());
    output.push_str(&"-".repeat(40));
    for category in categories {
        let default = if category.enabled_by_default {
            " (default)"
        } else {
            ""
        };
        output.push_str(&format!(
            "\n{}{}\n  ID: {}\n  {}\n",
            category.name, default, category.id, category.description
        ));
    }
    output
}

fn format_event_line(event: &Event, approximate: &[&str]) -> String {
    let mut line = format!("{}  {}", event.date.format("%a %b %d"), event.title);
    if let Some(category) = event.category {
        line.push_str(&format!(" [{}]", category));
    } else {
        line.push_str(&format!(" [{}]", event.kind.as_str()));
    }
    if approximate.contains(&event.id.as_str()) {
        line.push_str(" (approx.)");
    }
    line
}

/// Format holidays for display, flagging approximate dates.
pub fn format_holidays(year: i32, holidays: &[Event], approximate: &[&str]) -> String {
    if holidays.is_empty() {
        return format!("No holidays found for {year}.");
    }
    let mut sorted: Vec<&Event> = holidays.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut output = format!("HOLIDAYS {year} ({})\n", holidays.len());
    output.push_str(&"-".repeat(40));
    for event in sorted {
        output.push_str(&format!("\n{}", format_event_line(event, approximate)));
    }
    output
}

/// Format a month as a text grid followed by its events.
///
/// Every day cell is five columns wide; days carrying events get a `*` in the
/// last column. Weeks without any day of the
/// month are omitted.
pub fn format_month(month: &CalendarMonth) -> String {
    let mut output = format!("{} {}\n", month.month_name, month.year);
    let header: Vec<String> = DAY_NAMES.iter().map(|d| format!("{:>4} ", &d[..2])).collect();
    output.push_str(header.join("").trim_end());

    for week in month.dates.chunks(7) {
        if !week.iter().any(|d| d.is_current_month) {
            continue;
        }
        let cells: String = week
            .iter()
            .map(|d| {
                if !d.is_current_month {
                    " ".repeat(5)
                } else {
                    let marker = if d.events.is_empty() { ' ' } else { '*' };
                    format!("{:>4}{marker}", d.day)
                }
            })
            .collect();
        output.push('\n');
        output.push_str(cells.trim_end());
    }

    let events: Vec<&Event> = month
        .current_month_dates()
        .flat_map(|d| d.events.iter())
        .collect();
    if !events.is_empty() {
        output.push('\n');
        for event in events {
            output.push_str(&format!("\n  {}", format_event_line(event, &[])));
        }
    }
    if let Some(image) = &month.image {
        output.push_str(&format!("\n  Photo: {image}"));
    }
    output
}

/// Format every month of a year.
pub fn format_year(year: &YearCalendar) -> String {
    year.months
        .iter()
        .map(format_month)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format the result of a render.
pub fn format_render_summary(summary: &RenderSummary) -> String {
    let mut output = if summary.is_fallback {
        format!("Wrote fallback document {}", summary.path)
    } else {
        format!(
            "Wrote {} ({} pages, {} template)",
            summary.path, summary.page_count, summary.template
        )
    };
    for warning in &summary.warnings {
        output.push_str(&format!("\n  warning: {warning}"));
    }
    output
}
