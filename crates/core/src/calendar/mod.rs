mod dates;
mod error;
mod grid;
mod holidays;
mod layout;
mod personal;
mod requests;
mod resolver;
mod types;

pub use dates::{
    date_with_rollover, days_in_month, easter_date, easter_offset, first_of_month, good_friday,
    last_of_month, last_weekday_of_month, nth_weekday_of_month,
};
pub use error::{CategoryError, RequestError};
pub use grid::{
    build_month, build_month_as_of, build_year, build_year_with_events, grid_start,
    group_events_by_date,
};
pub use holidays::{DateRule, HolidayCatalog, HolidayDefinition};
pub use layout::{
    fit_text, layout_month, layout_year, text_width, IconKind, IconPlacement, PageLayout,
    PhotoPlacement, Rect, Rgb, TemplateGeometry, TemplateStyle, TextPlacement, EVENT_PREFIX,
};
pub use personal::{
    parse_dated_line, parse_personal_dates, parse_single_date, MonthDay, ANNIVERSARY_ID,
    BIRTHDAY_ID,
};
pub use requests::{canonical_month_name, output_file_name, CalendarRequest};
pub use resolver::{merge_personal_events, resolve_events, PersonalInputs};
pub use types::{
    CalendarDate, CalendarMonth, Event, EventKind, HolidayCategory, HolidayCategoryId,
    YearCalendar, DAY_NAMES, GRID_CELLS, MONTH_NAMES,
};
