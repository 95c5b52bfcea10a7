//! Mapping of month grids onto the fixed page template.
//!
//! Everything here is measured in millimetres from the top-left corner of the
//! page. Text positions are baselines. The constants in [`TemplateGeometry`]
//! are calibrated by hand against the background artwork and have no meaning
//! outside of it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::personal::{ANNIVERSARY_ID, BIRTHDAY_ID};
use super::types::{CalendarMonth, YearCalendar};

/// Prefix drawn before every event line.
pub const EVENT_PREFIX: &str = "-";

/// An axis-aligned rectangle in millimetres, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const DARK_GRAY: Rgb = Rgb(50, 50, 50);

    /// Parses `#rrggbb` or `#rgb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Some(Rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }
}

/// Visual presets. They share geometry and differ in what they include.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateStyle {
    #[default]
    Classic,
    Modern,
    Minimal,
    Elegant,
}

impl TemplateStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateStyle::Classic => "classic",
            TemplateStyle::Modern => "modern",
            TemplateStyle::Minimal => "minimal",
            TemplateStyle::Elegant => "elegant",
        }
    }

    /// Resolves a template name, falling back to `classic` for unknown names.
    pub fn from_name(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// Returns true if month photos are drawn with this preset.
    pub fn includes_photos(&self) -> bool {
        !matches!(self, TemplateStyle::Minimal)
    }
}

impl fmt::Display for TemplateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateStyle {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(TemplateStyle::Classic),
            "modern" => Ok(TemplateStyle::Modern),
            "minimal" => Ok(TemplateStyle::Minimal),
            "elegant" => Ok(TemplateStyle::Elegant),
            _ => Err(()),
        }
    }
}

/// Calibrated positions of the template's photo window and date grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplateGeometry {
    pub page_width: f32,
    pub page_height: f32,

    /// Photo window, as fractions of the page plus a fixed top offset.
    pub photo_x_ratio: f32,
    pub photo_top: f32,
    pub photo_width_ratio: f32,
    pub photo_height_ratio: f32,

    pub grid_top: f32,
    pub grid_left: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub columns: usize,
    /// Rows the artwork has room for. Grid weeks past this are not drawn.
    pub rows: usize,

    pub day_font_size: f32,
    pub day_offset_x: f32,
    pub day_offset_y: f32,

    pub event_font_size: f32,
    pub event_offset_x: f32,
    pub event_offset_y: f32,
    pub event_line_spacing: f32,
    /// Event text may use the cell width minus this inset.
    pub event_width_inset: f32,

    pub icon_size: f32,
    /// Added to `cell_width - icon_size` to place the first icon.
    pub icon_offset_x: f32,
    pub icon_offset_y: f32,
    pub icon_gap: f32,
}

impl Default for TemplateGeometry {
    fn default() -> Self {
        Self {
            // A3 landscape
            page_width: 420.0,
            page_height: 297.0,

            photo_x_ratio: 0.58,
            photo_top: 15.0,
            photo_width_ratio: 0.38,
            photo_height_ratio: 0.55,

            grid_top: 150.0,
            grid_left: 31.0,
            cell_width: 35.0,
            cell_height: 26.0,
            columns: 7,
            rows: 5,

            day_font_size: 18.0,
            day_offset_x: 3.0,
            day_offset_y: 8.0,

            event_font_size: 10.0,
            event_offset_x: -20.0,
            event_offset_y: 14.0,
            event_line_spacing: 6.0,
            event_width_inset: 6.0,

            icon_size: 8.0,
            icon_offset_x: -47.0,
            icon_offset_y: 2.0,
            icon_gap: 2.0,
        }
    }
}

impl TemplateGeometry {
    /// The photo window for a page.
    pub fn photo_rect(&self) -> Rect {
        Rect::new(
            self.page_width * self.photo_x_ratio,
            self.photo_top,
            self.page_width * self.photo_width_ratio,
            self.page_height * self.photo_height_ratio,
        )
    }

    /// The full page.
    pub fn page_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.page_width, self.page_height)
    }

    /// Number of grid cells the template can show.
    pub fn visible_cells(&self) -> usize {
        self.columns * self.rows
    }

    /// Top-left corner of the cell at `index`, or `None` if it is clipped.
    pub fn cell_origin(&self, index: usize) -> Option<(f32, f32)> {
        if self.columns == 0 || index >= self.visible_cells() {
            return None;
        }
        let column = (index % self.columns) as f32;
        let row = (index / self.columns) as f32;
        Some((
            self.grid_left + column * self.cell_width,
            self.grid_top + row * self.cell_height,
        ))
    }
}

/// Decorations drawn in a cell corner for special personal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Cake,
    Heart,
}

impl IconKind {
    /// Icons in drawing order with the event id that triggers each.
    pub const TRIGGERS: [(IconKind, &'static str); 2] =
        [(IconKind::Cake, BIRTHDAY_ID), (IconKind::Heart, ANNIVERSARY_ID)];
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPlacement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IconPlacement {
    pub icon: IconKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoPlacement {
    pub reference: String,
    pub rect: Rect,
}

/// Everything drawn on one month's page, in layer order: photo, template, text and icons.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub month: u32,
    pub month_name: String,
    pub photo: Option<PhotoPlacement>,
    pub template: Rect,
    pub texts: Vec<TextPlacement>,
    pub icons: Vec<IconPlacement>,
}

/// Helvetica advance widths for printable ASCII, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const POINTS_PER_MM: f32 = 72.0 / 25.4;

fn char_width_units(c: char) -> u16 {
    let code = c as u32;
    if (32..127).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        556
    }
}

/// Width in millimetres of `text` set in Helvetica at `font_size` points.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width_units(c))).sum();
    units as f32 / 1000.0 * font_size / POINTS_PER_MM
}

/// Truncates `text` so it fits in `max_width` millimetres.
pub fn fit_text(text: &str, font_size: f32, max_width: f32) -> String {
    let mut width = 0.0;
    let mut fitted = String::new();
    for c in text.chars() {
        width += f32::from(char_width_units(c)) / 1000.0 * font_size / POINTS_PER_MM;
        if width > max_width {
            break;
        }
        fitted.push(c);
    }
    fitted
}

/// Lays out one month page.
///
/// Only cells of the current month get a day number, event lines and icons.
pub fn layout_month(month: &CalendarMonth, geometry: &TemplateGeometry, include_photo: bool) -> PageLayout {
    let photo = month
        .image
        .as_ref()
        .filter(|_| include_photo)
        .map(|reference| PhotoPlacement {
            reference: reference.clone(),
            rect: geometry.photo_rect(),
        });

    let mut texts = Vec::new();
    let mut icons = Vec::new();
    let max_event_width = geometry.cell_width - geometry.event_width_inset;

    for (index, cell) in month.dates.iter().enumerate() {
        let Some((x, y)) = geometry.cell_origin(index) else {
            break;
        };
        if !cell.is_current_month {
            continue;
        }

        texts.push(TextPlacement {
            text: cell.day.to_string(),
            x: x + geometry.day_offset_x,
            y: y + geometry.day_offset_y,
            font_size: geometry.day_font_size,
            color: Rgb::BLACK,
        });

        for (line, event) in cell.events.iter().enumerate() {
            if event.title.is_empty() {
                continue;
            }
            let text = format!("{EVENT_PREFIX}{}", event.title);
            texts.push(TextPlacement {
                text: fit_text(&text, geometry.event_font_size, max_event_width),
                x: x + geometry.event_offset_x,
                y: y + geometry.event_offset_y + line as f32 * geometry.event_line_spacing,
                font_size: geometry.event_font_size,
                color: event
                    .color
                    .as_deref()
                    .and_then(Rgb::from_hex)
                    .unwrap_or(Rgb::DARK_GRAY),
            });
        }

        let mut icon_x = x + geometry.cell_width - geometry.icon_size + geometry.icon_offset_x;
        for (icon, trigger) in IconKind::TRIGGERS {
            if cell.has_event_id(trigger) {
                icons.push(IconPlacement {
                    icon,
                    rect: Rect::new(
                        icon_x,
                        y + geometry.icon_offset_y,
                        geometry.icon_size,
                        geometry.icon_size,
                    ),
                });
                icon_x -= geometry.icon_size + geometry.icon_gap;
            }
        }
    }

    PageLayout {
        month: month.month,
        month_name: month.month_name.clone(),
        photo,
        template: geometry.page_rect(),
        texts,
        icons,
    }
}

/// Lays out one page per month, in calendar order.
pub fn layout_year(year: &YearCalendar, geometry: &TemplateGeometry, style: TemplateStyle) -> Vec<PageLayout> {
    year.months
        .iter()
        .map(|month| layout_month(month, geometry, style.includes_photos()))
        .collect()
}
