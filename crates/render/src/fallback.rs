//! Placeholder document emitted when the full pipeline fails.

use calprint_core::calendar::{Rgb, TextPlacement};

use crate::pdf::PdfBuilder;

/// US Letter, portrait.
const LETTER_WIDTH_MM: f32 = 215.9;
const LETTER_HEIGHT_MM: f32 = 279.4;

fn line(text: String, y: f32, font_size: f32) -> TextPlacement {
    TextPlacement {
        text,
        x: 20.0,
        y,
        font_size,
        color: Rgb::BLACK,
    }
}

/// A single page naming the user and year. Never fails.
pub fn fallback_document(name: &str, year: i32) -> Vec<u8> {
    let title = if name.trim().is_empty() {
        format!("{year} Calendar")
    } else {
        format!("{}'s {year} Calendar", name.trim())
    };

    let mut builder = PdfBuilder::new(LETTER_WIDTH_MM, LETTER_HEIGHT_MM).uncompressed();
    let mut page = builder.new_page();
    page.draw_text(&line(title, 30.0, 24.0));
    page.draw_text(&line("PDF generation encountered an error.".to_string(), 50.0, 14.0));
    page.draw_text(&line("Please try again or contact support.".to_string(), 60.0, 14.0));
    builder.add_page(page);
    builder.finish()
}
