//! PDF emission on top of `pdf-writer`.
//!
//! Callers work in millimetres with a top-left origin, as produced by the
//! layout engine. Conversion to PDF points with a bottom-left origin happens
//! here.

use calprint_core::calendar::{Rect, TextPlacement};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use crate::error::{RenderError, Result};

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const FONT_NAME: Name<'static> = Name(b"F1");

fn pt(mm: f32) -> f32 {
    mm * POINTS_PER_MM
}

/// A decoded raster ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    /// Present only when some pixel is not fully opaque.
    pub alpha: Option<Vec<u8>>,
}

impl DecodedImage {
    /// Decodes PNG or JPEG bytes.
    pub fn decode(reference: &str, bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| RenderError::Decode {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }
}

/// An image embedded once and drawable on any page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    name: String,
    id: Ref,
}

/// Characters WinAnsiEncoding places in 0x80..=0x9f, indexed from 0x80.
/// Unassigned slots are `None`.
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('\u{20ac}'), None, Some('\u{201a}'), Some('\u{0192}'),
    Some('\u{201e}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02c6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017d}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201c}'),
    Some('\u{201d}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02dc}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203a}'),
    Some('\u{0153}'), None, Some('\u{017e}'), Some('\u{0178}'),
];

/// Maps WinAnsi-representable characters to bytes and the rest to `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u8,
            _ => WIN_ANSI_HIGH
                .iter()
                .position(|&slot| slot == Some(c))
                .map_or(b'?', |index| 0x80 + index as u8),
        })
        .collect()
}

/// Drawing operations for one page.
pub struct PageCanvas {
    content: Content,
    images: Vec<ImageHandle>,
    height_mm: f32,
}

impl PageCanvas {
    fn new(height_mm: f32) -> Self {
        Self {
            content: Content::new(),
            images: Vec::new(),
            height_mm,
        }
    }

    /// Draws an embedded image stretched over `rect`.
    pub fn draw_image(&mut self, image: &ImageHandle, rect: Rect) {
        if !self.images.contains(image) {
            self.images.push(image.clone());
        }
        let bottom = self.height_mm - rect.y - rect.height;
        self.content.save_state();
        self.content.transform([
            pt(rect.width),
            0.0,
            0.0,
            pt(rect.height),
            pt(rect.x),
            pt(bottom),
        ]);
        self.content.x_object(Name(image.name.as_bytes()));
        self.content.restore_state();
    }

    /// Draws a line of Helvetica text at its baseline.
    pub fn draw_text(&mut self, text: &TextPlacement) {
        let bytes = encode_win_ansi(&text.text);
        let color = text.color;
        self.content.set_fill_rgb(
            f32::from(color.0) / 255.0,
            f32::from(color.1) / 255.0,
            f32::from(color.2) / 255.0,
        );
        self.content
            .begin_text()
            .set_font(FONT_NAME, text.font_size)
            .next_line(pt(text.x), pt(self.height_mm - text.y))
            .show(Str(&bytes))
            .end_text();
    }
}

/// Incrementally builds a PDF with fixed-size pages.
pub struct PdfBuilder {
    pdf: Pdf,
    next_id: i32,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_ids: Vec<Ref>,
    width_mm: f32,
    height_mm: f32,
    compress: bool,
}

impl PdfBuilder {
    /// Starts a document whose pages are `width_mm` × `height_mm`.
    pub fn new(width_mm: f32, height_mm: f32) -> Self {
        let mut builder = Self {
            pdf: Pdf::new(),
            next_id: 1,
            catalog_id: Ref::new(1),
            pages_id: Ref::new(1),
            font_id: Ref::new(1),
            page_ids: Vec::new(),
            width_mm,
            height_mm,
            compress: true,
        };
        builder.catalog_id = builder.alloc();
        builder.pages_id = builder.alloc();
        builder.font_id = builder.alloc();
        builder
            .pdf
            .type1_font(builder.font_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        builder
    }

    /// Leaves content streams uncompressed.
    pub fn uncompressed(mut self) -> Self {
        self.compress = false;
        self
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Embeds an image as a Flate-compressed RGB XObject with an optional soft mask.
    pub fn embed_image(&mut self, image: &DecodedImage) -> ImageHandle {
        let id = self.alloc();
        let name = format!("Im{}", id.get());

        let mask_id = image.alpha.as_ref().map(|alpha| {
            let mask_id = self.alloc();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
            let mut mask = self.pdf.image_xobject(mask_id, &compressed);
            mask.filter(Filter::FlateDecode);
            mask.width(image.width as i32);
            mask.height(image.height as i32);
            mask.color_space().device_gray();
            mask.bits_per_component(8);
            mask.finish();
            mask_id
        });

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&image.rgb, 6);
        let mut xobj = self.pdf.image_xobject(id, &compressed);
        xobj.filter(Filter::FlateDecode);
        xobj.width(image.width as i32);
        xobj.height(image.height as i32);
        xobj.color_space().device_rgb();
        xobj.bits_per_component(8);
        if let Some(mask_id) = mask_id {
            xobj.s_mask(mask_id);
        }
        xobj.finish();

        ImageHandle { name, id }
    }

    /// Returns an empty canvas sized for this document's pages.
    pub fn new_page(&self) -> PageCanvas {
        PageCanvas::new(self.height_mm)
    }

    /// Writes a finished canvas as the next page.
    pub fn add_page(&mut self, canvas: PageCanvas) {
        let page_id = self.alloc();
        let content_id = self.alloc();

        let raw = canvas.content.finish();
        if self.compress {
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            self.pdf
                .stream(content_id, &compressed)
                .filter(Filter::FlateDecode);
        } else {
            self.pdf.stream(content_id, raw.as_slice());
        }

        let mut page = self.pdf.page(page_id);
        page.media_box(PdfRect::new(0.0, 0.0, pt(self.width_mm), pt(self.height_mm)))
            .parent(self.pages_id)
            .contents(content_id);
        {
            let mut resources = page.resources();
            resources.fonts().pair(FONT_NAME, self.font_id);
            if !canvas.images.is_empty() {
                let mut x_objects = resources.x_objects();
                for image in &canvas.images {
                    x_objects.pair(Name(image.name.as_bytes()), image.id);
                }
            }
        }
        page.finish();

        self.page_ids.push(page_id);
    }

    /// Writes the page tree and returns the serialized document.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.pdf
            .pages(self.pages_id)
            .kids(self.page_ids.iter().copied())
            .count(self.page_ids.len() as i32);
        self.pdf.finish()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calprint_core::calendar::Rgb;

    use super::*;

    fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 10, 10, alpha]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_opaque_png_has_no_alpha() {
        let image = DecodedImage::decode("a.png", &png_bytes(3, 2, 255)).unwrap();

        assert_eq!((image.width, image.height), (3, 2));
        assert_eq!(image.rgb.len(), 18);
        assert_eq!(&image.rgb[..3], &[200, 10, 10]);
        assert!(image.alpha.is_none());
    }

    #[test]
    fn test_decode_translucent_png_keeps_alpha() {
        let image = DecodedImage::decode("a.png", &png_bytes(2, 2, 128)).unwrap();
        assert_eq!(image.alpha, Some(vec![128; 4]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = DecodedImage::decode("bad.png", b"not an image").unwrap_err();
        assert!(matches!(err, RenderError::Decode { reference, .. } if reference == "bad.png"));
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Diwali"), b"Diwali".to_vec());
        assert_eq!(encode_win_ansi("Café"), vec![b'C', b'a', b'f', 0xe9]);
        assert_eq!(encode_win_ansi("🎂x"), b"?x".to_vec());
        assert_eq!(encode_win_ansi("Mom\u{2019}s"), vec![b'M', b'o', b'm', 0x92, b's']);
        assert_eq!(encode_win_ansi("\u{20ac}5 \u{2013} \u{2014}"), vec![0x80, b'5', b' ', 0x96, b' ', 0x97]);
        assert_eq!(encode_win_ansi("\u{201c}Hi\u{201d}\u{2026}"), vec![0x93, b'H', b'i', 0x94, 0x85]);
        // C1 controls are not printable in WinAnsi
        assert_eq!(encode_win_ansi("\u{0081}\u{0092}"), b"??".to_vec());
    }

    #[test]
    fn test_builder_writes_pages_and_text() {
        let mut builder = PdfBuilder::new(420.0, 297.0).uncompressed();
        let image = builder.embed_image(&DecodedImage::decode("a.png", &png_bytes(2, 2, 255)).unwrap());

        for _ in 0..2 {
            let mut canvas = builder.new_page();
            canvas.draw_image(&image, Rect::new(0.0, 0.0, 420.0, 297.0));
            canvas.draw_text(&TextPlacement {
                text: "Holi".to_string(),
                x: 10.0,
                y: 20.0,
                font_size: 10.0,
                color: Rgb::BLACK,
            });
            builder.add_page(canvas);
        }
        assert_eq!(builder.page_count(), 2);

        let bytes = builder.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(text.contains("/Count 2"));
        assert!(text.contains("(Holi) Tj"));
        assert!(text.contains("/Helvetica"));
    }
}
