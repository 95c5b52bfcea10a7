//! The rendering pipeline: resolve, lay out, load images, emit pages.
//!
//! Month photos load one after another in page order. A photo that fails to
//! load or decode is skipped with a warning. Any other failure replaces the
//! whole document with the single-page fallback.

use std::collections::HashMap;
use std::sync::Arc;

use calprint_core::calendar::{
    layout_year, CalendarRequest, HolidayCatalog, IconKind, PageLayout, TemplateStyle,
};
use chrono::NaiveDate;

use crate::assets::ImageSource;
use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::fallback::fallback_document;
use crate::pdf::{DecodedImage, ImageHandle, PdfBuilder};

/// The produced artifact plus the metadata needed to name and report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub year: i32,
    pub template: TemplateStyle,
    pub file_name: String,
    pub page_count: usize,
    /// True when the pipeline failed and `bytes` holds the placeholder page.
    pub is_fallback: bool,
    /// Non-fatal problems, such as skipped photos.
    pub warnings: Vec<String>,
}

impl RenderedDocument {
    fn fallback(request: &CalendarRequest, error: &RenderError) -> Self {
        Self {
            bytes: fallback_document(&request.name, request.year),
            year: request.year,
            template: request.template_style(),
            file_name: request.output_file_name(),
            page_count: 1,
            is_fallback: true,
            warnings: vec![error.to_string()],
        }
    }
}

/// Frame and icon images embedded once per document.
struct TemplateImages {
    background: ImageHandle,
    cake: ImageHandle,
    heart: ImageHandle,
}

impl TemplateImages {
    fn icon(&self, icon: IconKind) -> &ImageHandle {
        match icon {
            IconKind::Cake => &self.cake,
            IconKind::Heart => &self.heart,
        }
    }
}

/// Renders calendar requests into PDF documents.
pub struct CalendarRenderer {
    catalog: Arc<HolidayCatalog>,
    source: Arc<dyn ImageSource>,
    template_source: Arc<dyn ImageSource>,
    config: RenderConfig,
}

impl CalendarRenderer {
    pub fn new(
        catalog: Arc<HolidayCatalog>,
        source: Arc<dyn ImageSource>,
        config: RenderConfig,
    ) -> Self {
        Self {
            catalog,
            template_source: Arc::clone(&source),
            source,
            config,
        }
    }

    /// Loads template artwork from `source` instead of the photo source.
    pub fn with_template_source(mut self, source: Arc<dyn ImageSource>) -> Self {
        self.template_source = source;
        self
    }

    pub fn catalog(&self) -> &HolidayCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders `request`, always returning a document.
    pub async fn render(&self, request: &CalendarRequest) -> RenderedDocument {
        self.render_as_of(request, chrono::Local::now().date_naive())
            .await
    }

    /// Like [`render`](Self::render) with an explicit "today" for cell flags.
    pub async fn render_as_of(&self, request: &CalendarRequest, today: NaiveDate) -> RenderedDocument {
        match self.try_render(request, today).await {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    year = request.year,
                    "Calendar rendering failed, emitting fallback document"
                );
                RenderedDocument::fallback(request, &e)
            }
        }
    }

    /// Renders `request`, propagating the first fatal error.
    pub async fn try_render(&self, request: &CalendarRequest, today: NaiveDate) -> Result<RenderedDocument> {
        request.validate()?;

        let mut warnings = Vec::new();
        let (_, unknown) = request.categories();
        for category in unknown {
            tracing::warn!(category = %category, "Ignoring unknown holiday category");
            warnings.push(format!("Unknown holiday category ignored: {category}"));
        }

        let calendar = request
            .build_calendar(&self.catalog, today)
            .ok_or(RenderError::Calendar(request.year))?;
        let style = request.template_style();
        let geometry = &self.config.geometry;
        let pages = layout_year(&calendar, geometry, style);

        let mut builder = PdfBuilder::new(geometry.page_width, geometry.page_height);
        let template = self.load_template(&mut builder).await?;

        let mut photos: HashMap<String, ImageHandle> = HashMap::new();
        for page in &pages {
            let photo = match &page.photo {
                Some(placement) => {
                    match self.load_photo(&mut builder, &mut photos, &placement.reference).await {
                        Ok(handle) => Some(handle),
                        Err(e) => {
                            tracing::warn!(
                                month = %page.month_name,
                                error = %e,
                                "Skipping month photo"
                            );
                            warnings.push(format!("{}: {e}", page.month_name));
                            None
                        }
                    }
                }
                None => None,
            };
            draw_page(&mut builder, page, photo.as_ref(), &template);
        }

        let page_count = builder.page_count();
        let bytes = builder.finish();

        tracing::info!(
            year = request.year,
            template = %style,
            pages = page_count,
            bytes = bytes.len(),
            warnings = warnings.len(),
            "Calendar rendered"
        );

        Ok(RenderedDocument {
            bytes,
            year: request.year,
            template: style,
            file_name: request.output_file_name(),
            page_count,
            is_fallback: false,
            warnings,
        })
    }

    async fn load_template(&self, builder: &mut PdfBuilder) -> Result<TemplateImages> {
        Ok(TemplateImages {
            background: self
                .load_template_asset(builder, &self.config.background_asset)
                .await?,
            cake: self.load_template_asset(builder, &self.config.cake_asset).await?,
            heart: self.load_template_asset(builder, &self.config.heart_asset).await?,
        })
    }

    async fn load_template_asset(&self, builder: &mut PdfBuilder, name: &str) -> Result<ImageHandle> {
        let bytes = self
            .template_source
            .load(name)
            .await
            .map_err(|source| RenderError::TemplateAsset {
                name: name.to_string(),
                source,
            })?;
        let image = DecodedImage::decode(name, &bytes)?;
        Ok(builder.embed_image(&image))
    }

    async fn load_photo(
        &self,
        builder: &mut PdfBuilder,
        cache: &mut HashMap<String, ImageHandle>,
        reference: &str,
    ) -> Result<ImageHandle> {
        if let Some(handle) = cache.get(reference) {
            return Ok(handle.clone());
        }
        let bytes = self.source.load(reference).await?;
        let image = DecodedImage::decode(reference, &bytes)?;
        let handle = builder.embed_image(&image);
        cache.insert(reference.to_string(), handle.clone());
        Ok(handle)
    }
}

/// Composites one page: photo, then template frame, then text and icons.
fn draw_page(
    builder: &mut PdfBuilder,
    page: &PageLayout,
    photo: Option<&ImageHandle>,
    template: &TemplateImages,
) {
    let mut canvas = builder.new_page();

    if let (Some(handle), Some(placement)) = (photo, &page.photo) {
        canvas.draw_image(handle, placement.rect);
    }
    canvas.draw_image(&template.background, page.template);
    for text in &page.texts {
        canvas.draw_text(text);
    }
    for icon in &page.icons {
        canvas.draw_image(template.icon(icon.icon), icon.rect);
    }

    builder.add_page(canvas);
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use calprint_core::calendar::HolidayCategoryId;

    use super::*;
    use crate::assets::InMemoryImageSource;

    fn png_bytes() -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 120, 200, 255]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn template_source() -> InMemoryImageSource {
        InMemoryImageSource::new()
            .with_image("calendar.png", png_bytes())
            .with_image("cake.png", png_bytes())
            .with_image("heart.png", png_bytes())
    }

    fn renderer(source: InMemoryImageSource) -> CalendarRenderer {
        CalendarRenderer::new(
            Arc::new(HolidayCatalog::standard()),
            Arc::new(source),
            RenderConfig::with_defaults(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn request() -> CalendarRequest {
        CalendarRequest::new("Asha Rao", 2026)
            .with_birthdate("1990-05-14")
            .with_anniversary("2015-05-14")
            .with_additional_dates("2024-12-25 - Christmas\n07-04 - Picnic")
            .with_categories(&[HolidayCategoryId::IndianNational, HolidayCategoryId::HinduFestivals])
    }

    #[tokio::test]
    async fn test_render_produces_twelve_pages() {
        let source = template_source().with_image("jan.png", png_bytes());
        let request = request()
            .with_image("January", "jan.png")
            .with_image("July", "jan.png");

        let document = renderer(source).render_as_of(&request, today()).await;

        assert!(!document.is_fallback);
        assert_eq!(document.page_count, 12);
        assert_eq!(document.year, 2026);
        assert_eq!(document.template, TemplateStyle::Classic);
        assert_eq!(document.file_name, "Asha_Rao_Calendar_2026.pdf");
        assert!(document.warnings.is_empty());
        assert!(document.bytes.starts_with(b"%PDF-"));
        assert!(String::from_utf8_lossy(&document.bytes).contains("/Count 12"));
    }

    #[tokio::test]
    async fn test_missing_photo_is_skipped_with_warning() {
        let request = request().with_image("March", "missing.png");

        let document = renderer(template_source()).render_as_of(&request, today()).await;

        assert!(!document.is_fallback);
        assert_eq!(document.page_count, 12);
        assert_eq!(document.warnings.len(), 1);
        assert!(document.warnings[0].starts_with("March:"));
    }

    #[tokio::test]
    async fn test_undecodable_photo_is_skipped_with_warning() {
        let source = template_source().with_image("broken.png", b"not a png".to_vec());
        let request = request().with_image("April", "broken.png");

        let document = renderer(source).render_as_of(&request, today()).await;

        assert!(!document.is_fallback);
        assert_eq!(document.warnings.len(), 1);
        assert!(document.warnings[0].contains("broken.png"));
    }

    #[tokio::test]
    async fn test_minimal_template_does_not_load_photos() {
        let request = request()
            .with_image("March", "missing.png")
            .with_template("minimal");

        let document = renderer(template_source()).render_as_of(&request, today()).await;

        assert!(!document.is_fallback);
        assert_eq!(document.template, TemplateStyle::Minimal);
        assert!(document.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_missing_template_asset_falls_back() {
        let source = InMemoryImageSource::new()
            .with_image("cake.png", png_bytes())
            .with_image("heart.png", png_bytes());

        let document = renderer(source).render_as_of(&request(), today()).await;

        assert!(document.is_fallback);
        assert_eq!(document.page_count, 1);
        assert_eq!(document.file_name, "Asha_Rao_Calendar_2026.pdf");
        assert!(document.warnings[0].contains("calendar.png"));
        let text = String::from_utf8_lossy(&document.bytes);
        assert!(text.contains("(Asha Rao's 2026 Calendar) Tj"));
        assert!(text.contains("/Count 1"));
    }

    #[tokio::test]
    async fn test_invalid_year_falls_back() {
        let request = CalendarRequest::new("Jo", 0);
        let document = renderer(template_source()).render_as_of(&request, today()).await;

        assert!(document.is_fallback);
        assert_eq!(document.year, 0);
    }

    #[tokio::test]
    async fn test_try_render_propagates_template_error() {
        let result = renderer(InMemoryImageSource::new())
            .try_render(&request(), today())
            .await;
        assert!(matches!(result, Err(RenderError::TemplateAsset { name, .. }) if name == "calendar.png"));
    }

    #[tokio::test]
    async fn test_separate_template_source() {
        let photos = InMemoryImageSource::new().with_image("may.png", png_bytes());
        let request = request().with_image("May", "may.png");

        let document = renderer(photos)
            .with_template_source(Arc::new(template_source()))
            .render_as_of(&request, today())
            .await;

        assert!(!document.is_fallback);
        assert!(document.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_category_is_reported() {
        let mut request = request();
        request.enabled_holiday_categories.push("us-federal".to_string());

        let document = renderer(template_source()).render_as_of(&request, today()).await;

        assert!(!document.is_fallback);
        assert_eq!(
            document.warnings,
            vec!["Unknown holiday category ignored: us-federal".to_string()]
        );
    }
}
