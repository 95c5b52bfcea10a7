//! Renderer configuration with validation.

use calprint_core::calendar::TemplateGeometry;

use crate::error::{RenderError, Result};

pub const DEFAULT_BACKGROUND_ASSET: &str = "calendar.png";
pub const DEFAULT_CAKE_ASSET: &str = "cake.png";
pub const DEFAULT_HEART_ASSET: &str = "heart.png";

/// Template assets and page geometry (validated).
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Reference of the full-page frame image.
    pub background_asset: String,
    /// Reference of the birthday icon.
    pub cake_asset: String,
    /// Reference of the anniversary icon.
    pub heart_asset: String,
    pub geometry: TemplateGeometry,
}

impl RenderConfig {
    /// Create and validate a renderer config.
    pub fn new(
        background_asset: impl Into<String>,
        cake_asset: impl Into<String>,
        heart_asset: impl Into<String>,
        geometry: TemplateGeometry,
    ) -> Result<Self> {
        validate_geometry(&geometry)?;
        Ok(Self {
            background_asset: background_asset.into(),
            cake_asset: cake_asset.into(),
            heart_asset: heart_asset.into(),
            geometry,
        })
    }

    /// Default asset names with the given geometry.
    pub fn with_geometry(geometry: TemplateGeometry) -> Result<Self> {
        Self::new(
            DEFAULT_BACKGROUND_ASSET,
            DEFAULT_CAKE_ASSET,
            DEFAULT_HEART_ASSET,
            geometry,
        )
    }

    /// Default asset names and the calibrated A3 geometry.
    pub fn with_defaults() -> Self {
        Self {
            background_asset: DEFAULT_BACKGROUND_ASSET.to_string(),
            cake_asset: DEFAULT_CAKE_ASSET.to_string(),
            heart_asset: DEFAULT_HEART_ASSET.to_string(),
            geometry: TemplateGeometry::default(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn validate_geometry(geometry: &TemplateGeometry) -> Result<()> {
    let positive = [
        ("pageWidth", geometry.page_width),
        ("pageHeight", geometry.page_height),
        ("cellWidth", geometry.cell_width),
        ("cellHeight", geometry.cell_height),
        ("dayFontSize", geometry.day_font_size),
        ("eventFontSize", geometry.event_font_size),
        ("iconSize", geometry.icon_size),
    ];
    for (field, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(RenderError::Geometry(format!("{field} must be positive, got {value}")));
        }
    }
    if geometry.columns == 0 || geometry.columns > 7 {
        return Err(RenderError::Geometry(format!(
            "columns must be within 1..=7, got {}",
            geometry.columns
        )));
    }
    if geometry.rows == 0 || geometry.rows > 6 {
        return Err(RenderError::Geometry(format!(
            "rows must be within 1..=6, got {}",
            geometry.rows
        )));
    }
    Ok(())
}
