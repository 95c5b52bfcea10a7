//! Rendering errors including I/O operations.

use calprint_core::calendar::RequestError;
use thiserror::Error;

/// Errors raised while fetching an image resource.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("Server returned {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed data URL: {0}")]
    DataUrl(String),

    #[error("Image not found: {0}")]
    NotFound(String),
}

/// Errors that abort rendering of the full document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error("Template asset {name} unavailable: {source}")]
    TemplateAsset {
        name: String,
        #[source]
        source: AssetError,
    },

    #[error("Image load failed: {0}")]
    Asset(#[from] AssetError),

    #[error("Failed to decode image {reference}: {reason}")]
    Decode { reference: String, reason: String },

    #[error("Could not build a calendar for year {0}")]
    Calendar(i32),

    #[error("Invalid template geometry: {0}")]
    Geometry(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_asset_error_display() {
        let error = RenderError::TemplateAsset {
            name: "calendar.png".to_string(),
            source: AssetError::NotFound("calendar.png".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "Template asset calendar.png unavailable: Image not found: calendar.png"
        );
    }

    #[test]
    fn test_request_error_converts() {
        let error: RenderError = RequestError::YearOutOfRange(0).into();
        assert_eq!(
            error.to_string(),
            "Invalid request: Year out of range: 0 (expected 1..=9999)"
        );
    }
}
