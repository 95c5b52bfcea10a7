//! Calendar Rendering - Imperative Shell.
//!
//! This crate orchestrates I/O around the pure functions in `calprint_core`:
//! it loads month photos and template artwork, composites each month onto the
//! fixed page template and writes the result as a PDF.
//!
//! # Architecture
//!
//! - **Functional Core** (`calprint_core`): event resolution, grids, page layout
//! - **Imperative Shell** (this crate): image loading, PDF emission, failure recovery
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use calprint_core::calendar::{CalendarRequest, HolidayCatalog};
//! use calprint_render::{AssetLoader, CalendarRenderer, RenderConfig};
//!
//! let renderer = CalendarRenderer::new(
//!     Arc::new(HolidayCatalog::standard()),
//!     Arc::new(AssetLoader::new("assets")),
//!     RenderConfig::with_defaults(),
//! );
//!
//! // Always yields a document, falling back to a placeholder page on failure
//! let document = renderer.render(&CalendarRequest::new("Asha", 2026)).await;
//! std::fs::write(&document.file_name, &document.bytes).unwrap();
//! ```

mod assets;
mod config;
mod error;
mod fallback;
mod pdf;
mod pipeline;

pub use assets::{decode_data_url, AssetLoader, ImageSource, InMemoryImageSource};
pub use config::{RenderConfig, DEFAULT_BACKGROUND_ASSET, DEFAULT_CAKE_ASSET, DEFAULT_HEART_ASSET};
pub use error::{AssetError, RenderError, Result};
pub use fallback::fallback_document;
pub use pdf::{DecodedImage, ImageHandle, PageCanvas, PdfBuilder};
pub use pipeline::{CalendarRenderer, RenderedDocument};
