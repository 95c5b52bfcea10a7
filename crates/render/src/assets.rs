//! Image sources.
//!
//! Images are referenced by strings: `data:` URLs from an upload form,
//! `http(s)://` URLs, or filesystem paths relative to a base directory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::AssetError;

/// Fetches the raw bytes of an image resource.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Loads the image behind `reference`.
    async fn load(&self, reference: &str) -> Result<Vec<u8>, AssetError>;
}

/// Loads images from data URLs, HTTP and the local filesystem.
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_dir: PathBuf,
    http: reqwest::Client,
}

impl AssetLoader {
    /// Creates a loader resolving relative paths against `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn resolve_path(&self, reference: &str) -> PathBuf {
        let path = Path::new(reference);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, AssetError> {
        let fetch_error = |e: reqwest::Error| AssetError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.http.get(url).send().await.map_err(fetch_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().await.map_err(fetch_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageSource for AssetLoader {
    async fn load(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        if reference.starts_with("data:") {
            return decode_data_url(reference);
        }
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return self.fetch(reference).await;
        }

        let path = self.resolve_path(reference);
        tracing::debug!(path = %path.display(), "Reading image from disk");
        tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
            _ => AssetError::Read {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })
    }
}

/// Decodes a base64 `data:` URL into bytes.
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, AssetError> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| AssetError::DataUrl("missing data: scheme".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| AssetError::DataUrl("missing payload separator".to_string()))?;
    if !meta.ends_with(";base64") {
        return Err(AssetError::DataUrl("only base64 payloads are supported".to_string()));
    }
    STANDARD
        .decode(payload.trim())
        .map_err(|e| AssetError::DataUrl(e.to_string()))
}

/// Serves images from memory, keyed by reference.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageSource {
    images: HashMap<String, Vec<u8>>,
}

impl InMemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, reference: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(reference, bytes);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, bytes: Vec<u8>) {
        self.images.insert(reference.into(), bytes);
    }
}

#[async_trait]
impl ImageSource for InMemoryImageSource {
    async fn load(&self, reference: &str) -> Result<Vec<u8>, AssetError> {
        self.images
            .get(reference)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        let bytes = decode_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn test_decode_data_url_rejects_plain_payload() {
        assert!(matches!(
            decode_data_url("data:text/plain,hello"),
            Err(AssetError::DataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64"),
            Err(AssetError::DataUrl(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(AssetError::DataUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_loader_reads_relative_paths() {
        let dir = std::env::temp_dir().join(format!("calprint-assets-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("cake.png"), b"png-bytes").await.unwrap();

        let loader = AssetLoader::new(&dir);
        assert_eq!(loader.load("cake.png").await.unwrap(), b"png-bytes");
        assert!(matches!(
            loader.load("missing.png").await,
            Err(AssetError::NotFound(_))
        ));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_loader_decodes_data_urls() {
        let loader = AssetLoader::new(".");
        assert_eq!(
            loader.load("data:image/jpeg;base64,aGVsbG8=").await.unwrap(),
            b"hello"
        );
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemoryImageSource::new().with_image("a.png", vec![1, 2, 3]);
        assert_eq!(source.load("a.png").await.unwrap(), vec![1, 2, 3]);
        assert!(source.load("b.png").await.is_err());
    }
}
