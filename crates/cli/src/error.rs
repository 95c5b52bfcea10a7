//! CLI error types.

use calprint_core::calendar::RequestError;
use calprint_render::RenderError;
use thiserror::Error;

/// Result type alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request: {0}")]
    Request(#[from] RequestError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Invalid geometry file {path}: {reason}")]
    Geometry { path: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display() {
        let error = CliError::Read {
            path: "request.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };
        assert_eq!(error.to_string(), "Failed to read request.json: No such file");
    }

    #[test]
    fn test_render_error_is_transparent() {
        let error: CliError = RenderError::Geometry("rows must be within 1..=6, got 9".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Invalid template geometry: rows must be within 1..=6, got 9"
        );
    }
}
