use std::{env, path::PathBuf};

/// CLI configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Template artwork directory (default: "assets")
    pub assets_dir: PathBuf,
    /// Where rendered PDFs are written (default: ".")
    pub output_dir: PathBuf,
    /// Base directory for relative month photo paths (default: ".")
    pub image_dir: PathBuf,
    /// Emit logs as JSON lines (default: false)
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CALPRINT_ASSETS_DIR` - Template artwork directory (default: "assets")
    /// - `CALPRINT_OUTPUT_DIR` - Output directory (default: ".")
    /// - `CALPRINT_IMAGE_DIR` - Month photo base directory (default: ".")
    /// - `CALPRINT_LOG_JSON` - `true` for JSON logs (default: false)
    pub fn from_env() -> Self {
        Self {
            assets_dir: env::var("CALPRINT_ASSETS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets")),
            output_dir: env::var("CALPRINT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            image_dir: env::var("CALPRINT_IMAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            log_json: env::var("CALPRINT_LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Replace directories with the ones given on the command line.
    pub fn with_overrides(
        mut self,
        assets_dir: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        image_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(dir) = assets_dir {
            self.assets_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.output_dir = dir;
        }
        if let Some(dir) = image_dir {
            self.image_dir = dir;
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            assets_dir: PathBuf::from("assets"),
            output_dir: PathBuf::from("."),
            image_dir: PathBuf::from("."),
            log_json: false,
        }
    }

    #[test]
    fn test_overrides_replace_only_given_dirs() {
        let config = config().with_overrides(None, Some(PathBuf::from("out")), None);

        assert_eq!(config.assets_dir, PathBuf::from("assets"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.image_dir, PathBuf::from("."));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("CALPRINT_ASSETS_DIR");
        env::remove_var("CALPRINT_OUTPUT_DIR");
        env::remove_var("CALPRINT_IMAGE_DIR");
        env::remove_var("CALPRINT_LOG_JSON");

        assert_eq!(Config::from_env(), config());
    }
}
