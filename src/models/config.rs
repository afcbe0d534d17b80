use nearest_resample::ResizeMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::ResizeConfig;
use crate::services::filename_template::{default_template, ARCHIVE_TEMPLATE};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Resize mode and parameters
    #[serde(default)]
    pub resize: ResizeConfig,

    /// Per-image filename template (None = default for the mode)
    #[serde(default)]
    pub filename_template: Option<String>,

    /// Archive name template, without the .zip extension
    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    /// Maximum number of images resized at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Where exported files go (None = current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_archive_name() -> String {
    ARCHIVE_TEMPLATE.to_string()
}

fn default_max_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when the
    /// file is absent, unreadable, or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        mode = %config.resize.mode(),
                        max_concurrency = config.max_concurrency,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    %e,
                    path = %path.display(),
                    "Failed to read config, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let mut config: Self = serde_yaml::from_str(content)?;
        if config.max_concurrency == 0 {
            config.max_concurrency = 1;
        }
        Ok(config)
    }

    /// The per-image filename template for `mode`
    pub fn filename_template(&self, mode: ResizeMode) -> &str {
        self.filename_template
            .as_deref()
            .unwrap_or_else(|| default_template(mode))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resize: ResizeConfig::default(),
            filename_template: None,
            archive_name: default_archive_name(),
            max_concurrency: default_max_concurrency(),
            output_dir: None,
        }
    }
}
