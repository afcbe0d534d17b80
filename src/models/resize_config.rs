use nearest_resample::{ResizeMode, ResizeRequest};
use serde::Deserialize;

/// Resize mode as written in config.yaml (`scale` or `dimensions`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Scale,
    Dimensions,
}

impl From<ModeSetting> for ResizeMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Scale => ResizeMode::Scale,
            ModeSetting::Dimensions => ResizeMode::Dimensions,
        }
    }
}

/// Resize settings (the `resize:` section of config.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResizeConfig {
    /// Which mode to use
    #[serde(default)]
    pub mode: ModeSetting,

    /// Integer factor for scale mode
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Target width for dimensions mode
    #[serde(default)]
    pub width: Option<u32>,

    /// Target height for dimensions mode
    #[serde(default)]
    pub height: Option<u32>,
}

fn default_scale() -> u32 {
    2
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            mode: ModeSetting::Scale,
            scale: default_scale(),
            width: None,
            height: None,
        }
    }
}

impl ResizeConfig {
    /// Uniform scaling by `factor`
    pub fn scale(factor: u32) -> Self {
        Self {
            mode: ModeSetting::Scale,
            scale: factor,
            ..Default::default()
        }
    }

    /// Explicit width and/or height
    pub fn dimensions(width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            mode: ModeSetting::Dimensions,
            width,
            height,
            ..Default::default()
        }
    }

    /// The request the resampler should run
    pub fn request(&self) -> ResizeRequest {
        match self.mode {
            ModeSetting::Scale => ResizeRequest::Uniform { factor: self.scale },
            ModeSetting::Dimensions => ResizeRequest::Dimensions {
                width: self.width,
                height: self.height,
            },
        }
    }

    pub fn mode(&self) -> ResizeMode {
        self.mode.into()
    }
}
