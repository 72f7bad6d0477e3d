//! Runtime configuration.
//!
//! Everything here has a working default; a JSON file only needs the keys it overrides.

use std::{collections::BTreeMap, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::{StoryscapeError, StoryscapeResult},
    render::blur::MAX_BLUR_RADIUS,
};

/// Default image-generation endpoint. The prompt is appended as a single path segment.
pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai/prompt";
/// Generated image width.
pub const DEFAULT_IMAGE_WIDTH: u32 = 1920;
/// Generated image height.
pub const DEFAULT_IMAGE_HEIGHT: u32 = 1080;
/// Brightness multiplier applied to unblurred layers.
pub const DEFAULT_BRIGHTNESS: f32 = 0.6;

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
    /// Image-generation endpoint used by the prompt composer.
    pub endpoint: EndpointConfig,
    /// Visual tuning of the transition engine and renderer.
    pub transition: TransitionConfig,
}

/// Address and fixed parameters of the image-generation endpoint.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointConfig {
    pub base_url: String,
    pub width: u32,
    pub height: u32,
    /// Fixed query flags appended after `seed` (watermark suppression, backend selection).
    pub flags: BTreeMap<String, String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert("model".to_owned(), "flux".to_owned());
        flags.insert("nologo".to_owned(), "true".to_owned());
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            width: DEFAULT_IMAGE_WIDTH,
            height: DEFAULT_IMAGE_HEIGHT,
            flags,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionConfig {
    /// Entrance fade duration of a new topmost layer, in seconds.
    pub fade_secs: f64,
    /// Gaussian blur radius in pixels for blurred (loading) state.
    pub blur_radius: u32,
    pub blur_sigma: f32,
    /// Upscale applied while blurred to hide soft edges. Overrides the camera motion.
    pub blur_scale: f64,
    /// Used when the host passes a non-finite brightness.
    pub default_brightness: f32,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            fade_secs: 1.0,
            blur_radius: 24,
            blur_sigma: 10.0,
            blur_scale: 1.1,
            default_brightness: DEFAULT_BRIGHTNESS,
        }
    }
}

impl BackdropConfig {
    /// Parse and validate a JSON config string.
    pub fn from_json_str(s: &str) -> StoryscapeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| StoryscapeError::serde(format!("config json: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: &Path) -> StoryscapeResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> StoryscapeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoryscapeError::serde(e.to_string()))
    }

    pub fn validate(&self) -> StoryscapeResult<()> {
        self.endpoint.validate()?;
        self.transition.validate()
    }
}

impl EndpointConfig {
    pub fn validate(&self) -> StoryscapeResult<()> {
        let url = url::Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(StoryscapeError::config(format!(
                "endpoint.base_url '{}' cannot carry a path segment",
                self.base_url
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(StoryscapeError::config(
                "endpoint.width and endpoint.height must be > 0",
            ));
        }
        for reserved in ["width", "height", "seed"] {
            if self.flags.contains_key(reserved) {
                return Err(StoryscapeError::config(format!(
                    "endpoint.flags must not override '{reserved}'"
                )));
            }
        }
        Ok(())
    }
}

impl TransitionConfig {
    pub fn validate(&self) -> StoryscapeResult<()> {
        if !self.fade_secs.is_finite() || self.fade_secs <= 0.0 {
            return Err(StoryscapeError::config("transition.fade_secs must be > 0"));
        }
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(StoryscapeError::config(format!(
                "transition.blur_radius must be <= {MAX_BLUR_RADIUS}"
            )));
        }
        if !self.blur_sigma.is_finite() || self.blur_sigma <= 0.0 {
            return Err(StoryscapeError::config("transition.blur_sigma must be > 0"));
        }
        if !self.blur_scale.is_finite() || self.blur_scale < 1.0 {
            return Err(StoryscapeError::config(
                "transition.blur_scale must be >= 1",
            ));
        }
        if !self.default_brightness.is_finite() || self.default_brightness < 0.0 {
            return Err(StoryscapeError::config(
                "transition.default_brightness must be >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
