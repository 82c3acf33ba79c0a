//! # Configuration
//!
//! Runtime settings for rendering, export, the design service and the
//! preview server.
//!
//! ## Usage
//!
//! ```
//! use signboard::config::SignboardConfig;
//!
//! let config = SignboardConfig::default();
//! assert_eq!(config.surface_width, 800);
//! assert_eq!(config.export_scale, 2.0);
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SignboardError;
use crate::render::surface::device_size;

fn default_surface_width() -> u32 {
    800
}

fn default_surface_height() -> u32 {
    600
}

fn default_export_scale() -> f32 {
    2.0
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_footprint_pct() -> f32 {
    20.0
}

fn default_max_surface_dim() -> u32 {
    2400
}

/// Settings shared by the library entry points and the binary.
#[derive(Debug, Clone, Deserialize)]
pub struct SignboardConfig {
    /// Nominal surface width used when a design does not carry one.
    #[serde(default = "default_surface_width")]
    pub surface_width: u32,

    /// Nominal surface height used when a design does not carry one.
    #[serde(default = "default_surface_height")]
    pub surface_height: u32,

    /// Upscale factor applied by the export pipeline.
    #[serde(default = "default_export_scale")]
    pub export_scale: f32,

    /// Directory holding TTF/OTF faces, matched by family name.
    #[serde(default)]
    pub font_dir: Option<PathBuf>,

    /// Root URL of the design service.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Address the preview server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Drag footprint (percent) for elements without a usable size.
    #[serde(default = "default_footprint_pct")]
    pub default_footprint_pct: f32,

    /// Largest nominal width or height a design may ask for. Also bounds
    /// font sizes.
    #[serde(default = "default_max_surface_dim")]
    pub max_surface_dim: u32,
}

impl Default for SignboardConfig {
    fn default() -> Self {
        Self {
            surface_width: default_surface_width(),
            surface_height: default_surface_height(),
            export_scale: default_export_scale(),
            font_dir: None,
            api_base_url: default_api_base_url(),
            listen_addr: default_listen_addr(),
            default_footprint_pct: default_footprint_pct(),
            max_surface_dim: default_max_surface_dim(),
        }
    }
}

impl SignboardConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, SignboardError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, SignboardError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot work with.
    pub fn validate(&self) -> Result<(), SignboardError> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(SignboardError::Config(format!(
                "surface must be non-empty, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if !(self.export_scale.is_finite() && self.export_scale > 0.0) {
            return Err(SignboardError::Config(format!(
                "export_scale must be positive, got {}",
                self.export_scale
            )));
        }
        if self.surface_width > self.max_surface_dim || self.surface_height > self.max_surface_dim {
            return Err(SignboardError::Config(format!(
                "surface {}x{} exceeds max_surface_dim {}",
                self.surface_width, self.surface_height, self.max_surface_dim
            )));
        }
        // Every design that passes the size check must export.
        if let Err(e) = device_size(self.max_surface_dim, self.max_surface_dim, self.export_scale) {
            return Err(SignboardError::Config(format!("max_surface_dim at export_scale: {}", e)));
        }
        if !(self.default_footprint_pct >= 0.0 && self.default_footprint_pct <= 100.0) {
            return Err(SignboardError::Config(format!(
                "default_footprint_pct must be within 0..=100, got {}",
                self.default_footprint_pct
            )));
        }
        Ok(())
    }
}
