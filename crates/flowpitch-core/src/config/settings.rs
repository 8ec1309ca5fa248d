//! Configuration settings

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::loader::{DEFAULT_CONTENT_PATH, LOAD_ERROR_MESSAGE};
use crate::visibility::DEFAULT_THRESHOLD;

/// Conventional settings file name
pub const SETTINGS_FILE: &str = "flowpitch.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Deck loading and presentation
    pub deck: DeckSettings,
    /// PDF export
    pub export: ExportSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Read settings from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_toml_str(&text)?)
    }

    /// Read settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Deck loading and presentation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    /// Content document path, relative to the page
    pub content_path: String,
    /// Page title and navigation bar label
    pub title: String,
    /// Share of a slide that must be visible before it animates in
    pub visibility_threshold: f64,
    /// Message shown when the deck cannot be loaded
    pub error_message: String,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            content_path: DEFAULT_CONTENT_PATH.to_string(),
            title: "FlowPitch".to_string(),
            visibility_threshold: DEFAULT_THRESHOLD,
            error_message: LOAD_ERROR_MESSAGE.to_string(),
        }
    }
}

/// PDF export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Name of the downloaded file
    pub file_name: String,
    /// Rasterizer script URL
    pub rasterizer_url: String,
    /// PDF assembler script URL
    pub pdf_url: String,
    /// Page and raster width in pixels
    pub page_width: u32,
    /// Page and raster height in pixels
    pub page_height: u32,
    /// Fill color behind each slide
    pub background: String,
    /// Lower bound for the raster scale factor
    pub min_scale: f64,
    /// Export button label while idle
    pub idle_label: String,
    /// Export button label while exporting
    pub busy_label: String,
    /// Alert shown when an export fails
    pub failure_message: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            file_name: "FlowPitch.pdf".to_string(),
            rasterizer_url:
                "https://cdnjs.cloudflare.com/ajax/libs/html2canvas/1.4.1/html2canvas.min.js"
                    .to_string(),
            pdf_url: "https://cdnjs.cloudflare.com/ajax/libs/jspdf/2.5.1/jspdf.umd.min.js"
                .to_string(),
            page_width: 1920,
            page_height: 1080,
            background: "#050611".to_string(),
            min_scale: 2.0,
            idle_label: "Export PDF".to_string(),
            busy_label: "Exporting...".to_string(),
            failure_message: "Failed to load export libraries. Ensure cdnjs.cloudflare.com is allowed or check your network.".to_string(),
        }
    }
}
