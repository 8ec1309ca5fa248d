//! Option objects handed to the export libraries

use serde::Serialize;

use flowpitch_core::export::{PageLayout, RasterOptions};

/// html2canvas options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasOptions {
    pub background_color: String,
    pub scale: f64,
    #[serde(rename = "useCORS")]
    pub use_cors: bool,
    pub width: u32,
    pub height: u32,
}

impl From<&RasterOptions> for CanvasOptions {
    fn from(options: &RasterOptions) -> Self {
        Self {
            background_color: options.background.clone(),
            scale: options.scale,
            use_cors: options.use_cors,
            width: options.width,
            height: options.height,
        }
    }
}

/// jsPDF constructor options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentOptions {
    pub orientation: &'static str,
    pub unit: &'static str,
    pub format: [u32; 2],
}

impl From<&PageLayout> for DocumentOptions {
    fn from(layout: &PageLayout) -> Self {
        Self {
            orientation: layout.orientation.as_str(),
            unit: "px",
            format: [layout.width, layout.height],
        }
    }
}
