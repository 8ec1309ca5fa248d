//! PDF Export Pipeline
//!
//! Exports the rendered deck as a PDF with one full-bleed 1920×1080 page per
//! slide, in deck order. Each slide is cloned into an offscreen staging
//! element with its active state forced on, rasterized to PNG, and placed on
//! its own page.
//!
//! The browser work sits behind small traits so the pipeline can run against
//! the live DOM or against in-memory fakes:
//!
//! | Trait            | Browser implementation                    |
//! |------------------|-------------------------------------------|
//! | [`ScriptHost`]   | `<script>` lookup and insertion           |
//! | [`SlideStage`]   | the hidden staging element                |
//! | [`Rasterizer`]   | html2canvas                               |
//! | [`PdfBackend`]   | jsPDF                                     |
//! | [`ControlSurface`] | export button and `exportingPdf` body flag |
//! | [`Notifier`]     | `window.alert`                            |
//!
//! An export is all-or-nothing: any failure stops before the document is
//! saved, and the button and staging element are restored on every path.

mod controls;
mod pipeline;


pub use controls::{ControlState, ExportController, ExportPhase, ExportSession};
pub use pipeline::{ensure_library, ExportPipeline, ExportReport, LibraryLoad};

use crate::config::ExportSettings;
use crate::error::ExportError;

/// Lossless image encoding used for pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
}

impl ImageFormat {
    /// MIME type for canvas encoding
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
        }
    }

    /// Format name understood by the PDF assembler
    pub fn name(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
        }
    }
}

/// A rasterized slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub format: ImageFormat,
    /// Encoded image as a `data:` URL
    pub data_url: String,
}

impl PageImage {
    /// Create a PNG page image
    pub fn png(data_url: impl Into<String>) -> Self {
        Self {
            format: ImageFormat::Png,
            data_url: data_url.into(),
        }
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Name understood by the PDF assembler
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
        }
    }
}

/// Size of every page, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u32,
    pub height: u32,
    pub orientation: Orientation,
}

impl PageLayout {
    /// A page of the given size; taller than wide is portrait
    pub fn new(width: u32, height: u32) -> Self {
        let orientation = if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        };
        Self {
            width,
            height,
            orientation,
        }
    }

    /// Page layout for the configured export size
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self::new(settings.page_width, settings.page_height)
    }

    /// Placement covering the whole page
    pub fn full_bleed(&self) -> Placement {
        Placement {
            x: 0.0,
            y: 0.0,
            width: f64::from(self.width),
            height: f64::from(self.height),
        }
    }
}

/// Where an image goes on a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Options for rasterizing the staging element
#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub width: u32,
    pub height: u32,
    /// Pixel density multiplier, never below the configured minimum
    pub scale: f64,
    /// Fill color behind the slide
    pub background: String,
    /// Allow cross-origin images
    pub use_cors: bool,
}

impl RasterOptions {
    /// Options for the configured export at the given device pixel ratio
    pub fn new(settings: &ExportSettings, device_pixel_ratio: f64) -> Self {
        Self {
            width: settings.page_width,
            height: settings.page_height,
            scale: device_pixel_ratio.max(settings.min_scale),
            background: settings.background.clone(),
            use_cors: true,
        }
    }
}

/// Loads external library scripts into the page
#[allow(async_fn_in_trait)]
pub trait ScriptHost {
    /// Check whether a script tag for `src` is already in the document
    fn has_script(&self, src: &str) -> bool;

    /// Insert a script tag for `src` and wait until it loads or fails
    async fn insert_script(&self, src: &str) -> Result<(), ExportError>;
}

/// The offscreen element slides are staged in before rasterizing
pub trait SlideStage {
    /// Live slide handle the stage clones from
    type Slide;

    /// Replace the stage contents with a deep clone of `slide`, active state forced on.
    ///
    /// The live slide is not modified.
    fn stage_active_clone(&mut self, slide: &Self::Slide) -> Result<(), ExportError>;

    /// Remove everything from the stage
    fn clear(&mut self);
}

/// Turns the staged slide into an image
#[allow(async_fn_in_trait)]
pub trait Rasterizer<S: SlideStage> {
    /// Rasterize the current stage contents; `index` is the slide being exported
    async fn rasterize(
        &self,
        stage: &S,
        index: usize,
        options: &RasterOptions,
    ) -> Result<PageImage, ExportError>;
}

/// Creates PDF documents
pub trait PdfBackend {
    type Document: PdfDocument;

    /// Start a document whose first page has `layout`
    fn create(&self, layout: &PageLayout) -> Result<Self::Document, ExportError>;
}

/// A PDF being assembled; pages can only be appended
pub trait PdfDocument {
    /// Append a page and make it current
    fn add_page(&mut self, layout: &PageLayout) -> Result<(), ExportError>;

    /// Draw an image on the current page
    fn add_image(&mut self, image: &PageImage, placement: Placement) -> Result<(), ExportError>;

    /// Hand the document to the user as a download
    fn save(&mut self, file_name: &str) -> Result<(), ExportError>;
}

/// Reflects the export state in the page (button, export-mode flag)
pub trait ControlSurface {
    fn apply(&mut self, state: &ControlState);
}

/// Shows user-facing failure messages
pub trait Notifier {
    fn alert(&self, message: &str);
}
