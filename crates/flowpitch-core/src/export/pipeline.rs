//! Export sequence

use tracing::{debug, error, info};

use super::{
    ControlSurface, ExportController, ExportSession, Notifier, PageLayout, PdfBackend,
    PdfDocument, RasterOptions, Rasterizer, ScriptHost, SlideStage,
};
use crate::config::ExportSettings;
use crate::error::ExportError;

/// How a library requirement was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryLoad {
    /// A tag for the script was already in the document
    AlreadyPresent,
    /// A tag was inserted and the script loaded
    Inserted,
}

/// Make sure the script at `src` is in the document, inserting it at most once.
///
/// An existing tag counts as loaded even if it is still downloading.
pub async fn ensure_library<H: ScriptHost>(
    host: &H,
    src: &str,
) -> Result<LibraryLoad, ExportError> {
    if host.has_script(src) {
        return Ok(LibraryLoad::AlreadyPresent);
    }
    debug!(src, "loading export library");
    host.insert_script(src).await?;
    Ok(LibraryLoad::Inserted)
}

/// Summary of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Pages written, one per slide
    pub pages: usize,
    /// Name the document was saved under
    pub file_name: String,
    /// How the rasterizer and PDF libraries were obtained
    pub libraries: [LibraryLoad; 2],
}

/// Exports a rendered deck to PDF
pub struct ExportPipeline<H, R, P, N> {
    settings: ExportSettings,
    scripts: H,
    rasterizer: R,
    pdf: P,
    notifier: N,
}

impl<H, R, P, N> ExportPipeline<H, R, P, N>
where
    H: ScriptHost,
    P: PdfBackend,
    N: Notifier,
{
    /// Create a pipeline from its collaborators
    pub fn new(settings: ExportSettings, scripts: H, rasterizer: R, pdf: P, notifier: N) -> Self {
        Self {
            settings,
            scripts,
            rasterizer,
            pdf,
            notifier,
        }
    }

    /// Export settings in use
    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Export `slides` (live slide handles, in deck order).
    ///
    /// The controller is `Exporting` for the duration of the call and the
    /// stage is emptied before and after. On failure nothing is saved, the
    /// user is alerted once and the error is returned.
    pub async fn run<C, S>(
        &self,
        controller: &mut ExportController<C>,
        stage: &mut S,
        slides: &[S::Slide],
        device_pixel_ratio: f64,
    ) -> Result<ExportReport, ExportError>
    where
        C: ControlSurface,
        S: SlideStage,
        R: Rasterizer<S>,
    {
        let mut session = ExportSession::begin(controller, stage);
        let result = self
            .export_pages(session.stage(), slides, device_pixel_ratio)
            .await;

        match &result {
            Ok(report) => info!(pages = report.pages, file = %report.file_name, "deck exported"),
            Err(e) => {
                error!(code = e.code(), error = %e, "export failed");
                self.notifier.alert(&self.settings.failure_message);
            }
        }

        drop(session);
        result
    }

    async fn export_pages<S>(
        &self,
        stage: &mut S,
        slides: &[S::Slide],
        device_pixel_ratio: f64,
    ) -> Result<ExportReport, ExportError>
    where
        S: SlideStage,
        R: Rasterizer<S>,
    {
        let libraries = [
            ensure_library(&self.scripts, &self.settings.rasterizer_url).await?,
            ensure_library(&self.scripts, &self.settings.pdf_url).await?,
        ];

        let layout = PageLayout::from_settings(&self.settings);
        let options = RasterOptions::new(&self.settings, device_pixel_ratio);
        let mut document = self.pdf.create(&layout)?;

        for (index, slide) in slides.iter().enumerate() {
            stage.stage_active_clone(slide)?;
            let image = self.rasterizer.rasterize(&*stage, index, &options).await?;
            if index > 0 {
                document.add_page(&layout)?;
            }
            document.add_image(&image, layout.full_bleed())?;
            debug!(index, "page added");
        }

        document.save(&self.settings.file_name)?;

        Ok(ExportReport {
            pages: slides.len(),
            file_name: self.settings.file_name.clone(),
            libraries,
        })
    }
}
