//! Browser side of the PDF export
//!
//! html2canvas and jsPDF are loaded on first use from the configured URLs, so
//! their globals are looked up when called rather than at startup.

use js_sys::Promise;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlScriptElement};

use flowpitch_core::export::{
    ControlState, ControlSurface, ImageFormat, Notifier, PageImage, PageLayout, PdfBackend,
    PdfDocument, Placement, RasterOptions, Rasterizer, ScriptHost, SlideStage,
};
use flowpitch_core::page::EXPORT_MODE_CLASS;
use flowpitch_core::render::ACTIVE_CLASS;
use flowpitch_core::ExportError;

use crate::error::describe;
use crate::options::{CanvasOptions, DocumentOptions};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_name = html2canvas)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Result<Promise, JsValue>;

    #[wasm_bindgen(js_namespace = jspdf, js_name = "jsPDF")]
    type JsPdf;

    #[wasm_bindgen(constructor, catch, js_namespace = jspdf, js_class = "jsPDF")]
    fn new(options: &JsValue) -> Result<JsPdf, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addPage)]
    fn add_page(this: &JsPdf, format: &JsValue, orientation: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = addImage)]
    fn add_image(
        this: &JsPdf,
        data: &str,
        format: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn save(this: &JsPdf, file_name: &str) -> Result<JsValue, JsValue>;
}

/// CSS selector matching a script tag with exactly this `src`
pub fn script_selector(src: &str) -> String {
    let mut escaped = String::with_capacity(src.len());
    for c in src.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("script[src=\"{escaped}\"]")
}

/// Script tags in the document head
#[derive(Debug, Clone)]
pub struct DomScriptHost {
    document: Document,
}

impl DomScriptHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl ScriptHost for DomScriptHost {
    fn has_script(&self, src: &str) -> bool {
        matches!(self.document.query_selector(&script_selector(src)), Ok(Some(_)))
    }

    async fn insert_script(&self, src: &str) -> Result<(), ExportError> {
        let fail = |e: JsValue| ExportError::script_load(src, describe(&e));

        let script = self
            .document
            .create_element("script")
            .map_err(fail)?
            .dyn_into::<HtmlScriptElement>()
            .map_err(|_| ExportError::script_load(src, "not a script element"))?;
        script.set_src(src);

        let loaded = Promise::new(&mut |resolve, reject| {
            script.set_onload(Some(&resolve));
            script.set_onerror(Some(&reject));
        });

        let head = self
            .document
            .head()
            .ok_or_else(|| ExportError::script_load(src, "document has no head"))?;
        head.append_child(&script).map_err(fail)?;

        JsFuture::from(loaded)
            .await
            .map_err(|_| ExportError::script_load(src, "script failed to load"))?;
        Ok(())
    }
}

/// The hidden staging element
#[derive(Debug, Clone)]
pub struct DomStage {
    element: HtmlElement,
}

impl DomStage {
    pub fn new(element: HtmlElement) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

impl SlideStage for DomStage {
    type Slide = web_sys::Element;

    fn stage_active_clone(&mut self, slide: &web_sys::Element) -> Result<(), ExportError> {
        let fail = |e: JsValue| ExportError::stage(describe(&e));

        let clone = slide
            .clone_node_with_deep(true)
            .map_err(fail)?
            .dyn_into::<web_sys::Element>()
            .map_err(|_| ExportError::stage("slide clone is not an element"))?;
        clone.class_list().add_1(ACTIVE_CLASS).map_err(fail)?;

        self.element.set_inner_html("");
        self.element.append_child(&clone).map_err(fail)?;
        Ok(())
    }

    fn clear(&mut self) {
        self.element.set_inner_html("");
    }
}

/// Rasterizer backed by html2canvas
#[derive(Debug, Clone, Copy, Default)]
pub struct Html2Canvas;

impl Rasterizer<DomStage> for Html2Canvas {
    async fn rasterize(
        &self,
        stage: &DomStage,
        index: usize,
        options: &RasterOptions,
    ) -> Result<PageImage, ExportError> {
        let fail = |e: JsValue| ExportError::rasterize(index, describe(&e));

        let options = serde_wasm_bindgen::to_value(&CanvasOptions::from(options))
            .map_err(|e| ExportError::rasterize(index, e.to_string()))?;
        let canvas = JsFuture::from(html2canvas(stage.element(), &options).map_err(fail)?)
            .await
            .map_err(fail)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ExportError::rasterize(index, "html2canvas did not return a canvas"))?;

        let data_url = canvas
            .to_data_url_with_type(ImageFormat::Png.mime_type())
            .map_err(fail)?;
        Ok(PageImage::png(data_url))
    }
}

/// PDF assembly backed by jsPDF
#[derive(Debug, Clone, Copy, Default)]
pub struct JsPdfBackend;

/// A jsPDF document
pub struct JsPdfDocument {
    inner: JsPdf,
}

fn pdf_error(e: JsValue) -> ExportError {
    ExportError::pdf(describe(&e))
}

impl PdfBackend for JsPdfBackend {
    type Document = JsPdfDocument;

    fn create(&self, layout: &PageLayout) -> Result<JsPdfDocument, ExportError> {
        let options = serde_wasm_bindgen::to_value(&DocumentOptions::from(layout))
            .map_err(|e| ExportError::pdf(e.to_string()))?;
        let inner = JsPdf::new(&options).map_err(pdf_error)?;
        Ok(JsPdfDocument { inner })
    }
}

impl PdfDocument for JsPdfDocument {
    fn add_page(&mut self, layout: &PageLayout) -> Result<(), ExportError> {
        let format = serde_wasm_bindgen::to_value(&[layout.width, layout.height])
            .map_err(|e| ExportError::pdf(e.to_string()))?;
        self.inner
            .add_page(&format, layout.orientation.as_str())
            .map_err(pdf_error)?;
        Ok(())
    }

    fn add_image(&mut self, image: &PageImage, placement: Placement) -> Result<(), ExportError> {
        self.inner
            .add_image(
                &image.data_url,
                image.format.name(),
                placement.x,
                placement.y,
                placement.width,
                placement.height,
            )
            .map_err(pdf_error)?;
        Ok(())
    }

    fn save(&mut self, file_name: &str) -> Result<(), ExportError> {
        self.inner.save(file_name).map_err(pdf_error)?;
        Ok(())
    }
}

/// Export button and the body's export-mode class
#[derive(Debug, Clone)]
pub struct ButtonControls {
    button: HtmlButtonElement,
    body: HtmlElement,
}

impl ButtonControls {
    pub fn new(button: HtmlButtonElement, body: HtmlElement) -> Self {
        Self { button, body }
    }
}

impl ControlSurface for ButtonControls {
    fn apply(&mut self, state: &ControlState) {
        self.button.set_disabled(state.button_disabled);
        self.button.set_text_content(Some(&state.button_label));
        if let Err(e) = self
            .body
            .class_list()
            .toggle_with_force(EXPORT_MODE_CLASS, state.export_mode)
        {
            warn!(error = %describe(&e), "could not toggle export mode");
        }
    }
}

/// Alerts through `window.alert`
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowNotifier;

impl Notifier for WindowNotifier {
    fn alert(&self, message: &str) {
        gloo::dialogs::alert(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_selector() {
        assert_eq!(
            script_selector("https://cdn.example/lib.min.js"),
            r#"script[src="https://cdn.example/lib.min.js"]"#
        );
    }

    #[test]
    fn test_script_selector_escapes_quotes() {
        assert_eq!(script_selector(r#"a"b\c"#), r#"script[src="a\"b\\c"]"#);
    }
}
