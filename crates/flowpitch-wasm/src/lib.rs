//! flowpitch-wasm - Browser bindings for FlowPitch
//!
//! Wires the deck engine to a page generated by `flowpitch init`:
//!
//! 1. publishes the nav bar height as `--topOffset`
//! 2. loads `content.json` and renders the slides into `#deckContainer`
//! 3. animates slides in as they scroll into view and binds keyboard navigation
//! 4. exports the deck to PDF from `#exportPdfBtn`
//!
//! ```js
//! import init, { start } from "./pkg/flowpitch_wasm.js";
//! await init();
//! await start();
//! ```

pub mod dom;
pub mod error;
pub mod export;
pub mod fetch;
pub mod interaction;
pub mod logging;
pub mod options;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use flowpitch_core::{BootOutcome, ContentLoader, ExportController, ExportPipeline, Settings};

use crate::dom::{DomSurface, PageHandles};
use crate::error::WasmError;
use crate::export::{
    ButtonControls, DomScriptHost, DomStage, Html2Canvas, JsPdfBackend, WindowNotifier,
};
use crate::fetch::FetchSource;
use crate::interaction::{keyboard_navigation, watch_nav_offset, VisibilityBinding};

type DomPipeline = ExportPipeline<DomScriptHost, Html2Canvas, JsPdfBackend, WindowNotifier>;

/// Everything the page keeps alive after `start` returns
struct Deck {
    window: web_sys::Window,
    slides: Rc<Vec<web_sys::Element>>,
    pipeline: DomPipeline,
    controller: RefCell<ExportController<ButtonControls>>,
    stage: RefCell<DomStage>,
    listeners: RefCell<Vec<EventListener>>,
    visibility: RefCell<Option<VisibilityBinding>>,
}

impl Deck {
    // The controller borrow doubles as the in-progress flag: a second click
    // while an export runs finds it taken and does nothing.
    #[allow(clippy::await_holding_refcell_ref)]
    async fn export(&self) {
        let (Ok(mut controller), Ok(mut stage)) =
            (self.controller.try_borrow_mut(), self.stage.try_borrow_mut())
        else {
            debug!("export already running");
            return;
        };
        let ratio = self.window.device_pixel_ratio();
        let result = self
            .pipeline
            .run(&mut *controller, &mut *stage, self.slides.as_slice(), ratio)
            .await;
        // Failures were already logged and alerted by the pipeline
        if let Err(e) = result {
            debug!(code = e.code(), "export ended without a document");
        }
    }
}

thread_local! {
    static DECK: RefCell<Option<Rc<Deck>>> = const { RefCell::new(None) };
}

fn read_settings(value: JsValue) -> Result<Settings, WasmError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Settings::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| WasmError::Settings(e.to_string()))
}

/// Returns the crate version
#[wasm_bindgen]
pub fn version() -> String {
    flowpitch_core::VERSION.to_string()
}

/// Wire the deck into the current page.
///
/// `settings` is an optional object shaped like `flowpitch.toml`; missing
/// keys take their defaults.
#[wasm_bindgen]
pub async fn start(settings: JsValue) -> Result<(), JsError> {
    logging::init(tracing::Level::INFO);
    let settings = read_settings(settings)?;
    let page = PageHandles::lookup()?;

    let mut listeners = Vec::new();
    if let Some(root) = page
        .document
        .document_element()
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
    {
        listeners.push(watch_nav_offset(&page.window, root, page.nav.clone()));
    }

    let loader = ContentLoader::new(settings.deck.content_path.clone())
        .with_error_message(settings.deck.error_message.clone());
    let mut surface = DomSurface::new(page.document.clone(), page.container.clone());
    let outcome = loader.boot(&FetchSource, &mut surface).await;
    let slides = Rc::new(surface.into_slides());

    let mut visibility = None;
    if let BootOutcome::Rendered(count) = outcome {
        visibility = Some(VisibilityBinding::observe(
            Rc::clone(&slides),
            settings.deck.visibility_threshold,
        )?);
        listeners.push(keyboard_navigation(&page.window, page.container.clone()));
        info!(slides = count, "deck ready");
    }

    let controls = ButtonControls::new(page.export_button.clone(), page.body.clone());
    let deck = Rc::new(Deck {
        window: page.window.clone(),
        slides,
        controller: RefCell::new(ExportController::new(&settings.export, controls)),
        pipeline: ExportPipeline::new(
            settings.export,
            DomScriptHost::new(page.document.clone()),
            Html2Canvas,
            JsPdfBackend,
            WindowNotifier,
        ),
        stage: RefCell::new(DomStage::new(page.stage.clone())),
        listeners: RefCell::new(Vec::new()),
        visibility: RefCell::new(visibility),
    });

    let clicked = Rc::clone(&deck);
    listeners.push(EventListener::new(&page.export_button, "click", move |_event| {
        let deck = Rc::clone(&clicked);
        spawn_local(async move { deck.export().await });
    }));
    *deck.listeners.borrow_mut() = listeners;

    DECK.with(|slot| {
        // Restarting replaces the previous wiring
        if let Some(previous) = slot.borrow_mut().replace(deck) {
            previous.listeners.borrow_mut().clear();
            previous.visibility.borrow_mut().take();
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "1.0.0");
    }
}
