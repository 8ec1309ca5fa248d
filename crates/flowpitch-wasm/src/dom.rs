//! Page handles and the live deck surface

use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement, Window};

use flowpitch_core::markup::{Element, Node};
use flowpitch_core::page::{CONTAINER_ID, EXPORT_BUTTON_ID, NAV_ID, STAGE_ID};
use flowpitch_core::render::message_banner;
use flowpitch_core::{DeckSurface, RenderError};

use crate::error::{describe, Result, WasmError};

/// Elements the deck is wired to, looked up once at startup
#[derive(Debug, Clone)]
pub struct PageHandles {
    pub window: Window,
    pub document: Document,
    pub body: HtmlElement,
    pub nav: HtmlElement,
    pub container: HtmlElement,
    pub export_button: HtmlButtonElement,
    pub stage: HtmlElement,
}

impl PageHandles {
    /// Look up every handle in the current page
    pub fn lookup() -> Result<Self> {
        let window = web_sys::window().ok_or(WasmError::NoWindow)?;
        let document = window.document().ok_or(WasmError::NoWindow)?;
        let body = document.body().ok_or(WasmError::MissingElement("body"))?;

        Ok(Self {
            nav: by_id(&document, NAV_ID, "HTML element")?,
            container: by_id(&document, CONTAINER_ID, "HTML element")?,
            export_button: by_id(&document, EXPORT_BUTTON_ID, "button")?,
            stage: by_id(&document, STAGE_ID, "HTML element")?,
            window,
            document,
            body,
        })
    }
}

fn by_id<T: JsCast>(document: &Document, id: &'static str, expected: &'static str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or(WasmError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| WasmError::WrongElement { id, expected })
}

/// Build live DOM nodes mirroring a markup element
pub fn build_element(document: &Document, element: &Element) -> Result<web_sys::Element> {
    let node = document
        .create_element(&element.tag)
        .map_err(|e| WasmError::dom(&e))?;
    if !element.classes.is_empty() {
        node.set_class_name(&element.classes.join(" "));
    }
    for (name, value) in &element.attributes {
        node.set_attribute(name, value)
            .map_err(|e| WasmError::dom(&e))?;
    }
    for child in &element.children {
        match child {
            Node::Element(el) => {
                let built = build_element(document, el)?;
                node.append_child(&built).map_err(|e| WasmError::dom(&e))?;
            }
            Node::Text(text) => {
                let text = document.create_text_node(text);
                node.append_child(&text).map_err(|e| WasmError::dom(&e))?;
            }
            Node::Raw(html) => {
                node.insert_adjacent_html("beforeend", html)
                    .map_err(|e| WasmError::dom(&e))?;
            }
        }
    }
    Ok(node)
}

/// Deck surface backed by the page's deck container
pub struct DomSurface {
    document: Document,
    container: HtmlElement,
    slides: Vec<web_sys::Element>,
}

impl DomSurface {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
            slides: Vec::new(),
        }
    }

    /// Slide nodes in deck order
    pub fn slides(&self) -> &[web_sys::Element] {
        &self.slides
    }

    pub fn into_slides(self) -> Vec<web_sys::Element> {
        self.slides
    }
}

impl DeckSurface for DomSurface {
    fn append_slide(
        &mut self,
        index: usize,
        slide: Element,
    ) -> std::result::Result<(), RenderError> {
        let node = build_element(&self.document, &slide)
            .map_err(|e| RenderError::surface(index, e.to_string()))?;
        self.container
            .append_child(&node)
            .map_err(|e| RenderError::surface(index, describe(&e)))?;
        self.slides.push(node);
        Ok(())
    }

    fn replace_with_message(&mut self, message: &str) {
        self.slides.clear();
        self.container.set_inner_html(&message_banner(message).to_html());
        debug!("deck container replaced with message");
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }
}
