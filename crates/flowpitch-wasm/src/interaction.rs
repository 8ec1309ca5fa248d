//! Page interaction: nav offset, slide activation and keyboard navigation

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use js_sys::Array;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, ScrollBehavior, ScrollToOptions, Window,
};

use flowpitch_core::layout::top_offset;
use flowpitch_core::render::ACTIVE_CLASS;
use flowpitch_core::{NavigationController, ScrollCommand, VisibilityEntry, VisibilityTrigger};

use crate::error::{describe, Result, WasmError};

/// Publish the nav bar height as a CSS variable on the root element
pub fn publish_nav_offset(root: &HtmlElement, nav: &HtmlElement) {
    let (property, value) = top_offset(nav.get_bounding_client_rect().height());
    if let Err(e) = root.style().set_property(property, &value) {
        warn!(error = %describe(&e), "could not publish nav offset");
    }
}

/// Keep the nav offset current as the window resizes
pub fn watch_nav_offset(window: &Window, root: HtmlElement, nav: HtmlElement) -> EventListener {
    publish_nav_offset(&root, &nav);
    EventListener::new(window, "resize", move |_event| {
        publish_nav_offset(&root, &nav);
    })
}

/// Intersection observer feeding a [`VisibilityTrigger`]
pub struct VisibilityBinding {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityBinding {
    /// Observe `slides`, adding the active class once each crosses `threshold`
    pub fn observe(slides: Rc<Vec<web_sys::Element>>, threshold: f64) -> Result<Self> {
        let trigger = Rc::new(RefCell::new(VisibilityTrigger::new(slides.len(), threshold)));

        let observed = Rc::clone(&slides);
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                let batch: Vec<VisibilityEntry> = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = entry.target();
                        let index = observed.iter().position(|slide| *slide == target)?;
                        Some(VisibilityEntry::new(
                            index,
                            entry.is_intersecting(),
                            entry.intersection_ratio(),
                        ))
                    })
                    .collect();

                for index in trigger.borrow_mut().observe(&batch) {
                    let slide = &observed[index];
                    if let Err(e) = slide.class_list().add_1(ACTIVE_CLASS) {
                        warn!(index, error = %describe(&e), "could not activate slide");
                    }
                    // Activation is permanent, so the slide needs no more reports
                    observer.unobserve(slide);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| WasmError::dom(&e))?;
        for slide in slides.iter() {
            observer.observe(slide);
        }
        debug!(slides = slides.len(), threshold, "visibility observer attached");

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityBinding {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn scroll_options(command: &ScrollCommand) -> ScrollToOptions {
    let options = ScrollToOptions::new();
    options.set_top(command.top);
    options.set_behavior(if command.smooth {
        ScrollBehavior::Smooth
    } else {
        ScrollBehavior::Auto
    });
    options
}

/// Scroll the container one viewport per navigation key
pub fn keyboard_navigation(window: &Window, container: HtmlElement) -> EventListener {
    let nav = NavigationController::new();
    let viewport = window.clone();
    EventListener::new_with_options(
        window,
        "keydown",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let height = viewport
                .inner_height()
                .ok()
                .and_then(|h| h.as_f64())
                .unwrap_or(0.0);
            let Some(command) = nav.command(&event.code(), height) else {
                return;
            };
            if command.prevent_default {
                event.prevent_default();
            }
            container.scroll_by_with_scroll_to_options(&scroll_options(&command));
        },
    )
}
