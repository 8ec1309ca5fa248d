//! flowpitch-core - Deck engine for FlowPitch
//!
//! Turns a decoded [`Deck`](flowpitch_model::Deck) into slide markup, drives
//! visibility-triggered activation and keyboard navigation, and exports the
//! rendered deck to PDF. Browser access goes through small traits so the same
//! logic runs in the page and in tests.
//!
//! # Example
//!
//! ```
//! use flowpitch_core::{DeckRenderer, MemorySurface};
//! use flowpitch_model::Deck;
//!
//! let deck = Deck::from_json(
//!     r#"{"slides":[{"type":"title","headline":"Hi","subheadline":"World"}]}"#,
//! ).unwrap();
//!
//! let mut surface = MemorySurface::new();
//! DeckRenderer::new().render(&deck.slides, &mut surface).unwrap();
//!
//! let html = surface.to_html();
//! assert!(html.contains(r#"<h1 data-animate="1">Hi</h1>"#));
//! assert!(html.contains(r#"<p data-animate="2">World</p>"#));
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod layout;
pub mod loader;
pub mod markup;
pub mod navigation;
pub mod page;
pub mod render;
pub mod visibility;

// Re-export main types
pub use config::{DeckSettings, ExportSettings, Settings};
pub use error::{BootError, ConfigError, ExportError, LoadError, RenderError};
pub use export::{ExportController, ExportPipeline, ExportReport};
pub use loader::{load_deck, BootOutcome, ContentLoader, ContentSource, FileSource};
pub use markup::{Element, Node};
pub use navigation::{NavigationController, ScrollCommand};
pub use page::PageShell;
pub use render::{DeckRenderer, DeckSurface, MemorySurface};
pub use visibility::{VisibilityEntry, VisibilityTrigger};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, "1.0.0");
    }
}
