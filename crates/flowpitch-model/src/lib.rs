//! flowpitch-model - Content model for slide decks
//!
//! This crate provides the types decoded from a deck's content file
//! (`content.json`), shaped as `{ "slides": [ ... ] }`.
//!
//! # Example
//!
//! ```
//! use flowpitch_model::{Deck, SlideType};
//!
//! let deck = Deck::from_json(r#"{"slides":[{"type":"title","headline":"Hi"}]}"#).unwrap();
//! assert_eq!(deck.len(), 1);
//! assert_eq!(deck.slides[0].kind, SlideType::Title);
//! ```

pub mod deck;
pub mod error;
pub mod slide;
pub mod text;

pub use deck::Deck;
pub use error::{ModelError, Result};
pub use slide::{Column, Slide, SlideType};
pub use text::TextItem;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
