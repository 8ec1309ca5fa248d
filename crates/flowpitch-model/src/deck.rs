//! Deck root definition
//!
//! A deck is the ordered sequence of slides read from the content file.
//! Slide order here is the order of the rendered sections and of the
//! exported PDF pages.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::slide::Slide;

/// A complete deck
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Deck {
    /// Slides in presentation order
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a deck from the content file's JSON text.
    ///
    /// Only the `slides` key is consumed; any other top-level key is ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add a slide at the end of the deck
    pub fn push(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Check if the deck has no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Get the number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::SlideType;

    #[test]
    fn test_from_json_keeps_order() {
        let json = r#"{"slides":[
            {"type":"title","headline":"One"},
            {"type":"problem","headline":"Two"},
            {"type":"beforeAfter","headline":"Three"}
        ]}"#;
        let deck = Deck::from_json(json).unwrap();

        let headlines: Vec<_> = deck.slides.iter().filter_map(|s| s.headline()).collect();
        assert_eq!(headlines, vec!["One", "Two", "Three"]);
        assert_eq!(deck.slides[2].kind, SlideType::BeforeAfter);
    }

    #[test]
    fn test_empty_slides() {
        let deck = Deck::from_json(r#"{"slides":[]}"#).unwrap();
        assert!(deck.is_empty());
    }

    #[test]
    fn test_extra_top_level_keys_ignored() {
        let deck = Deck::from_json(r#"{"version":3,"theme":"dark","slides":[]}"#).unwrap();
        assert_eq!(deck.len(), 0);
    }

    #[test]
    fn test_missing_slides_key_is_error() {
        assert!(Deck::from_json(r#"{"pages":[]}"#).is_err());
    }

    #[test]
    fn test_malformed_json_reports_line() {
        let err = Deck::from_json("{\n\"slides\": [\n oops\n]}").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(err.to_string().contains("Malformed content document"));
    }
}
