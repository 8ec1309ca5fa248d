//! Slide data structures
//!
//! A slide is decoded as-is from the content file. Nothing here checks that
//! the fields a layout needs are present; the renderer reports what is missing
//! when it gets there.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::TextItem;

/// A single slide of the deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Layout variant tag (`"title"`, `"beforeAfter"`, ...)
    #[serde(rename = "type")]
    pub kind: SlideType,

    /// Main heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,

    /// Secondary line under the heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,

    /// Bullet points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<TextItem>>,

    /// "Before" column of a `beforeAfter` slide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Column>,

    /// "After" column of a `beforeAfter` slide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Column>,
}

impl Slide {
    /// Create a slide of the given type with no content
    pub fn new(kind: SlideType) -> Self {
        Self {
            kind,
            headline: None,
            subheadline: None,
            bullets: None,
            left: None,
            right: None,
        }
    }

    /// Set the headline
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    /// Set the subheadline
    pub fn with_subheadline(mut self, subheadline: impl Into<String>) -> Self {
        self.subheadline = Some(subheadline.into());
        self
    }

    /// Set the bullets from plain text items
    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = Some(bullets.into_iter().map(TextItem::plain).collect());
        self
    }

    /// Set both columns of a before/after comparison
    pub fn with_columns(mut self, left: Column, right: Column) -> Self {
        self.left = Some(left);
        self.right = Some(right);
        self
    }

    /// Headline, treating an empty string as absent
    pub fn headline(&self) -> Option<&str> {
        self.headline.as_deref().filter(|s| !s.is_empty())
    }

    /// Subheadline, treating an empty string as absent
    pub fn subheadline(&self) -> Option<&str> {
        self.subheadline.as_deref().filter(|s| !s.is_empty())
    }

    /// Bullets, treating an empty list as absent
    pub fn bullets(&self) -> Option<&[TextItem]> {
        self.bullets.as_deref().filter(|b| !b.is_empty())
    }
}

/// Layout variant of a slide
///
/// Only `title` and `beforeAfter` change how a slide is built. Every other
/// tag is kept verbatim and rendered with the generic layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlideType {
    /// Opening slide with a large heading and a subheadline
    Title,
    /// Two-column comparison
    BeforeAfter,
    /// Any other tag
    Other(String),
}

impl SlideType {
    /// The tag as written in the content file
    pub fn as_str(&self) -> &str {
        match self {
            SlideType::Title => "title",
            SlideType::BeforeAfter => "beforeAfter",
            SlideType::Other(tag) => tag,
        }
    }

    /// CSS class derived from the tag (e.g. `title-slide`)
    pub fn css_class(&self) -> String {
        format!("{}-slide", self.as_str())
    }
}

impl From<String> for SlideType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "title" => SlideType::Title,
            "beforeAfter" => SlideType::BeforeAfter,
            _ => SlideType::Other(tag),
        }
    }
}

impl From<&str> for SlideType {
    fn from(tag: &str) -> Self {
        SlideType::from(tag.to_string())
    }
}

impl From<SlideType> for String {
    fn from(kind: SlideType) -> Self {
        match kind {
            SlideType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a `beforeAfter` slide
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Column {
    /// Column heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Column bullet points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullets: Option<Vec<TextItem>>,
}

impl Column {
    /// Create a column from a title and plain text bullets
    pub fn new<I, S>(title: impl Into<String>, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: Some(title.into()),
            bullets: Some(bullets.into_iter().map(TextItem::plain).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags() {
        assert_eq!(SlideType::from("title"), SlideType::Title);
        assert_eq!(SlideType::from("beforeAfter"), SlideType::BeforeAfter);
        assert_eq!(
            SlideType::from("roadmap"),
            SlideType::Other("roadmap".to_string())
        );
    }

    #[test]
    fn test_css_class() {
        assert_eq!(SlideType::Title.css_class(), "title-slide");
        assert_eq!(SlideType::BeforeAfter.css_class(), "beforeAfter-slide");
        assert_eq!(SlideType::from("ask").css_class(), "ask-slide");
    }

    #[test]
    fn test_tag_roundtrips_through_json() {
        let slide: Slide = serde_json::from_str(r#"{"type":"beforeAfter"}"#).unwrap();
        assert_eq!(slide.kind, SlideType::BeforeAfter);

        let json = serde_json::to_string(&slide).unwrap();
        assert_eq!(json, r#"{"type":"beforeAfter"}"#);
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let slide: Slide =
            serde_json::from_str(r#"{"type":"problem","headline":"","subheadline":"","bullets":[]}"#)
                .unwrap();
        assert_eq!(slide.headline(), None);
        assert_eq!(slide.subheadline(), None);
        assert!(slide.bullets().is_none());
    }

    #[test]
    fn test_columns_decode() {
        let slide: Slide = serde_json::from_str(
            r#"{"type":"beforeAfter",
                "left":{"title":"Before","bullets":["slow"]},
                "right":{"title":"After","bullets":["fast","cheap"]}}"#,
        )
        .unwrap();

        let right = slide.right.unwrap();
        assert_eq!(right.title.as_deref(), Some("After"));
        assert_eq!(right.bullets.unwrap().len(), 2);
    }

    #[test]
    fn test_builder() {
        let slide = Slide::new(SlideType::Title)
            .with_headline("Hi")
            .with_subheadline("World")
            .with_bullets(["a", "b"]);
        assert_eq!(slide.headline(), Some("Hi"));
        assert_eq!(slide.subheadline(), Some("World"));
        assert_eq!(slide.bullets().map(|b| b.len()), Some(2));
    }
}
