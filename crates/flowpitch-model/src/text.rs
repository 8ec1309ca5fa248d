//! Text items
//!
//! Bullet text is plain by default. Literal markup is only accepted through
//! the explicit `{ "html": "..." }` form.

use serde::{Deserialize, Serialize};

/// A bullet entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextItem {
    /// Plain text, escaped when rendered
    Plain(String),
    /// Markup inserted verbatim
    Rich {
        /// Literal markup
        html: String,
    },
}

impl TextItem {
    /// Create a plain text item
    pub fn plain(text: impl Into<String>) -> Self {
        TextItem::Plain(text.into())
    }

    /// Create a rich text item
    pub fn rich(html: impl Into<String>) -> Self {
        TextItem::Rich { html: html.into() }
    }

    /// Check if this item carries literal markup
    pub fn is_rich(&self) -> bool {
        matches!(self, TextItem::Rich { .. })
    }

    /// The raw string, markup included for rich items
    pub fn as_str(&self) -> &str {
        match self {
            TextItem::Plain(text) => text,
            TextItem::Rich { html } => html,
        }
    }
}

impl From<&str> for TextItem {
    fn from(text: &str) -> Self {
        TextItem::plain(text)
    }
}

impl From<String> for TextItem {
    fn from(text: String) -> Self {
        TextItem::Plain(text)
    }
}
