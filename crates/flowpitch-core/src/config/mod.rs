//! Configuration
//!
//! Settings are loaded from `flowpitch.toml` next to the deck:
//!
//! ```toml
//! [deck]
//! content_path = "content.json"
//! title = "FlowPitch"
//! visibility_threshold = 0.3
//!
//! [export]
//! file_name = "FlowPitch.pdf"
//! page_width = 1920
//! page_height = 1080
//! background = "#050611"
//! min_scale = 2.0
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

mod settings;

#[cfg(test)]
mod tests;

pub use settings::{DeckSettings, ExportSettings, Settings, SETTINGS_FILE};
