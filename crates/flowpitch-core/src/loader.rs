//! Content Loader
//!
//! Fetches the content document, decodes it, and hands the slides to the
//! renderer. Any failure along the way (no response, non-OK status, bad JSON,
//! or a slide that aborts rendering) replaces the container contents with a
//! fixed message. There is no retry.

use std::path::{Path, PathBuf};

use flowpitch_model::Deck;
use tracing::{error, info};

use crate::error::{BootError, LoadError};
use crate::render::{DeckRenderer, DeckSurface};

/// Default location of the content document, relative to the page
pub const DEFAULT_CONTENT_PATH: &str = "content.json";

/// Message shown in the container when loading or rendering fails
pub const LOAD_ERROR_MESSAGE: &str = "Error loading content.json";

/// Something that can produce the text of the content document
///
/// Implementations run on a single-threaded event loop; the returned
/// futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Retrieve the document at `path`
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError>;
}

/// Reads content documents from a local directory
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory paths are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ContentSource for FileSource {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        Ok(std::fs::read_to_string(self.root.join(path))?)
    }
}

/// Retrieve and decode the deck at `path`
pub async fn load_deck<S>(source: &S, path: &str) -> Result<Deck, LoadError>
where
    S: ContentSource,
{
    let text = source.fetch_text(path).await?;
    Ok(Deck::from_json(&text)?)
}

/// Result of booting a deck into a surface
#[derive(Debug)]
pub enum BootOutcome {
    /// All slides were rendered
    Rendered(usize),
    /// The surface now shows the error message
    Failed(BootError),
}

impl BootOutcome {
    /// Check whether the deck is on screen
    pub fn is_rendered(&self) -> bool {
        matches!(self, BootOutcome::Rendered(_))
    }
}

/// Loads a deck and renders it, reporting failures in the surface
#[derive(Debug, Clone)]
pub struct ContentLoader {
    path: String,
    error_message: String,
    renderer: DeckRenderer,
}

impl Default for ContentLoader {
    fn default() -> Self {
        Self::new(DEFAULT_CONTENT_PATH)
    }
}

impl ContentLoader {
    /// Create a loader for the document at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            error_message: LOAD_ERROR_MESSAGE.to_string(),
            renderer: DeckRenderer::new(),
        }
    }

    /// Override the message shown on failure
    pub fn with_error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Path of the content document
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Load the deck and render it into `surface`.
    ///
    /// On failure the surface holds only the error message; slides rendered
    /// before a failing slide are discarded with it.
    pub async fn boot<S, D>(&self, source: &S, surface: &mut D) -> BootOutcome
    where
        S: ContentSource,
        D: DeckSurface,
    {
        match self.try_boot(source, surface).await {
            Ok(count) => {
                info!(slides = count, path = %self.path, "deck loaded");
                BootOutcome::Rendered(count)
            }
            Err(e) => {
                error!(code = e.code(), error = %e, path = %self.path, "deck failed to load");
                surface.replace_with_message(&self.error_message);
                BootOutcome::Failed(e)
            }
        }
    }

    async fn try_boot<S, D>(&self, source: &S, surface: &mut D) -> Result<usize, BootError>
    where
        S: ContentSource,
        D: DeckSurface,
    {
        let deck = load_deck(source, &self.path).await?;
        Ok(self.renderer.render(&deck.slides, surface)?)
    }
}
