//! Content source over `window.fetch`

use gloo::net::http::Request;
use tracing::debug;

use flowpitch_core::{ContentSource, LoadError};

/// Fetches content documents relative to the page
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSource;

impl ContentSource for FetchSource {
    async fn fetch_text(&self, path: &str) -> Result<String, LoadError> {
        let response = Request::get(path)
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;
        debug!(path, status = response.status(), "content fetched");
        if !response.ok() {
            return Err(LoadError::Status(response.status()));
        }
        response
            .text()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))
    }
}
