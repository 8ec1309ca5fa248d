//! Error types for the deck engine
//!
//! The engine has two independent failure domains. Loading and rendering
//! failures end in the container showing a static message; export failures
//! end in an alert. Neither is retried.

use thiserror::Error;

/// Errors raised while building slide markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A field the slide's layout reads is absent
    #[error("Slide {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    /// The surface could not take a rendered slide
    #[error("Slide {index} could not be attached: {reason}")]
    Surface { index: usize, reason: String },
}

impl RenderError {
    /// Create a missing field error
    pub fn missing_field(index: usize, field: &'static str) -> Self {
        Self::MissingField { index, field }
    }

    /// Create a surface error
    pub fn surface(index: usize, reason: impl Into<String>) -> Self {
        Self::Surface {
            index,
            reason: reason.into(),
        }
    }

    /// Index of the slide that failed
    pub fn slide_index(&self) -> usize {
        match self {
            Self::MissingField { index, .. } | Self::Surface { index, .. } => *index,
        }
    }
}

/// Errors raised while retrieving the content document
#[derive(Error, Debug)]
pub enum LoadError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-OK status
    #[error("Content request failed with status {0}")]
    Status(u16),

    /// The body is not a deck document
    #[error(transparent)]
    Model(#[from] flowpitch_model::ModelError),

    /// Reading a local content file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of the load-and-render domain
#[derive(Error, Debug)]
pub enum BootError {
    /// Content could not be loaded
    #[error("Failed to load content: {0}")]
    Load(#[from] LoadError),

    /// A slide aborted rendering
    #[error("Failed to render deck: {0}")]
    Render(#[from] RenderError),
}

/// Errors raised during a PDF export
#[derive(Error, Debug)]
pub enum ExportError {
    /// An external library script failed to load
    #[error("Failed to load script {src}: {reason}")]
    ScriptLoad { src: String, reason: String },

    /// Rasterizing a staged slide failed
    #[error("Failed to rasterize slide {index}: {reason}")]
    Rasterize { index: usize, reason: String },

    /// The PDF assembler rejected an operation
    #[error("PDF assembly failed: {0}")]
    Pdf(String),

    /// The staging element could not host a slide clone
    #[error("Staging failed: {0}")]
    Stage(String),
}

impl ExportError {
    /// Create a script load error
    pub fn script_load(src: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ScriptLoad {
            src: src.into(),
            reason: reason.into(),
        }
    }

    /// Create a rasterization error
    pub fn rasterize(index: usize, reason: impl Into<String>) -> Self {
        Self::Rasterize {
            index,
            reason: reason.into(),
        }
    }

    /// Create a PDF assembly error
    pub fn pdf(reason: impl Into<String>) -> Self {
        Self::Pdf(reason.into())
    }

    /// Create a staging error
    pub fn stage(reason: impl Into<String>) -> Self {
        Self::Stage(reason.into())
    }

    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::ScriptLoad { .. } => "FP101",
            Self::Rasterize { .. } => "FP102",
            Self::Pdf(_) => "FP103",
            Self::Stage(_) => "FP104",
        }
    }
}

/// Errors raised while reading settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("Failed to read settings {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML for the settings shape
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl BootError {
    /// Get the error code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::Load(LoadError::Network(_)) => "FP001",
            Self::Load(LoadError::Status(_)) => "FP002",
            Self::Load(LoadError::Model(_)) => "FP003",
            Self::Load(LoadError::Io(_)) => "FP004",
            Self::Render(_) => "FP010",
        }
    }
}
