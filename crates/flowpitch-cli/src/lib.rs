//! flowpitch CLI - Command-line interface library
//!
//! This library provides the CLI functionality for FlowPitch:
//! - Init: Write a deck page, a sample `content.json` and `flowpitch.toml`
//! - Outline: Dry-run the renderer over a content file
//!
//! # Library Usage
//!
//! ```ignore
//! use flowpitch_cli::{init_project, outline};
//! use flowpitch_core::Settings;
//!
//! let report = init_project(Path::new("deck"), &Settings::default(), false)?;
//! let entries = outline(Path::new("deck/content.json"))?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Scaffold a deck
//! flowpitch init my-deck
//!
//! # Check that a content file renders
//! flowpitch outline my-deck/content.json --format json
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{init_command, init_project, outline, outline_command, run_cli};
pub use app::{FileStatus, InitReport, OutlineEntry, OutputFormat};
