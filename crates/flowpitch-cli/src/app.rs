//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};

use flowpitch_core::config::SETTINGS_FILE;
use flowpitch_core::page::SAMPLE_CONTENT;
use flowpitch_core::{load_deck, DeckRenderer, FileSource, MemorySurface, PageShell, Settings};
use flowpitch_model::Deck;

/// Output format for outlines
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "flowpitch")]
#[command(author, version, about = "Scroll-driven pitch decks from JSON", long_about = None)]
struct Cli {
    /// Settings file (defaults to flowpitch.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a deck page, sample content and settings into a directory
    Init {
        /// Target directory (created if missing)
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },

    /// Render a content file without a browser and list its slides
    Outline {
        /// Content file (defaults to the configured content path)
        input: Option<PathBuf>,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { dir, force } => {
            let settings = resolve_settings(cli.config.as_deref(), Some(&dir))?;
            init_command(&dir, &settings, force)?;
        }
        Commands::Outline { input, format } => {
            let settings = resolve_settings(cli.config.as_deref(), None)?;
            let input = input.unwrap_or_else(|| PathBuf::from(&settings.deck.content_path));
            outline_command(&input, format)?;
        }
    }

    Ok(())
}

/// Settings from `--config`, else from `flowpitch.toml` in `dir` (or the
/// working directory), else defaults
fn resolve_settings(config: Option<&Path>, dir: Option<&Path>) -> Result<Settings> {
    if let Some(path) = config {
        return Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()));
    }
    let path = dir.unwrap_or(Path::new(".")).join(SETTINGS_FILE);
    Settings::load_or_default(&path)
        .with_context(|| format!("Failed to load settings: {}", path.display()))
}

// ==================== INIT ====================

/// What happened to one scaffolded file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Written,
    Overwritten,
    /// Left alone because it already existed
    Kept,
}

/// Files touched by [`init_project`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub files: Vec<(PathBuf, FileStatus)>,
}

impl InitReport {
    /// Status of the file with this name, if it was part of the scaffold
    pub fn status(&self, name: &str) -> Option<FileStatus> {
        self.files
            .iter()
            .find(|(path, _)| path.file_name().is_some_and(|n| n == name))
            .map(|(_, status)| *status)
    }
}

/// Scaffold a deck directory.
///
/// Writes `index.html`, the content file and `flowpitch.toml`. Existing
/// files are kept unless `force` is set.
pub fn init_project(dir: &Path, settings: &Settings, force: bool) -> Result<InitReport> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let page = PageShell::new(settings.clone())
        .render()
        .context("Failed to generate page shell")?;
    let toml = settings
        .to_toml_string()
        .context("Failed to serialize settings")?;

    let files = [
        (dir.join("index.html"), page),
        (dir.join(&settings.deck.content_path), SAMPLE_CONTENT.to_string()),
        (dir.join(SETTINGS_FILE), toml),
    ];

    let mut report = InitReport { files: Vec::new() };
    for (path, contents) in files {
        let status = write_scaffold_file(&path, &contents, force)?;
        debug!(path = %path.display(), ?status, "scaffold file");
        report.files.push((path, status));
    }
    Ok(report)
}

fn write_scaffold_file(path: &Path, contents: &str, force: bool) -> Result<FileStatus> {
    let exists = path.exists();
    if exists && !force {
        return Ok(FileStatus::Kept);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(if exists {
        FileStatus::Overwritten
    } else {
        FileStatus::Written
    })
}

/// Execute the init command
pub fn init_command(dir: &Path, settings: &Settings, force: bool) -> Result<()> {
    println!("flowpitch v{}", flowpitch_core::VERSION);
    println!("Initializing: {}", dir.display());

    let report = init_project(dir, settings, force)?;
    for (path, status) in &report.files {
        let label = match status {
            FileStatus::Written => "created",
            FileStatus::Overwritten => "overwritten",
            FileStatus::Kept => "kept (exists)",
        };
        println!("  {:<14} {}", label, path.display());
    }

    println!();
    println!("Build the browser module into {}/pkg with:", dir.display());
    println!("  wasm-pack build crates/flowpitch-wasm --target web --out-dir <dir>/pkg");
    println!("then serve the directory over HTTP.");
    Ok(())
}

// ==================== OUTLINE ====================

fn read_deck(path: &Path) -> Result<Deck> {
    let root = path.parent().unwrap_or(Path::new(""));
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Not a content file path: {}", path.display()))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("Failed to create tokio runtime")?;
    Ok(runtime.block_on(load_deck(&FileSource::new(root), name))?)
}

/// One rendered slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineEntry {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: String,
    pub class: String,
    pub headline: Option<String>,
    /// List items rendered on the slide, columns included
    pub items: usize,
}

/// Render the content file at `path` in memory and describe each slide.
///
/// The file goes through the same content loader the browser uses. Fails if
/// it cannot be read or decoded, or if any slide would abort rendering in
/// the browser.
pub fn outline(path: &Path) -> Result<Vec<OutlineEntry>> {
    let deck = read_deck(path)
        .with_context(|| format!("Failed to load content file: {}", path.display()))?;

    let mut surface = MemorySurface::new();
    DeckRenderer::new()
        .render(&deck.slides, &mut surface)
        .with_context(|| format!("Deck would not render: {}", path.display()))?;

    let entries = deck
        .slides
        .iter()
        .zip(surface.slides())
        .enumerate()
        .map(|(index, (slide, element))| OutlineEntry {
            index,
            kind: slide.kind.as_str().to_string(),
            class: slide.kind.css_class(),
            headline: slide.headline().map(str::to_string),
            items: element.find_all("li").len(),
        })
        .collect();
    Ok(entries)
}

/// Execute the outline command
pub fn outline_command(input: &Path, format: OutputFormat) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Content file not found: {}", input.display());
    }

    let entries = outline(input)?;
    info!(slides = entries.len(), "deck renders");

    match format {
        OutputFormat::Text => {
            println!("{} ({} slides)", input.display(), entries.len());
            for entry in &entries {
                println!(
                    "  {:>3}  {:<20} {:>2} items  {}",
                    entry.index,
                    entry.class,
                    entry.items,
                    entry.headline.as_deref().unwrap_or("-")
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
