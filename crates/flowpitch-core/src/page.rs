//! Static page shell
//!
//! Generates the self-contained `index.html` that hosts a deck: navigation bar
//! with the export button, the deck container, the hidden staging element and
//! the stylesheet. Slides are never written into the shell; the browser module
//! loads `content.json` and renders them at runtime.

use crate::config::Settings;
use crate::layout::TOP_OFFSET_PROPERTY;
use crate::markup::escape;
use crate::render::{ACTIVE_CLASS, SLIDE_CLASS};

/// Id of the navigation bar
pub const NAV_ID: &str = "topNav";
/// Id of the element slides are rendered into
pub const CONTAINER_ID: &str = "deckContainer";
/// Id of the export button
pub const EXPORT_BUTTON_ID: &str = "exportPdfBtn";
/// Id of the offscreen staging element used by the export
pub const STAGE_ID: &str = "pdfStage";
/// Body class set while an export runs
pub const EXPORT_MODE_CLASS: &str = "exportingPdf";
/// Id of the inline settings document read by the browser module
pub const SETTINGS_ID: &str = "flowpitchSettings";

/// Default location of the browser module relative to the page
pub const DEFAULT_MODULE_PATH: &str = "./pkg/flowpitch_wasm.js";

/// A small deck written by `flowpitch init`
pub const SAMPLE_CONTENT: &str = r#"{
  "slides": [
    {
      "type": "title",
      "headline": "FlowPitch",
      "subheadline": "Scroll-driven decks from a single JSON file"
    },
    {
      "type": "problem",
      "headline": "Slides drift out of sync",
      "bullets": [
        "Copy lives in five tools",
        "Every edit means re-exporting",
        { "html": "Reviews happen on <em>stale</em> PDFs" }
      ]
    },
    {
      "type": "beforeAfter",
      "headline": "What changes",
      "left": {
        "title": "Before",
        "bullets": ["Manual layout", "One-off exports"]
      },
      "right": {
        "title": "After",
        "bullets": ["content.json is the source", "PDF on demand"]
      }
    },
    {
      "type": "ask",
      "headline": "Try it",
      "subheadline": "Edit content.json and reload"
    }
  ]
}
"#;

/// Generator for the page shell
#[derive(Debug, Clone)]
pub struct PageShell {
    settings: Settings,
    module_path: String,
}

impl PageShell {
    /// Shell for the given settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            module_path: DEFAULT_MODULE_PATH.to_string(),
        }
    }

    /// Load the browser module from another path
    pub fn with_module_path(mut self, path: impl Into<String>) -> Self {
        self.module_path = path.into();
        self
    }

    /// Settings embedded in the page
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Generate the complete HTML document
    pub fn render(&self) -> Result<String, serde_json::Error> {
        let title = escape(&self.settings.deck.title);
        let idle_label = escape(&self.settings.export.idle_label);
        let settings_json = script_safe(&serde_json::to_string(&self.settings)?);
        let module_path = escape(&self.module_path);
        let styles = Self::styles(&self.settings);

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{styles}    </style>
</head>
<body>
    <nav id="{NAV_ID}">
        <span class="brand">{title}</span>
        <button id="{EXPORT_BUTTON_ID}" type="button">{idle_label}</button>
    </nav>
    <main id="{CONTAINER_ID}"></main>
    <div id="{STAGE_ID}" aria-hidden="true"></div>
    <script type="application/json" id="{SETTINGS_ID}">{settings_json}</script>
    <script type="module">
        import init, {{ start }} from "{module_path}";
        const settings = JSON.parse(document.getElementById("{SETTINGS_ID}").textContent);
        await init();
        await start(settings);
    </script>
</body>
</html>
"#
        ))
    }

    fn styles(settings: &Settings) -> String {
        let background = escape(&settings.export.background);
        let width = settings.export.page_width;
        let height = settings.export.page_height;

        format!(
            r#"        * {{ box-sizing: border-box; }}
        :root {{
            --bg: {background};
            --fg: #f5f6fa;
            --muted: #9aa0b4;
            --accent: #6c5ce7;
            {TOP_OFFSET_PROPERTY}: 64px;
        }}
        html, body {{
            margin: 0;
            height: 100%;
            background: var(--bg);
            color: var(--fg);
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif;
        }}
        #{NAV_ID} {{
            position: fixed;
            top: 0;
            left: 0;
            right: 0;
            z-index: 10;
            display: flex;
            justify-content: space-between;
            align-items: center;
            padding: 1rem 2rem;
            background: rgba(5, 6, 17, 0.85);
            backdrop-filter: blur(8px);
        }}
        #{NAV_ID} .brand {{ font-weight: bold; letter-spacing: 0.5px; }}
        #{EXPORT_BUTTON_ID} {{
            padding: 0.5rem 1rem;
            border: 1px solid var(--accent);
            border-radius: 20px;
            background: transparent;
            color: var(--fg);
            cursor: pointer;
        }}
        #{EXPORT_BUTTON_ID}:disabled {{ opacity: 0.5; cursor: progress; }}
        #{CONTAINER_ID} {{
            height: 100vh;
            overflow-y: auto;
            scroll-snap-type: y mandatory;
        }}
        .{SLIDE_CLASS} {{
            min-height: 100vh;
            padding: calc(var({TOP_OFFSET_PROPERTY}) + 2rem) 8vw 4rem;
            display: flex;
            flex-direction: column;
            justify-content: center;
            scroll-snap-align: start;
        }}
        .{SLIDE_CLASS} h1 {{ font-size: clamp(2.5rem, 6vw, 5rem); margin: 0 0 1rem; }}
        .{SLIDE_CLASS} h2 {{ font-size: clamp(2rem, 4vw, 3.5rem); margin: 0 0 1rem; }}
        .{SLIDE_CLASS} p {{ color: var(--muted); font-size: 1.4rem; }}
        .{SLIDE_CLASS} li {{ font-size: 1.3rem; margin: 0.5rem 0; }}
        .{SLIDE_CLASS} [data-animate] {{
            opacity: 0;
            transform: translateY(24px);
            transition: opacity 0.6s ease, transform 0.6s ease;
        }}
        .{SLIDE_CLASS}.{ACTIVE_CLASS} [data-animate] {{ opacity: 1; transform: none; }}
        .{SLIDE_CLASS}.{ACTIVE_CLASS} [data-animate="2"] {{ transition-delay: 0.15s; }}
        .{SLIDE_CLASS}.{ACTIVE_CLASS} [data-animate="3"] {{ transition-delay: 0.3s; }}
        .split-grid {{
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
            gap: 1.5rem;
        }}
        .card {{
            padding: 1.5rem;
            border: 1px solid rgba(255, 255, 255, 0.15);
            border-radius: 12px;
            background: rgba(255, 255, 255, 0.03);
        }}
        .deck-message {{ color: white; text-align: center; margin-top: 20vh; }}
        #{STAGE_ID} {{
            position: fixed;
            top: 0;
            left: -{width}px;
            width: {width}px;
            height: {height}px;
            overflow: hidden;
            background: var(--bg);
        }}
        #{STAGE_ID} .{SLIDE_CLASS} {{ width: {width}px; height: {height}px; min-height: 0; }}
        #{STAGE_ID} [data-animate] {{ transition: none; }}
        body.{EXPORT_MODE_CLASS} {{ cursor: progress; }}
"#
        )
    }
}

impl Default for PageShell {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

/// Keep a JSON document from closing the `<script>` element it is embedded in.
///
/// `\u003c` is the same character to a JSON parser.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}
