//! Tests for deck and export settings

use super::*;
use crate::error::ConfigError;

// ==================== PARSING TESTS ====================

mod parsing_tests {
    use super::*;

    #[test]
    fn test_load_config_from_toml() {
        let toml = r#"
[deck]
content_path = "decks/seed.json"
title = "Seed Round"
visibility_threshold = 0.5

[export]
file_name = "seed.pdf"
page_width = 1280
page_height = 720
"#;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.deck.content_path, "decks/seed.json");
        assert_eq!(settings.deck.title, "Seed Round");
        assert_eq!(settings.deck.visibility_threshold, 0.5);
        assert_eq!(settings.export.file_name, "seed.pdf");
        assert_eq!(settings.export.page_width, 1280);
        assert_eq!(settings.export.page_height, 720);
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.deck.content_path, "content.json");
        assert_eq!(settings.deck.visibility_threshold, 0.3);
        assert_eq!(settings.deck.error_message, "Error loading content.json");
        assert_eq!(settings.export.file_name, "FlowPitch.pdf");
        assert_eq!(
            (settings.export.page_width, settings.export.page_height),
            (1920, 1080)
        );
        assert_eq!(settings.export.background, "#050611");
        assert_eq!(settings.export.min_scale, 2.0);
        assert_eq!(settings.export.idle_label, "Export PDF");
        assert_eq!(settings.export.busy_label, "Exporting...");
        assert!(settings.export.rasterizer_url.contains("html2canvas"));
        assert!(settings.export.pdf_url.contains("jspdf"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r##"
[export]
background = "#000000"
"##;

        let settings = Settings::from_toml_str(toml).unwrap();

        assert_eq!(settings.export.background, "#000000");
        assert_eq!(settings.export.file_name, "FlowPitch.pdf");
        assert_eq!(settings.deck, DeckSettings::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_type_is_error() {
        let toml = r#"
[export]
page_width = "wide"
"#;
        assert!(Settings::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_serialized_defaults_parse_back() {
        let text = Settings::default().to_toml_string().unwrap();

        assert!(text.contains("[deck]"));
        assert!(text.contains("[export]"));
        assert_eq!(Settings::from_toml_str(&text).unwrap(), Settings::default());
    }
}

// ==================== FILE LOADING TESTS ====================

mod file_tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[deck]\ntitle = \"Demo Day\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.deck.title, "Demo Day");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);

        let settings = Settings::load_or_default(&path).unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file_is_error_for_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");

        let err = Settings::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[deck\ntitle = ").unwrap();

        let err = Settings::load_or_default(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
