//! Settings persistence.
//!
//! All preferences live in a single JSON document with two top-level
//! fields: `favorites` (category maps) and `appState` (last-used styling).
//! On first run, data left behind by the old flat key-value store is
//! migrated into the document and persisted; afterwards only the document
//! is read and written.
//!
//! Load and save failures are logged and degrade — a broken settings file
//! never blocks startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::favorites::FavoritesDoc;
use crate::stroke::{default_layers, StrokeLayer};
use crate::svg_export::ExportMode;

const SETTINGS_FILE: &str = "settings.json";
const LEGACY_FILE: &str = "store.json";

/// Font size bounds enforced by the UI controls.
pub const MIN_FONT_SIZE: f32 = 6.0;
pub const MAX_FONT_SIZE: f32 = 400.0;

/// Last-used application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppStateDoc {
    pub font: String,
    pub text: String,
    pub font_size: f32,
    pub text_color: String,
    pub bg_color: String,
    pub use_bg_image: bool,
    pub bg_image_path: Option<String>,
    pub stroke_layers: Vec<StrokeLayer>,
    pub vertical: bool,
    pub export_mode: ExportMode,
}

impl Default for AppStateDoc {
    fn default() -> Self {
        Self {
            font: String::new(),
            text: "The quick brown fox\njumps over the lazy dog".to_string(),
            font_size: 64.0,
            text_color: "#ffffff".to_string(),
            bg_color: "#1e1e1e".to_string(),
            use_bg_image: false,
            bg_image_path: None,
            stroke_layers: default_layers(),
            vertical: false,
            export_mode: ExportMode::default(),
        }
    }
}

/// The persisted settings document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub favorites: FavoritesDoc,
    #[serde(rename = "appState")]
    pub app_state: AppStateDoc,
}

/// Handle to the on-disk settings location.
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    /// Store at the platform config directory.
    ///
    /// - macOS/Linux: `~/.config/fontpeek/`
    /// - Windows: `%APPDATA%/fontpeek/`
    pub fn open() -> Self {
        let dir = dirs::config_dir()
            .map(|p| p.join("fontpeek"))
            .unwrap_or_else(|| PathBuf::from("."));
        Self { dir }
    }

    /// Store rooted at an explicit directory (tests, `--settings-dir`).
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.dir.join(LEGACY_FILE)
    }

    /// Load the settings document.
    ///
    /// Missing document: migrate the legacy store if present (persisting the
    /// result), otherwise defaults. Unreadable document: log and fall back
    /// to the migrated-or-default state without touching the broken file.
    pub fn load(&self) -> SettingsDocument {
        let path = self.settings_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str(&contents) {
                    Ok(document) => return document,
                    Err(e) => eprintln!("Failed to parse {}: {}", path.display(), e),
                },
                Err(e) => eprintln!("Failed to read {}: {}", path.display(), e),
            }
            return self.load_legacy().unwrap_or_default();
        }

        match self.load_legacy() {
            Some(document) => {
                println!("Migrating legacy settings from {}", self.legacy_path().display());
                if let Err(e) = self.save(&document) {
                    eprintln!("Failed to persist migrated settings: {}", e);
                }
                document
            }
            None => SettingsDocument::default(),
        }
    }

    /// Save the document, creating the directory if needed.
    pub fn save(&self, document: &SettingsDocument) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(document)?;
        fs::write(self.settings_path(), contents)?;
        Ok(())
    }

    /// Read and convert the legacy flat key-value store, if present.
    fn load_legacy(&self) -> Option<SettingsDocument> {
        let contents = fs::read_to_string(self.legacy_path()).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(migrate_legacy(&value)),
            Err(e) => {
                eprintln!("Failed to parse legacy store: {}", e);
                None
            }
        }
    }
}

/// Convert the old flat key-value map into the document format.
///
/// Keys that are missing or malformed fall back to defaults field by field;
/// a partially broken store still migrates what it can.
fn migrate_legacy(value: &serde_json::Value) -> SettingsDocument {
    let mut document = SettingsDocument::default();

    if let Some(fonts) = value.get("favoriteFonts") {
        if let Ok(fonts) = serde_json::from_value(fonts.clone()) {
            document.favorites.fonts = fonts;
        }
    }
    if let Some(colors) = value.get("categoryColors") {
        if let Ok(colors) = serde_json::from_value(colors.clone()) {
            document.favorites.colors = colors;
        }
    }
    if let Some(enabled) = value.get("categoryEnabled") {
        if let Ok(enabled) = serde_json::from_value(enabled.clone()) {
            document.favorites.enabled = enabled;
        }
    }
    if let Some(app_state) = value.get("appState") {
        if let Ok(app_state) = serde_json::from_value(app_state.clone()) {
            document.app_state = app_state;
        }
    }

    document
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_document() -> SettingsDocument {
        let mut document = SettingsDocument::default();
        document
            .favorites
            .fonts
            .insert("display".to_string(), vec!["Impact".to_string()]);
        document
            .favorites
            .colors
            .insert("display".to_string(), "#ff8800".to_string());
        document
            .favorites
            .enabled
            .insert("display".to_string(), true);
        document.app_state.font = "Impact".to_string();
        document.app_state.font_size = 96.0;
        document.app_state.stroke_layers[0].enabled = true;
        document.app_state.stroke_layers[0].width = 5;
        document.app_state.export_mode = ExportMode::FillAndStroke;
        document
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        let document = sample_document();

        store.save(&document).unwrap();
        let loaded = store.load();
        assert_eq!(loaded, document);
    }

    #[test]
    fn test_load_missing_is_default() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        assert_eq!(store.load(), SettingsDocument::default());
        // Nothing was persisted: there was no legacy data to migrate.
        assert!(!store.settings_path().exists());
    }

    #[test]
    fn test_load_corrupt_falls_back() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.settings_path(), "{ not json").unwrap();
        assert_eq!(store.load(), SettingsDocument::default());
    }

    #[test]
    fn test_legacy_migration() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        let legacy = serde_json::json!({
            "favoriteFonts": {"display": ["Impact"], "mono": ["Consolas"]},
            "categoryColors": {"display": "#ff8800"},
            "categoryEnabled": {"mono": false},
            "appState": {
                "font": "Consolas",
                "text": "hello",
                "fontSize": 72.0,
                "textColor": "#00ff00",
                "vertical": true
            }
        });
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.legacy_path(), legacy.to_string()).unwrap();

        let document = store.load();
        assert_eq!(document.favorites.fonts["display"], vec!["Impact"]);
        assert_eq!(document.favorites.fonts["mono"], vec!["Consolas"]);
        assert_eq!(document.favorites.colors["display"], "#ff8800");
        assert_eq!(document.favorites.enabled["mono"], false);
        assert_eq!(document.app_state.font, "Consolas");
        assert_eq!(document.app_state.text, "hello");
        assert_eq!(document.app_state.font_size, 72.0);
        assert!(document.app_state.vertical);
        // Unspecified fields migrate as defaults.
        assert_eq!(document.app_state.bg_color, "#1e1e1e");

        // The migrated document now exists at the expected location and
        // subsequent loads use it exclusively.
        assert!(store.settings_path().exists());
        fs::remove_file(store.legacy_path()).unwrap();
        assert_eq!(store.load(), document);
    }

    #[test]
    fn test_partially_broken_legacy_migrates_rest() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::at(dir.path());
        let legacy = serde_json::json!({
            "favoriteFonts": {"display": ["Impact"]},
            "categoryColors": "not-a-map",
            "appState": {"font": "Impact"}
        });
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.legacy_path(), legacy.to_string()).unwrap();

        let document = store.load();
        assert_eq!(document.favorites.fonts["display"], vec!["Impact"]);
        assert!(document.favorites.colors.is_empty());
        assert_eq!(document.app_state.font, "Impact");
    }

    #[test]
    fn test_document_json_shape() {
        let json = serde_json::to_value(sample_document()).unwrap();
        assert!(json.get("favorites").is_some());
        assert!(json.get("appState").is_some());
        let app_state = json.get("appState").unwrap();
        assert!(app_state.get("fontSize").is_some());
        assert!(app_state.get("strokeLayers").is_some());
        assert_eq!(
            app_state.get("exportMode").unwrap().as_str(),
            Some("fill_and_stroke")
        );
    }
}
