//! fontpeek - font preview and text styling with GPUI
//!
//! Lists installed fonts, renders sample text with configurable
//! size/color/background/outline styling, keeps favorite fonts in
//! user-defined categories, and exports the result as SVG (plus a companion
//! script for importing that SVG into an external editor).

use clap::Parser;
use gpui::{
    actions, App, Application, Global, KeyBinding, Menu, MenuItem, SystemMenuType, WindowOptions,
};
use std::path::PathBuf;

mod assets;
mod checkbox;
mod color;
mod custom_titlebar;
mod favorites;
mod font_list;
mod fonts;
mod number_input;
mod preview_canvas;
mod preview_window;
mod script_export;
mod select;
mod settings;
mod slider;
mod stroke;
mod style_panel;
mod svg_export;
mod text_input;
mod theme;

use favorites::Favorites;
use preview_window::PreviewWindow;
use settings::{SettingsDocument, SettingsStore};

#[derive(Parser)]
#[command(name = "fontpeek", about = "Font preview and text styling tool")]
struct Cli {
    /// Print installed font families and exit
    #[arg(long)]
    list_fonts: bool,

    /// Override the settings directory
    #[arg(long)]
    settings_dir: Option<PathBuf>,
}

/// Global application state shared by every view.
pub struct AppState {
    /// Installed font families, sorted.
    pub fonts: Vec<String>,
    /// Handle to the on-disk settings location.
    pub store: SettingsStore,
    /// The persisted settings document (current in-memory copy).
    pub doc: SettingsDocument,
    /// Favorites model built from (and written back to) the document.
    pub favorites: Favorites,
    /// An SVG export is outstanding; the trigger control is disabled.
    pub is_exporting: bool,
    /// Last export/save result, shown in the styling panel.
    pub status: Option<String>,
}

impl AppState {
    fn load(settings_dir: Option<PathBuf>) -> Self {
        let store = match settings_dir {
            Some(dir) => SettingsStore::at(dir),
            None => SettingsStore::open(),
        };
        let mut doc = store.load();
        let favorites = Favorites::from_doc(&doc.favorites);
        let fonts = fonts::installed_families();
        println!("Found {} font families", fonts.len());

        // The last-used font may have been uninstalled since the settings
        // were written.
        if !doc.app_state.font.is_empty() && !fonts::family_exists(&doc.app_state.font) {
            eprintln!(
                "Last-used font {:?} is no longer installed",
                doc.app_state.font
            );
            doc.app_state.font = String::new();
        }

        Self {
            fonts,
            store,
            doc,
            favorites,
            is_exporting: false,
            status: None,
        }
    }

    /// Write the current state back to disk. Failures are logged, never
    /// surfaced as blocking errors.
    pub fn persist(&mut self) {
        self.doc.favorites = self.favorites.to_doc();
        if let Err(e) = self.store.save(&self.doc) {
            eprintln!("Failed to save settings: {}", e);
        }
    }
}

impl Global for AppState {}

actions!(fontpeek, [Quit]);

fn main() {
    let cli = Cli::parse();

    if cli.list_fonts {
        for family in fonts::installed_families() {
            println!("{}", family);
        }
        return;
    }

    let app_state = AppState::load(cli.settings_dir);

    Application::new()
        .with_assets(assets::Assets)
        .run(move |cx: &mut App| {
            cx.set_global(app_state);
            cx.activate(true);
            cx.on_action(quit);

            // Special keys for the text inputs; typed characters arrive
            // through the input handler.
            cx.bind_keys([
                KeyBinding::new("backspace", text_input::Backspace, Some("TextInput")),
                KeyBinding::new("enter", text_input::Enter, Some("TextInput")),
                KeyBinding::new("escape", text_input::Escape, Some("TextInput")),
                KeyBinding::new("backspace", number_input::Backspace, Some("NumberInput")),
            ]);

            set_app_menus(cx);

            cx.open_window(WindowOptions::default(), |_window, cx| {
                cx.new(|cx| PreviewWindow::new(cx))
            })
            .unwrap();
        });
}

fn set_app_menus(cx: &mut App) {
    cx.set_menus(vec![Menu {
        name: "fontpeek".into(),
        items: vec![
            MenuItem::os_submenu("Services", SystemMenuType::Services),
            MenuItem::separator(),
            MenuItem::action("Quit", Quit),
        ],
    }]);
}

// Define the quit function that is registered with the App
fn quit(_: &Quit, cx: &mut App) {
    println!("Gracefully quitting the application . . .");
    cx.quit();
}
