//! Application palette.
//!
//! fontpeek ships a single One Dark inspired palette as static helpers;
//! widgets and views pull colors from here instead of hardcoding values.

use gpui::{rgb, Rgba};

/// One Dark palette accessors.
pub struct OneDarkTheme;

impl OneDarkTheme {
    // === BACKGROUND COLORS ===

    /// Main content area background.
    pub fn editor_background() -> Rgba {
        rgb(0x282c34)
    }

    /// Surface background for panels and panes.
    pub fn surface_background() -> Rgba {
        rgb(0x21252b)
    }

    /// UI element default background.
    pub fn element_background() -> Rgba {
        rgb(0x2c313a)
    }

    /// Hovered element background.
    pub fn element_hover() -> Rgba {
        rgb(0x323842)
    }

    /// Active/pressed element background.
    pub fn element_active() -> Rgba {
        rgb(0x3e4451)
    }

    /// Selected element background.
    pub fn element_selected() -> Rgba {
        rgb(0x3e4451)
    }

    // === TEXT COLORS ===

    /// Primary text color.
    pub fn text() -> Rgba {
        rgb(0xabb2bf)
    }

    /// De-emphasized/muted text.
    pub fn text_muted() -> Rgba {
        rgb(0x5c6370)
    }

    /// Placeholder text.
    pub fn text_placeholder() -> Rgba {
        rgb(0x5c6370)
    }

    /// Accent text for highlights.
    pub fn text_accent() -> Rgba {
        rgb(0x61afef)
    }

    // === BORDER COLORS ===

    /// Standard border color.
    pub fn border() -> Rgba {
        rgb(0x3e4451)
    }

    /// Focused border color.
    pub fn border_focused() -> Rgba {
        rgb(0x528bff)
    }

    // === SEMANTIC COLORS ===

    /// Success/positive action color.
    pub fn success() -> Rgba {
        rgb(0x98c379)
    }

    /// Error/danger color.
    pub fn error() -> Rgba {
        rgb(0xe06c75)
    }

    /// Warning color.
    pub fn warning() -> Rgba {
        rgb(0xe5c07b)
    }
}
