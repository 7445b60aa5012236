//! Hex color parsing and formatting.
//!
//! Layer and background colors travel through the settings document and the
//! compositor as plain strings; this module converts them to renderable
//! colors at the drawing seams.

use gpui::Rgba;

/// A handful of named colors accepted alongside hex notation.
const NAMED_COLORS: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xffffff),
    ("red", 0xff0000),
    ("green", 0x008000),
    ("blue", 0x0000ff),
    ("yellow", 0xffff00),
    ("cyan", 0x00ffff),
    ("magenta", 0xff00ff),
    ("gray", 0x808080),
    ("grey", 0x808080),
    ("orange", 0xffa500),
];

/// Parse a `#rrggbb`, `#rgb`, or named color into an opaque [`Rgba`].
///
/// Returns `None` for anything else; callers pick their own fallback.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let value = value.trim();

    if let Some(hex) = value.strip_prefix('#') {
        let rgb = match hex.len() {
            6 => u32::from_str_radix(hex, 16).ok()?,
            3 => {
                // Expand #abc to #aabbcc
                let short = u32::from_str_radix(hex, 16).ok()?;
                let r = (short >> 8) & 0xf;
                let g = (short >> 4) & 0xf;
                let b = short & 0xf;
                (r * 0x11) << 16 | (g * 0x11) << 8 | (b * 0x11)
            }
            _ => return None,
        };
        return Some(from_rgb_u32(rgb));
    }

    let lower = value.to_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgb)| from_rgb_u32(*rgb))
}

/// Format a color as lowercase `#rrggbb`.
pub fn format_color(color: Rgba) -> String {
    let r = (color.r * 255.0).round() as u32;
    let g = (color.g * 255.0).round() as u32;
    let b = (color.b * 255.0).round() as u32;
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn from_rgb_u32(rgb: u32) -> Rgba {
    Rgba {
        r: ((rgb >> 16) & 0xff) as f32 / 255.0,
        g: ((rgb >> 8) & 0xff) as f32 / 255.0,
        b: (rgb & 0xff) as f32 / 255.0,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let c = parse_color("#ff8000").unwrap();
        assert_eq!(format_color(c), "#ff8000");
    }

    #[test]
    fn test_parse_short_hex() {
        let c = parse_color("#f00").unwrap();
        assert_eq!(format_color(c), "#ff0000");
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(format_color(parse_color("white").unwrap()), "#ffffff");
        assert_eq!(format_color(parse_color("Orange").unwrap()), "#ffa500");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_color("").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#gggggg").is_none());
        assert!(parse_color("not-a-color").is_none());
    }

    #[test]
    fn test_parse_is_opaque() {
        let c = parse_color("#336699").unwrap();
        assert_eq!(c.a, 1.0);
    }
}
