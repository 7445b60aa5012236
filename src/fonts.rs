//! Installed-font enumeration.
//!
//! Wraps the system font source for family listing and lookup. Enumeration
//! failure degrades to a static list of fonts that are commonly available
//! across Windows, macOS, and Linux (DirectWrite, CoreText, fontconfig).

use font_kit::family_name::FamilyName;
use font_kit::properties::Properties;
use font_kit::source::SystemSource;

/// Enumerate installed font family names, sorted.
///
/// If the system source cannot be queried the common-font fallback list is
/// returned instead so the picker is never empty.
pub fn installed_families() -> Vec<String> {
    let source = SystemSource::new();
    match source.all_families() {
        Ok(mut families) => {
            families.sort();
            families.dedup();
            families
        }
        Err(e) => {
            eprintln!("Failed to enumerate system fonts: {}", e);
            fallback_families()
        }
    }
}

/// Check whether a family name resolves to an installed font.
pub fn family_exists(font_name: &str) -> bool {
    SystemSource::new()
        .select_best_match(
            &[FamilyName::Title(font_name.to_string())],
            &Properties::new(),
        )
        .is_ok()
}

/// Case-insensitive substring filter over a family list, returning the
/// indices of matching entries. An empty query matches everything.
pub fn filter_families(families: &[String], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..families.len()).collect();
    }
    let query = query.to_lowercase();
    families
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&query))
        .map(|(i, _)| i)
        .collect()
}

/// Fonts that are commonly available across Windows, macOS, and Linux.
pub fn fallback_families() -> Vec<String> {
    [
        "Arial",
        "Arial Black",
        "Calibri",
        "Cambria",
        "Comic Sans MS",
        "Consolas",
        "Courier New",
        "DejaVu Sans",
        "DejaVu Sans Mono",
        "DejaVu Serif",
        "Georgia",
        "Helvetica",
        "Impact",
        "Liberation Sans",
        "Liberation Serif",
        "Lucida Console",
        "Noto Sans",
        "Segoe UI",
        "Tahoma",
        "Times New Roman",
        "Trebuchet MS",
        "Verdana",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_families_sorted() {
        let families = fallback_families();
        assert!(!families.is_empty());
        for pair in families.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        let families = fallback_families();
        assert_eq!(filter_families(&families, "").len(), families.len());
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let families = fallback_families();
        let hits = filter_families(&families, "dejavu");
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|&i| families[i].starts_with("DejaVu")));
    }

    #[test]
    fn test_filter_no_match() {
        let families = fallback_families();
        assert!(filter_families(&families, "zzzz-no-such-font").is_empty());
    }
}
