//! Favorite-font categories.
//!
//! Each category owns an ordered set of font names plus a display color and
//! an enabled flag. A font belongs to at most one category; assignment moves
//! it out of its previous category, and a `font -> category` reverse index
//! is maintained on every mutation so lookups never depend on scan order.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default display color for a newly created category.
pub const DEFAULT_CATEGORY_COLOR: &str = "#e0a030";

/// Persisted shape of the favorites data: three maps keyed by category name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoritesDoc {
    /// Category name -> member font names.
    pub fonts: BTreeMap<String, Vec<String>>,
    /// Category name -> display color.
    pub colors: BTreeMap<String, String>,
    /// Category name -> participates in the favorites filter.
    pub enabled: BTreeMap<String, bool>,
}

/// One category's runtime state.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub fonts: Vec<String>,
    pub color: String,
    pub enabled: bool,
}

/// Runtime favorites model with a derived reverse index.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    categories: BTreeMap<String, Category>,
    /// Font name -> owning category name.
    font_index: HashMap<String, String>,
}

impl Favorites {
    /// Build the model from its persisted form.
    ///
    /// The document format cannot express the one-category-per-font
    /// invariant, so duplicates are resolved here: the first category (in
    /// key order) to claim a font keeps it.
    pub fn from_doc(doc: &FavoritesDoc) -> Self {
        let mut favorites = Self::default();
        for (name, fonts) in &doc.fonts {
            let color = doc
                .colors
                .get(name)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
            let enabled = doc.enabled.get(name).copied().unwrap_or(true);
            favorites.categories.insert(
                name.clone(),
                Category {
                    fonts: Vec::new(),
                    color,
                    enabled,
                },
            );
            for font in fonts {
                if !favorites.font_index.contains_key(font) {
                    favorites.font_index.insert(font.clone(), name.clone());
                    favorites
                        .categories
                        .get_mut(name)
                        .unwrap()
                        .fonts
                        .push(font.clone());
                }
            }
        }
        favorites
    }

    /// Convert back to the persisted form.
    pub fn to_doc(&self) -> FavoritesDoc {
        let mut doc = FavoritesDoc::default();
        for (name, category) in &self.categories {
            doc.fonts.insert(name.clone(), category.fonts.clone());
            doc.colors.insert(name.clone(), category.color.clone());
            doc.enabled.insert(name.clone(), category.enabled);
        }
        doc
    }

    /// Category names in key order.
    pub fn names(&self) -> Vec<String> {
        self.categories.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Create a category. Returns false if the name is empty or taken.
    pub fn add_category(&mut self, name: &str, color: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.categories.contains_key(name) {
            return false;
        }
        self.categories.insert(
            name.to_string(),
            Category {
                fonts: Vec::new(),
                color: color.to_string(),
                enabled: true,
            },
        );
        true
    }

    /// Delete a category and release its fonts.
    pub fn remove_category(&mut self, name: &str) {
        if let Some(category) = self.categories.remove(name) {
            for font in category.fonts {
                self.font_index.remove(&font);
            }
        }
    }

    /// Assign a font to a category, moving it out of any previous category.
    /// Returns false if the category does not exist.
    pub fn assign(&mut self, font: &str, category: &str) -> bool {
        if !self.categories.contains_key(category) {
            return false;
        }
        self.unassign(font);
        self.font_index
            .insert(font.to_string(), category.to_string());
        self.categories
            .get_mut(category)
            .unwrap()
            .fonts
            .push(font.to_string());
        true
    }

    /// Remove a font from whichever category holds it.
    pub fn unassign(&mut self, font: &str) {
        if let Some(previous) = self.font_index.remove(font) {
            if let Some(category) = self.categories.get_mut(&previous) {
                category.fonts.retain(|f| f != font);
            }
        }
    }

    /// The category a font belongs to, if any.
    pub fn category_for(&self, font: &str) -> Option<&str> {
        self.font_index.get(font).map(|s| s.as_str())
    }

    pub fn set_color(&mut self, name: &str, color: &str) {
        if let Some(category) = self.categories.get_mut(name) {
            category.color = color.to_string();
        }
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        if let Some(category) = self.categories.get_mut(name) {
            category.enabled = enabled;
        }
    }

    /// True if the font sits in a category whose enabled flag is set.
    pub fn is_favorite(&self, font: &str) -> bool {
        self.category_for(font)
            .and_then(|name| self.categories.get(name))
            .map(|category| category.enabled)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_moves_between_categories() {
        let mut favorites = Favorites::default();
        assert!(favorites.add_category("display", "#ff0000"));
        assert!(favorites.add_category("mono", "#00ff00"));

        assert!(favorites.assign("Consolas", "display"));
        assert_eq!(favorites.category_for("Consolas"), Some("display"));

        // Re-assignment moves the font; it never lives in two categories.
        assert!(favorites.assign("Consolas", "mono"));
        assert_eq!(favorites.category_for("Consolas"), Some("mono"));
        assert!(favorites.get("display").unwrap().fonts.is_empty());
        assert_eq!(favorites.get("mono").unwrap().fonts, vec!["Consolas"]);
    }

    #[test]
    fn test_assign_unknown_category() {
        let mut favorites = Favorites::default();
        assert!(!favorites.assign("Arial", "nope"));
        assert_eq!(favorites.category_for("Arial"), None);
    }

    #[test]
    fn test_add_category_rejects_duplicates_and_empty() {
        let mut favorites = Favorites::default();
        assert!(favorites.add_category("serif", "#123456"));
        assert!(!favorites.add_category("serif", "#654321"));
        assert!(!favorites.add_category("", "#000000"));
        assert!(!favorites.add_category("   ", "#000000"));
    }

    #[test]
    fn test_remove_category_releases_fonts() {
        let mut favorites = Favorites::default();
        favorites.add_category("serif", "#123456");
        favorites.assign("Georgia", "serif");
        favorites.remove_category("serif");
        assert_eq!(favorites.category_for("Georgia"), None);
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_unassign() {
        let mut favorites = Favorites::default();
        favorites.add_category("serif", "#123456");
        favorites.assign("Georgia", "serif");
        favorites.unassign("Georgia");
        assert_eq!(favorites.category_for("Georgia"), None);
        assert!(favorites.get("serif").unwrap().fonts.is_empty());
    }

    #[test]
    fn test_from_doc_resolves_duplicate_membership() {
        let mut doc = FavoritesDoc::default();
        doc.fonts
            .insert("a".to_string(), vec!["Arial".to_string()]);
        doc.fonts
            .insert("b".to_string(), vec!["Arial".to_string(), "Impact".to_string()]);

        let favorites = Favorites::from_doc(&doc);
        // Key order: "a" claims Arial first.
        assert_eq!(favorites.category_for("Arial"), Some("a"));
        assert_eq!(favorites.get("b").unwrap().fonts, vec!["Impact"]);
    }

    #[test]
    fn test_doc_round_trip() {
        let mut favorites = Favorites::default();
        favorites.add_category("display", "#ff8800");
        favorites.add_category("mono", "#0088ff");
        favorites.assign("Impact", "display");
        favorites.assign("Consolas", "mono");
        favorites.set_enabled("mono", false);

        let doc = favorites.to_doc();
        let rebuilt = Favorites::from_doc(&doc);
        assert_eq!(rebuilt.to_doc(), doc);
        assert_eq!(rebuilt.category_for("Impact"), Some("display"));
        assert!(!rebuilt.get("mono").unwrap().enabled);
    }

    #[test]
    fn test_is_favorite_honors_enabled_flag() {
        let mut favorites = Favorites::default();
        favorites.add_category("display", "#ff8800");
        favorites.assign("Impact", "display");
        assert!(favorites.is_favorite("Impact"));
        favorites.set_enabled("display", false);
        assert!(!favorites.is_favorite("Impact"));
        assert!(!favorites.is_favorite("Arial"));
    }
}
