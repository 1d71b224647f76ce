//! Plain-text rendering of store tiles and the list panel.
//!
//! # Invariants
//! - Tiles are listed alphabetically; the list panel follows visit order.
//! - Search filtering is applied per category.

use shoplist_core::{filter_items, has_selected_items, Catalog, Selection};

/// Shown when the list panel has nothing to render.
pub const EMPTY_LIST_HINT: &str = "Select items from the store tiles to build your list.";

/// Renders every store tile with checkbox markers.
pub fn render_tiles(catalog: &Catalog, selection: &Selection, query: &str) -> String {
    let searching = !query.trim().is_empty();
    let mut lines = Vec::new();

    for store in catalog.store_names_sorted() {
        lines.push(format!("== {store} =="));
        let mut any_visible = false;

        for category in catalog.categories_sorted(store) {
            let items = catalog.items(store, category).unwrap_or_default();
            let visible = filter_items(items, query);
            if visible.is_empty() {
                continue;
            }
            any_visible = true;
            lines.push(format!("  {category}"));
            for item in visible {
                let mark = if selection.is_checked(store, category, item) {
                    'x'
                } else {
                    ' '
                };
                lines.push(format!("    [{mark}] {item}"));
            }
        }

        if !any_visible {
            lines.push(if searching {
                "  No matches in this store.".to_string()
            } else {
                "  No products yet. Add some with `add-items`.".to_string()
            });
        }
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

/// Renders the list panel: copy-ready text or the empty hint.
pub fn render_list_panel(selection: &Selection, formatted: String) -> String {
    if has_selected_items(selection) {
        formatted
    } else {
        EMPTY_LIST_HINT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{render_list_panel, render_tiles, EMPTY_LIST_HINT};
    use shoplist_core::{Catalog, Selection};

    #[test]
    fn tiles_mark_checked_items_and_explain_empty_stores() {
        let catalog = Catalog::default_catalog();
        let mut selection = Selection::for_catalog(&catalog);
        selection.check(&catalog, "Costco", "Dairy", "Milk");

        let tiles = render_tiles(&catalog, &selection, "");
        assert!(tiles.starts_with("== Costco =="));
        assert!(tiles.contains("    [x] Milk"));
        assert!(tiles.contains("    [ ] Eggs"));
        assert!(tiles.contains("== Marianos ==\n  No products yet."));
    }

    #[test]
    fn search_hides_categories_without_matches() {
        let catalog = Catalog::default_catalog();
        let selection = Selection::for_catalog(&catalog);
        let tiles = render_tiles(&catalog, &selection, "paper");

        assert!(tiles.contains("  Household\n    [ ] Paper Towel\n    [ ] Toilet Paper"));
        assert!(!tiles.contains("Dairy"));
        assert!(tiles.contains("== Walmart ==\n  No matches in this store."));
    }

    #[test]
    fn empty_selection_shows_hint() {
        let selection = Selection::new();
        assert_eq!(
            render_list_panel(&selection, "Shopping List".to_string()),
            EMPTY_LIST_HINT
        );
    }
}
