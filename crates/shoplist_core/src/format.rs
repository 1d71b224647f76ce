//! Copy-ready shopping list rendering.
//!
//! # Responsibility
//! - Turn a selection plus visit order into chat-friendly text: a dated
//!   title, bold store headers, an underline rule and checkbox bullets.
//!
//! # Invariants
//! - Stores with no checked items never appear.
//! - Every store with checked items appears exactly once, in visit order
//!   first and alphabetically after that.
//! - Output never ends with whitespace.

use crate::model::name::sorted_unique;
use crate::model::selection::Selection;
use crate::model::visit_order::{ordered_names, VisitOrder};
use chrono::NaiveDate;

/// Bullet prefix for each item line.
pub const CHECKBOX_BULLET: &str = "☐";
/// Character repeated under each store header.
pub const UNDERLINE_CHAR: char = '—';

const TITLE_PREFIX: &str = "Shopping List";
const UNDERLINE_MIN: usize = 6;
const UNDERLINE_MAX: usize = 22;

/// Renders the shopping list for an explicit date.
pub fn format_shopping_list(selection: &Selection, order: &VisitOrder, date: NaiveDate) -> String {
    let mut lines = vec![
        format!("{TITLE_PREFIX} - {}", date.format("%b %d, %Y")),
        String::new(),
    ];

    for store in ordered_names(order.iter(), selection.store_names()) {
        let items = selection
            .store(store)
            .map(|categories| sorted_unique(categories.values().flatten()))
            .unwrap_or_default();
        if items.is_empty() {
            continue;
        }

        lines.push(format!("*{store}*"));
        lines.push(underline_for(store));
        lines.extend(items.iter().map(|item| format!("{CHECKBOX_BULLET} {item}")));
        lines.push(String::new());
    }

    lines.join("\n").trim_end().to_string()
}

/// Whether rendering would produce at least one store block.
pub fn has_selected_items(selection: &Selection) -> bool {
    !selection.is_empty()
}

fn underline_for(store: &str) -> String {
    let width = (store.chars().count() + 2).clamp(UNDERLINE_MIN, UNDERLINE_MAX);
    std::iter::repeat(UNDERLINE_CHAR).take(width).collect()
}
