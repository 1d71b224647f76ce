//! Item search across the catalog.
//!
//! # Responsibility
//! - Filter items by case-insensitive substring, per category.
//! - Return typed hits in display order.

use crate::model::catalog::Catalog;
use crate::model::name::normalize_name;

/// One matching item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub store: String,
    pub category: String,
    pub item: String,
}

/// Keeps items whose lowercase form contains the normalized lowercase query.
///
/// A blank query keeps every item.
pub fn filter_items<'a>(items: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = normalize_name(query).to_lowercase();
    items
        .iter()
        .map(String::as_str)
        .filter(|item| needle.is_empty() || item.to_lowercase().contains(&needle))
        .collect()
}

/// Searches all stores; stores and categories are visited in display order.
pub fn search_catalog(catalog: &Catalog, query: &str) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    for store in catalog.store_names_sorted() {
        for category in catalog.categories_sorted(store) {
            let items = catalog.items(store, category).unwrap_or_default();
            hits.extend(filter_items(items, query).into_iter().map(|item| SearchHit {
                store: store.to_string(),
                category: category.to_string(),
                item: item.to_string(),
            }));
        }
    }
    hits
}
