//! Session-scoped item selection.
//!
//! # Responsibility
//! - Track which catalog items are checked for the current trip.
//! - Stay aligned with the catalog shape through reconciliation.
//!
//! # Invariants
//! - After [`Selection::reconcile`], every catalog store/category has an
//!   entry and every checked item exists in the catalog.
//! - Selections are never persisted.

use crate::model::catalog::Catalog;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Checked item names of one store, keyed by category.
pub type SelectedCategories = IndexMap<String, BTreeSet<String>>;

/// Checked items per store and category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    stores: IndexMap<String, SelectedCategories>,
}

impl Selection {
    /// Creates an empty selection with no shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty selection shaped after `catalog`.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut selection = Self::new();
        selection.reconcile(catalog);
        selection
    }

    /// Aligns this selection with `catalog`.
    ///
    /// Adds empty entries for new stores/categories and drops entries and
    /// checked items that no longer exist. Idempotent.
    pub fn reconcile(&mut self, catalog: &Catalog) {
        self.stores.retain(|store, _| catalog.contains_store(store));

        for (store, categories) in catalog.iter() {
            let selected = self.stores.entry(store.to_string()).or_default();
            selected.retain(|category, _| categories.contains_key(category));
            for (category, items) in categories {
                let checked = selected.entry(category.clone()).or_default();
                checked.retain(|item| items.iter().any(|existing| existing == item));
            }
        }
    }

    /// Checks an item when it exists in `catalog`. Returns whether the
    /// selection changed.
    pub fn check(&mut self, catalog: &Catalog, store: &str, category: &str, item: &str) -> bool {
        if !catalog.contains_item(store, category, item) {
            return false;
        }
        self.stores
            .entry(store.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
            .insert(item.to_string())
    }

    /// Unchecks an item. Returns whether the selection changed.
    pub fn uncheck(&mut self, store: &str, category: &str, item: &str) -> bool {
        self.stores
            .get_mut(store)
            .and_then(|categories| categories.get_mut(category))
            .is_some_and(|checked| checked.remove(item))
    }

    /// Flips an item's checked state. Returns the new state.
    pub fn toggle(&mut self, catalog: &Catalog, store: &str, category: &str, item: &str) -> bool {
        if self.is_checked(store, category, item) {
            self.uncheck(store, category, item);
            false
        } else {
            self.check(catalog, store, category, item)
        }
    }

    /// Whether an item is checked.
    pub fn is_checked(&self, store: &str, category: &str, item: &str) -> bool {
        self.stores
            .get(store)
            .and_then(|categories| categories.get(category))
            .is_some_and(|checked| checked.contains(item))
    }

    /// Unchecks everything while keeping the store/category shape.
    pub fn clear(&mut self) {
        for categories in self.stores.values_mut() {
            for checked in categories.values_mut() {
                checked.clear();
            }
        }
    }

    /// Total number of checked items.
    pub fn selected_count(&self) -> usize {
        self.stores
            .values()
            .flat_map(|categories| categories.values())
            .map(BTreeSet::len)
            .sum()
    }

    /// Whether no item is checked.
    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }

    /// Checked categories of one store.
    pub fn store(&self, store: &str) -> Option<&SelectedCategories> {
        self.stores.get(store)
    }

    /// Store names with an entry, in insertion order.
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Iterates `(store, categories)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SelectedCategories)> {
        self.stores
            .iter()
            .map(|(store, categories)| (store.as_str(), categories))
    }

    /// Inserts a checked item without consulting a catalog.
    ///
    /// Used to build selections for formatting; call [`Selection::reconcile`]
    /// to enforce the catalog-subset invariant afterwards.
    pub fn insert_unchecked(&mut self, store: &str, category: &str, item: &str) {
        self.stores
            .entry(store.to_string())
            .or_default()
            .entry(category.to_string())
            .or_default()
            .insert(item.to_string());
    }
}
