//! Catalog and visit order edits shared by subcommands and the session.
//!
//! # Responsibility
//! - Apply one edit to the in-memory session and describe the outcome.
//! - Report which documents the edit dirtied; writing them is the caller's
//!   decision.
//!
//! # Invariants
//! - `apply_edit` never touches the filesystem.
//! - An edit that changed nothing reports `Dirty::Nothing`.

use crate::app::Service;
use log::debug;
use shoplist_core::normalize_name;

/// One user edit of the catalog or the visit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    AddStore(String),
    AddCategory {
        store: String,
        category: String,
    },
    AddItems {
        store: String,
        category: String,
        text: String,
    },
    RemoveItem {
        store: String,
        category: String,
        item: String,
    },
    RemoveCategory {
        store: String,
        category: String,
    },
    RemoveStore(String),
    /// One store per line.
    SetOrder(String),
}

/// Documents an edit left out of date on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dirty {
    Nothing,
    Catalog,
    Order,
    /// Store set changed, so the reconciled order changed with it.
    Both,
}

impl Dirty {
    /// Combines two dirty markers.
    pub fn merge(self, other: Dirty) -> Dirty {
        match (self, other) {
            (Dirty::Nothing, other) | (other, Dirty::Nothing) => other,
            (left, right) if left == right => left,
            _ => Dirty::Both,
        }
    }
}

/// Result of applying an edit: the user message and the dirtied documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub message: String,
    pub dirty: Dirty,
}

impl EditOutcome {
    fn changed(dirty: Dirty, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dirty,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            dirty: Dirty::Nothing,
        }
    }
}

/// Applies `edit` in memory; selection and order are reconciled by the
/// service.
pub fn apply_edit(service: &mut Service, edit: Edit) -> EditOutcome {
    let outcome = match edit {
        Edit::AddStore(name) => {
            let store = normalize_name(&name);
            if store.is_empty() {
                EditOutcome::unchanged("Enter a store name.")
            } else if service.catalog().contains_store(&store) {
                EditOutcome::unchanged("That store already exists.")
            } else {
                service.add_store(&store);
                EditOutcome::changed(Dirty::Both, format!("Added: {store}"))
            }
        }
        Edit::AddCategory { store, category } => {
            if service.add_category(&store, &category) {
                EditOutcome::changed(
                    Dirty::Catalog,
                    format!("Added category to {}.", normalize_name(&store)),
                )
            } else {
                EditOutcome::unchanged("Unknown store or category already exists.")
            }
        }
        Edit::AddItems {
            store,
            category,
            text,
        } => {
            if text.trim().is_empty() {
                EditOutcome::unchanged("Enter at least one product.")
            } else if service.add_items(&store, &category, &text) {
                EditOutcome::changed(Dirty::Catalog, "Products added.")
            } else if service.catalog().contains_store(&normalize_name(&store)) {
                EditOutcome::unchanged("Those products are already listed.")
            } else {
                EditOutcome::unchanged("Nothing added; check the store name.")
            }
        }
        Edit::RemoveItem {
            store,
            category,
            item,
        } => {
            if service.remove_item(&store, &category, &item) {
                EditOutcome::changed(Dirty::Catalog, format!("Removed: {item}"))
            } else {
                EditOutcome::unchanged("No such product.")
            }
        }
        Edit::RemoveCategory { store, category } => {
            if service.remove_category(&store, &category) {
                EditOutcome::changed(Dirty::Catalog, format!("Removed category: {category}"))
            } else {
                EditOutcome::unchanged("No such category.")
            }
        }
        Edit::RemoveStore(store) => {
            if service.remove_store(&store) {
                EditOutcome::changed(Dirty::Both, format!("Removed store: {store}"))
            } else {
                EditOutcome::unchanged("No such store.")
            }
        }
        Edit::SetOrder(text) => {
            let order = service.set_order_from_text(&text).to_text();
            EditOutcome::changed(
                Dirty::Order,
                format!("Store visit order updated.\n{order}"),
            )
        }
    };
    debug!("event=edit_apply module=cli dirty={:?}", outcome.dirty);
    outcome
}
