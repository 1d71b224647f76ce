//! Store visit order model.
//!
//! # Responsibility
//! - Keep the user's shopping-route sequence of store names.
//! - Reconcile that sequence against the catalog and user-edited text.
//!
//! # Invariants
//! - After reconciliation the order is a permutation of the catalog's store
//!   names: no unknown names, no duplicates, no omissions.
//! - Stores missing from the explicit order are appended case-insensitively
//!   sorted.

use crate::model::catalog::{coerce_item, Catalog};
use crate::model::name::{normalize_name, sort_case_insensitive};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Route used when no usable persisted order exists.
pub const DEFAULT_STORE_ORDER: [&str; 4] = ["Costco", "Walmart", "Indian Store", "Marianos"];

/// Persisted order document shape: `{"store_order": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDocument {
    pub store_order: Vec<String>,
}

/// Order document as read from disk, before entries are coerced to text.
///
/// A `store_order` that is not a list makes the document malformed; single
/// odd entries inside the list do not.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawOrderDocument {
    pub store_order: Vec<Value>,
}

impl RawOrderDocument {
    /// Entries coerced to text; `null` entries are dropped.
    pub fn candidates(&self) -> Vec<String> {
        self.store_order.iter().filter_map(coerce_item).collect()
    }
}

/// Ordered store names for the shopping route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitOrder(Vec<String>);

impl VisitOrder {
    /// Builds a reconciled order from persisted candidates.
    ///
    /// Candidates are normalized and blanks dropped; when nothing usable
    /// remains, [`DEFAULT_STORE_ORDER`] seeds the order.
    pub fn from_candidates<I, S>(candidates: I, catalog: &Catalog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = candidates
            .into_iter()
            .map(|name| normalize_name(name.as_ref()))
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        if normalized.is_empty() {
            normalized = DEFAULT_STORE_ORDER.iter().map(|name| name.to_string()).collect();
        }
        Self(complete_order(normalized, catalog))
    }

    /// Default route reconciled against `catalog`.
    pub fn seeded(catalog: &Catalog) -> Self {
        Self::from_candidates(DEFAULT_STORE_ORDER, catalog)
    }

    /// Parses user-edited text with one store per line.
    ///
    /// Lines that do not exactly match a store (after normalization) are
    /// ignored; the result is always a permutation of the catalog stores.
    pub fn parse_from_text(text: &str, catalog: &Catalog) -> Self {
        let listed = text
            .lines()
            .map(normalize_name)
            .filter(|name| !name.is_empty())
            .collect::<Vec<_>>();
        Self(complete_order(listed, catalog))
    }

    /// Re-applies the filter/append rule after the catalog changed.
    pub fn reconcile(&mut self, catalog: &Catalog) {
        let current = std::mem::take(&mut self.0);
        self.0 = complete_order(current, catalog);
    }

    /// Store names in route order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates store names in route order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of stores in the route.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the route is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One store per line, the editable text form.
    pub fn to_text(&self) -> String {
        self.0.join("\n")
    }

    /// Persisted document for this order.
    pub fn to_document(&self) -> OrderDocument {
        OrderDocument {
            store_order: self.0.clone(),
        }
    }
}

/// Orders `names` by an explicit sequence first, then appends the remaining
/// names case-insensitively sorted. Every name appears exactly once.
///
/// Entries of `preferred` not contained in `names` are skipped.
pub fn ordered_names<'a, P, N>(preferred: P, names: N) -> Vec<&'a str>
where
    P: IntoIterator<Item = &'a str>,
    N: IntoIterator<Item = &'a str>,
{
    let mut remaining = names.into_iter().collect::<Vec<_>>();
    let known = remaining.iter().copied().collect::<HashSet<_>>();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(remaining.len());

    for name in preferred {
        if known.contains(name) && seen.insert(name) {
            out.push(name);
        }
    }

    sort_case_insensitive(&mut remaining);
    for name in remaining {
        if seen.insert(name) {
            out.push(name);
        }
    }
    out
}

fn complete_order(listed: Vec<String>, catalog: &Catalog) -> Vec<String> {
    ordered_names(listed.iter().map(String::as_str), catalog.store_names())
        .into_iter()
        .map(str::to_string)
        .collect()
}
