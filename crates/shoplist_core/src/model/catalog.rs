//! Catalog domain model: stores, categories, and items.
//!
//! # Responsibility
//! - Own the canonical nested `store -> category -> items` shape.
//! - Resolve tolerated legacy document shapes into the canonical shape once.
//! - Provide in-memory CRUD with "ignore invalid target" semantics.
//!
//! # Invariants
//! - Every store has at least one category.
//! - Item lists are normalized, non-empty, case-insensitively unique and
//!   sorted case-insensitively.
//! - Mutations never persist; persistence is an explicit repository call.

use crate::model::name::{
    normalize_category, normalize_name, sort_case_insensitive, sorted_unique, split_item_text,
    UNCATEGORIZED,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category name to item list for one store.
pub type CategoryMap = IndexMap<String, Vec<String>>;

/// One store entry as it may appear in a persisted catalog document.
///
/// Older documents stored a flat item list per store; newer ones store a
/// category map. Anything else is kept as `Unrecognized` and resolves to an
/// empty `Uncategorized` category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawStorePayload {
    /// Legacy `{store: [items]}` shape.
    Flat(Vec<Value>),
    /// Canonical `{store: {category: [items]}}` shape.
    Nested(IndexMap<String, Value>),
    /// Any other JSON value.
    Unrecognized(Value),
}

/// Top-level persisted catalog document before canonicalization.
pub type RawCatalogDocument = IndexMap<String, RawStorePayload>;

/// Canonical in-memory catalog.
///
/// Serialized transparently as the catalog document object. Store and
/// category keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    stores: IndexMap<String, CategoryMap>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in catalog used on first start and by reset-to-defaults.
    pub fn default_catalog() -> Self {
        let presets: [(&str, &[(&str, &[&str])]); 4] = [
            (
                "Costco",
                &[
                    ("Bakery", &["Bread", "Ritz Crackers"]),
                    ("Dairy", &["Eggs", "Milk", "Cheese", "Butter", "Dahi"]),
                    ("Meat & Frozen", &["Chicken", "Chicken nuggets"]),
                    ("Pantry & Snacks", &["Chips", "Juice", "Nuts", "Cooking oil"]),
                    ("Household", &["Toilet Paper", "Paper Towel"]),
                ],
            ),
            (
                "Walmart",
                &[
                    ("Pantry", &["Tortillas", "Beans", "Pasta Noodles", "Sauces", "Sugar"]),
                    ("Dairy", &["Sour cream"]),
                    (
                        "Produce",
                        &["Veggies", "Fruits", "Tomato", "Potato", "Bell peppers", "Onion"],
                    ),
                ],
            ),
            (
                "Indian Store",
                &[
                    ("Staples", &["Rice", "Daal", "Pulses"]),
                    ("Spices", &["Masalas"]),
                    ("Convenience", &["Maggie noodles", "Mango pulp"]),
                ],
            ),
            ("Marianos", &[(UNCATEGORIZED, &[])]),
        ];

        let stores = presets
            .iter()
            .map(|(store, categories)| {
                let category_map = categories
                    .iter()
                    .map(|(category, items)| (category.to_string(), sorted_unique(*items)))
                    .collect::<CategoryMap>();
                (store.to_string(), category_map)
            })
            .collect();
        Self { stores }
    }

    /// Canonicalizes a raw persisted document.
    ///
    /// Store names are normalized and blank ones skipped. Later duplicates of
    /// the same normalized store name replace earlier ones in place.
    pub fn from_raw(raw: RawCatalogDocument) -> Self {
        let mut stores = IndexMap::new();
        for (raw_store, payload) in raw {
            let store = normalize_name(&raw_store);
            if store.is_empty() {
                continue;
            }
            stores.insert(store, resolve_store_payload(payload));
        }
        Self { stores }
    }

    /// Number of stores.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Whether the catalog holds no stores.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Whether a store with this exact name exists.
    pub fn contains_store(&self, store: &str) -> bool {
        self.stores.contains_key(store)
    }

    /// Whether the exact item exists in the given store category.
    pub fn contains_item(&self, store: &str, category: &str, item: &str) -> bool {
        self.items(store, category)
            .is_some_and(|items| items.iter().any(|existing| existing == item))
    }

    /// Store names in insertion order.
    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Store names sorted case-insensitively for display.
    pub fn store_names_sorted(&self) -> Vec<&str> {
        let mut names = self.store_names().collect::<Vec<_>>();
        sort_case_insensitive(&mut names);
        names
    }

    /// Category map for one store.
    pub fn categories(&self, store: &str) -> Option<&CategoryMap> {
        self.stores.get(store)
    }

    /// Category names of one store sorted case-insensitively; empty when the
    /// store is unknown.
    pub fn categories_sorted(&self, store: &str) -> Vec<&str> {
        let mut names = self
            .stores
            .get(store)
            .map(|categories| categories.keys().map(String::as_str).collect::<Vec<_>>())
            .unwrap_or_default();
        sort_case_insensitive(&mut names);
        names
    }

    /// Items of one store category.
    pub fn items(&self, store: &str, category: &str) -> Option<&[String]> {
        self.stores
            .get(store)
            .and_then(|categories| categories.get(category))
            .map(Vec::as_slice)
    }

    /// Iterates `(store, categories)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryMap)> {
        self.stores
            .iter()
            .map(|(store, categories)| (store.as_str(), categories))
    }

    /// Adds a store with one empty `Uncategorized` category.
    ///
    /// Returns `false` when the name is blank or already present.
    pub fn add_store(&mut self, name: &str) -> bool {
        let store = normalize_name(name);
        if store.is_empty() || self.stores.contains_key(&store) {
            return false;
        }
        self.stores.insert(store, empty_category_map());
        true
    }

    /// Adds an empty category to an existing store.
    ///
    /// Blank category names become `Uncategorized`. Returns `false` when the
    /// store is unknown or the category already exists.
    pub fn add_category(&mut self, store: &str, category: &str) -> bool {
        let store = normalize_name(store);
        let category = normalize_category(category);
        match self.stores.get_mut(&store) {
            Some(categories) if !categories.contains_key(&category) => {
                categories.insert(category, Vec::new());
                true
            }
            _ => false,
        }
    }

    /// Merges comma/newline separated items into a store category.
    ///
    /// The category is created when missing. Existing spellings win over new
    /// case-insensitive duplicates. Returns `false` when the store is unknown
    /// or nothing changed.
    pub fn add_items(&mut self, store: &str, category: &str, raw_text: &str) -> bool {
        let store = normalize_name(store);
        let category = normalize_category(category);
        let Some(categories) = self.stores.get_mut(&store) else {
            return false;
        };

        let created = !categories.contains_key(&category);
        let existing = categories.entry(category).or_default();
        let merged = sorted_unique(
            existing
                .iter()
                .cloned()
                .chain(split_item_text(raw_text)),
        );
        let changed = created || merged != *existing;
        *existing = merged;
        changed
    }

    /// Removes one exact item. Returns `false` when absent.
    pub fn remove_item(&mut self, store: &str, category: &str, item: &str) -> bool {
        let Some(items) = self
            .stores
            .get_mut(store)
            .and_then(|categories| categories.get_mut(category))
        else {
            return false;
        };
        let before = items.len();
        items.retain(|existing| existing != item);
        items.len() != before
    }

    /// Removes a category, or empties it when it is the store's only one.
    pub fn remove_category(&mut self, store: &str, category: &str) -> bool {
        let Some(categories) = self.stores.get_mut(store) else {
            return false;
        };
        if !categories.contains_key(category) {
            return false;
        }
        if categories.len() > 1 {
            categories.shift_remove(category);
        } else if let Some(items) = categories.get_mut(category) {
            items.clear();
        }
        true
    }

    /// Removes a store entirely. Returns `false` when absent.
    pub fn remove_store(&mut self, store: &str) -> bool {
        self.stores.shift_remove(store).is_some()
    }
}

fn empty_category_map() -> CategoryMap {
    let mut categories = CategoryMap::new();
    categories.insert(UNCATEGORIZED.to_string(), Vec::new());
    categories
}

fn resolve_store_payload(payload: RawStorePayload) -> CategoryMap {
    match payload {
        RawStorePayload::Flat(items) => {
            let mut categories = CategoryMap::new();
            categories.insert(
                UNCATEGORIZED.to_string(),
                sorted_unique(items.iter().filter_map(coerce_item)),
            );
            categories
        }
        RawStorePayload::Nested(raw_categories) => {
            let mut categories = CategoryMap::new();
            for (raw_category, items) in raw_categories {
                // Non-list category payloads are dropped.
                if let Value::Array(items) = items {
                    categories.insert(
                        normalize_category(&raw_category),
                        sorted_unique(items.iter().filter_map(coerce_item)),
                    );
                }
            }
            if categories.is_empty() {
                empty_category_map()
            } else {
                categories
            }
        }
        RawStorePayload::Unrecognized(_) => empty_category_map(),
    }
}

/// Coerces one persisted list entry into text; `null` is discarded.
pub(crate) fn coerce_item(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{Catalog, RawCatalogDocument};
    use crate::model::name::UNCATEGORIZED;

    fn catalog_from_json(json: &str) -> Catalog {
        let raw: RawCatalogDocument = serde_json::from_str(json).expect("valid raw document");
        Catalog::from_raw(raw)
    }

    #[test]
    fn default_catalog_has_four_stores_with_categories() {
        let catalog = Catalog::default_catalog();
        assert_eq!(
            catalog.store_names().collect::<Vec<_>>(),
            vec!["Costco", "Walmart", "Indian Store", "Marianos"]
        );
        assert_eq!(
            catalog.items("Costco", "Dairy").unwrap(),
            ["Butter", "Cheese", "Dahi", "Eggs", "Milk"]
        );
        assert_eq!(catalog.items("Marianos", UNCATEGORIZED).unwrap().len(), 0);
    }

    #[test]
    fn from_raw_resolves_flat_nested_and_unrecognized_shapes() {
        let catalog = catalog_from_json(
            r#"{
                "  Trader   Joe's ": ["Bananas", "bananas", " ", null, 3],
                "Costco": {"": ["Bread"], "Frozen": "not-a-list"},
                "Aldi": 42,
                "   ": ["ignored"]
            }"#,
        );

        assert_eq!(
            catalog.store_names().collect::<Vec<_>>(),
            vec!["Trader Joe's", "Costco", "Aldi"]
        );
        assert_eq!(
            catalog.items("Trader Joe's", UNCATEGORIZED).unwrap(),
            ["3", "Bananas"]
        );
        assert_eq!(catalog.items("Costco", UNCATEGORIZED).unwrap(), ["Bread"]);
        assert!(catalog.items("Costco", "Frozen").is_none());
        assert_eq!(catalog.categories_sorted("Aldi"), vec![UNCATEGORIZED]);
    }

    #[test]
    fn nested_store_without_list_categories_gets_uncategorized() {
        let catalog = catalog_from_json(r#"{"Costco": {"Dairy": {"Milk": 1}}}"#);
        assert_eq!(catalog.categories_sorted("Costco"), vec![UNCATEGORIZED]);
    }

    #[test]
    fn add_store_rejects_blank_and_duplicate_names() {
        let mut catalog = Catalog::new();
        assert!(catalog.add_store("  Target  "));
        assert!(!catalog.add_store("Target"));
        assert!(!catalog.add_store("   "));
        assert_eq!(catalog.categories_sorted("Target"), vec![UNCATEGORIZED]);
    }

    #[test]
    fn add_category_ignores_unknown_store_and_existing_category() {
        let mut catalog = Catalog::new();
        catalog.add_store("Target");
        assert!(!catalog.add_category("Nowhere", "Dairy"));
        assert!(catalog.add_category("Target", " Dairy "));
        assert!(!catalog.add_category("Target", "Dairy"));
        assert!(!catalog.add_category("Target", ""));
        assert_eq!(
            catalog.categories_sorted("Target"),
            vec!["Dairy", UNCATEGORIZED]
        );
    }

    #[test]
    fn add_items_merges_sorted_union_and_creates_category() {
        let mut catalog = Catalog::new();
        catalog.add_store("Target");
        assert!(catalog.add_items("Target", "Snacks", "chips, Apples\nchips"));
        assert!(catalog.add_items("Target", "Snacks", "CHIPS,bread"));
        assert_eq!(
            catalog.items("Target", "Snacks").unwrap(),
            ["Apples", "bread", "chips"]
        );
        assert!(!catalog.add_items("Target", "Snacks", " , \n"));
        assert!(!catalog.add_items("Nowhere", "Snacks", "chips"));
    }

    #[test]
    fn remove_item_requires_exact_match() {
        let mut catalog = Catalog::default_catalog();
        assert!(!catalog.remove_item("Costco", "Dairy", "milk"));
        assert!(catalog.remove_item("Costco", "Dairy", "Milk"));
        assert!(!catalog.contains_item("Costco", "Dairy", "Milk"));
        assert!(!catalog.remove_item("Costco", "Nope", "Eggs"));
    }

    #[test]
    fn remove_category_empties_the_last_category_instead_of_deleting() {
        let mut catalog = Catalog::new();
        catalog.add_store("Target");
        catalog.add_items("Target", "Snacks", "Chips");
        assert!(catalog.remove_category("Target", UNCATEGORIZED));
        assert_eq!(catalog.categories_sorted("Target"), vec!["Snacks"]);

        assert!(catalog.remove_category("Target", "Snacks"));
        assert_eq!(catalog.categories_sorted("Target"), vec!["Snacks"]);
        assert!(catalog.items("Target", "Snacks").unwrap().is_empty());
        assert!(!catalog.remove_category("Target", "Missing"));
    }

    #[test]
    fn remove_store_is_noop_when_absent() {
        let mut catalog = Catalog::default_catalog();
        assert!(catalog.remove_store("Walmart"));
        assert!(!catalog.remove_store("Walmart"));
        assert_eq!(catalog.len(), 3);
    }
}
