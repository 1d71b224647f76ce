//! Shopping session use-case service.
//!
//! # Responsibility
//! - Own the explicit application state of one session: catalog, visit
//!   order and selection.
//! - Run order and selection reconciliation after every catalog mutation.
//! - Flush documents only on explicit save requests.
//!
//! # Invariants
//! - After any public call, the visit order is a permutation of catalog
//!   stores and the selection is a subset of catalog items.
//! - A failed save leaves in-memory state untouched.
//! - Each service instance has its own selection.

use crate::format::format_shopping_list;
use crate::model::catalog::Catalog;
use crate::model::selection::Selection;
use crate::model::visit_order::VisitOrder;
use crate::repo::{CatalogRepository, OrderRepository, RepoError};
use crate::search::{search_catalog, SearchHit};
use chrono::NaiveDate;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for shopping session use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// An explicit save could not be written.
    Save(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Save(err) => write!(f, "save failed: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Save(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Save(value)
    }
}

/// Shopping session facade over catalog/order repositories.
pub struct ShoppingService<C: CatalogRepository, O: OrderRepository> {
    catalog_repo: C,
    order_repo: O,
    catalog: Catalog,
    order: VisitOrder,
    selection: Selection,
}

impl<C: CatalogRepository, O: OrderRepository> ShoppingService<C, O> {
    /// Loads both documents and starts an empty selection.
    pub fn open(catalog_repo: C, order_repo: O) -> Self {
        let catalog = catalog_repo.load();
        let order = order_repo.load(&catalog);
        let selection = Selection::for_catalog(&catalog);
        info!(
            "event=session_open module=service status=ok stores={}",
            catalog.len()
        );
        Self {
            catalog_repo,
            order_repo,
            catalog,
            order,
            selection,
        }
    }

    /// Current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Current visit order.
    pub fn order(&self) -> &VisitOrder {
        &self.order
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adds a store. See [`Catalog::add_store`].
    pub fn add_store(&mut self, name: &str) -> bool {
        let changed = self.catalog.add_store(name);
        self.after_mutation("add_store", changed);
        changed
    }

    /// Adds a category. See [`Catalog::add_category`].
    pub fn add_category(&mut self, store: &str, category: &str) -> bool {
        let changed = self.catalog.add_category(store, category);
        self.after_mutation("add_category", changed);
        changed
    }

    /// Merges items into a category. See [`Catalog::add_items`].
    pub fn add_items(&mut self, store: &str, category: &str, raw_text: &str) -> bool {
        let changed = self.catalog.add_items(store, category, raw_text);
        self.after_mutation("add_items", changed);
        changed
    }

    /// Removes one item. See [`Catalog::remove_item`].
    pub fn remove_item(&mut self, store: &str, category: &str, item: &str) -> bool {
        let changed = self.catalog.remove_item(store, category, item);
        self.after_mutation("remove_item", changed);
        changed
    }

    /// Removes or empties a category. See [`Catalog::remove_category`].
    pub fn remove_category(&mut self, store: &str, category: &str) -> bool {
        let changed = self.catalog.remove_category(store, category);
        self.after_mutation("remove_category", changed);
        changed
    }

    /// Removes a store. See [`Catalog::remove_store`].
    pub fn remove_store(&mut self, store: &str) -> bool {
        let changed = self.catalog.remove_store(store);
        self.after_mutation("remove_store", changed);
        changed
    }

    /// Replaces the visit order from one-store-per-line text.
    pub fn set_order_from_text(&mut self, text: &str) -> &VisitOrder {
        self.order = VisitOrder::parse_from_text(text, &self.catalog);
        info!(
            "event=order_update module=service status=ok stores={}",
            self.order.len()
        );
        &self.order
    }

    /// Checks a catalog item. Returns whether the selection changed.
    pub fn check(&mut self, store: &str, category: &str, item: &str) -> bool {
        self.selection.check(&self.catalog, store, category, item)
    }

    /// Unchecks an item. Returns whether the selection changed.
    pub fn uncheck(&mut self, store: &str, category: &str, item: &str) -> bool {
        self.selection.uncheck(store, category, item)
    }

    /// Flips an item's checked state. Returns the new state.
    pub fn toggle(&mut self, store: &str, category: &str, item: &str) -> bool {
        self.selection.toggle(&self.catalog, store, category, item)
    }

    /// Unchecks every item.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        debug!("event=selection_clear module=service status=ok");
    }

    /// Searches catalog items.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search_catalog(&self.catalog, query)
    }

    /// Renders the current selection for `date`.
    pub fn formatted_list(&self, date: NaiveDate) -> String {
        format_shopping_list(&self.selection, &self.order, date)
    }

    /// Persists the catalog document.
    pub fn save_catalog(&self) -> ServiceResult<()> {
        self.catalog_repo.save(&self.catalog)?;
        Ok(())
    }

    /// Persists the visit order document.
    pub fn save_order(&self) -> ServiceResult<()> {
        self.order_repo.save(&self.order)?;
        Ok(())
    }

    /// Persists both documents, catalog first.
    pub fn save_all(&self) -> ServiceResult<()> {
        self.save_catalog()?;
        self.save_order()
    }

    /// Restores the built-in catalog and route, clears the selection and
    /// persists both documents immediately.
    pub fn reset_to_defaults(&mut self) -> ServiceResult<()> {
        self.catalog = Catalog::default_catalog();
        self.order = VisitOrder::seeded(&self.catalog);
        self.selection = Selection::for_catalog(&self.catalog);
        info!("event=reset_defaults module=service status=ok");
        self.save_all()
    }

    fn after_mutation(&mut self, operation: &'static str, changed: bool) {
        if changed {
            self.order.reconcile(&self.catalog);
            self.selection.reconcile(&self.catalog);
        }
        debug!(
            "event=catalog_mutation module=service operation={} changed={}",
            operation, changed
        );
    }
}

#[cfg(test)]
mod tests {
    use super::ShoppingService;
    use crate::model::catalog::Catalog;
    use crate::model::visit_order::VisitOrder;
    use crate::repo::{CatalogRepository, OrderRepository, RepoResult};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryCatalogRepo {
        saved: RefCell<Option<Catalog>>,
    }

    impl CatalogRepository for MemoryCatalogRepo {
        fn load(&self) -> Catalog {
            self.saved
                .borrow()
                .clone()
                .unwrap_or_else(Catalog::default_catalog)
        }

        fn save(&self, catalog: &Catalog) -> RepoResult<()> {
            *self.saved.borrow_mut() = Some(catalog.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryOrderRepo {
        saved: RefCell<Option<VisitOrder>>,
    }

    impl OrderRepository for MemoryOrderRepo {
        fn load(&self, catalog: &Catalog) -> VisitOrder {
            self.saved
                .borrow()
                .clone()
                .unwrap_or_else(|| VisitOrder::seeded(catalog))
        }

        fn save(&self, order: &VisitOrder) -> RepoResult<()> {
            *self.saved.borrow_mut() = Some(order.clone());
            Ok(())
        }
    }

    fn open() -> ShoppingService<MemoryCatalogRepo, MemoryOrderRepo> {
        ShoppingService::open(MemoryCatalogRepo::default(), MemoryOrderRepo::default())
    }

    #[test]
    fn store_mutations_keep_order_and_selection_aligned() {
        let mut service = open();
        service.check("Walmart", "Produce", "Onion");
        assert!(service.add_store("Aldi"));
        assert!(service.remove_store("Walmart"));

        assert_eq!(
            service.order().as_slice(),
            ["Costco", "Indian Store", "Marianos", "Aldi"]
        );
        assert!(service.selection().store("Walmart").is_none());
        assert!(service.selection().store("Aldi").is_some());
        assert!(service.selection().is_empty());
    }

    #[test]
    fn removing_a_checked_item_unchecks_it() {
        let mut service = open();
        assert!(service.check("Costco", "Dairy", "Milk"));
        assert!(service.remove_item("Costco", "Dairy", "Milk"));
        assert!(!service.selection().is_checked("Costco", "Dairy", "Milk"));
    }

    #[test]
    fn reset_to_defaults_restores_and_persists_both_documents() {
        let mut service = open();
        service.remove_store("Costco");
        service.add_items("Walmart", "Pantry", "Rice");
        service.check("Walmart", "Pantry", "Rice");
        service.reset_to_defaults().unwrap();

        assert_eq!(service.catalog(), &Catalog::default_catalog());
        assert!(service.selection().is_empty());
        assert_eq!(
            service.catalog_repo.saved.borrow().as_ref(),
            Some(&Catalog::default_catalog())
        );
        assert_eq!(
            service.order_repo.saved.borrow().as_ref().map(VisitOrder::len),
            Some(4)
        );
    }

    #[test]
    fn set_order_from_text_ignores_unknown_lines() {
        let mut service = open();
        let order = service.set_order_from_text("Marianos\nTarget\nCostco");
        assert_eq!(
            order.as_slice(),
            ["Marianos", "Costco", "Indian Store", "Walmart"]
        );
    }
}
