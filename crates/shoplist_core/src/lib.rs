//! Core domain logic for the shopping-list organizer.
//! This crate is the single source of truth for catalog, visit order and
//! selection invariants.

pub mod config;
pub mod format;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{AppPaths, ConfigError};
pub use format::{format_shopping_list, has_selected_items, CHECKBOX_BULLET, UNDERLINE_CHAR};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Catalog, CategoryMap, RawCatalogDocument, RawStorePayload};
pub use model::name::{normalize_name, UNCATEGORIZED};
pub use model::selection::Selection;
pub use model::visit_order::{OrderDocument, RawOrderDocument, VisitOrder, DEFAULT_STORE_ORDER};
pub use repo::{
    CatalogRepository, JsonCatalogRepository, JsonOrderRepository, OrderRepository, RepoError,
    RepoResult,
};
pub use search::{filter_items, search_catalog, SearchHit};
pub use service::shopping_service::{ServiceError, ServiceResult, ShoppingService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
