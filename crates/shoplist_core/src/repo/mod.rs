//! Repository layer for the two persisted JSON documents.
//!
//! # Responsibility
//! - Define load/save contracts for the catalog and the visit order.
//! - Isolate file and JSON details from service orchestration.
//!
//! # Invariants
//! - Loading never fails: absent or malformed documents fall back to
//!   defaults and are reported through logging only.
//! - Saving overwrites the whole document; a failed save leaves the previous
//!   file content in place.

use crate::model::catalog::Catalog;
use crate::model::visit_order::VisitOrder;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod catalog_repo;
mod document;
pub mod order_repo;

pub use catalog_repo::JsonCatalogRepository;
pub use order_repo::JsonOrderRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure raised by explicit save operations.
#[derive(Debug)]
pub enum RepoError {
    /// Filesystem failure while writing or replacing a document.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Document could not be encoded as JSON.
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
            Self::Encode { path, source } => {
                write!(f, "failed to encode `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
        }
    }
}

/// Catalog document persistence.
pub trait CatalogRepository {
    /// Loads the canonical catalog, or the default catalog when the document
    /// is absent, unreadable, malformed or empty.
    fn load(&self) -> Catalog;
    /// Overwrites the catalog document.
    fn save(&self, catalog: &Catalog) -> RepoResult<()>;
}

/// Visit order document persistence.
pub trait OrderRepository {
    /// Loads the order reconciled against `catalog`, seeding the default
    /// route when the document is absent, unreadable or malformed.
    fn load(&self, catalog: &Catalog) -> VisitOrder;
    /// Overwrites the order document.
    fn save(&self, order: &VisitOrder) -> RepoResult<()>;
}
