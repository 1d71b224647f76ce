//! Catalog document repository backed by a JSON file.
//!
//! # Responsibility
//! - Load the catalog document, tolerating legacy store shapes.
//! - Persist the canonical nested shape.
//!
//! # Invariants
//! - Load never fails; any problem yields [`Catalog::default_catalog`].
//! - A document that canonicalizes to zero stores also yields the default.

use super::document::{read_document, write_document};
use super::{CatalogRepository, RepoResult};
use crate::model::catalog::{Catalog, RawCatalogDocument};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Catalog repository storing one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    /// Creates a repository for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for JsonCatalogRepository {
    fn load(&self) -> Catalog {
        let text = match read_document(&self.path) {
            Ok(text) => text,
            Err(failure) => {
                warn!(
                    "event=catalog_load module=repo status=fallback reason={} error={}",
                    failure.reason(),
                    failure.detail()
                );
                return Catalog::default_catalog();
            }
        };

        match parse_catalog(&text) {
            Some(catalog) => {
                info!(
                    "event=catalog_load module=repo status=ok stores={}",
                    catalog.len()
                );
                catalog
            }
            None => {
                warn!("event=catalog_load module=repo status=fallback reason=malformed");
                Catalog::default_catalog()
            }
        }
    }

    fn save(&self, catalog: &Catalog) -> RepoResult<()> {
        write_document(&self.path, catalog, "catalog")
    }
}

/// Parses and canonicalizes catalog document text.
///
/// Returns `None` when the text is not a JSON object or holds no usable
/// store.
pub fn parse_catalog(text: &str) -> Option<Catalog> {
    let raw = serde_json::from_str::<RawCatalogDocument>(text).ok()?;
    let catalog = Catalog::from_raw(raw);
    if catalog.is_empty() {
        None
    } else {
        Some(catalog)
    }
}
