//! Visit order document repository backed by a JSON file.
//!
//! # Invariants
//! - The document shape is `{"store_order": [..]}`; other keys are ignored.
//! - A non-list `store_order` makes the document malformed; non-string
//!   entries inside the list are coerced to text and `null` is dropped.

use super::document::{read_document, write_document};
use super::{OrderRepository, RepoResult};
use crate::model::catalog::Catalog;
use crate::model::visit_order::{RawOrderDocument, VisitOrder};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Order repository storing one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonOrderRepository {
    path: PathBuf,
}

impl JsonOrderRepository {
    /// Creates a repository for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Document location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OrderRepository for JsonOrderRepository {
    fn load(&self, catalog: &Catalog) -> VisitOrder {
        let candidates = match read_document(&self.path) {
            Ok(text) => match serde_json::from_str::<RawOrderDocument>(&text) {
                Ok(document) => document.candidates(),
                Err(err) => {
                    warn!(
                        "event=order_load module=repo status=fallback reason=malformed error={}",
                        err
                    );
                    Vec::new()
                }
            },
            Err(failure) => {
                warn!(
                    "event=order_load module=repo status=fallback reason={} error={}",
                    failure.reason(),
                    failure.detail()
                );
                Vec::new()
            }
        };

        let order = VisitOrder::from_candidates(candidates, catalog);
        info!("event=order_load module=repo status=ok stores={}", order.len());
        order
    }

    fn save(&self, order: &VisitOrder) -> RepoResult<()> {
        write_document(&self.path, &order.to_document(), "order")
    }
}
