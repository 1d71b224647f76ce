//! Shopping domain model.
//!
//! # Responsibility
//! - Define the canonical catalog, visit order and selection types.
//! - Keep every mutation pure and in-memory; persistence lives in `repo`.
//!
//! # Invariants
//! - Names are normalized at the point of entry and never stored blank.
//! - Visit order and selection are always reconcilable against the catalog.

pub mod catalog;
pub mod name;
pub mod selection;
pub mod visit_order;
