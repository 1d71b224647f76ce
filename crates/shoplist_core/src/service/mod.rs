//! Use-case service layer.
//!
//! # Responsibility
//! - Orchestrate model mutations, reconciliation and repository saves.

pub mod shopping_service;
