//! Terminal presentation layer for the shopping-list organizer.
//!
//! # Responsibility
//! - Parse command-line arguments and dispatch to core use-cases.
//! - Render store tiles, the list panel and the interactive session.

pub mod app;
pub mod cli;
pub mod edit;
pub mod error;
pub mod session;
pub mod view;

pub use app::{open_service, parse_pick, parse_store_category, run_command, Pick, Service};
pub use cli::{Cli, Command, OrderAction};
pub use edit::{apply_edit, Dirty, Edit, EditOutcome};
pub use error::CliError;
