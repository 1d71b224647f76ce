//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shoplist")]
#[command(about = "Pick items per store and copy a route-ordered shopping list")]
#[command(version)]
pub struct Cli {
    /// Directory holding shopping_data.json and shopping_meta.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Directory for rolling log files (defaults to <data-dir>/logs)
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show store tiles with their categories and items
    Stores {
        /// Only show items containing this text (case-insensitive)
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Print the copy-ready list for the picked items
    List {
        /// Item to put on the list, as STORE/CATEGORY/ITEM (repeatable)
        #[arg(long = "pick", short, value_name = "STORE/CATEGORY/ITEM")]
        picks: Vec<String>,
    },
    /// Add a store
    AddStore {
        /// Store name.
        name: String,
    },
    /// Add a category to a store
    AddCategory {
        /// Existing store name.
        store: String,
        /// Category name (blank means Uncategorized).
        category: String,
    },
    /// Add products to a store category (comma or newline separated)
    AddItems {
        /// Existing store name.
        store: String,
        /// Category name; created when missing.
        category: String,
        /// Products; each argument may hold several comma-separated names.
        #[arg(required = true)]
        items: Vec<String>,
    },
    /// Remove a product from a store category
    RemoveItem {
        /// Store name.
        store: String,
        /// Category name.
        category: String,
        /// Exact product name.
        item: String,
    },
    /// Remove a category (the last category of a store is emptied instead)
    RemoveCategory {
        /// Store name.
        store: String,
        /// Category name.
        category: String,
    },
    /// Remove a store
    RemoveStore {
        /// Store name.
        store: String,
    },
    /// Show or edit the store visit order
    Order {
        /// Order subcommand action.
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Restore the built-in stores and visit order, then save both
    Reset,
    /// Interactive session: check items, search, and print the list
    Session,
}

/// Visit order subcommands.
#[derive(Subcommand, Debug)]
pub enum OrderAction {
    /// Print one store per line in visit order
    Show,
    /// Replace the order from one store per line (stdin unless --file)
    Set {
        /// Read the order text from this file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}
