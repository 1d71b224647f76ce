//! Command dispatch over one shopping session.
//!
//! # Responsibility
//! - Map each subcommand onto `ShoppingService` use-cases.
//! - Persist after catalog/order edits; a command is the user's save action.
//!
//! # Invariants
//! - Documents are only written when a command changed something, or on
//!   `reset`.

use crate::cli::{Command, OrderAction};
use crate::edit::{apply_edit, Dirty, Edit};
use crate::error::CliError;
use crate::session::run_session;
use crate::view::{render_list_panel, render_tiles};
use chrono::Local;
use log::info;
use shoplist_core::{
    normalize_name, AppPaths, JsonCatalogRepository, JsonOrderRepository, ShoppingService,
};
use std::io::{BufRead, Write};

/// Session type backed by the two JSON documents.
pub type Service = ShoppingService<JsonCatalogRepository, JsonOrderRepository>;

/// Opens a session over the documents in `paths`.
pub fn open_service(paths: &AppPaths) -> Service {
    ShoppingService::open(
        JsonCatalogRepository::new(&paths.catalog_file),
        JsonOrderRepository::new(&paths.order_file),
    )
}

/// One `STORE/CATEGORY/ITEM` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pick {
    pub store: String,
    pub category: String,
    pub item: String,
}

/// Parses `STORE/CATEGORY`.
pub fn parse_store_category(raw: &str) -> Result<(String, String), CliError> {
    match raw.split_once('/') {
        Some((store, category)) => {
            let (store, category) = (normalize_name(store), normalize_name(category));
            if store.is_empty() || category.is_empty() {
                Err(CliError::InvalidCategoryPath(raw.to_string()))
            } else {
                Ok((store, category))
            }
        }
        None => Err(CliError::InvalidCategoryPath(raw.to_string())),
    }
}

/// Parses `STORE/CATEGORY/ITEM`; the item part may itself contain `/`.
pub fn parse_pick(raw: &str) -> Result<Pick, CliError> {
    let mut parts = raw.splitn(3, '/').map(normalize_name);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(store), Some(category), Some(item))
            if !store.is_empty() && !category.is_empty() && !item.is_empty() =>
        {
            Ok(Pick {
                store,
                category,
                item,
            })
        }
        _ => Err(CliError::InvalidPick(raw.to_string())),
    }
}

/// Executes one subcommand.
pub fn run_command(
    command: Command,
    service: &mut Service,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    info!("event=command_start module=cli command={}", command_name(&command));
    match command {
        Command::Stores { search } => {
            let query = search.unwrap_or_default();
            let tiles = render_tiles(service.catalog(), service.selection(), &query);
            writeln!(out, "{tiles}")?;
        }
        Command::List { picks } => {
            for raw in &picks {
                let pick = parse_pick(raw)?;
                if !service.check(&pick.store, &pick.category, &pick.item) {
                    writeln!(out, "Not in catalog: {raw}")?;
                }
            }
            let formatted = service.formatted_list(Local::now().date_naive());
            writeln!(out, "{}", render_list_panel(service.selection(), formatted))?;
        }
        Command::AddStore { name } => {
            edit_and_save(service, Edit::AddStore(name), out)?;
        }
        Command::AddCategory { store, category } => {
            edit_and_save(service, Edit::AddCategory { store, category }, out)?;
        }
        Command::AddItems {
            store,
            category,
            items,
        } => {
            let text = items.join("\n");
            edit_and_save(
                service,
                Edit::AddItems {
                    store,
                    category,
                    text,
                },
                out,
            )?;
        }
        Command::RemoveItem {
            store,
            category,
            item,
        } => {
            let edit = Edit::RemoveItem {
                store,
                category,
                item,
            };
            edit_and_save(service, edit, out)?;
        }
        Command::RemoveCategory { store, category } => {
            edit_and_save(service, Edit::RemoveCategory { store, category }, out)?;
        }
        Command::RemoveStore { store } => {
            edit_and_save(service, Edit::RemoveStore(store), out)?;
        }
        Command::Order { action } => match action {
            OrderAction::Show => writeln!(out, "{}", service.order().to_text())?,
            OrderAction::Set { file } => {
                let text = match file {
                    Some(path) => std::fs::read_to_string(path)?,
                    None => {
                        let mut text = String::new();
                        input.read_to_string(&mut text)?;
                        text
                    }
                };
                edit_and_save(service, Edit::SetOrder(text), out)?;
            }
        },
        Command::Reset => {
            service.reset_to_defaults()?;
            writeln!(out, "Restored default stores and visit order.")?;
        }
        Command::Session => run_session(service, input, out)?,
    }
    Ok(())
}

/// Applies one edit and writes the documents it dirtied.
fn edit_and_save(
    service: &mut Service,
    edit: Edit,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let outcome = apply_edit(service, edit);
    save_dirty(service, outcome.dirty)?;
    writeln!(out, "{}", outcome.message)?;
    Ok(())
}

/// Writes the documents named by `dirty`.
pub fn save_dirty(service: &Service, dirty: Dirty) -> Result<(), CliError> {
    match dirty {
        Dirty::Nothing => {}
        Dirty::Catalog => service.save_catalog()?,
        Dirty::Order => service.save_order()?,
        Dirty::Both => service.save_all()?,
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Stores { .. } => "stores",
        Command::List { .. } => "list",
        Command::AddStore { .. } => "add_store",
        Command::AddCategory { .. } => "add_category",
        Command::AddItems { .. } => "add_items",
        Command::RemoveItem { .. } => "remove_item",
        Command::RemoveCategory { .. } => "remove_category",
        Command::RemoveStore { .. } => "remove_store",
        Command::Order { .. } => "order",
        Command::Reset => "reset",
        Command::Session => "session",
    }
}
