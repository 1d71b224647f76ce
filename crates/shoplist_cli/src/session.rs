//! Interactive line-oriented session.
//!
//! # Responsibility
//! - Keep one selection alive across many user actions.
//! - Offer check/search/list actions and in-memory catalog/order edits
//!   without leaving the process.
//!
//! # Invariants
//! - The selection is dropped when the session ends; it is never saved.
//! - Catalog/order documents are written only by the `save` action.
//! - Catalog edits reconcile the live selection before the next action.

use crate::app::{parse_pick, parse_store_category, save_dirty, Service};
use crate::edit::{apply_edit, Dirty, Edit};
use crate::error::CliError;
use crate::view::{render_list_panel, render_tiles};
use chrono::Local;
use log::info;
use std::io::{BufRead, Write};

const PROMPT: &str = "shoplist> ";
const HELP: &str = "\
Commands:
  show                             store tiles with checked items
  search TEXT                      tiles filtered by TEXT
  find TEXT                        matching products as STORE/CATEGORY/ITEM
  check STORE/CATEGORY/ITEM        put an item on the list
  uncheck STORE/CATEGORY/ITEM      take an item off the list
  toggle STORE/CATEGORY/ITEM       flip an item
  list                             copy-ready shopping list
  clear                            uncheck everything
  add-store STORE                  add a store
  add-category STORE/CATEGORY      add a category
  add-items STORE/CATEGORY/A, B    add products
  remove-item STORE/CATEGORY/ITEM  remove a product
  remove-category STORE/CATEGORY   remove a category
  remove-store STORE               remove a store
  order                            store visit order
  order set STORE, STORE, ...      change the visit order
  save                             save stores and visit order
  help                             this text
  quit                             leave the session";

/// Runs the read-eval-print loop until `quit` or end of input.
pub fn run_session(
    service: &mut Service,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    writeln!(out, "Type `help` for commands.")?;
    let mut unsaved = Dirty::Nothing;
    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        let trimmed = line.trim();
        let (verb, rest) = trimmed
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((trimmed, ""));

        match verb {
            "" => {}
            "quit" | "exit" => break,
            "help" => writeln!(out, "{HELP}")?,
            "show" => {
                let tiles = render_tiles(service.catalog(), service.selection(), "");
                writeln!(out, "{tiles}")?;
            }
            "search" => {
                let tiles = render_tiles(service.catalog(), service.selection(), rest);
                writeln!(out, "{tiles}")?;
            }
            "find" => {
                let hits = service.search(rest);
                if hits.is_empty() {
                    writeln!(out, "No matches.")?;
                }
                for hit in hits {
                    writeln!(out, "{}/{}/{}", hit.store, hit.category, hit.item)?;
                }
            }
            "check" | "uncheck" | "toggle" => match parse_pick(rest) {
                Ok(pick) => {
                    let (store, category, item) = (&pick.store, &pick.category, &pick.item);
                    let message = match verb {
                        "check" if service.check(store, category, item) => "Checked.",
                        "check" => "Not in catalog or already checked.",
                        "uncheck" if service.uncheck(store, category, item) => "Unchecked.",
                        "uncheck" => "Was not checked.",
                        _ if !service.catalog().contains_item(store, category, item) => {
                            "Not in catalog."
                        }
                        _ if service.toggle(store, category, item) => "Checked.",
                        _ => "Unchecked.",
                    };
                    writeln!(out, "{message}")?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            "list" => {
                let formatted = service.formatted_list(Local::now().date_naive());
                writeln!(out, "{}", render_list_panel(service.selection(), formatted))?;
            }
            "clear" => {
                service.clear_selection();
                writeln!(out, "Selections cleared.")?;
            }
            "order" if rest.is_empty() => writeln!(out, "{}", service.order().to_text())?,
            "add-store" | "add-category" | "add-items" | "remove-item" | "remove-category"
            | "remove-store" | "order" => match parse_edit(verb, rest) {
                Ok(edit) => {
                    let outcome = apply_edit(service, edit);
                    unsaved = unsaved.merge(outcome.dirty);
                    writeln!(out, "{}", outcome.message)?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            "save" => match save_dirty(service, Dirty::Both) {
                Ok(()) => {
                    unsaved = Dirty::Nothing;
                    writeln!(out, "Saved!")?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
            other => writeln!(out, "Unknown command `{other}`; type `help`.")?,
        }
    }

    if unsaved != Dirty::Nothing {
        writeln!(out, "Unsaved edits were discarded.")?;
    }
    info!(
        "event=session_end module=cli selected={} unsaved={:?}",
        service.selection().selected_count(),
        unsaved
    );
    Ok(())
}

/// Turns an edit verb and its argument into an [`Edit`].
fn parse_edit(verb: &str, rest: &str) -> Result<Edit, CliError> {
    let edit = match verb {
        "add-store" => Edit::AddStore(rest.to_string()),
        "remove-store" => Edit::RemoveStore(rest.to_string()),
        "add-category" => {
            let (store, category) = parse_store_category(rest)?;
            Edit::AddCategory { store, category }
        }
        "remove-category" => {
            let (store, category) = parse_store_category(rest)?;
            Edit::RemoveCategory { store, category }
        }
        "add-items" => {
            let pick = parse_pick(rest)?;
            Edit::AddItems {
                store: pick.store,
                category: pick.category,
                text: pick.item,
            }
        }
        "remove-item" => {
            let pick = parse_pick(rest)?;
            Edit::RemoveItem {
                store: pick.store,
                category: pick.category,
                item: pick.item,
            }
        }
        _ => match rest.strip_prefix("set") {
            Some(stores) if stores.is_empty() || stores.starts_with(char::is_whitespace) => {
                Edit::SetOrder(stores.split(',').collect::<Vec<_>>().join("\n"))
            }
            _ => return Err(CliError::Usage("order set STORE, STORE, ...")),
        },
    };
    Ok(edit)
}
