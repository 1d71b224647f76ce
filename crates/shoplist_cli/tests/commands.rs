use clap::Parser;
use shoplist_cli::{open_service, run_command, Cli, CliError};
use shoplist_core::{AppPaths, CatalogRepository, JsonCatalogRepository};
use std::io::Cursor;
use std::path::Path;

fn paths_in(dir: &Path) -> AppPaths {
    AppPaths::resolve_with(Some(dir.to_path_buf()), None, dir, |_| None)
}

fn run(dir: &Path, args: &[&str], stdin: &str) -> Result<String, CliError> {
    let cli = Cli::try_parse_from(std::iter::once("shoplist").chain(args.iter().copied()))
        .expect("arguments should parse");
    let mut service = open_service(&paths_in(dir));
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out = Vec::new();
    run_command(cli.command, &mut service, &mut input, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn add_store_validates_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run(dir.path(), &["add-store", "  "], "").unwrap(), "Enter a store name.\n");
    assert_eq!(run(dir.path(), &["add-store", " Target "], "").unwrap(), "Added: Target\n");
    assert_eq!(
        run(dir.path(), &["add-store", "Target"], "").unwrap(),
        "That store already exists.\n"
    );

    let order = run(dir.path(), &["order", "show"], "").unwrap();
    assert_eq!(order, "Costco\nWalmart\nIndian Store\nMarianos\nTarget\n");
}

#[test]
fn add_items_then_search_shows_merged_products() {
    let dir = tempfile::tempdir().unwrap();
    let added = run(
        dir.path(),
        &["add-items", "Marianos", "Bakery", "Bagels, croissants", "bagels"],
        "",
    )
    .unwrap();
    assert_eq!(added, "Products added.\n");

    let catalog = JsonCatalogRepository::new(paths_in(dir.path()).catalog_file).load();
    assert_eq!(
        catalog.items("Marianos", "Bakery").unwrap(),
        ["Bagels", "croissants"]
    );

    let tiles = run(dir.path(), &["stores", "--search", "bagel"], "").unwrap();
    assert!(tiles.contains("== Marianos ==\n  Bakery\n    [ ] Bagels"));
}

#[test]
fn list_prints_copy_ready_text_for_picks() {
    let dir = tempfile::tempdir().unwrap();
    let text = run(
        dir.path(),
        &[
            "list",
            "--pick",
            "Walmart/Produce/Onion",
            "--pick",
            "Costco/Dairy/Milk",
            "--pick",
            "Costco/Dairy/Caviar",
        ],
        "",
    )
    .unwrap();

    assert!(text.starts_with("Not in catalog: Costco/Dairy/Caviar\nShopping List - "));
    assert!(text.contains("*Costco*\n————————\n☐ Milk\n\n*Walmart*"));
    assert!(text.ends_with("☐ Onion\n"));
}

#[test]
fn list_without_picks_shows_hint_and_bad_pick_fails() {
    let dir = tempfile::tempdir().unwrap();
    let text = run(dir.path(), &["list"], "").unwrap();
    assert_eq!(text, "Select items from the store tiles to build your list.\n");

    let err = run(dir.path(), &["list", "--pick", "Costco"], "").unwrap_err();
    assert!(matches!(err, CliError::InvalidPick(_)));
}

#[test]
fn order_set_reads_stdin_and_completes_missing_stores() {
    let dir = tempfile::tempdir().unwrap();
    let text = run(dir.path(), &["order", "set"], "Marianos\nnope\nCostco\n").unwrap();
    assert_eq!(
        text,
        "Store visit order updated.\nMarianos\nCostco\nIndian Store\nWalmart\n"
    );
    let shown = run(dir.path(), &["order", "show"], "").unwrap();
    assert_eq!(shown, "Marianos\nCostco\nIndian Store\nWalmart\n");
}

#[test]
fn remove_store_and_reset_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run(dir.path(), &["remove-store", "Costco"], "").unwrap(),
        "Removed store: Costco\n"
    );
    assert_eq!(
        run(dir.path(), &["remove-store", "Costco"], "").unwrap(),
        "No such store.\n"
    );
    run(dir.path(), &["reset"], "").unwrap();
    let order = run(dir.path(), &["order", "show"], "").unwrap();
    assert_eq!(order, "Costco\nWalmart\nIndian Store\nMarianos\n");
}

#[test]
fn remove_last_category_keeps_store_usable() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["remove-category", "Marianos", "Uncategorized"], "").unwrap();
    assert_eq!(out, "Removed category: Uncategorized\n");
    let tiles = run(dir.path(), &["stores"], "").unwrap();
    assert!(tiles.contains("== Marianos ==\n  No products yet."));
}

#[test]
fn session_keeps_selection_between_actions_but_not_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let script = "check Costco/Dairy/Milk\ntoggle Costco/Bakery/Bread\ntoggle Costco/Bakery/Bread\nlist\nquit\n";
    let out = run(dir.path(), &["session"], script).unwrap();
    assert!(out.contains("Checked.\nshoplist> Checked.\nshoplist> Unchecked."));
    assert!(out.contains("*Costco*\n————————\n☐ Milk\n"));
    assert!(!out.contains("☐ Bread"));

    let next = run(dir.path(), &["session"], "list\n").unwrap();
    assert!(next.contains("Select items from the store tiles to build your list."));
}

#[test]
fn session_save_writes_documents() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["session"], "save\nbogus\n").unwrap();
    assert!(out.contains("Saved!"));
    assert!(out.contains("Unknown command `bogus`"));
    assert!(paths_in(dir.path()).catalog_file.exists());
    assert!(paths_in(dir.path()).order_file.exists());
}

#[test]
fn session_remove_item_drops_it_from_the_live_list() {
    let dir = tempfile::tempdir().unwrap();
    let script = "check Costco/Dairy/Milk\ncheck Costco/Dairy/Eggs\nremove-item Costco/Dairy/Milk\nlist\nquit\n";
    let out = run(dir.path(), &["session"], script).unwrap();

    assert!(out.contains("Removed: Milk"));
    assert!(out.contains("*Costco*\n————————\n☐ Eggs\n"));
    assert!(!out.contains("☐ Milk"));
    assert!(out.ends_with("Unsaved edits were discarded.\n"));
    assert!(!paths_in(dir.path()).catalog_file.exists());
}

#[test]
fn session_edits_are_written_only_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let script = "add-store Target\nadd-items Target/Snacks/Pretzels, popcorn\norder set Target, Costco\nsave\nquit\n";
    let out = run(dir.path(), &["session"], script).unwrap();
    assert!(out.contains("Added: Target"));
    assert!(out.contains("Products added."));
    assert!(out.contains("Saved!"));
    assert!(!out.contains("Unsaved edits"));

    let catalog = JsonCatalogRepository::new(paths_in(dir.path()).catalog_file).load();
    assert_eq!(
        catalog.items("Target", "Snacks").unwrap(),
        ["popcorn", "Pretzels"]
    );
    let order = run(dir.path(), &["order", "show"], "").unwrap();
    assert_eq!(order, "Target\nCostco\nIndian Store\nMarianos\nWalmart\n");
}

#[test]
fn session_find_lists_pickable_paths() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(dir.path(), &["session"], "find noodles\nfind caviar\n").unwrap();
    assert!(out.contains(
        "Indian Store/Convenience/Maggie noodles\nWalmart/Pantry/Pasta Noodles\n"
    ));
    assert!(out.contains("No matches."));
}

#[test]
fn add_items_reports_duplicates_separately_from_unknown_stores() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(
        run(dir.path(), &["add-items", "Costco", "Dairy", "milk"], "").unwrap(),
        "Those products are already listed.\n"
    );
    assert_eq!(
        run(dir.path(), &["add-items", "Nowhere", "Dairy", "Milk"], "").unwrap(),
        "Nothing added; check the store name.\n"
    );
    assert!(!paths_in(dir.path()).catalog_file.exists());
}
