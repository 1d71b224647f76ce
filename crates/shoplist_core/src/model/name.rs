//! Name normalization and ordering helpers.
//!
//! # Responsibility
//! - Normalize user-entered store/category/item names.
//! - Provide the case-insensitive ordering used for display and persistence.
//!
//! # Invariants
//! - A normalized name never has leading/trailing whitespace and never
//!   contains runs of more than one space.
//! - Item uniqueness is case-insensitive; the first spelling seen wins.

use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static ITEM_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,\n]").expect("valid item separator regex"));

/// Category used when a name is missing or a store would otherwise be empty.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Collapses all whitespace runs into one space and trims both ends.
pub fn normalize_name(raw: &str) -> String {
    WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned()
}

/// Normalizes a category name, falling back to [`UNCATEGORIZED`] when blank.
pub fn normalize_category(raw: &str) -> String {
    let normalized = normalize_name(raw);
    if normalized.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        normalized
    }
}

/// Splits free-form item input on commas and newlines.
///
/// Every piece is normalized and blank pieces are dropped. Input order is
/// kept; duplicates are not removed here.
pub fn split_item_text(text: &str) -> Vec<String> {
    ITEM_SEPARATOR_RE
        .split(text)
        .map(normalize_name)
        .filter(|piece| !piece.is_empty())
        .collect()
}

/// Case-insensitive comparison with an exact-match tiebreak for determinism.
pub fn case_insensitive_cmp(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Sorts names in place using [`case_insensitive_cmp`].
pub fn sort_case_insensitive<S: AsRef<str>>(names: &mut [S]) {
    names.sort_by(|left, right| case_insensitive_cmp(left.as_ref(), right.as_ref()));
}

/// Normalizes, drops blanks, deduplicates case-insensitively (first spelling
/// wins), and sorts case-insensitively.
pub fn sorted_unique<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for raw in names {
        let name = normalize_name(raw.as_ref());
        if name.is_empty() {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            out.push(name);
        }
    }
    sort_case_insensitive(&mut out);
    out
}
