//! Author name normalization.

use regex::Regex;
use std::sync::LazyLock;

static LAST_FIRST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\w+,\s*\w+").expect("valid regex"));

/// Turns `Last, First` into `First Last`; anything else is only trimmed.
pub fn normalize_author(raw: &str) -> String {
    let name = raw.trim();
    if LAST_FIRST.is_match(name) {
        if let Some((last, first)) = name.split_once(',') {
            return format!("{} {}", first.trim(), last.trim());
        }
    }
    name.to_string()
}

/// Normalizes every author and joins them with `", "`.
pub fn join_authors<S: AsRef<str>>(authors: &[S]) -> String {
    authors
        .iter()
        .map(|a| normalize_author(a.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}
