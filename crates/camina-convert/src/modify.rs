//! String and sequence modification helpers.
//!
//! The prefix/suffix/substring helpers come in two shapes: a `&str` form and
//! a `_all` form that maps the same edit over a sequence of strings.

use std::collections::BTreeSet;

/// Prepends `prefix` to `item`, joined by `divider`.
pub fn add_prefix(item: &str, prefix: &str, divider: &str) -> String {
    format!("{prefix}{divider}{item}")
}

/// Appends `suffix` to `item`, joined by `divider`.
pub fn add_suffix(item: &str, suffix: &str, divider: &str) -> String {
    format!("{item}{divider}{suffix}")
}

/// Removes `prefix` (followed by `divider`) from the start of `item` if present.
pub fn drop_prefix(item: &str, prefix: &str, divider: &str) -> String {
    let full = format!("{prefix}{divider}");
    item.strip_prefix(full.as_str()).unwrap_or(item).to_string()
}

/// Removes `suffix` (preceded by `divider`) from the end of `item` if present.
pub fn drop_suffix(item: &str, suffix: &str, divider: &str) -> String {
    let full = format!("{divider}{suffix}");
    item.strip_suffix(full.as_str()).unwrap_or(item).to_string()
}

/// Removes every occurrence of `substring` from `item`.
pub fn drop_substring(item: &str, substring: &str) -> String {
    if substring.is_empty() {
        return item.to_string();
    }
    item.replace(substring, "")
}

pub fn add_prefix_all<S: AsRef<str>>(items: &[S], prefix: &str, divider: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| add_prefix(item.as_ref(), prefix, divider))
        .collect()
}

pub fn add_suffix_all<S: AsRef<str>>(items: &[S], suffix: &str, divider: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| add_suffix(item.as_ref(), suffix, divider))
        .collect()
}

pub fn drop_prefix_all<S: AsRef<str>>(items: &[S], prefix: &str, divider: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| drop_prefix(item.as_ref(), prefix, divider))
        .collect()
}

pub fn drop_suffix_all<S: AsRef<str>>(items: &[S], suffix: &str, divider: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| drop_suffix(item.as_ref(), suffix, divider))
        .collect()
}

pub fn drop_substring_all<S: AsRef<str>>(items: &[S], substring: &str) -> Vec<String> {
    items
        .iter()
        .map(|item| drop_substring(item.as_ref(), substring))
        .collect()
}

/// Splits `item` once at the first `divider`.
///
/// Returns `(item, "")` when `divider` does not occur.
pub fn cleave(item: &str, divider: &str) -> (String, String) {
    match item.split_once(divider) {
        Some((head, tail)) => (head.to_string(), tail.to_string()),
        None => (item.to_string(), String::new()),
    }
}

/// Splits `item` at every `divider`, trimming whitespace around each part.
pub fn separate(item: &str, divider: &str) -> Vec<String> {
    item.split(divider).map(|part| part.trim().to_string()).collect()
}

/// Removes repeated items, keeping the first occurrence of each.
pub fn deduplicate<T: Ord + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = BTreeSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Returns `key` if unused, otherwise the first `key_N` (N = 1, 2, ...) for
/// which `exists` reports false.
pub fn uniquify(key: &str, exists: impl Fn(&str) -> bool) -> String {
    if !exists(key) {
        return key.to_string();
    }
    (1usize..)
        .map(|counter| format!("{key}_{counter}"))
        .find(|candidate| !exists(candidate))
        .unwrap_or_else(|| key.to_string())
}
