//! Parsing of strings into typed values.

use crate::error::ConvertError;
use crate::modify::separate;
use std::path::PathBuf;

const TRUE_SPELLINGS: &[&str] = &["true", "yes", "y", "on", "1"];
const FALSE_SPELLINGS: &[&str] = &["false", "no", "n", "off", "0"];

/// Parses a whole number, accepting surrounding whitespace and `_` separators.
pub fn integerify(item: &str) -> Result<i64, ConvertError> {
    let cleaned = item.trim().replace('_', "");
    cleaned
        .parse::<i64>()
        .map_err(|_| ConvertError::InvalidInteger {
            input: item.to_string(),
        })
}

/// Parses an integer or floating point number as `f64`.
pub fn numify(item: &str) -> Result<f64, ConvertError> {
    let cleaned = item.trim().replace('_', "");
    if let Ok(whole) = cleaned.parse::<i64>() {
        return Ok(whole as f64);
    }
    cleaned
        .parse::<f64>()
        .map_err(|_| ConvertError::InvalidNumber {
            input: item.to_string(),
        })
}

/// Parses common boolean spellings, case-insensitively.
pub fn boolify(item: &str) -> Result<bool, ConvertError> {
    let lowered = item.trim().to_ascii_lowercase();
    if TRUE_SPELLINGS.contains(&lowered.as_str()) {
        Ok(true)
    } else if FALSE_SPELLINGS.contains(&lowered.as_str()) {
        Ok(false)
    } else {
        Err(ConvertError::InvalidBool {
            input: item.to_string(),
        })
    }
}

/// Splits a comma-separated string into trimmed items, optionally wrapped in
/// square brackets. Empty input yields an empty list.
pub fn listify_str(item: &str) -> Vec<String> {
    let inner = item.trim();
    let inner = inner
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(inner);
    if inner.trim().is_empty() {
        return Vec::new();
    }
    separate(inner, ",")
        .into_iter()
        .map(|part| part.trim_matches(|c| c == '\'' || c == '"').to_string())
        .collect()
}

/// Converts a string to a filesystem path, expanding a leading `~` with
/// `$HOME` when it is set.
pub fn pathlibify(item: &str) -> PathBuf {
    if let Some(rest) = item.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(item)
}
