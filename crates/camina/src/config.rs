//! Construction-time configuration for containers.
//!
//! Each recognized option and its effect:
//!
//! | option                 | effect when `true`                                          |
//! |------------------------|-------------------------------------------------------------|
//! | `strict`               | missing keys/values/indices fail instead of being ignored   |
//! | `overwrite`            | Library replaces on derived-key collision                   |
//! | `allow_duplicate_keys` | Hybrid keeps several elements per key, lookup returns all   |
//! | `delete_all`           | Listing/Hybrid deletion removes every match, not the first  |

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Flags shared by every container type. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContainerConfig {
    pub strict: bool,
    pub overwrite: bool,
    pub allow_duplicate_keys: bool,
    pub delete_all: bool,
}

impl ContainerConfig {
    /// Parse a configuration from TOML text. Absent options keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn allow_duplicate_keys(mut self, allow: bool) -> Self {
        self.allow_duplicate_keys = allow;
        self
    }

    pub fn delete_all(mut self, delete_all: bool) -> Self {
        self.delete_all = delete_all;
        self
    }
}

/// Reserved key spellings recognized by a Catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Wildcards {
    /// Expands to every stored value.
    pub all: Vec<String>,
    /// Expands to the values of the catalog's default keys.
    pub default: Vec<String>,
    /// Expands to nothing (or the catalog's default value).
    pub none: Vec<String>,
}

/// Which wildcard a key spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    All,
    Default,
    None,
}

impl Default for Wildcards {
    fn default() -> Self {
        fn owned(keys: &[&str]) -> Vec<String> {
            keys.iter().map(|key| key.to_string()).collect()
        }
        Self {
            all: owned(&["all", "All"]),
            default: owned(&["default", "defaults", "Default", "Defaults"]),
            none: owned(&["none", "None"]),
        }
    }
}

impl Wildcards {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Classify `key`, returning `None` for ordinary keys.
    pub fn classify(&self, key: &str) -> Option<Wildcard> {
        let matches = |spellings: &[String]| spellings.iter().any(|s| s == key);
        if matches(&self.all) {
            Some(Wildcard::All)
        } else if matches(&self.default) {
            Some(Wildcard::Default)
        } else if matches(&self.none) {
            Some(Wildcard::None)
        } else {
            None
        }
    }

    pub fn is_reserved(&self, key: &str) -> bool {
        self.classify(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CaminaError;

    #[test]
    fn defaults_are_permissive() {
        let config = ContainerConfig::default();
        assert!(!config.strict);
        assert!(!config.overwrite);
        assert!(!config.allow_duplicate_keys);
        assert!(!config.delete_all);
    }

    #[test]
    fn toml_overrides_only_named_options() {
        let config = ContainerConfig::from_toml_str("strict = true\ndelete_all = true\n")
            .expect("config should parse");
        assert_eq!(
            config,
            ContainerConfig::default().strict(true).delete_all(true)
        );
    }

    #[test]
    fn unknown_toml_option_is_rejected() {
        let err = ContainerConfig::from_toml_str("stricter = true").expect_err("unknown key");
        assert!(matches!(err, CaminaError::Config(_)));
    }

    #[test]
    fn wildcard_classification() {
        let wildcards = Wildcards::default();
        assert_eq!(wildcards.classify("All"), Some(Wildcard::All));
        assert_eq!(wildcards.classify("defaults"), Some(Wildcard::Default));
        assert_eq!(wildcards.classify("None"), Some(Wildcard::None));
        assert_eq!(wildcards.classify("tester"), None);
    }

    #[test]
    fn wildcards_load_from_toml() {
        let wildcards = Wildcards::from_toml_str("all = [\"*\"]\n").expect("wildcards parse");
        assert!(wildcards.is_reserved("*"));
        assert!(!wildcards.is_reserved("all"));
        assert!(wildcards.is_reserved("default"));
    }
}
