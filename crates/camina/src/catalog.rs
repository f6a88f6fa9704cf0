//! Wildcard-aware dictionary for options and strategies.
//!
//! A `Catalog` answers three reserved keys on top of ordinary lookups:
//! - `all` → every stored value
//! - `default` → the values of the configured default keys (all values
//!   when none are configured)
//! - `none` → nothing, or the catalog's default value when one is set
//!
//! Reserved spellings come from [`Wildcards`] and can never be stored as
//! ordinary keys, so wildcard expansions only ever contain user entries.

use crate::base::{Bunch, Selection};
use crate::config::{ContainerConfig, Wildcard, Wildcards};
use crate::dictionary::Dictionary;
use crate::error::{CaminaError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of resolving one catalog key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found<'a, V> {
    One(&'a V),
    Many(Vec<&'a V>),
}

impl<'a, V> Found<'a, V> {
    /// Flatten into a list: a single match becomes a one-element list.
    pub fn into_vec(self) -> Vec<&'a V> {
        match self {
            Found::One(value) => vec![value],
            Found::Many(values) => values,
        }
    }

    /// The single match, if this was an ordinary key lookup.
    pub fn one(&self) -> Option<&'a V> {
        match self {
            Found::One(value) => Some(*value),
            Found::Many(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Found::One(_) => 1,
            Found::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// String-keyed dictionary with wildcard and multi-key lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent, bound(serialize = "V: Serialize"))]
pub struct Catalog<V> {
    contents: Dictionary<String, V>,
    #[serde(skip)]
    wildcards: Wildcards,
    #[serde(skip)]
    default_keys: Option<Vec<String>>,
    #[serde(skip)]
    always_return_list: bool,
}

impl<V> Default for Catalog<V> {
    fn default() -> Self {
        Self {
            contents: Dictionary::default(),
            wildcards: Wildcards::default(),
            default_keys: None,
            always_return_list: false,
        }
    }
}

impl<V> Catalog<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            contents: Dictionary::with_config(config),
            ..Self::default()
        }
    }

    /// Build from `entries`, failing with `ReservedKey` if any key is a
    /// wildcard spelling.
    pub fn from_entries<K, I>(entries: I, config: ContainerConfig) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut catalog = Self::with_config(config);
        let mut contents = BTreeMap::new();
        for (key, value) in entries {
            let key = key.into();
            catalog.ensure_ordinary(&key)?;
            contents.insert(key, value);
        }
        catalog.contents = Dictionary::from_map(contents, config);
        Ok(catalog)
    }

    /// Replace the reserved key spellings.
    ///
    /// Fails with `ReservedKey` if a stored key would become reserved.
    pub fn with_wildcards(mut self, wildcards: Wildcards) -> Result<Self> {
        if let Some(key) = self.contents.keys().find(|key| wildcards.is_reserved(key)) {
            return Err(CaminaError::ReservedKey { key: key.clone() });
        }
        self.wildcards = wildcards;
        Ok(self)
    }

    /// Return ordinary lookups as one-element lists.
    pub fn always_return_list(mut self, always: bool) -> Self {
        self.always_return_list = always;
        self
    }

    pub fn config(&self) -> ContainerConfig {
        self.contents.config()
    }

    pub fn wildcards(&self) -> &Wildcards {
        &self.wildcards
    }

    /// Keys expanded by the `default` wildcard. `None` means all keys.
    pub fn set_default_keys(&mut self, keys: Option<Vec<String>>) {
        self.default_keys = keys;
    }

    pub fn default_keys(&self) -> Option<&[String]> {
        self.default_keys.as_deref()
    }

    /// Value returned by the `none` wildcard.
    pub fn set_default_value(&mut self, value: V) {
        self.contents.set_default(value);
    }

    /// Store one entry. Wildcard spellings are rejected with `ReservedKey`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>> {
        let key = key.into();
        self.ensure_ordinary(&key)?;
        Ok(self.contents.insert(key, value))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.contents.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.contents.values()
    }

    pub fn as_dictionary(&self) -> &Dictionary<String, V> {
        &self.contents
    }

    /// Resolve one key, expanding wildcards.
    ///
    /// An ordinary key that is not stored fails with `KeyNotFound`.
    pub fn get(&self, key: &str) -> Result<Found<'_, V>> {
        match self.wildcards.classify(key) {
            Some(Wildcard::All) => Ok(Found::Many(self.contents.values().collect())),
            Some(Wildcard::Default) => self.default_values().map(Found::Many),
            Some(Wildcard::None) => Ok(self.none_value()),
            None => {
                let value = self
                    .contents
                    .get(key)
                    .ok_or_else(|| CaminaError::key_not_found(key))?;
                if self.always_return_list {
                    Ok(Found::Many(vec![value]))
                } else {
                    Ok(Found::One(value))
                }
            }
        }
    }

    /// Resolve several keys, one result per key in input order.
    ///
    /// Fails with `KeyNotFound` on the first ordinary key that is not
    /// stored, so a successful result always has `keys.len()` entries.
    pub fn get_many<S: AsRef<str>>(&self, keys: &[S]) -> Result<Vec<Found<'_, V>>> {
        keys.iter().map(|key| self.get(key.as_ref())).collect()
    }

    /// Delete every key in `keys`, or none of them if any is missing.
    pub fn delete_many<S: AsRef<str>>(&mut self, keys: &[S]) -> Result<()> {
        if let Some(missing) = keys
            .iter()
            .map(|key| key.as_ref())
            .find(|key| !self.contents.contains_key(*key))
        {
            tracing::debug!(key = missing, "catalog delete_many rejected");
            return Err(CaminaError::key_not_found(missing));
        }
        for key in keys {
            self.contents.remove(key.as_ref());
        }
        tracing::debug!(count = keys.len(), "catalog delete_many");
        Ok(())
    }

    fn ensure_ordinary(&self, key: &str) -> Result<()> {
        if self.wildcards.is_reserved(key) {
            tracing::debug!(key, "catalog rejected reserved key");
            return Err(CaminaError::ReservedKey {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    fn default_values(&self) -> Result<Vec<&V>> {
        let Some(keys) = &self.default_keys else {
            return Ok(self.contents.values().collect());
        };
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            match self.contents.get(key.as_str()) {
                Some(value) => values.push(value),
                None if self.config().strict => return Err(CaminaError::key_not_found(key)),
                None => {}
            }
        }
        Ok(values)
    }

    fn none_value(&self) -> Found<'_, V> {
        match (self.contents.default_value(), self.always_return_list) {
            (Some(value), false) => Found::One(value),
            (Some(value), true) => Found::Many(vec![value]),
            (None, _) => Found::Many(Vec::new()),
        }
    }
}

impl<V: Clone> Bunch for Catalog<V> {
    type Item = (String, V);
    type Target = str;
    type Selector = Selection<String>;

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let staged: Vec<(String, V)> = items.into_iter().collect();
        for (key, _) in &staged {
            self.ensure_ordinary(key)?;
        }
        self.contents.add_all(staged)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.contents.remove(key).is_some() {
            tracing::debug!(key, "catalog delete");
            return Ok(());
        }
        if self.config().strict {
            return Err(CaminaError::key_not_found(key));
        }
        Ok(())
    }

    fn subset(&self, selection: Selection<String>) -> Result<Self> {
        Ok(Self {
            contents: self.contents.subset(selection)?,
            wildcards: self.wildcards.clone(),
            default_keys: self.default_keys.clone(),
            always_return_list: self.always_return_list,
        })
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Catalog<&'static str> {
        let mut catalog = Catalog::new();
        catalog
            .add_all([
                ("hammer".to_string(), "nails"),
                ("saw".to_string(), "boards"),
                ("wrench".to_string(), "bolts"),
            ])
            .expect("ordinary keys should add");
        catalog
    }

    #[test]
    fn all_wildcard_returns_every_value() {
        let catalog = tools();
        let all = catalog.get("all").expect("wildcard resolves");
        assert_eq!(all.len(), catalog.len());
        assert_eq!(all.into_vec(), vec![&"nails", &"boards", &"bolts"]);
    }

    #[test]
    fn default_wildcard_follows_default_keys() {
        let mut catalog = tools();
        assert_eq!(
            catalog.get("default").expect("default resolves"),
            catalog.get("all").expect("all resolves")
        );
        catalog.set_default_keys(Some(vec!["saw".to_string()]));
        assert_eq!(
            catalog.get("Defaults").expect("default resolves").into_vec(),
            vec![&"boards"]
        );
    }

    #[test]
    fn none_wildcard_is_empty_or_default_value() {
        let mut catalog = tools();
        assert!(catalog.get("None").expect("none resolves").is_empty());
        catalog.set_default_value("nothing");
        assert_eq!(
            catalog.get("none").expect("none resolves").one(),
            Some(&"nothing")
        );
    }

    #[test]
    fn list_lookup_preserves_order_and_expands_wildcards() {
        let catalog = tools();
        let found = catalog
            .get_many(&["wrench", "all", "hammer"])
            .expect("all keys resolve");
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], Found::One(&"bolts"));
        assert_eq!(found[1].len(), 3);
        assert_eq!(found[2], Found::One(&"nails"));
    }

    #[test]
    fn missing_ordinary_key_fails() {
        let catalog = tools();
        assert!(matches!(
            catalog.get("drill"),
            Err(CaminaError::KeyNotFound { .. })
        ));
        assert!(matches!(
            catalog.get_many(&["saw", "drill"]),
            Err(CaminaError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn wildcard_keys_cannot_be_stored() {
        let mut catalog = tools();
        let err = catalog
            .add_all([("drill".to_string(), "holes"), ("all".to_string(), "x")])
            .expect_err("reserved key must be rejected");
        assert!(matches!(err, CaminaError::ReservedKey { key } if key == "all"));
        assert!(!catalog.contains_key("drill"));
        assert!(catalog.insert("None", "x").is_err());
    }

    #[test]
    fn always_return_list_wraps_single_matches() {
        let catalog = tools().always_return_list(true);
        assert_eq!(
            catalog.get("saw").expect("saw resolves"),
            Found::Many(vec![&"boards"])
        );
    }

    #[test]
    fn delete_many_is_all_or_nothing() {
        let mut catalog = tools();
        assert!(catalog.delete_many(&["saw", "drill"]).is_err());
        assert_eq!(catalog.len(), 3);
        catalog
            .delete_many(&["saw", "hammer"])
            .expect("both keys exist");
        assert_eq!(catalog.keys().collect::<Vec<_>>(), vec!["wrench"]);
    }

    #[test]
    fn from_entries_rejects_wildcard_keys() {
        let err = Catalog::from_entries([("saw", 1), ("all", 2)], ContainerConfig::default())
            .expect_err("wildcard spelling is reserved");
        assert!(matches!(err, CaminaError::ReservedKey { key } if key == "all"));

        let catalog = Catalog::from_entries([("saw", 1), ("drill", 2)], ContainerConfig::default())
            .expect("ordinary keys");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("drill").expect("stored").one(), Some(&2));
    }

    #[test]
    fn replacing_wildcards_checks_existing_keys() {
        let catalog = tools();
        let custom = Wildcards {
            all: vec!["saw".to_string()],
            ..Wildcards::default()
        };
        assert!(matches!(
            catalog.clone().with_wildcards(custom),
            Err(CaminaError::ReservedKey { .. })
        ));
        let star = Wildcards {
            all: vec!["*".to_string()],
            ..Wildcards::default()
        };
        let catalog = catalog.with_wildcards(star).expect("no collision");
        assert_eq!(catalog.get("*").expect("star resolves").len(), 3);
    }
}
