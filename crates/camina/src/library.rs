//! Dictionary whose keys are derived from the items stored.
//!
//! Keys come from a namer function (by default [`camina_convert::namify`]).
//! With `overwrite = false` a derived key that is already taken is made
//! unique with a counter suffix (`name_1`, `name_2`, ...); with
//! `overwrite = true` the new item replaces the old one.

use crate::base::{Bunch, Selection};
use crate::config::ContainerConfig;
use crate::dictionary::Dictionary;
use crate::error::{CaminaError, Result};
use camina_convert::{Named, namify, uniquify};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Derives a key for an item.
pub type Namer<V> = fn(&V) -> String;

/// Item store keyed by derived names.
#[derive(Clone)]
pub struct Library<V> {
    contents: Dictionary<String, V>,
    namer: Namer<V>,
}

impl<V: Named> Default for Library<V> {
    fn default() -> Self {
        Self::with_namer(namify::<V>, ContainerConfig::default())
    }
}

impl<V: Named> Library<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self::with_namer(namify::<V>, config)
    }
}

impl<V> Library<V> {
    /// Library deriving keys with `namer` instead of `namify`.
    pub fn with_namer(namer: Namer<V>, config: ContainerConfig) -> Self {
        Self {
            contents: Dictionary::with_config(config),
            namer,
        }
    }

    pub fn config(&self) -> ContainerConfig {
        self.contents.config()
    }

    /// Key the namer derives for `item`, before any disambiguation.
    pub fn derive_key(&self, item: &V) -> String {
        (self.namer)(item)
    }

    /// Store `item` under an explicit key and return that key.
    ///
    /// Explicit keys are never renamed: a taken key is replaced when
    /// `overwrite` is set and fails with `DuplicateKey` otherwise.
    pub fn add_with_key(&mut self, key: impl Into<String>, item: V) -> Result<String> {
        let key = key.into();
        if !self.config().overwrite && self.contents.contains_key(key.as_str()) {
            tracing::debug!(key = %key, "library rejected explicit duplicate key");
            return Err(CaminaError::duplicate_key(&key));
        }
        self.contents.insert(key.clone(), item);
        Ok(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.contents.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.contents.contains_key(key)
    }

    /// Key under which an item equal to `item` is stored.
    ///
    /// The derived key is checked first, then every other entry, so items
    /// stored under disambiguated or explicit keys are still found.
    pub fn key_of(&self, item: &V) -> Option<&str>
    where
        V: PartialEq,
    {
        let derived = self.derive_key(item);
        if let Some((key, _)) = self
            .contents
            .iter()
            .find(|(key, stored)| **key == derived && *stored == item)
        {
            return Some(key.as_str());
        }
        self.contents
            .iter()
            .find(|(_, stored)| *stored == item)
            .map(|(key, _)| key.as_str())
    }

    /// Stored item equal to `item`.
    pub fn get_item(&self, item: &V) -> Option<&V>
    where
        V: PartialEq,
    {
        self.key_of(item).and_then(|key| self.contents.get(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.contents.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.contents.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &V)> {
        self.contents.iter()
    }

    pub fn as_dictionary(&self) -> &Dictionary<String, V> {
        &self.contents
    }
}

impl<V: Clone> Bunch for Library<V> {
    type Item = V;
    type Target = str;
    type Selector = Selection<String>;

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let overwrite = self.config().overwrite;
        let mut pending: BTreeSet<String> = BTreeSet::new();
        let mut staged = Vec::new();
        for item in items {
            let derived = self.derive_key(&item);
            let key = if overwrite {
                derived
            } else {
                uniquify(&derived, |candidate| {
                    self.contents.contains_key(candidate) || pending.contains(candidate)
                })
            };
            pending.insert(key.clone());
            staged.push((key, item));
        }
        tracing::debug!(count = staged.len(), overwrite, "library add");
        self.contents.add_all(staged)
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        if self.contents.remove(key).is_some() {
            tracing::debug!(key, "library delete");
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
            namer: self.namer,
        })
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

impl<V: Serialize> Serialize for Library<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.contents.serialize(serializer)
    }
}

impl<V: fmt::Debug> fmt::Debug for Library<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("contents", &self.contents)
            .field("config", &self.config())
            .finish_non_exhaustive()
    }
}
