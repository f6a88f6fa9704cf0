//! Ordered sequence with keyed lookup.
//!
//! A `Hybrid` keeps two views of one collection: the elements in order
//! (`Vec<T>`) and a key → positions index (`BTreeMap<T::Key, Vec<usize>>`).
//! Every mutation validates first and then updates both views, so a call
//! that returns `Err` has changed neither.

use crate::base::{Bunch, Selection};
use crate::config::ContainerConfig;
use crate::error::{CaminaError, Result};
use crate::keyed::Keyable;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub struct Hybrid<T: Keyable> {
    contents: Vec<T>,
    index: BTreeMap<T::Key, Vec<usize>>,
    default: Option<T>,
    config: ContainerConfig,
}

impl<T: Keyable> Default for Hybrid<T> {
    fn default() -> Self {
        Self::with_config(ContainerConfig::default())
    }
}

impl<T: Keyable> Hybrid<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            contents: Vec::new(),
            index: BTreeMap::new(),
            default: None,
            config,
        }
    }

    /// Build from `items`, failing with `DuplicateKey` on a key collision
    /// the configuration forbids.
    pub fn from_items(items: impl IntoIterator<Item = T>, config: ContainerConfig) -> Result<Self> {
        let mut hybrid = Self::with_config(config);
        hybrid.push_all(items.into_iter().collect())?;
        Ok(hybrid)
    }

    pub fn config(&self) -> ContainerConfig {
        self.config
    }

    /// Element returned by `get_or_default` for absent keys.
    pub fn set_default(&mut self, value: T) {
        self.default = Some(value);
    }

    /// First element stored under `key`.
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index
            .get(key)
            .and_then(|positions| positions.first())
            .map(|&position| &self.contents[position])
    }

    /// Every element stored under `key`, in sequence order.
    pub fn get_all(&self, key: &T::Key) -> Vec<&T> {
        self.index
            .get(key)
            .map(|positions| positions.iter().map(|&p| &self.contents[p]).collect())
            .unwrap_or_default()
    }

    pub fn get_or_default(&self, key: &T::Key) -> Result<&T> {
        self.get(key)
            .or(self.default.as_ref())
            .ok_or_else(|| CaminaError::key_not_found(key))
    }

    /// Element at `position`.
    pub fn at(&self, position: usize) -> Option<&T> {
        self.contents.get(position)
    }

    /// Position of the first element stored under `key`.
    pub fn position(&self, key: &T::Key) -> Option<usize> {
        self.index.get(key).and_then(|positions| positions.first().copied())
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Derived keys in sequence order, repeated for repeated keys.
    pub fn keys(&self) -> Vec<T::Key> {
        self.contents.iter().map(Keyable::derive_key).collect()
    }

    /// Distinct keys of the keyed view, in key order.
    pub fn key_set(&self) -> impl Iterator<Item = &T::Key> {
        self.index.keys()
    }

    pub fn values(&self) -> &[T] {
        &self.contents
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.contents.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.contents
    }

    /// Insert at `position`, shifting later elements right.
    pub fn insert(&mut self, position: usize, item: T) -> Result<()> {
        let len = self.contents.len();
        if position > len {
            return Err(CaminaError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        let key = item.derive_key();
        self.ensure_insertable(&key)?;
        self.contents.insert(position, item);
        self.rebuild_index();
        tracing::debug!(key = ?key, position, "hybrid insert");
        Ok(())
    }

    /// Remove and return the element at `position`.
    pub fn remove_at(&mut self, position: usize) -> Result<T> {
        let len = self.contents.len();
        if position >= len {
            return Err(CaminaError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        let removed = self.contents.remove(position);
        self.rebuild_index();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.contents.clear();
        self.index.clear();
    }

    fn ensure_insertable(&self, key: &T::Key) -> Result<()> {
        if !self.config.allow_duplicate_keys && self.index.contains_key(key) {
            tracing::debug!(key = ?key, "hybrid rejected duplicate key");
            return Err(CaminaError::duplicate_key(key));
        }
        Ok(())
    }

    /// Append a validated batch: either every item lands in both views or
    /// none does.
    fn push_all(&mut self, items: Vec<T>) -> Result<()> {
        let keys: Vec<T::Key> = items.iter().map(Keyable::derive_key).collect();
        if !self.config.allow_duplicate_keys {
            let mut batch = BTreeSet::new();
            for key in &keys {
                self.ensure_insertable(key)?;
                if !batch.insert(key) {
                    tracing::debug!(key = ?key, "hybrid rejected duplicate key in batch");
                    return Err(CaminaError::duplicate_key(key));
                }
            }
        }
        for (item, key) in items.into_iter().zip(keys) {
            let position = self.contents.len();
            self.contents.push(item);
            self.index.entry(key).or_default().push(position);
        }
        Ok(())
    }

    /// Recompute the keyed view from the ordered view.
    fn rebuild_index(&mut self) {
        self.index.clear();
        for (position, item) in self.contents.iter().enumerate() {
            self.index
                .entry(item.derive_key())
                .or_default()
                .push(position);
        }
    }
}

impl<T: Keyable + Clone> Bunch for Hybrid<T> {
    type Item = T;
    type Target = T::Key;
    type Selector = Selection<T::Key>;

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let count = items.len();
        self.push_all(items)?;
        tracing::debug!(added = count, len = self.contents.len(), "hybrid add");
        Ok(())
    }

    /// Remove the first element stored under `key`, or every one with
    /// `delete_all`.
    fn delete(&mut self, key: &T::Key) -> Result<()> {
        let Some(positions) = self.index.get(key) else {
            if self.config.strict {
                return Err(CaminaError::key_not_found(key));
            }
            return Ok(());
        };
        let doomed: BTreeSet<usize> = if self.config.delete_all {
            positions.iter().copied().collect()
        } else {
            positions.first().copied().into_iter().collect()
        };
        let mut position = 0;
        self.contents.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        self.rebuild_index();
        tracing::debug!(key = ?key, removed = doomed.len(), "hybrid delete");
        Ok(())
    }

    fn subset(&self, selection: Selection<T::Key>) -> Result<Self> {
        selection.validate()?;
        if self.config.strict {
            if let Some(missing) = selection
                .include
                .iter()
                .flatten()
                .find(|key| !self.index.contains_key(*key))
            {
                return Err(CaminaError::key_not_found(missing));
            }
        }
        let mut subset = Self::with_config(self.config);
        subset.default = self.default.clone();
        let kept = self
            .contents
            .iter()
            .filter(|item| selection.admits(&item.derive_key()))
            .cloned()
            .collect();
        subset.push_all(kept)?;
        Ok(subset)
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

impl<T: Keyable + Clone> Clone for Hybrid<T> {
    fn clone(&self) -> Self {
        Self {
            contents: self.contents.clone(),
            index: self.index.clone(),
            default: self.default.clone(),
            config: self.config,
        }
    }
}

impl<T: Keyable + fmt::Debug> fmt::Debug for Hybrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.contents.iter()).finish()
    }
}

impl<T: Keyable + PartialEq> PartialEq for Hybrid<T> {
    /// Equal when the ordered views are equal; the keyed view follows.
    fn eq(&self, other: &Self) -> bool {
        self.contents == other.contents
    }
}

impl<T: Keyable + Serialize> Serialize for Hybrid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.contents.serialize(serializer)
    }
}

impl<T: Keyable> std::ops::Index<usize> for Hybrid<T> {
    type Output = T;

    fn index(&self, position: usize) -> &T {
        &self.contents[position]
    }
}

impl<'a, T: Keyable> IntoIterator for &'a Hybrid<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}
