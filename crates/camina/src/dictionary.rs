//! Mapping container with uniform add/delete/subset.
//!
//! A `Dictionary` is a `BTreeMap` with three additions: last-write-wins
//! batch `add`, configurable strictness for missing keys, and an optional
//! default value returned by [`Dictionary::get_or_default`].

use crate::base::{Bunch, Selection};
use crate::config::ContainerConfig;
use crate::error::{CaminaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Key/value container. Serializes as its contents alone.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    transparent,
    bound(
        serialize = "K: Serialize, V: Serialize",
        deserialize = "K: Ord + Deserialize<'de>, V: Deserialize<'de>"
    )
)]
pub struct Dictionary<K, V> {
    contents: BTreeMap<K, V>,
    #[serde(skip)]
    default: Option<V>,
    #[serde(skip)]
    config: ContainerConfig,
}

impl<K, V> Default for Dictionary<K, V> {
    fn default() -> Self {
        Self {
            contents: BTreeMap::new(),
            default: None,
            config: ContainerConfig::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Dictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.contents.iter()).finish()
    }
}

impl<K: Ord, V> Dictionary<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Seed a dictionary from an existing map.
    pub fn from_map(contents: BTreeMap<K, V>, config: ContainerConfig) -> Self {
        Self {
            contents,
            default: None,
            config,
        }
    }

    /// Every key in `keys` mapped to a clone of `value`.
    pub fn from_keys(keys: impl IntoIterator<Item = K>, value: V) -> Self
    where
        V: Clone,
    {
        keys.into_iter().map(|key| (key, value.clone())).collect()
    }

    pub fn config(&self) -> ContainerConfig {
        self.config
    }

    /// Value returned by `get_or_default` for absent keys.
    pub fn set_default(&mut self, value: V) {
        self.default = Some(value);
    }

    pub fn default_value(&self) -> Option<&V> {
        self.default.as_ref()
    }

    /// Insert or replace one entry, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: fmt::Debug,
    {
        tracing::debug!(key = ?key, "dictionary insert");
        self.contents.insert(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.contents.get(key)
    }

    /// Value for `key`, falling back to the default value.
    pub fn get_or_default<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.contents
            .get(key)
            .or(self.default.as_ref())
            .ok_or_else(|| CaminaError::key_not_found(key))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.contents.contains_key(key)
    }

    /// Remove one entry regardless of strictness.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.contents.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.contents.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.contents.values()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, K, V> {
        self.contents.iter()
    }

    pub fn as_map(&self) -> &BTreeMap<K, V> {
        &self.contents
    }

    pub fn into_map(self) -> BTreeMap<K, V> {
        self.contents
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    /// Clone of `self` with new contents but the same default and
    /// configuration.
    pub(crate) fn with_contents(&self, contents: BTreeMap<K, V>) -> Self
    where
        V: Clone,
    {
        Self {
            contents,
            default: self.default.clone(),
            config: self.config,
        }
    }
}

impl<V: DeserializeOwned> Dictionary<String, V> {
    /// Merge an untyped JSON object.
    ///
    /// Anything but an object, or an object holding a value that does not
    /// deserialize as `V`, is a `TypeMismatch` and nothing is merged.
    pub fn add_json(&mut self, data: serde_json::Value) -> Result<()> {
        let object = match data {
            serde_json::Value::Object(object) => object,
            other => return Err(CaminaError::type_mismatch("object", &other)),
        };
        let mut staged = Vec::with_capacity(object.len());
        for (key, value) in object {
            let found = crate::error::json_kind(&value);
            let typed = serde_json::from_value::<V>(value).map_err(|_| {
                CaminaError::TypeMismatch {
                    expected: camina_convert::short_type_name::<V>().to_string(),
                    found: found.to_string(),
                }
            })?;
            staged.push((key, typed));
        }
        tracing::debug!(count = staged.len(), "dictionary add_json");
        self.contents.extend(staged);
        Ok(())
    }
}

impl<K, V> Bunch for Dictionary<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    type Item = (K, V);
    type Target = K;
    type Selector = Selection<K>;

    /// Merge entries; existing keys take the new value.
    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let before = self.contents.len();
        self.contents.extend(items);
        tracing::debug!(
            added = self.contents.len() - before,
            len = self.contents.len(),
            "dictionary add"
        );
        Ok(())
    }

    fn delete(&mut self, key: &K) -> Result<()> {
        if self.contents.remove(key).is_some() {
            tracing::debug!(key = ?key, "dictionary delete");
            return Ok(());
        }
        if self.config.strict {
            tracing::debug!(key = ?key, "dictionary delete of missing key rejected");
            return Err(CaminaError::key_not_found(key));
        }
        Ok(())
    }

    fn subset(&self, selection: Selection<K>) -> Result<Self> {
        selection.validate()?;
        let mut contents = match &selection.include {
            None => self.contents.clone(),
            Some(include) => {
                let mut picked = BTreeMap::new();
                for key in include {
                    match self.contents.get(key) {
                        Some(value) => {
                            picked.insert(key.clone(), value.clone());
                        }
                        None if self.config.strict => {
                            return Err(CaminaError::key_not_found(key));
                        }
                        None => {}
                    }
                }
                picked
            }
        };
        for key in &selection.exclude {
            contents.remove(key);
        }
        Ok(self.with_contents(contents))
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Dictionary<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            contents: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}

impl<K: Ord, V> From<BTreeMap<K, V>> for Dictionary<K, V> {
    fn from(contents: BTreeMap<K, V>) -> Self {
        Self::from_map(contents, ContainerConfig::default())
    }
}

impl<'a, K, V> IntoIterator for &'a Dictionary<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}

impl<K, V> IntoIterator for Dictionary<K, V> {
    type Item = (K, V);
    type IntoIter = btree_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.into_iter()
    }
}

impl<K, Q, V> std::ops::Index<&Q> for Dictionary<K, V>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// Panics when `key` is absent, like `BTreeMap`.
    fn index(&self, key: &Q) -> &V {
        &self.contents[key]
    }
}

/// `a + b` merges `b` into `a`, `b` winning on shared keys.
impl<K: Ord, V> std::ops::Add for Dictionary<K, V> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self.contents.extend(other.contents);
        self
    }
}
