//! Layered dictionary lookup.
//!
//! A `ChainDictionary` is a stack of [`Dictionary`] layers searched front to
//! back. Writes land in the first layer; deletes reach every layer. A key
//! stored in several layers resolves to the first match, or to every match
//! when `return_first` is off.

use crate::base::{Bunch, Selection};
use crate::catalog::Found;
use crate::config::ContainerConfig;
use crate::dictionary::Dictionary;
use crate::error::{CaminaError, Result};
use serde::{Serialize, Serializer};
use std::fmt;

pub struct ChainDictionary<K, V> {
    layers: Vec<Dictionary<K, V>>,
    default: Option<V>,
    return_first: bool,
    config: ContainerConfig,
}

impl<K, V> Default for ChainDictionary<K, V> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            default: None,
            return_first: true,
            config: ContainerConfig::default(),
        }
    }
}

impl<K: Ord, V> ChainDictionary<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Chain over `layers`, searched in the order given.
    pub fn from_layers(layers: Vec<Dictionary<K, V>>, config: ContainerConfig) -> Self {
        Self {
            layers,
            ..Self::with_config(config)
        }
    }

    /// A chain with one layer mapping every key in `keys` to `value`.
    pub fn from_keys(keys: impl IntoIterator<Item = K>, value: V) -> Self
    where
        V: Clone,
    {
        Self::from_layers(
            vec![Dictionary::from_keys(keys, value)],
            ContainerConfig::default(),
        )
    }

    /// Resolve every match (`false`) instead of the first one only.
    pub fn return_first(mut self, first: bool) -> Self {
        self.return_first = first;
        self
    }

    pub fn config(&self) -> ContainerConfig {
        self.config
    }

    /// Value `lookup` returns for a key no layer holds.
    pub fn set_default(&mut self, value: V) {
        self.default = Some(value);
    }

    /// The stored layers, front first.
    pub fn maps(&self) -> &[Dictionary<K, V>] {
        &self.layers
    }

    pub fn maps_mut(&mut self) -> &mut Vec<Dictionary<K, V>> {
        &mut self.layers
    }

    /// Push `layer` in front of every existing layer.
    pub fn new_child(&mut self, layer: Dictionary<K, V>) {
        self.layers.insert(0, layer);
    }

    /// A chain over every layer after the first.
    pub fn parents(&self) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            layers: self.layers.iter().skip(1).cloned().collect(),
            default: self.default.clone(),
            return_first: self.return_first,
            config: self.config,
        }
    }

    /// Store in the first layer, creating one if the chain is empty.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: fmt::Debug,
    {
        if self.layers.is_empty() {
            self.layers.push(Dictionary::with_config(self.config));
        }
        self.layers[0].insert(key, value)
    }

    /// First match for `key`, front layer first.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    /// Every match for `key`, front layer first.
    pub fn get_all(&self, key: &K) -> Vec<&V> {
        self.layers.iter().filter_map(|layer| layer.get(key)).collect()
    }

    /// Resolve `key` according to `return_first`.
    ///
    /// Falls back to the default value, then fails with `KeyNotFound`.
    pub fn lookup(&self, key: &K) -> Result<Found<'_, V>>
    where
        K: fmt::Debug,
    {
        let matches: Vec<&V> = if self.return_first {
            self.get(key).into_iter().collect()
        } else {
            self.get_all(key)
        };
        match (matches.len(), self.default.as_ref()) {
            (0, Some(value)) => Ok(Found::One(value)),
            (0, None) => Err(CaminaError::key_not_found(key)),
            (1, _) if self.return_first => Ok(Found::One(matches[0])),
            _ => Ok(Found::Many(matches)),
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.layers.iter().any(|layer| layer.contains_key(key))
    }

    /// Keys of every layer in chain order; a key held by two layers
    /// appears twice.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.layers.iter().flat_map(|layer| layer.keys())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.layers.iter().flat_map(|layer| layer.values())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.layers.iter().flat_map(|layer| layer.iter())
    }
}

impl<K, V> Bunch for ChainDictionary<K, V>
where
    K: Ord + Clone + fmt::Debug,
    V: Clone,
{
    /// Adding appends a layer behind the existing ones.
    type Item = Dictionary<K, V>;
    type Target = K;
    type Selector = Selection<K>;

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let before = self.layers.len();
        self.layers.extend(items);
        tracing::debug!(
            added = self.layers.len() - before,
            layers = self.layers.len(),
            "chain add"
        );
        Ok(())
    }

    /// Remove `key` from every layer that holds it.
    fn delete(&mut self, key: &K) -> Result<()> {
        let removed = self
            .layers
            .iter_mut()
            .filter_map(|layer| layer.remove(key))
            .count();
        if removed == 0 && self.config.strict {
            tracing::debug!(key = ?key, "chain delete of missing key rejected");
            return Err(CaminaError::key_not_found(key));
        }
        tracing::debug!(key = ?key, removed, "chain delete");
        Ok(())
    }

    /// Apply `selection` to every layer; strict mode requires each included
    /// key to be held by some layer.
    fn subset(&self, selection: Selection<K>) -> Result<Self> {
        selection.validate()?;
        if self.config.strict {
            if let Some(missing) = selection
                .include
                .iter()
                .flatten()
                .find(|key| !self.contains_key(key))
            {
                return Err(CaminaError::key_not_found(missing));
            }
        }
        let layers = self
            .layers
            .iter()
            .map(|layer| {
                layer.with_contents(
                    layer
                        .iter()
                        .filter(|(key, _)| selection.admits(key))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect(),
                )
            })
            .collect();
        Ok(Self {
            layers,
            default: self.default.clone(),
            return_first: self.return_first,
            config: self.config,
        })
    }

    /// Number of layers.
    fn len(&self) -> usize {
        self.layers.len()
    }
}

impl<K: Clone, V: Clone> Clone for ChainDictionary<K, V> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            default: self.default.clone(),
            return_first: self.return_first,
            config: self.config,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChainDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.layers.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for ChainDictionary<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers && self.return_first == other.return_first
    }
}

impl<K: Serialize, V: Serialize> Serialize for ChainDictionary<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.layers.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(entries: &[(&'static str, i32)]) -> Dictionary<&'static str, i32> {
        entries.iter().copied().collect()
    }

    fn stacked() -> ChainDictionary<&'static str, i32> {
        ChainDictionary::from_layers(
            vec![layer(&[("a", 1), ("b", 2)]), layer(&[("b", 20), ("c", 30)])],
            ContainerConfig::default(),
        )
    }

    #[test]
    fn lookup_returns_first_match_by_default() {
        let chain = stacked();
        assert_eq!(chain.lookup(&"b").expect("held"), Found::One(&2));
        assert_eq!(chain.get(&"c"), Some(&30));
        assert!(matches!(
            chain.lookup(&"zz"),
            Err(CaminaError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn lookup_returns_all_matches_when_asked() {
        let chain = stacked().return_first(false);
        assert_eq!(chain.lookup(&"b").expect("held"), Found::Many(vec![&2, &20]));
        assert_eq!(chain.lookup(&"a").expect("held").into_vec(), vec![&1]);
    }

    #[test]
    fn default_value_covers_missing_keys() {
        let mut chain = stacked();
        chain.set_default(0);
        assert_eq!(chain.lookup(&"zz").expect("default"), Found::One(&0));
    }

    #[test]
    fn new_child_shadows_and_parents_drops_it() {
        let mut chain = stacked();
        chain.new_child(layer(&[("a", 100)]));
        assert_eq!(chain.get(&"a"), Some(&100));
        assert_eq!(chain.len(), 3);

        let parents = chain.parents();
        assert_eq!(parents.len(), 2);
        assert_eq!(parents.get(&"a"), Some(&1));
        assert_eq!(parents, stacked());
    }

    #[test]
    fn insert_writes_to_the_front_layer() {
        let mut chain: ChainDictionary<&str, i32> = ChainDictionary::new();
        chain.insert("x", 1);
        assert_eq!(chain.len(), 1);
        chain.add(layer(&[("x", 2)])).expect("add layer");
        chain.insert("x", 3);
        assert_eq!(chain.get_all(&"x"), vec![&3, &2]);
    }

    #[test]
    fn delete_reaches_every_layer() {
        let mut chain = stacked();
        chain.delete(&"b").expect("delete");
        assert!(!chain.contains_key(&"b"));
        assert_eq!(chain.keys().copied().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn strict_delete_of_missing_key_fails() {
        let mut chain = ChainDictionary::from_layers(
            vec![layer(&[("a", 1)])],
            ContainerConfig::default().strict(true),
        );
        assert!(matches!(
            chain.delete(&"zz"),
            Err(CaminaError::KeyNotFound { .. })
        ));
        assert_eq!(chain.get(&"a"), Some(&1));

        let mut lenient = stacked();
        lenient.delete(&"zz").expect("lenient delete is a no-op");
        assert_eq!(lenient, stacked());
    }

    #[test]
    fn subset_filters_each_layer() {
        let chain = stacked().return_first(false);
        let sub = chain
            .subset(Selection::include(["b", "c", "zz"]).excluding(["c"]))
            .expect("lenient subset");
        assert_eq!(sub.len(), 2);
        assert_eq!(sub.lookup(&"b").expect("kept").len(), 2);
        assert!(!sub.contains_key(&"a"));
        assert!(!sub.contains_key(&"c"));

        let strict = ChainDictionary::from_layers(
            vec![layer(&[("a", 1)])],
            ContainerConfig::default().strict(true),
        );
        assert!(matches!(
            strict.subset(Selection::include(["zz"])),
            Err(CaminaError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn from_keys_builds_one_layer() {
        let chain = ChainDictionary::from_keys(["a", "b"], 7);
        assert_eq!(chain.maps().len(), 1);
        assert_eq!(chain.values().copied().collect::<Vec<_>>(), vec![7, 7]);
    }
}
