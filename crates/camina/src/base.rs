//! The shared container contract.
//!
//! Every camina container layers the same three mutations over its storage:
//! `add` (one item or a batch), `delete`, and `subset`. Batches are atomic:
//! if any item is rejected, none are stored.

use crate::error::{CaminaError, Result};
use serde::{Deserialize, Serialize};

/// Uniform add/delete/subset surface over a container.
pub trait Bunch: Sized {
    /// Unit of addition: a `(key, value)` pair for mappings, an element for
    /// sequences.
    type Item;
    /// What `delete` addresses: a key or a value.
    type Target: ?Sized;
    /// What `subset` accepts.
    type Selector;

    /// Add every item in `items`, or none of them if one is rejected.
    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>;

    /// Add one item.
    fn add(&mut self, item: Self::Item) -> Result<()> {
        self.add_all(std::iter::once(item))
    }

    /// Remove what `target` addresses.
    fn delete(&mut self, target: &Self::Target) -> Result<()>;

    /// A new container of the same type and configuration holding only the
    /// selected contents.
    fn subset(&self, selector: Self::Selector) -> Result<Self>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Include/exclude selection by key (or value, for sequences).
///
/// `include` is applied before `exclude`; `include = None` starts from every
/// entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection<K> {
    pub include: Option<Vec<K>>,
    pub exclude: Vec<K>,
}

impl<K> Selection<K> {
    pub fn include(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            include: Some(keys.into_iter().collect()),
            exclude: Vec::new(),
        }
    }

    pub fn exclude(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            include: None,
            exclude: keys.into_iter().collect(),
        }
    }

    /// Add keys to exclude after inclusion.
    pub fn excluding(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.exclude.extend(keys);
        self
    }

    /// Reject a selection that selects nothing explicitly.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.include.is_none() && self.exclude.is_empty() {
            return Err(CaminaError::EmptySelection);
        }
        Ok(())
    }
}

impl<K: PartialEq> Selection<K> {
    /// Whether `key` survives both the include and the exclude list.
    pub fn admits(&self, key: &K) -> bool {
        let included = self
            .include
            .as_ref()
            .is_none_or(|include| include.contains(key));
        included && !self.exclude.contains(key)
    }
}
