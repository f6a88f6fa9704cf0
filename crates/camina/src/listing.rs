//! Ordered sequence container.

use crate::base::{Bunch, Selection};
use crate::config::ContainerConfig;
use crate::error::{CaminaError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;

/// Which elements of a [`Listing`] a subset keeps. Relative order of the
/// listing is always preserved, whatever order the selector names.
pub enum ListingSelector<T> {
    /// Elements at these positions.
    Indices(Vec<usize>),
    /// Elements in this half-open position range.
    Range(Range<usize>),
    /// Elements equal to an included value and to no excluded value.
    Values(Selection<T>),
    /// Elements the predicate accepts.
    Predicate(Box<dyn Fn(&T) -> bool>),
}

impl<T> ListingSelector<T> {
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Self::Indices(indices.into_iter().collect())
    }

    pub fn matching(predicate: impl Fn(&T) -> bool + 'static) -> Self {
        Self::Predicate(Box::new(predicate))
    }
}

impl<T: fmt::Debug> fmt::Debug for ListingSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indices(indices) => f.debug_tuple("Indices").field(indices).finish(),
            Self::Range(range) => f.debug_tuple("Range").field(range).finish(),
            Self::Values(selection) => f.debug_tuple("Values").field(selection).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Insertion-ordered list with add/delete/subset.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing<T> {
    contents: Vec<T>,
    #[serde(skip)]
    config: ContainerConfig,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            contents: Vec::new(),
            config: ContainerConfig::default(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Listing<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.contents.iter()).finish()
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            contents: Vec::new(),
            config,
        }
    }

    pub fn from_vec(contents: Vec<T>, config: ContainerConfig) -> Self {
        Self { contents, config }
    }

    pub fn config(&self) -> ContainerConfig {
        self.config
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.contents.get(index)
    }

    /// Insert at `index`, shifting later elements right.
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        let len = self.contents.len();
        if index > len {
            return Err(CaminaError::IndexOutOfRange { index, len });
        }
        self.contents.insert(index, item);
        Ok(())
    }

    pub fn pop(&mut self) -> Option<T> {
        self.contents.pop()
    }

    pub fn clear(&mut self) {
        self.contents.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.contents.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.contents
    }

    pub fn into_vec(self) -> Vec<T> {
        self.contents
    }

    /// Remove elements `predicate` accepts (the first, or all with
    /// `delete_all`) and return how many were removed.
    ///
    /// Removing nothing fails with `KeyNotFound` in strict mode.
    pub fn delete_where(&mut self, predicate: impl Fn(&T) -> bool) -> Result<usize> {
        let removed = if self.config.delete_all {
            let before = self.contents.len();
            self.contents.retain(|item| !predicate(item));
            before - self.contents.len()
        } else {
            match self.contents.iter().position(|item| predicate(item)) {
                Some(index) => {
                    self.contents.remove(index);
                    1
                }
                None => 0,
            }
        };
        if removed == 0 && self.config.strict {
            return Err(CaminaError::KeyNotFound {
                key: "<predicate>".to_string(),
            });
        }
        tracing::debug!(removed, len = self.contents.len(), "listing delete");
        Ok(removed)
    }

    /// Positions kept by an index-style selector, ascending and unique.
    fn selected_positions(&self, selector: &ListingSelector<T>) -> Result<Vec<usize>>
    where
        T: PartialEq + fmt::Debug,
    {
        let len = self.contents.len();
        let positions = match selector {
            ListingSelector::Indices(indices) => {
                let mut kept = BTreeSet::new();
                for &index in indices {
                    if index < len {
                        kept.insert(index);
                    } else if self.config.strict {
                        return Err(CaminaError::IndexOutOfRange { index, len });
                    }
                }
                kept.into_iter().collect()
            }
            ListingSelector::Range(range) => {
                if self.config.strict && range.end > len {
                    return Err(CaminaError::IndexOutOfRange {
                        index: range.end,
                        len,
                    });
                }
                (range.start.min(len)..range.end.min(len)).collect()
            }
            ListingSelector::Values(selection) => {
                selection.validate()?;
                if self.config.strict {
                    if let Some(missing) = selection
                        .include
                        .iter()
                        .flatten()
                        .find(|value| !self.contents.contains(value))
                    {
                        tracing::debug!(value = ?missing, "listing subset value missing");
                        return Err(CaminaError::key_not_found(missing));
                    }
                }
                (0..len)
                    .filter(|&index| selection.admits(&self.contents[index]))
                    .collect()
            }
            ListingSelector::Predicate(predicate) => (0..len)
                .filter(|&index| predicate(&self.contents[index]))
                .collect(),
        };
        Ok(positions)
    }
}

impl<T: DeserializeOwned> Listing<T> {
    /// Append untyped JSON: an array adds each element, any other non-null
    /// value adds one element.
    ///
    /// A value that does not deserialize as `T` is a `TypeMismatch` and
    /// nothing is appended.
    pub fn add_json(&mut self, data: serde_json::Value) -> Result<()> {
        let items = match data {
            serde_json::Value::Null => {
                return Err(CaminaError::type_mismatch(
                    "array or element",
                    &serde_json::Value::Null,
                ));
            }
            serde_json::Value::Array(items) => items,
            single => vec![single],
        };
        let mut staged = Vec::with_capacity(items.len());
        for item in items {
            let found = crate::error::json_kind(&item);
            let typed = serde_json::from_value::<T>(item).map_err(|_| CaminaError::TypeMismatch {
                expected: camina_convert::short_type_name::<T>().to_string(),
                found: found.to_string(),
            })?;
            staged.push(typed);
        }
        tracing::debug!(count = staged.len(), "listing add_json");
        self.contents.extend(staged);
        Ok(())
    }
}

impl<T: Clone + PartialEq + fmt::Debug> Bunch for Listing<T> {
    type Item = T;
    type Target = T;
    type Selector = ListingSelector<T>;

    fn add_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Item>,
    {
        let before = self.contents.len();
        self.contents.extend(items);
        tracing::debug!(
            added = self.contents.len() - before,
            len = self.contents.len(),
            "listing add"
        );
        Ok(())
    }

    /// Remove elements equal to `item` (the first, or all with `delete_all`).
    fn delete(&mut self, item: &T) -> Result<()> {
        match self.delete_where(|candidate| candidate == item) {
            Err(CaminaError::KeyNotFound { .. }) => Err(CaminaError::key_not_found(item)),
            other => other.map(|_| ()),
        }
    }

    fn subset(&self, selector: ListingSelector<T>) -> Result<Self> {
        let contents = self
            .selected_positions(&selector)?
            .into_iter()
            .map(|index| self.contents[index].clone())
            .collect();
        Ok(Self {
            contents,
            config: self.config,
        })
    }

    fn len(&self) -> usize {
        self.contents.len()
    }
}

impl<T> FromIterator<T> for Listing<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            contents: iter.into_iter().collect(),
            config: ContainerConfig::default(),
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(contents: Vec<T>) -> Self {
        Self::from_vec(contents, ContainerConfig::default())
    }
}

impl<T> std::ops::Deref for Listing<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.contents
    }
}

impl<T> std::ops::Index<usize> for Listing<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.contents[index]
    }
}

impl<'a, T> IntoIterator for &'a Listing<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter()
    }
}

impl<T> IntoIterator for Listing<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.into_iter()
    }
}

/// `a + b` appends `b`'s elements after `a`'s.
impl<T> std::ops::Add for Listing<T> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self.contents.extend(other.contents);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Listing<&'static str> {
        Listing::from(vec!["a", "b", "zebra", "c", "d", "e", "f", "g"])
    }

    #[test]
    fn add_single_and_batch() {
        let mut listing = Listing::from(vec![1, 2, 3]);
        listing.add(4).expect("add");
        listing.add_all([5, 6]).expect("add_all");
        assert_eq!(listing.as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn delete_first_or_all_matches() {
        let mut first = Listing::from(vec![1, 2, 1, 3]);
        first.delete(&1).expect("delete");
        assert_eq!(first.as_slice(), &[2, 1, 3]);

        let mut all = Listing::from_vec(vec![1, 2, 1, 3], ContainerConfig::default().delete_all(true));
        all.delete(&1).expect("delete");
        assert_eq!(all.as_slice(), &[2, 3]);
    }

    #[test]
    fn delete_missing_value_is_noop_unless_strict() {
        let mut lenient = Listing::from(vec![1, 2]);
        lenient.delete(&9).expect("no-op");
        assert_eq!(lenient.len(), 2);

        let mut strict = Listing::from_vec(vec![1, 2], ContainerConfig::default().strict(true));
        assert!(matches!(
            strict.delete(&9),
            Err(CaminaError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn subset_by_values_keeps_listing_order() {
        let sub = letters()
            .subset(ListingSelector::Values(
                Selection::include(["a", "b", "c", "d", "zebra"]).excluding(["d"]),
            ))
            .expect("subset");
        assert_eq!(sub.as_slice(), &["a", "b", "zebra", "c"]);
    }

    #[test]
    fn subset_by_indices_sorts_and_skips_out_of_range() {
        let sub = letters()
            .subset(ListingSelector::indices([4, 0, 0, 99]))
            .expect("lenient subset");
        assert_eq!(sub.as_slice(), &["a", "d"]);

        let strict = Listing::from_vec(vec![1, 2], ContainerConfig::default().strict(true));
        assert!(matches!(
            strict.subset(ListingSelector::indices([5])),
            Err(CaminaError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn subset_by_range_and_predicate() {
        let sub = letters()
            .subset(ListingSelector::Range(6..20))
            .expect("range");
        assert_eq!(sub.as_slice(), &["f", "g"]);

        let long = letters()
            .subset(ListingSelector::matching(|s: &&str| s.len() > 1))
            .expect("predicate");
        assert_eq!(long.as_slice(), &["zebra"]);
    }

    #[test]
    fn insert_checks_bounds() {
        let mut listing = Listing::from(vec!["a", "b", "c"]);
        listing.insert(2, "zebra").expect("insert");
        assert_eq!(listing[2], "zebra");
        assert!(matches!(
            listing.insert(9, "x"),
            Err(CaminaError::IndexOutOfRange { index: 9, len: 4 })
        ));
    }

    #[test]
    fn add_json_accepts_arrays_and_scalars() {
        let mut listing: Listing<u32> = Listing::new();
        listing.add_json(serde_json::json!([1, 2])).expect("array");
        listing.add_json(serde_json::json!(3)).expect("scalar");
        assert_eq!(listing.as_slice(), &[1, 2, 3]);

        let err = listing
            .add_json(serde_json::json!([4, "five"]))
            .expect_err("string is not u32");
        assert!(matches!(err, CaminaError::TypeMismatch { .. }));
        assert!(matches!(
            listing.add_json(serde_json::Value::Null),
            Err(CaminaError::TypeMismatch { .. })
        ));
        assert_eq!(listing.len(), 3);
    }

    #[test]
    fn plus_operator_concatenates() {
        let joined = Listing::from(vec![1, 2]) + Listing::from(vec![3]);
        assert_eq!(joined.as_slice(), &[1, 2, 3]);
    }
}
