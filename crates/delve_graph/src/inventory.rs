//! Items and the agent's inventory.
//!
//! An [`Inventory`] is a set of [`ItemId`]s that only ever grows while a
//! quest is being solved. There is no removal operation: keys
//! are never consumed and mitigating gear is never lost.

use core::borrow::Borrow;
use core::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::feature::FeatureError;

/// Identifier of an item an agent can hold (a key, boots, a cloak...).
///
/// Internally uses `Arc<str>` so cloning is a reference count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub(crate) Arc<str>);

impl ItemId {
    /// Creates an item ID, rejecting empty or whitespace-only names.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::EmptyItem`] if `name` is blank.
    pub fn new(name: impl Into<Arc<str>>) -> Result<Self, FeatureError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FeatureError::EmptyItem);
        }
        Ok(Self(name))
    }

    /// Returns the item name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ItemId {
    type Error = FeatureError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for ItemId {
    type Error = FeatureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::new(name).map_err(serde::de::Error::custom)
    }
}

/// The set of items currently held by an agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: HashSet<ItemId>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item. Returns `true` if it was not already held.
    pub fn add(&mut self, item: ItemId) -> bool {
        self.items.insert(item)
    }

    /// Returns `true` if the item is held.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(item)
    }

    /// Number of distinct items held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no items are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over held items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.items.iter()
    }

    /// Returns `true` if every item in `other` is also held here.
    #[must_use]
    pub fn is_superset(&self, other: &Inventory) -> bool {
        self.items.is_superset(&other.items)
    }
}

impl Extend<ItemId> for Inventory {
    fn extend<I: IntoIterator<Item = ItemId>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl FromIterator<ItemId> for Inventory {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a ItemId;
    type IntoIter = hashbrown::hash_set::Iter<'a, ItemId>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str) -> ItemId {
        ItemId::new(name).unwrap()
    }

    #[test]
    fn blank_item_names_are_rejected() {
        assert!(matches!(ItemId::new(""), Err(FeatureError::EmptyItem)));
        assert!(matches!(ItemId::new("   "), Err(FeatureError::EmptyItem)));
        assert_eq!(item("FireKey").as_str(), "FireKey");
    }

    #[test]
    fn add_reports_new_items_only() {
        let mut inv = Inventory::new();
        assert!(inv.is_empty());
        assert!(inv.add(item("key1")));
        assert!(!inv.add(item("key1")));
        assert_eq!(inv.len(), 1);
        assert!(inv.contains("key1"));
        assert!(!inv.contains("key2"));
    }

    #[test]
    fn superset_check() {
        let small: Inventory = [item("a")].into_iter().collect();
        let big: Inventory = [item("a"), item("b")].into_iter().collect();
        assert!(big.is_superset(&small));
        assert!(!small.is_superset(&big));
    }

    #[test]
    fn serializes_as_a_list_of_names() {
        let inv: Inventory = serde_json::from_str(r#"["SwampBoots"]"#).unwrap();
        assert!(inv.contains("SwampBoots"));

        let err = serde_json::from_str::<Inventory>(r#"[""]"#);
        assert!(err.is_err());
    }
}
