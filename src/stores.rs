//! Stores

use std::{borrow::Borrow, fmt};

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Stable store identifier.
///
/// Only the identifier takes part in equality; display names and logos are
/// carried separately in [`Store`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct StoreId(String);

impl StoreId {
    /// Creates a new store identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoreId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StoreId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for StoreId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    /// Store identifier
    pub id: StoreId,

    /// Display name
    pub name: String,

    /// Logo URL, if the store has one
    pub logo: Option<String>,
}

impl Store {
    /// Creates a store without a logo.
    pub fn new(id: impl Into<StoreId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo: None,
        }
    }

    /// Sets the logo URL.
    #[must_use]
    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }
}

/// Presentational store metadata keyed by [`StoreId`].
#[derive(Debug, Clone, Default)]
pub struct StoreDirectory {
    stores: FxHashMap<StoreId, Store>,
}

impl StoreDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a store, replacing any previous entry with the same id.
    pub fn insert(&mut self, store: Store) -> Option<Store> {
        self.stores.insert(store.id.clone(), store)
    }

    /// Looks up a store by id.
    pub fn get(&self, id: &StoreId) -> Option<&Store> {
        self.stores.get(id)
    }

    /// Display name for a store, falling back to its id.
    pub fn display_name<'a>(&'a self, id: &'a StoreId) -> &'a str {
        self.get(id).map_or(id.as_str(), |store| store.name.as_str())
    }

    /// Number of stores in the directory.
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Check if the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

impl FromIterator<Store> for StoreDirectory {
    fn from_iter<I: IntoIterator<Item = Store>>(iter: I) -> Self {
        let mut directory = Self::new();

        for store in iter {
            directory.insert(store);
        }

        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_ids_compare_by_value() {
        assert_eq!(StoreId::from("kiwi"), StoreId::new(String::from("kiwi")));
        assert_ne!(StoreId::from("kiwi"), StoreId::from("rema"));
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let directory: StoreDirectory = [Store::new("kiwi", "KIWI").with_logo("kiwi.png")]
            .into_iter()
            .collect();

        let kiwi = StoreId::from("kiwi");
        let meny = StoreId::from("meny");

        assert_eq!(directory.display_name(&kiwi), "KIWI");
        assert_eq!(directory.display_name(&meny), "meny");
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn insert_replaces_existing_metadata() {
        let mut directory = StoreDirectory::new();

        directory.insert(Store::new("kiwi", "Kiwi"));
        let previous = directory.insert(Store::new("kiwi", "KIWI"));

        assert_eq!(previous.map(|store| store.name), Some("Kiwi".to_string()));
        assert_eq!(directory.display_name(&StoreId::from("kiwi")), "KIWI");
    }
}
