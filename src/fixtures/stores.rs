//! Store Fixtures

use serde::Deserialize;

use crate::stores::{Store, StoreId};

/// Wrapper for stores in YAML
#[derive(Debug, Deserialize)]
pub struct StoresFixture {
    /// Stores
    pub stores: Vec<StoreFixture>,
}

/// Store Fixture
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Store key, referenced by product offers
    pub id: StoreId,

    /// Display name
    pub name: String,

    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,
}

impl From<StoreFixture> for Store {
    fn from(fixture: StoreFixture) -> Self {
        Store {
            id: fixture.id,
            name: fixture.name,
            logo: fixture.logo,
        }
    }
}
