//! List Fixtures

use serde::Deserialize;

use crate::fixtures::EntryFixture;

/// A named shopping list in YAML
#[derive(Debug, Deserialize)]
pub struct ListFixture {
    /// List name
    pub name: String,

    /// Product references and quantities
    pub items: Vec<EntryFixture>,
}
