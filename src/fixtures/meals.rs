//! Meal Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{fixtures::EntryFixture, meals::WeekDay};

/// Meals and a week plan in YAML
#[derive(Debug, Deserialize)]
pub struct MealsFixture {
    /// Meal definitions
    pub meals: Vec<MealFixture>,

    /// Meal ids planned per day
    #[serde(default)]
    pub week: FxHashMap<WeekDay, Vec<String>>,
}

/// Meal Fixture
#[derive(Debug, Deserialize)]
pub struct MealFixture {
    /// Meal identifier
    pub id: String,

    /// Meal name
    pub name: String,

    /// Product references and quantities
    pub items: Vec<EntryFixture>,
}
