//! Fixtures

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    fixtures::{
        lists::ListFixture, meals::MealsFixture, products::ProductsFixture, stores::StoresFixture,
    },
    list::{ShoppingList, ShoppingListError},
    meals::{Meal, MealError, WeekPlan},
    products::{Product, ProductError},
    report::ItemNames,
    stores::StoreDirectory,
};

pub mod lists;
pub mod meals;
pub mod products;
pub mod stores;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Store not found
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Product has no offers
    #[error("Product {0} has no offers")]
    NoOffers(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Product could not be turned into a line item
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Shopping list creation error
    #[error("Failed to create shopping list: {0}")]
    ShoppingList(#[from] ShoppingListError),

    /// Week plan aggregation error
    #[error("Failed to aggregate week plan: {0}")]
    Meal(#[from] MealError),
}

/// An entry on a fixture list or meal: product EAN and quantity.
#[derive(Debug, Deserialize)]
pub struct EntryFixture {
    /// Product EAN
    pub product: String,

    /// Units wanted
    pub quantity: u32,
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Store metadata
    stores: StoreDirectory,

    /// Products in catalogue order
    products: Vec<Product<'static>>,

    /// EAN -> index into `products`
    product_keys: FxHashMap<String, usize>,

    /// Named shopping list entries
    list_name: String,
    list: Vec<EntryFixture>,

    /// Meals and the week they are planned in
    meals: Vec<Meal<'static>>,
    week: WeekPlan,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stores: StoreDirectory::new(),
            products: Vec::new(),
            product_keys: FxHashMap::default(),
            list_name: String::new(),
            list: Vec::new(),
            meals: Vec::new(),
            week: WeekPlan::new(),
            currency: None,
        }
    }

    fn read(&self, category: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load stores from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_stores(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: StoresFixture = serde_norway::from_str(&self.read("stores", name)?)?;

        for store in fixture.stores {
            self.stores.insert(store.into());
        }

        Ok(self)
    }

    /// Load products from a YAML fixture file
    ///
    /// Stores must be loaded first.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, names an unknown
    /// store, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = serde_norway::from_str(&self.read("products", name)?)?;

        for product_fixture in fixture.products {
            let (product, currency) = product_fixture.try_into_product(&self.stores)?;

            // Validate currency consistency
            if let Some(existing_currency) = self.currency {
                if existing_currency != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing_currency.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            match self.product_keys.get(&product.ean) {
                Some(&idx) => {
                    if let Some(slot) = self.products.get_mut(idx) {
                        *slot = product;
                    }
                }
                None => {
                    self.product_keys
                        .insert(product.ean.clone(), self.products.len());
                    self.products.push(product);
                }
            }
        }

        Ok(self)
    }

    /// Load a shopping list from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced
    /// products don't exist.
    pub fn load_list(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ListFixture = serde_norway::from_str(&self.read("lists", name)?)?;

        for entry in &fixture.items {
            self.product(&entry.product)?;
        }

        self.list_name = fixture.name;
        self.list = fixture.items;

        Ok(self)
    }

    /// Load meals and their week plan from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if referenced
    /// products don't exist.
    pub fn load_meals(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: MealsFixture = serde_norway::from_str(&self.read("meals", name)?)?;

        for meal_fixture in fixture.meals {
            let mut meal = Meal::new(meal_fixture.id, meal_fixture.name);

            for entry in meal_fixture.items {
                meal.add_product(self.product(&entry.product)?.clone(), entry.quantity);
            }

            self.meals.push(meal);
        }

        for (day, meal_ids) in fixture.week {
            for meal_id in meal_ids {
                self.week.add_meal(day, meal_id);
            }
        }

        Ok(self)
    }

    /// Load stores, products and a shopping list with the same name
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_stores(name)?
            .load_products(name)?
            .load_list(name)?;

        Ok(fixture)
    }

    /// Get a product by its EAN
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, ean: &str) -> Result<&Product<'static>, FixtureError> {
        self.product_keys
            .get(ean)
            .and_then(|idx| self.products.get(*idx))
            .ok_or_else(|| FixtureError::ProductNotFound(ean.to_string()))
    }

    /// Get all products
    pub fn products(&self) -> &[Product<'static>] {
        &self.products
    }

    /// Get the store metadata
    pub fn stores(&self) -> &StoreDirectory {
        &self.stores
    }

    /// Product names keyed by EAN
    pub fn names(&self) -> ItemNames {
        self.products
            .iter()
            .map(|product| (product.ean.clone(), product.name.clone()))
            .collect()
    }

    /// Name of the loaded shopping list
    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    /// Get all meals
    pub fn meals(&self) -> &[Meal<'static>] {
        &self.meals
    }

    /// Get the week plan
    pub fn week(&self) -> &WeekPlan {
        &self.week
    }

    /// Create a shopping list from the loaded list entries
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or if list creation fails.
    pub fn shopping_list(&self) -> Result<ShoppingList<'static>, FixtureError> {
        let currency = self.currency()?;

        let items = self
            .list
            .iter()
            .map(|entry| Ok(self.product(&entry.product)?.line_item(entry.quantity)?))
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(ShoppingList::with_items(items, currency)?)
    }

    /// Create a shopping list for the whole planned week
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or if aggregation fails.
    pub fn week_shopping_list(&self) -> Result<ShoppingList<'static>, FixtureError> {
        let currency = self.currency()?;

        Ok(self.week.shopping_list(&self.meals, currency)?)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
