//! Meals and week plans

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::{
    list::{ShoppingList, ShoppingListError},
    products::{Product, ProductError},
};

/// Errors that can occur when turning meals into a shopping list.
#[derive(Debug, Error, PartialEq)]
pub enum MealError {
    /// A product could not be normalised into a line item.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// The aggregated items could not form a shopping list.
    #[error(transparent)]
    ShoppingList(#[from] ShoppingListError),
}

/// A product and how many units a meal needs.
#[derive(Debug, Clone, PartialEq)]
pub struct MealItem<'a> {
    /// Product
    pub product: Product<'a>,

    /// Units needed
    pub quantity: u32,
}

/// A named group of products.
#[derive(Debug, Clone, PartialEq)]
pub struct Meal<'a> {
    /// Meal identifier
    pub id: String,

    /// Meal name
    pub name: String,

    /// Products in the meal
    pub items: Vec<MealItem<'a>>,
}

impl<'a> Meal<'a> {
    /// Create an empty meal.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Add `quantity` units of a product, merging with an existing entry.
    pub fn add_product(&mut self, product: Product<'a>, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.item_mut(&product.ean) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.items.push(MealItem { product, quantity }),
        }
    }

    /// Set the quantity of a product. Zero removes it.
    ///
    /// Returns `false` if the meal does not contain the product.
    pub fn update_quantity(&mut self, ean: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_product(ean);
        }

        match self.item_mut(ean) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a product from the meal.
    pub fn remove_product(&mut self, ean: &str) -> bool {
        let before = self.items.len();

        self.items.retain(|item| item.product.ean != ean);

        self.items.len() != before
    }

    /// Total number of units in the meal.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Estimated cost with every product bought at its cheapest store.
    pub fn estimated_total(&self, currency: &'a Currency) -> Money<'a, Currency> {
        Money::from_minor(self.estimated_total_minor(), currency)
    }

    fn estimated_total_minor(&self) -> i64 {
        self.items
            .iter()
            .map(|item| {
                item.product
                    .cheapest_price()
                    .to_minor_units()
                    .saturating_mul(i64::from(item.quantity))
            })
            .fold(0, i64::saturating_add)
    }

    fn item_mut(&mut self, ean: &str) -> Option<&mut MealItem<'a>> {
        self.items.iter_mut().find(|item| item.product.ean == ean)
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
    /// Sunday
    Sunday,
}

impl WeekDay {
    /// Every day, Monday first.
    pub const ALL: [WeekDay; 7] = [
        WeekDay::Monday,
        WeekDay::Tuesday,
        WeekDay::Wednesday,
        WeekDay::Thursday,
        WeekDay::Friday,
        WeekDay::Saturday,
        WeekDay::Sunday,
    ];
}

/// Meals planned per day of the week, by meal id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekPlan {
    days: FxHashMap<WeekDay, Vec<String>>,
}

impl WeekPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Plan a meal on a day. A meal may be planned more than once.
    pub fn add_meal(&mut self, day: WeekDay, meal_id: impl Into<String>) {
        self.days.entry(day).or_default().push(meal_id.into());
    }

    /// Remove every occurrence of a meal from a day.
    pub fn remove_meal(&mut self, day: WeekDay, meal_id: &str) {
        if let Some(ids) = self.days.get_mut(&day) {
            ids.retain(|id| id != meal_id);
        }
    }

    /// Remove every meal planned on a day.
    pub fn clear_day(&mut self, day: WeekDay) {
        self.days.remove(&day);
    }

    /// Remove every meal from the whole week.
    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Check if no meal is planned on any day.
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Meal ids planned for a day.
    pub fn meals_for(&self, day: WeekDay) -> &[String] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over the planned meals Monday to Sunday, skipping unknown ids.
    fn planned<'m, 'a>(&'m self, meals: &'m [Meal<'a>]) -> impl Iterator<Item = &'m Meal<'a>> {
        WeekDay::ALL
            .into_iter()
            .flat_map(|day| self.meals_for(day).iter().map(move |id| (day, id)))
            .filter_map(|(day, id)| {
                let meal = meals.iter().find(|meal| &meal.id == id);

                if meal.is_none() {
                    warn!(?day, meal_id = %id, "planned meal not found");
                }

                meal
            })
    }

    /// Combine every planned meal into one shopping list.
    ///
    /// Quantities for the same product are summed across meals and days, so a
    /// meal planned twice contributes twice. Items keep the order in which
    /// their products first appear in the week.
    ///
    /// # Errors
    ///
    /// Returns a [`MealError`] if a product cannot be normalised or is priced
    /// in a different currency.
    pub fn shopping_list<'a>(
        &self,
        meals: &[Meal<'a>],
        currency: &'static Currency,
    ) -> Result<ShoppingList<'a>, MealError> {
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut totals: Vec<(&Product<'a>, u32)> = Vec::new();

        for item in self.planned(meals).flat_map(|meal| meal.items.iter()) {
            match positions.get(item.product.ean.as_str()) {
                Some(&idx) => {
                    if let Some((_, quantity)) = totals.get_mut(idx) {
                        *quantity = quantity.saturating_add(item.quantity);
                    }
                }
                None => {
                    positions.insert(item.product.ean.as_str(), totals.len());
                    totals.push((&item.product, item.quantity));
                }
            }
        }

        let items = totals
            .into_iter()
            .filter(|(_, quantity)| *quantity > 0)
            .map(|(product, quantity)| product.line_item(quantity))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ShoppingList::with_items(items, currency)?)
    }

    /// Estimated cost of the whole week at per-product cheapest prices.
    pub fn estimated_total<'a>(
        &self,
        meals: &[Meal<'a>],
        currency: &'a Currency,
    ) -> Money<'a, Currency> {
        let minor = self
            .planned(meals)
            .map(Meal::estimated_total_minor)
            .fold(0, i64::saturating_add);

        Money::from_minor(minor, currency)
    }
}
