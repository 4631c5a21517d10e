//! Shopping list

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    allocation::{AllocationResult, recommend},
    items::LineItem,
};

/// Errors related to shopping list construction or mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShoppingListError {
    /// An offer's currency differs from the list currency.
    #[error("Item {item} has an offer in {offer}, but the list is in {list}")]
    CurrencyMismatch {
        /// Key of the offending item
        item: String,

        /// Currency of the offer
        offer: &'static str,

        /// Currency of the list
        list: &'static str,
    },

    /// No item with the given key is in the list.
    #[error("Item {0} not found")]
    ItemNotFound(String),
}

/// An ordered collection of line items priced in a single currency.
///
/// Keys are unique: writing an item whose key is already present replaces it
/// in place, so the last write wins while the original position is kept.
#[derive(Debug, Clone)]
pub struct ShoppingList<'a> {
    items: Vec<LineItem<'a>>,
    currency: &'static Currency,
}

impl<'a> ShoppingList<'a> {
    /// Create an empty shopping list.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        ShoppingList {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a shopping list with the given items.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::CurrencyMismatch`] if any offer is priced
    /// in a different currency.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, ShoppingListError> {
        let mut list = ShoppingList::new(currency);

        list.set_items(items)?;

        Ok(list)
    }

    /// Add an item, or increase the quantity of the item with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::CurrencyMismatch`] if any offer is priced
    /// in a different currency.
    pub fn add(&mut self, item: LineItem<'a>) -> Result<(), ShoppingListError> {
        self.check_currency(&item)?;

        match self.position(item.key()) {
            Some(idx) => {
                if let Some(existing) = self.items.get_mut(idx) {
                    let quantity = existing.quantity().saturating_add(item.quantity());
                    existing.set_quantity(quantity);
                }
            }
            None => self.items.push(item),
        }

        Ok(())
    }

    /// Remove the item with the given key, returning it if it was present.
    pub fn remove(&mut self, key: &str) -> Option<LineItem<'a>> {
        let idx = self.position(key)?;

        Some(self.items.remove(idx))
    }

    /// Set the quantity of an item. A quantity of zero removes the item.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::ItemNotFound`] if no item has the key.
    pub fn update_quantity(&mut self, key: &str, quantity: u32) -> Result<(), ShoppingListError> {
        let idx = self
            .position(key)
            .ok_or_else(|| ShoppingListError::ItemNotFound(key.to_string()))?;

        if quantity == 0 {
            self.items.remove(idx);
        } else if let Some(item) = self.items.get_mut(idx) {
            item.set_quantity(quantity);
        }

        Ok(())
    }

    /// Replace all items in the list.
    ///
    /// On error the list is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ShoppingListError::CurrencyMismatch`] if any offer is priced
    /// in a different currency.
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = LineItem<'a>>,
    ) -> Result<(), ShoppingListError> {
        let mut replacement = ShoppingList::new(self.currency);

        for item in items {
            replacement.check_currency(&item)?;
            replacement.upsert(item);
        }

        self.items = replacement.items;

        Ok(())
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get an item by key.
    pub fn get(&self, key: &str) -> Option<&LineItem<'a>> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Iterate over the items in the list.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// The items as a slice, in list order.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Get the number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity())).sum()
    }

    /// Get the currency of the list.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Run the store allocation over the current contents.
    pub fn allocate(&self) -> AllocationResult<'a> {
        recommend(self)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key() == key)
    }

    fn upsert(&mut self, item: LineItem<'a>) {
        match self.position(item.key()) {
            Some(idx) => {
                if let Some(slot) = self.items.get_mut(idx) {
                    *slot = item;
                }
            }
            None => self.items.push(item),
        }
    }

    fn check_currency(&self, item: &LineItem<'a>) -> Result<(), ShoppingListError> {
        item.offers().iter().try_for_each(|offer| {
            let offer_currency = offer.currency();

            if offer_currency == self.currency {
                Ok(())
            } else {
                Err(ShoppingListError::CurrencyMismatch {
                    item: item.key().to_string(),
                    offer: offer_currency.iso_alpha_code,
                    list: self.currency.iso_alpha_code,
                })
            }
        })
    }
}
