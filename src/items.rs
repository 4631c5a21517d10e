//! Items

use smallvec::SmallVec;
use thiserror::Error;

use crate::{offers::Offer, stores::StoreId};

/// Errors related to line item construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// A line item must ask for at least one unit.
    #[error("line item {0} has zero quantity")]
    ZeroQuantity(String),
}

/// Offers for a single product, usually one per store.
pub type Offers<'a> = SmallVec<[Offer<'a>; 4]>;

/// A requested product, the quantity wanted and the stores selling it.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    key: String,
    quantity: u32,
    offers: Offers<'a>,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// An empty offer list is accepted; such an item can never be covered by
    /// any store and is always orphaned by the allocation engine.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::ZeroQuantity`] if `quantity` is zero.
    pub fn new(
        key: impl Into<String>,
        quantity: u32,
        offers: impl IntoIterator<Item = Offer<'a>>,
    ) -> Result<Self, LineItemError> {
        let key = key.into();

        if quantity == 0 {
            return Err(LineItemError::ZeroQuantity(key));
        }

        Ok(Self {
            key,
            quantity,
            offers: offers.into_iter().collect(),
        })
    }

    /// Returns the product key (EAN) of the item
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the number of units wanted
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the offers for the item, in the order they were supplied
    pub fn offers(&self) -> &[Offer<'a>] {
        &self.offers
    }

    /// Returns the first offer made by `store`, if any.
    pub fn offer_from(&self, store: &StoreId) -> Option<&Offer<'a>> {
        self.offers.iter().find(|offer| offer.store() == store)
    }

    /// Check if `store` sells this item.
    pub fn is_offered_by(&self, store: &StoreId) -> bool {
        self.offer_from(store).is_some()
    }

    /// Returns the cheapest offer, preferring the earliest on equal prices.
    pub fn cheapest_offer(&self) -> Option<&Offer<'a>> {
        cheapest_offer(&self.offers)
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }
}

/// Returns the cheapest offer in a list, preferring the earliest on equal prices.
pub fn cheapest_offer<'o, 'a>(offers: &'o [Offer<'a>]) -> Option<&'o Offer<'a>> {
    // `min_by_key` keeps the first minimum it sees.
    offers
        .iter()
        .min_by_key(|offer| offer.unit_price().to_minor_units())
}
