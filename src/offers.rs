//! Offers

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::stores::StoreId;

/// Errors that can occur while constructing an offer.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// The unit price is below zero (store, amount).
    #[error("offer from {0} has negative unit price {1}")]
    NegativePrice(StoreId, Decimal),

    /// The unit price has more decimal places than the currency's minor unit.
    #[error("offer from {0} has unit price {1} finer than the {2} minor unit")]
    ExcessPrecision(StoreId, Decimal, &'static str),
}

/// A single store's price for one unit of a product.
#[derive(Clone, Debug, PartialEq)]
pub struct Offer<'a> {
    store: StoreId,
    unit_price: Money<'a, Currency>,
}

impl<'a> Offer<'a> {
    /// Creates a new offer.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::NegativePrice`] if the unit price is negative, or
    /// [`OfferError::ExcessPrecision`] if it cannot be expressed exactly in
    /// minor units.
    pub fn new(
        store: impl Into<StoreId>,
        unit_price: Money<'a, Currency>,
    ) -> Result<Self, OfferError> {
        let store = store.into();
        let amount = *unit_price.amount();

        if amount < Decimal::ZERO {
            return Err(OfferError::NegativePrice(store, amount));
        }

        let currency = unit_price.currency();

        if amount.normalize().scale() > currency.exponent {
            return Err(OfferError::ExcessPrecision(
                store,
                amount,
                currency.iso_alpha_code,
            ));
        }

        Ok(Self { store, unit_price })
    }

    /// Returns the store making the offer
    pub fn store(&self) -> &StoreId {
        &self.store
    }

    /// Returns the price of a single unit
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Returns the currency of the unit price
    pub fn currency(&self) -> &'a Currency {
        self.unit_price.currency()
    }

    /// Price of `quantity` units, in minor units.
    pub(crate) fn line_total_minor(&self, quantity: u32) -> i64 {
        self.unit_price
            .to_minor_units()
            .saturating_mul(i64::from(quantity))
    }
}
