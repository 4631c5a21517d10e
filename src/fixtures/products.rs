//! Product Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, DKK, EUR, GBP, NOK, SEK, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    products::Product,
    stores::{Store, StoreDirectory, StoreId},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products, in catalogue order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Barcode
    pub ean: String,

    /// Product name
    pub name: String,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// One entry per store selling the product
    pub offers: Vec<OfferFixture>,
}

/// Offer Fixture
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Store key, matching the stores fixture
    pub store: String,

    /// Unit price (e.g., "21.90 NOK")
    pub price: String,
}

impl ProductFixture {
    /// Build a product whose store options are the fixture's offers.
    ///
    /// The first offer doubles as the product's own store and price.
    ///
    /// # Errors
    ///
    /// Returns an error if the product has no offers, a price cannot be
    /// parsed, or an offer names an unknown store.
    pub fn try_into_product(
        self,
        stores: &StoreDirectory,
    ) -> Result<(Product<'static>, &'static Currency), FixtureError> {
        let mut currency: Option<&'static Currency> = None;
        let mut options = Vec::with_capacity(self.offers.len());

        for offer in &self.offers {
            let (minor_units, offer_currency) = parse_price(&offer.price)?;

            match currency {
                Some(existing) if existing != offer_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        offer_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(offer_currency),
            }

            let store = stores
                .get(&StoreId::from(offer.store.as_str()))
                .cloned()
                .ok_or_else(|| FixtureError::StoreNotFound(offer.store.clone()))?;

            options.push(Product::new(
                self.ean.clone(),
                self.name.clone(),
                store,
                Money::from_minor(minor_units, offer_currency),
            ));
        }

        let (Some(first), Some(currency)) = (options.first(), currency) else {
            return Err(FixtureError::NoOffers(self.ean));
        };

        let store: Store = first.store.clone();
        let current_price = first.current_price;

        let mut product = Product::new(self.ean, self.name, store, current_price)
            .with_store_options(options);

        product.brand = self.brand;

        Ok((product, currency))
    }
}

/// Parse price string (e.g., "21.90 NOK") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = match *currency_code {
        "NOK" => NOK,
        "SEK" => SEK,
        "DKK" => DKK,
        "EUR" => EUR,
        "GBP" => GBP,
        "USD" => USD,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}
