//! Products
//!
//! Catalogue records as returned by the price lookup service. A product either
//! embeds one record per store in `store_options`, or stands alone as its own
//! single offer. [`Product::offers`] flattens both shapes so the allocation
//! engine only ever sees [`Offer`]s.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    items::{LineItem, LineItemError, Offers},
    offers::{Offer, OfferError},
    stores::{Store, StoreDirectory},
};

/// Errors that can occur when turning a product into a line item.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// A store option carried an invalid price.
    #[error(transparent)]
    Offer(#[from] OfferError),

    /// The requested quantity was invalid.
    #[error(transparent)]
    LineItem(#[from] LineItemError),
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Barcode, used as the line item key
    pub ean: String,

    /// Product name
    pub name: String,

    /// Brand, if known
    pub brand: Option<String>,

    /// Store this record was fetched from
    pub store: Store,

    /// Current price at `store`
    pub current_price: Money<'a, Currency>,

    /// The same product at other stores; empty when only `store` was fetched
    pub store_options: Vec<Product<'a>>,
}

impl<'a> Product<'a> {
    /// Create a product sold by a single store.
    pub fn new(
        ean: impl Into<String>,
        name: impl Into<String>,
        store: Store,
        current_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            ean: ean.into(),
            name: name.into(),
            brand: None,
            store,
            current_price,
            store_options: Vec::new(),
        }
    }

    /// Attach the per-store records for this product.
    #[must_use]
    pub fn with_store_options(mut self, store_options: Vec<Product<'a>>) -> Self {
        self.store_options = store_options;
        self
    }

    /// The records that make up this product's offers.
    fn options(&self) -> &[Product<'a>] {
        if self.store_options.is_empty() {
            std::slice::from_ref(self)
        } else {
            &self.store_options
        }
    }

    /// Normalise the product into one offer per store option.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferError`] if any option has a negative price.
    pub fn offers(&self) -> Result<Offers<'a>, OfferError> {
        self.options()
            .iter()
            .map(|option| Offer::new(option.store.id.clone(), option.current_price))
            .collect()
    }

    /// Build a line item for `quantity` units of this product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if an option has a negative price or the
    /// quantity is zero.
    pub fn line_item(&self, quantity: u32) -> Result<LineItem<'a>, ProductError> {
        Ok(LineItem::new(self.ean.clone(), quantity, self.offers()?)?)
    }

    /// The lowest price across all store options.
    pub fn cheapest_price(&self) -> Money<'a, Currency> {
        self.options()
            .iter()
            .map(|option| option.current_price)
            .min_by_key(Money::to_minor_units)
            .unwrap_or(self.current_price)
    }

    /// Store metadata for every option.
    pub fn stores(&self) -> impl Iterator<Item = &Store> {
        self.options().iter().map(|option| &option.store)
    }
}

impl StoreDirectory {
    /// Collect store metadata from a set of products.
    pub fn from_products<'p, 'a: 'p>(products: impl IntoIterator<Item = &'p Product<'a>>) -> Self {
        products
            .into_iter()
            .flat_map(Product::stores)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::NOK;
    use testresult::TestResult;

    use crate::stores::StoreId;

    use super::*;

    fn at(store: &str, minor: i64) -> Product<'static> {
        Product::new(
            "7038010000737",
            "Tine Lettmelk",
            Store::new(store, store.to_uppercase()),
            Money::from_minor(minor, NOK),
        )
    }

    #[test]
    fn standalone_product_is_its_own_offer() -> TestResult {
        let product = at("kiwi", 2190);

        let offers = product.offers()?;

        assert_eq!(offers.len(), 1);
        assert_eq!(
            offers.first().map(|offer| offer.store().as_str()),
            Some("kiwi")
        );

        Ok(())
    }

    #[test]
    fn store_options_replace_the_top_level_offer() -> TestResult {
        let product = at("kiwi", 2190)
            .with_store_options(vec![at("meny", 2590), at("rema", 2090)]);

        let stores: Vec<String> = product
            .offers()?
            .iter()
            .map(|offer| offer.store().to_string())
            .collect();

        assert_eq!(stores, vec!["meny", "rema"]);
        assert_eq!(product.cheapest_price(), Money::from_minor(2090, NOK));

        Ok(())
    }

    #[test]
    fn line_item_uses_ean_as_key() -> TestResult {
        let item = at("kiwi", 2190).line_item(2)?;

        assert_eq!(item.key(), "7038010000737");
        assert_eq!(item.quantity(), 2);

        Ok(())
    }

    #[test]
    fn zero_quantity_line_item_errors() {
        let err = at("kiwi", 2190).line_item(0).err();

        assert!(matches!(err, Some(ProductError::LineItem(_))));
    }

    #[test]
    fn directory_from_products_collects_option_stores() {
        let products = [
            at("kiwi", 2190).with_store_options(vec![at("kiwi", 2190), at("meny", 2590)]),
            at("rema", 1990),
        ];

        let directory = StoreDirectory::from_products(&products);

        assert_eq!(directory.len(), 3);
        assert_eq!(directory.display_name(&StoreId::from("meny")), "MENY");
    }
}
