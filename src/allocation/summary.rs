//! Store summaries

use rusty_money::{Money, iso::Currency};

use crate::stores::StoreId;

/// Aggregate cost and coverage of a shopping list at one store.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary<'a> {
    store: StoreId,
    covered_count: usize,
    total: Money<'a, Currency>,
    covers_all: bool,
}

impl<'a> StoreSummary<'a> {
    /// Create a new summary.
    #[must_use]
    pub fn new(
        store: StoreId,
        covered_count: usize,
        total: Money<'a, Currency>,
        line_item_count: usize,
    ) -> Self {
        Self {
            store,
            covered_count,
            total,
            covers_all: covered_count == line_item_count,
        }
    }

    /// The store this summary describes
    pub fn store(&self) -> &StoreId {
        &self.store
    }

    /// Number of distinct line items the store offers
    pub fn covered_count(&self) -> usize {
        self.covered_count
    }

    /// Cost of buying every covered line item at this store
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether the store offers every line item
    pub fn covers_all(&self) -> bool {
        self.covers_all
    }
}
