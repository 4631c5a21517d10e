//! Allocation results

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{allocation::summary::StoreSummary, offers::Offer, stores::StoreId};

/// A line item the recommended store cannot supply.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanedItem<'a> {
    /// Index of the item in the shopping list
    pub item_idx: usize,

    /// Cheapest offer for the item elsewhere, `None` if nobody sells it
    pub fallback: Option<Offer<'a>>,
}

/// Ranked store comparison and single-store purchase plan for a shopping list.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult<'a> {
    /// Store summaries, best first
    ranked_stores: Vec<StoreSummary<'a>>,

    /// Indexes of items available at the recommended store
    covered_items: SmallVec<[usize; 10]>,

    /// Items that must be bought elsewhere
    orphaned_items: SmallVec<[OrphanedItem<'a>; 4]>,

    /// Sum of per-item minimum prices, ignoring the single store constraint
    cheapest_possible_total: Money<'a, Currency>,
}

impl<'a> AllocationResult<'a> {
    /// Create a new result with the given details.
    #[must_use]
    pub fn new(
        ranked_stores: Vec<StoreSummary<'a>>,
        covered_items: SmallVec<[usize; 10]>,
        orphaned_items: SmallVec<[OrphanedItem<'a>; 4]>,
        cheapest_possible_total: Money<'a, Currency>,
    ) -> Self {
        Self {
            ranked_stores,
            covered_items,
            orphaned_items,
            cheapest_possible_total,
        }
    }

    /// An empty result with a zero total in the given currency.
    #[must_use]
    pub fn empty(currency: &'a Currency) -> Self {
        Self::new(
            Vec::new(),
            SmallVec::new(),
            SmallVec::new(),
            Money::from_minor(0, currency),
        )
    }

    /// Store summaries, best first.
    pub fn ranked_stores(&self) -> &[StoreSummary<'a>] {
        &self.ranked_stores
    }

    /// The best ranked store, if any store offers anything on the list.
    pub fn recommended_store(&self) -> Option<&StoreSummary<'a>> {
        self.ranked_stores.first()
    }

    /// Indexes of the items available at the recommended store, in list order.
    pub fn covered_items(&self) -> &[usize] {
        &self.covered_items
    }

    /// Items unavailable at the recommended store, in list order.
    pub fn orphaned_items(&self) -> &[OrphanedItem<'a>] {
        &self.orphaned_items
    }

    /// Lookup the orphan entry for a given list index.
    pub fn orphan_for_item(&self, item_idx: usize) -> Option<&OrphanedItem<'a>> {
        self.orphaned_items
            .iter()
            .find(|orphan| orphan.item_idx == item_idx)
    }

    /// Lower bound on the spend when every item is bought at its cheapest store.
    pub fn cheapest_possible_total(&self) -> Money<'a, Currency> {
        self.cheapest_possible_total
    }

    /// The summary for a particular store, if it offers anything on the list.
    pub fn summary_for(&self, store: &StoreId) -> Option<&StoreSummary<'a>> {
        self.ranked_stores
            .iter()
            .find(|summary| summary.store() == store)
    }

    /// Check if the result has no stores and no items.
    pub fn is_empty(&self) -> bool {
        self.ranked_stores.is_empty()
            && self.covered_items.is_empty()
            && self.orphaned_items.is_empty()
    }
}
