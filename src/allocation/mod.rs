//! Store allocation
//!
//! Turns a shopping list into a ranked comparison of stores and a single-store
//! purchase plan. Every call recomputes from scratch; nothing is cached between
//! calls.
//!
//! Ranking prefers the store covering the most line items, then the lowest
//! total for the covered items. A store's total only includes the items it
//! sells, so a store with partial coverage is never charged for the rest.

use rustc_hash::FxHashMap;
use rusty_money::Money;
use smallvec::SmallVec;
use tracing::debug;

use crate::{list::ShoppingList, stores::StoreId};

pub mod result;
pub mod summary;

pub use result::{AllocationResult, OrphanedItem};
pub use summary::StoreSummary;

/// Running coverage and cost for one store while scanning a list.
#[derive(Debug)]
struct StoreTally {
    store: StoreId,
    covered_count: usize,
    total_minor: i64,
}

/// Compute coverage and totals for every store that offers at least one item.
///
/// Summaries are returned in the order stores are first seen while scanning the
/// items' offers. If an item lists the same store more than once, only the
/// first of those offers counts.
pub fn compute_store_summaries<'a>(list: &ShoppingList<'a>) -> Vec<StoreSummary<'a>> {
    let mut index: FxHashMap<&StoreId, usize> = FxHashMap::default();
    let mut tallies: Vec<StoreTally> = Vec::new();

    for item in list.iter() {
        let mut seen: SmallVec<[usize; 8]> = SmallVec::new();

        for offer in item.offers() {
            let tally_idx = *index.entry(offer.store()).or_insert_with(|| {
                tallies.push(StoreTally {
                    store: offer.store().clone(),
                    covered_count: 0,
                    total_minor: 0,
                });

                tallies.len() - 1
            });

            if seen.contains(&tally_idx) {
                continue;
            }

            seen.push(tally_idx);

            if let Some(tally) = tallies.get_mut(tally_idx) {
                tally.covered_count += 1;
                tally.total_minor = tally
                    .total_minor
                    .saturating_add(offer.line_total_minor(item.quantity()));
            }
        }
    }

    let line_item_count = list.len();
    let currency = list.currency();

    tallies
        .into_iter()
        .map(|tally| {
            StoreSummary::new(
                tally.store,
                tally.covered_count,
                Money::from_minor(tally.total_minor, currency),
                line_item_count,
            )
        })
        .collect()
}

/// Order summaries by coverage (descending), then total (ascending).
///
/// The sort is stable: summaries with equal coverage and total keep their
/// relative order.
pub fn rank_stores(mut summaries: Vec<StoreSummary<'_>>) -> Vec<StoreSummary<'_>> {
    summaries.sort_by(|a, b| {
        b.covered_count()
            .cmp(&a.covered_count())
            .then_with(|| a.total().to_minor_units().cmp(&b.total().to_minor_units()))
    });

    summaries
}

/// Rank the stores for a list and split its items around the best one.
#[tracing::instrument(level = "debug", skip_all, fields(line_items = list.len()))]
pub fn recommend<'a>(list: &ShoppingList<'a>) -> AllocationResult<'a> {
    if list.is_empty() {
        return AllocationResult::empty(list.currency());
    }

    let ranked_stores = rank_stores(compute_store_summaries(list));
    let recommended = ranked_stores.first().map(StoreSummary::store);

    let mut covered_items: SmallVec<[usize; 10]> = SmallVec::new();
    let mut orphaned_items: SmallVec<[OrphanedItem<'a>; 4]> = SmallVec::new();

    for (item_idx, item) in list.iter().enumerate() {
        if recommended.is_some_and(|store| item.is_offered_by(store)) {
            covered_items.push(item_idx);
        } else {
            orphaned_items.push(OrphanedItem {
                item_idx,
                fallback: item.cheapest_offer().cloned(),
            });
        }
    }

    let cheapest_minor = list
        .iter()
        .filter_map(|item| {
            item.cheapest_offer()
                .map(|offer| offer.line_total_minor(item.quantity()))
        })
        .fold(0_i64, i64::saturating_add);

    debug!(
        recommended = recommended.map(StoreId::as_str),
        stores = ranked_stores.len(),
        covered = covered_items.len(),
        orphaned = orphaned_items.len(),
        "allocated shopping list"
    );

    AllocationResult::new(
        ranked_stores,
        covered_items,
        orphaned_items,
        Money::from_minor(cheapest_minor, list.currency()),
    )
}
