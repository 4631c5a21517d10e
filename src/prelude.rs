//! Storewise prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::{
        AllocationResult, OrphanedItem, StoreSummary, compute_store_summaries, rank_stores,
        recommend,
    },
    fixtures::{Fixture, FixtureError},
    items::{LineItem, LineItemError, cheapest_offer},
    list::{ShoppingList, ShoppingListError},
    meals::{Meal, MealError, MealItem, WeekDay, WeekPlan},
    offers::{Offer, OfferError},
    products::{Product, ProductError},
    report::{
        ItemNames, ReportContext, ReportError, ReportOptions, shopping_list_text, write_comparison,
    },
    stores::{Store, StoreDirectory, StoreId},
};
