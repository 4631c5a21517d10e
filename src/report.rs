//! Reports
//!
//! Presentation of an [`AllocationResult`]: a store comparison table for the
//! terminal and a plain-text shopping list grouped by store.

use std::{fmt, io, ops::Range};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    allocation::AllocationResult,
    items::LineItem,
    list::ShoppingList,
    offers::Offer,
    stores::{StoreDirectory, StoreId},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),

    /// Formatting the report text failed.
    #[error(transparent)]
    Fmt(#[from] fmt::Error),
}

/// Product display names keyed by line item key.
pub type ItemNames = FxHashMap<String, String>;

/// Report configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum number of stores in the comparison table
    pub max_stores: usize,

    /// Maximum number of alternative stores listed for an orphaned item
    pub max_alternatives: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_stores: 3,
            max_alternatives: 3,
        }
    }
}

/// Names and options shared by the report writers.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'r> {
    /// Store metadata for display names
    pub stores: &'r StoreDirectory,

    /// Product names for display
    pub names: &'r ItemNames,

    /// Report configuration
    pub options: ReportOptions,
}

impl ReportContext<'_> {
    fn item_name<'i>(&'i self, item: &'i LineItem<'_>) -> &'i str {
        self.names
            .get(item.key())
            .map_or(item.key(), String::as_str)
    }

    fn store_name<'i>(&'i self, store: &'i StoreId) -> &'i str {
        self.stores.display_name(store)
    }
}

/// Write the store comparison and purchase plan for a list.
///
/// # Errors
///
/// Returns a [`ReportError`] if writing to `out` fails.
pub fn write_comparison(
    mut out: impl io::Write,
    list: &ShoppingList<'_>,
    result: &AllocationResult<'_>,
    ctx: &ReportContext<'_>,
) -> Result<(), ReportError> {
    let Some(recommended) = result.recommended_store() else {
        writeln!(out, "No store sells anything on this list.")?;
        return Ok(());
    };

    let item_total = list.len();

    writeln!(
        out,
        "Recommended store: {} ({}/{} products)",
        ctx.store_name(recommended.store()),
        recommended.covered_count(),
        item_total
    )?;
    writeln!(out, "Total: {}", recommended.total())?;

    let mut stores = Builder::default();
    stores.push_record(["", "Store", "Products", "Total"]);

    for summary in result.ranked_stores().iter().take(ctx.options.max_stores) {
        let marker = if summary.store() == recommended.store() {
            "*"
        } else {
            ""
        };

        stores.push_record([
            marker.to_string(),
            ctx.store_name(summary.store()).to_string(),
            format!("{}/{item_total}", summary.covered_count()),
            format!("{}", summary.total()),
        ]);
    }

    writeln!(out, "\n{}", style_table(stores, 2..4))?;

    let mut plan = Builder::default();
    plan.push_record(["#", "Item", "Qty", "Unit Price", "Line Total", "Store"]);

    for (item_idx, item) in list.iter().enumerate() {
        let offer = item.offer_from(recommended.store()).or_else(|| {
            result
                .orphan_for_item(item_idx)
                .and_then(|orphan| orphan.fallback.as_ref())
        });

        plan.push_record(plan_row(item_idx, item, offer, list.currency(), ctx));
    }

    writeln!(out, "{}", style_table(plan, 2..5))?;

    if !result.orphaned_items().is_empty() {
        writeln!(
            out,
            "Not available at {}:",
            ctx.store_name(recommended.store())
        )?;

        for orphan in result.orphaned_items() {
            let Some(item) = list.items().get(orphan.item_idx) else {
                continue;
            };

            writeln!(out, "  {}", orphan_line(item, orphan.fallback.as_ref(), ctx))?;
        }
    }

    writeln!(
        out,
        "\nCheapest possible (shopping at every store): {}",
        result.cheapest_possible_total()
    )?;

    Ok(())
}

fn plan_row(
    item_idx: usize,
    item: &LineItem<'_>,
    offer: Option<&Offer<'_>>,
    currency: &Currency,
    ctx: &ReportContext<'_>,
) -> [String; 6] {
    let (unit, line, store) = match offer {
        Some(offer) => (
            format!("{}", offer.unit_price()),
            format!(
                "{}",
                Money::from_minor(offer.line_total_minor(item.quantity()), currency)
            ),
            ctx.store_name(offer.store()).to_string(),
        ),
        None => (String::new(), String::new(), "unavailable".to_string()),
    };

    [
        format!("#{:<3}", item_idx + 1),
        ctx.item_name(item).to_string(),
        item.quantity().to_string(),
        unit,
        line,
        store,
    ]
}

fn orphan_line(
    item: &LineItem<'_>,
    fallback: Option<&Offer<'_>>,
    ctx: &ReportContext<'_>,
) -> String {
    let name = ctx.item_name(item);

    let Some(fallback) = fallback else {
        return format!("{name}: not sold anywhere");
    };

    let mut line = format!(
        "{name}: cheapest at {} ({})",
        ctx.store_name(fallback.store()),
        fallback.unit_price()
    );

    let mut alternatives: Vec<&Offer<'_>> = item
        .offers()
        .iter()
        .filter(|offer| offer.store() != fallback.store())
        .collect();

    alternatives.sort_by_key(|offer| offer.unit_price().to_minor_units());

    let alternatives: Vec<String> = alternatives
        .into_iter()
        .take(ctx.options.max_alternatives)
        .map(|offer| format!("{} ({})", ctx.store_name(offer.store()), offer.unit_price()))
        .collect();

    if !alternatives.is_empty() {
        line.push_str(", also at ");
        line.push_str(&alternatives.join(", "));
    }

    line
}

fn style_table(builder: Builder, right_aligned: Range<usize>) -> String {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(right_aligned), Alignment::right());

    table.to_string()
}

/// Render a plain-text shopping list, grouping each item under its cheapest store.
///
/// # Errors
///
/// Returns a [`ReportError`] if formatting fails.
pub fn shopping_list_text(
    name: &str,
    list: &ShoppingList<'_>,
    ctx: &ReportContext<'_>,
) -> Result<String, ReportError> {
    let mut content = String::new();

    write_shopping_list(&mut content, name, list, ctx)?;

    Ok(content)
}

fn write_shopping_list(
    out: &mut impl fmt::Write,
    name: &str,
    list: &ShoppingList<'_>,
    ctx: &ReportContext<'_>,
) -> fmt::Result {
    if list.is_empty() {
        return writeln!(out, "The shopping list is empty");
    }

    let mut groups: Vec<(&StoreId, Vec<(&LineItem<'_>, i64)>)> = Vec::new();
    let mut unavailable: Vec<&LineItem<'_>> = Vec::new();

    for item in list.iter() {
        let Some(offer) = item.cheapest_offer() else {
            unavailable.push(item);
            continue;
        };

        let line_total = offer.line_total_minor(item.quantity());

        match groups.iter_mut().find(|(store, _)| *store == offer.store()) {
            Some((_, items)) => items.push((item, line_total)),
            None => groups.push((offer.store(), vec![(item, line_total)])),
        }
    }

    let currency = list.currency();
    let mut total = 0_i64;

    writeln!(out, "{name}\n")?;

    for (store, items) in &groups {
        writeln!(out, "=== {} ===", ctx.store_name(store))?;

        let mut store_total = 0_i64;

        for (item, line_total) in items {
            store_total = store_total.saturating_add(*line_total);

            writeln!(
                out,
                "{}x {} - {}",
                item.quantity(),
                ctx.item_name(item),
                Money::from_minor(*line_total, currency)
            )?;
        }

        writeln!(out, "Subtotal: {}\n", Money::from_minor(store_total, currency))?;

        total = total.saturating_add(store_total);
    }

    if !unavailable.is_empty() {
        writeln!(out, "=== Unavailable ===")?;

        for item in unavailable {
            writeln!(out, "{}x {}", item.quantity(), ctx.item_name(item))?;
        }

        writeln!(out)?;
    }

    writeln!(out, "Total: {}", Money::from_minor(total, currency))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::NOK;
    use testresult::TestResult;

    use crate::stores::Store;

    use super::*;

    fn offer(store: &str, minor: i64) -> TestResult<Offer<'static>> {
        Ok(Offer::new(store, Money::from_minor(minor, NOK))?)
    }

    fn fixture() -> TestResult<(ShoppingList<'static>, StoreDirectory, ItemNames)> {
        let list = ShoppingList::with_items(
            [
                LineItem::new("milk", 2, [offer("kiwi", 2190)?, offer("rema", 2090)?])?,
                LineItem::new("bread", 1, [offer("kiwi", 3490)?])?,
                LineItem::new("tacos", 1, [offer("meny", 2990)?, offer("rema", 3190)?])?,
            ],
            NOK,
        )?;

        let stores = [
            Store::new("kiwi", "KIWI"),
            Store::new("rema", "REMA 1000"),
            Store::new("meny", "MENY"),
        ]
        .into_iter()
        .collect();

        let names = [
            ("milk".to_string(), "Lettmelk".to_string()),
            ("bread".to_string(), "Grovbrød".to_string()),
        ]
        .into_iter()
        .collect();

        Ok((list, stores, names))
    }

    #[test]
    fn comparison_names_recommended_store_and_orphans() -> TestResult {
        let (list, stores, names) = fixture()?;
        let ctx = ReportContext {
            stores: &stores,
            names: &names,
            options: ReportOptions::default(),
        };

        let result = list.allocate();
        let mut out = Vec::new();

        write_comparison(&mut out, &list, &result, &ctx)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Recommended store: REMA 1000 (2/3 products)"));
        assert!(text.contains("Not available at REMA 1000:"));
        assert!(text.contains("Grovbrød: cheapest at KIWI"));

        Ok(())
    }

    #[test]
    fn comparison_of_empty_list() -> TestResult {
        let list = ShoppingList::new(NOK);
        let stores = StoreDirectory::new();
        let names = ItemNames::default();
        let ctx = ReportContext {
            stores: &stores,
            names: &names,
            options: ReportOptions::default(),
        };

        let mut out = Vec::new();

        write_comparison(&mut out, &list, &list.allocate(), &ctx)?;

        assert_eq!(String::from_utf8(out)?, "No store sells anything on this list.\n");

        Ok(())
    }

    #[test]
    fn text_export_groups_by_cheapest_store() -> TestResult {
        let (list, stores, names) = fixture()?;
        let ctx = ReportContext {
            stores: &stores,
            names: &names,
            options: ReportOptions::default(),
        };

        let text = shopping_list_text("Weekly shop", &list, &ctx)?;
        let headings: Vec<&str> = text.lines().filter(|line| line.starts_with("===")).collect();

        assert!(text.starts_with("Weekly shop\n\n"));
        assert_eq!(headings, vec!["=== REMA 1000 ===", "=== KIWI ===", "=== MENY ==="]);
        assert!(text.contains("2x Lettmelk"));
        assert!(text.contains("1x tacos"));
        assert!(text.lines().last().is_some_and(|line| line.starts_with("Total: ")));

        Ok(())
    }

    #[test]
    fn text_export_of_empty_list() -> TestResult {
        let list = ShoppingList::new(NOK);
        let stores = StoreDirectory::new();
        let names = ItemNames::default();
        let ctx = ReportContext {
            stores: &stores,
            names: &names,
            options: ReportOptions::default(),
        };

        assert_eq!(
            shopping_list_text("Weekly shop", &list, &ctx)?,
            "The shopping list is empty\n"
        );

        Ok(())
    }

    #[test]
    fn text_export_lists_unavailable_items() -> TestResult {
        let list = ShoppingList::with_items(
            [LineItem::new("ghost", 1, Vec::<Offer<'static>>::new())?],
            NOK,
        )?;
        let stores = StoreDirectory::new();
        let names = ItemNames::default();
        let ctx = ReportContext {
            stores: &stores,
            names: &names,
            options: ReportOptions::default(),
        };

        let text = shopping_list_text("Weekly shop", &list, &ctx)?;

        assert!(text.contains("=== Unavailable ===\n1x ghost\n"));

        Ok(())
    }
}
