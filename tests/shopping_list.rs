//! Integration tests for editing a shopping list between allocations

use rusty_money::{
    Money,
    iso::{EUR, NOK},
};
use testresult::TestResult;

use storewise::{
    items::LineItem,
    list::{ShoppingList, ShoppingListError},
    offers::Offer,
};

fn item(key: &str, quantity: u32, offers: &[(&str, i64)]) -> TestResult<LineItem<'static>> {
    let offers = offers
        .iter()
        .map(|(store, minor)| Offer::new(*store, Money::from_minor(*minor, NOK)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LineItem::new(key, quantity, offers)?)
}

fn recommended(list: &ShoppingList<'_>) -> Option<String> {
    list.allocate()
        .recommended_store()
        .map(|summary| summary.store().to_string())
}

#[test]
fn recommendation_follows_list_edits() -> TestResult {
    let mut list = ShoppingList::new(NOK);

    assert!(list.allocate().is_empty());
    assert_eq!(list.allocate().cheapest_possible_total(), Money::from_minor(0, NOK));

    list.add(item("milk", 1, &[("kiwi", 2190), ("rema", 2140)])?)?;

    assert_eq!(recommended(&list).as_deref(), Some("rema"));

    list.add(item("bread", 1, &[("kiwi", 3490)])?)?;

    assert_eq!(recommended(&list).as_deref(), Some("kiwi"));

    list.remove("bread").ok_or("bread missing")?;

    assert_eq!(recommended(&list).as_deref(), Some("rema"));

    Ok(())
}

#[test]
fn quantity_changes_reprice_store_totals() -> TestResult {
    let mut list = ShoppingList::with_items(
        [
            item("milk", 1, &[("kiwi", 2000), ("rema", 2100)])?,
            item("coffee", 1, &[("kiwi", 6000), ("rema", 5920)])?,
        ],
        NOK,
    )?;

    assert_eq!(recommended(&list).as_deref(), Some("kiwi"));

    list.update_quantity("coffee", 2)?;

    let result = list.allocate();
    let totals: Vec<(String, i64)> = result
        .ranked_stores()
        .iter()
        .map(|summary| (summary.store().to_string(), summary.total().to_minor_units()))
        .collect();

    assert_eq!(
        totals,
        vec![("rema".to_string(), 13_940), ("kiwi".to_string(), 14_000)]
    );
    assert_eq!(list.item_count(), 3);

    Ok(())
}

#[test]
fn adding_existing_key_increments_quantity() -> TestResult {
    let mut list = ShoppingList::new(NOK);

    list.add(item("milk", 1, &[("kiwi", 2190)])?)?;
    list.add(item("milk", 2, &[("kiwi", 2190)])?)?;

    assert_eq!(list.len(), 1);
    assert_eq!(list.get("milk").map(LineItem::quantity), Some(3));

    list.update_quantity("milk", 0)?;

    assert!(list.is_empty());
    assert_eq!(
        list.update_quantity("milk", 1),
        Err(ShoppingListError::ItemNotFound("milk".to_string()))
    );

    Ok(())
}

#[test]
fn foreign_currency_offers_are_rejected() -> TestResult {
    let offer = Offer::new("vinmonopolet", Money::from_minor(1500, EUR))?;
    let euro = LineItem::new("wine", 1, [offer])?;

    let result = ShoppingList::with_items([euro], NOK);

    assert!(matches!(
        result,
        Err(ShoppingListError::CurrencyMismatch { ref item, .. }) if item == "wine"
    ));

    Ok(())
}

#[test]
fn set_items_replaces_contents() -> TestResult {
    let mut list = ShoppingList::with_items([item("milk", 1, &[("kiwi", 2190)])?], NOK)?;

    list.set_items([item("bread", 1, &[("meny", 3990)])?])?;

    assert!(list.get("milk").is_none());
    assert_eq!(recommended(&list).as_deref(), Some("meny"));

    list.clear();

    assert!(list.allocate().recommended_store().is_none());

    Ok(())
}
