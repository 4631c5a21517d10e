//! Integration tests for the weekly fixture set

use rusty_money::{Money, iso::NOK};
use testresult::TestResult;

use storewise::{
    fixtures::Fixture,
    items::LineItem,
    report::{ReportContext, ReportOptions, shopping_list_text, write_comparison},
    stores::StoreId,
};

const BREAD: &str = "7039010019804";

#[test]
fn weekly_list_recommends_rema() -> TestResult {
    let fixture = Fixture::from_set("weekly")?;
    let list = fixture.shopping_list()?;

    let result = list.allocate();

    let ranking: Vec<(&str, usize, i64)> = result
        .ranked_stores()
        .iter()
        .map(|summary| {
            (
                summary.store().as_str(),
                summary.covered_count(),
                summary.total().to_minor_units(),
            )
        })
        .collect();

    assert_eq!(
        ranking,
        vec![
            ("rema", 6, 32_730),
            ("kiwi", 6, 35_230),
            ("meny", 5, 26_750),
            ("extra", 5, 30_840),
        ]
    );

    let recommended = result.recommended_store().ok_or("no recommendation")?;

    assert_eq!(recommended.store(), &StoreId::from("rema"));
    assert!(!recommended.covers_all());

    Ok(())
}

#[test]
fn weekly_list_orphans_bread_to_kiwi() -> TestResult {
    let fixture = Fixture::from_set("weekly")?;
    let list = fixture.shopping_list()?;

    let result = list.allocate();

    assert_eq!(result.covered_items(), &[0, 2, 3, 4, 5, 6]);
    assert_eq!(result.orphaned_items().len(), 1);

    let orphan = result.orphan_for_item(1).ok_or("bread not orphaned")?;
    let fallback = orphan.fallback.as_ref().ok_or("bread has no fallback")?;

    assert_eq!(list.items().get(1).map(LineItem::key), Some(BREAD));
    assert_eq!(fallback.store().as_str(), "kiwi");
    assert_eq!(fallback.unit_price(), &Money::from_minor(3490, NOK));

    Ok(())
}

#[test]
fn weekly_list_cheapest_possible_total() -> TestResult {
    let fixture = Fixture::from_set("weekly")?;
    let list = fixture.shopping_list()?;

    let result = list.allocate();

    assert_eq!(result.cheapest_possible_total(), Money::from_minor(36_020, NOK));

    Ok(())
}

#[test]
fn removing_bread_lets_rema_cover_everything() -> TestResult {
    let fixture = Fixture::from_set("weekly")?;
    let mut list = fixture.shopping_list()?;

    list.remove(BREAD).ok_or("bread missing from list")?;

    let result = list.allocate();
    let recommended = result.recommended_store().ok_or("no recommendation")?;

    assert_eq!(recommended.store().as_str(), "rema");
    assert!(recommended.covers_all());
    assert!(result.orphaned_items().is_empty());

    Ok(())
}

#[test]
fn week_plan_aggregates_meals() -> TestResult {
    let mut fixture = Fixture::from_set("weekly")?;
    fixture.load_meals("weekly")?;

    let list = fixture.week_shopping_list()?;

    let quantities: Vec<(&str, u32)> = list
        .iter()
        .map(|item| (item.key(), item.quantity()))
        .collect();

    assert_eq!(
        quantities,
        vec![
            (BREAD, 3),
            ("7038010000737", 3),
            ("7038010055720", 3),
            ("7037203626563", 2),
            ("7020650015006", 1),
            ("7311041013489", 1),
        ]
    );
    assert_eq!(list.item_count(), 13);
    assert_eq!(list.get(BREAD).map(LineItem::quantity), Some(3));

    Ok(())
}

#[test]
fn comparison_report_names_recommended_store() -> TestResult {
    let fixture = Fixture::from_set("weekly")?;
    let list = fixture.shopping_list()?;
    let result = list.allocate();
    let names = fixture.names();

    let ctx = ReportContext {
        stores: fixture.stores(),
        names: &names,
        options: ReportOptions::default(),
    };

    let mut out = Vec::new();
    write_comparison(&mut out, &list, &result, &ctx)?;

    let report = String::from_utf8(out)?;

    assert!(report.contains("Recommended store: REMA 1000 (6/7 products)"));
    assert!(report.contains("Not available at REMA 1000:"));
    assert!(report.contains("cheapest at KIWI"));
    assert!(!report.contains("Coop Extra"));

    let text = shopping_list_text(fixture.list_name(), &list, &ctx)?;

    assert!(text.starts_with("Weekly shop\n\n"));
    assert!(text.contains("=== KIWI ==="));

    Ok(())
}
