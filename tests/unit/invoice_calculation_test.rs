// Tests for invoice total aggregation
//
// Covers the worked pricing scenarios plus properties that must hold for
// every computed invoice:
// - 0 ≤ discount_amount ≤ subtotal
// - subtotal_after_discount == subtotal - discount_amount
// - total == round2(subtotal_after_discount + tax)
// - tax only touches the taxable share

#[path = "../helpers/mod.rs"]
mod helpers;

use fieldbill::core::currency::round2;
use fieldbill::core::FixedClock;
use fieldbill::invoices::{discount_ratio, InvoiceTotalsAggregator, LineItem};
use helpers::TestDataFactory;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn aggregator() -> InvoiceTotalsAggregator<FixedClock> {
    InvoiceTotalsAggregator::with_clock(TestDataFactory::clock())
}

fn items_strategy() -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(
        (1i64..50i64, 0i64..500_000i64, any::<bool>()).prop_map(|(qty, cents, taxable)| {
            TestDataFactory::item(Decimal::from(qty), TestDataFactory::cents(cents), taxable)
        }),
        1..10,
    )
}

#[test]
fn test_scenario_no_discount() {
    let items = vec![TestDataFactory::taxable(dec!(1000))];
    let totals = aggregator().compute_totals(&items, dec!(0.0825), None);

    assert_eq!(totals.subtotal, dec!(1000.00));
    assert_eq!(totals.tax, dec!(82.50));
    assert_eq!(totals.total, dec!(1082.50));
}

#[test]
fn test_scenario_percentage_discount_mixed_taxability() {
    let items = vec![
        TestDataFactory::taxable(dec!(100)),
        TestDataFactory::non_taxable(dec!(50)),
    ];
    let discount = TestDataFactory::percentage(dec!(10));
    let totals = aggregator().compute_totals(&items, dec!(0.0825), Some(&discount));

    assert_eq!(totals.subtotal, dec!(150.00));
    assert_eq!(totals.taxable_subtotal, dec!(100.00));
    assert_eq!(totals.discount_amount, dec!(15.00));
    assert_eq!(totals.subtotal_after_discount, dec!(135.00));

    let ratio = discount_ratio(totals.subtotal, totals.subtotal_after_discount);
    assert_eq!(ratio, dec!(0.9));
    assert_eq!(totals.taxable_subtotal * ratio, dec!(90.00));

    assert_eq!(totals.tax, dec!(7.43));
    assert_eq!(totals.total, dec!(142.43));
}

#[test]
fn test_scenario_fixed_discount_exceeding_subtotal() {
    let items = vec![TestDataFactory::taxable(dec!(40))];
    let discount = TestDataFactory::fixed(dec!(50));
    let totals = aggregator().compute_totals(&items, dec!(0.0825), Some(&discount));

    assert_eq!(totals.discount_amount, dec!(40.00));
    assert_eq!(totals.subtotal_after_discount, dec!(0.00));
    assert_eq!(totals.tax, dec!(0));
    assert_eq!(totals.total, dec!(0));
}

#[test]
fn test_unmet_minimum_purchase_ignores_discount() {
    let items = vec![TestDataFactory::taxable(dec!(80))];
    let discount = TestDataFactory::fixed(dec!(20)).with_min_purchase(dec!(100));
    let totals = aggregator().compute_totals(&items, dec!(0.0825), Some(&discount));

    assert_eq!(totals.discount_amount, dec!(0));
    assert_eq!(totals.subtotal_after_discount, totals.subtotal);
    assert_eq!(totals.tax, dec!(6.60));
    assert_eq!(totals.total, dec!(86.60));
}

#[test]
fn test_non_taxable_items_carry_no_tax() {
    let items = vec![
        TestDataFactory::non_taxable(dec!(300)),
        TestDataFactory::non_taxable(dec!(45.50)),
    ];
    let totals = aggregator().compute_totals(&items, dec!(0.0825), None);

    assert_eq!(totals.taxable_subtotal, dec!(0));
    assert_eq!(totals.tax, dec!(0));
    assert_eq!(totals.total, dec!(345.50));
}

#[test]
fn test_empty_invoice() {
    let totals = aggregator().compute_totals(&[], dec!(0.0825), None);
    assert_eq!(totals, fieldbill::invoices::InvoiceTotals::zero());
}

#[test]
fn test_compute_totals_is_idempotent() {
    let items = vec![
        TestDataFactory::item(dec!(3), dec!(24.99), true),
        TestDataFactory::item(dec!(1.5), dec!(95), false),
    ];
    let discount = TestDataFactory::percentage(dec!(15)).with_max_discount(dec!(30));
    let aggregator = aggregator();

    let first = aggregator.compute_totals(&items, dec!(0.0725), Some(&discount));
    let second = aggregator.compute_totals(&items, dec!(0.0725), Some(&discount));

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

proptest! {
    #[test]
    fn test_totals_invariants_hold(
        items in items_strategy(),
        percent in 0u32..=100u32,
        rate_bps in 0u32..2_000u32,
    ) {
        let rate = Decimal::new(rate_bps as i64, 4);
        let discount = TestDataFactory::percentage(Decimal::from(percent));
        let totals = aggregator().compute_totals(&items, rate, Some(&discount));

        prop_assert!(totals.discount_amount >= Decimal::ZERO);
        prop_assert!(totals.discount_amount <= totals.subtotal);
        prop_assert!(totals.taxable_subtotal <= totals.subtotal);
        prop_assert_eq!(totals.subtotal_after_discount, totals.subtotal - totals.discount_amount);
        prop_assert_eq!(totals.total, round2(totals.subtotal_after_discount + totals.tax));
        prop_assert!(totals.verify().is_ok());
    }

    #[test]
    fn test_tax_bounded_by_taxable_share(
        items in items_strategy(),
        value_cents in 0i64..1_000_000i64,
        rate_bps in 0u32..2_000u32,
    ) {
        let rate = Decimal::new(rate_bps as i64, 4);
        let discount = TestDataFactory::fixed(TestDataFactory::cents(value_cents));
        let totals = aggregator().compute_totals(&items, rate, Some(&discount));

        // Tax can never exceed the rate applied to the undiscounted taxable share
        let ceiling = round2(totals.taxable_subtotal * rate);
        prop_assert!(totals.tax <= ceiling, "tax {} above ceiling {}", totals.tax, ceiling);
        prop_assert!(totals.tax >= Decimal::ZERO);
    }

    #[test]
    fn test_invalid_discount_equals_no_discount(
        items in items_strategy(),
        rate_bps in 0u32..2_000u32,
    ) {
        let rate = Decimal::new(rate_bps as i64, 4);
        let unreachable = TestDataFactory::fixed(dec!(10)).with_min_purchase(dec!(100000000));

        let with_invalid = aggregator().compute_totals(&items, rate, Some(&unreachable));
        let without = aggregator().compute_totals(&items, rate, None);

        prop_assert_eq!(with_invalid, without);
    }
}
