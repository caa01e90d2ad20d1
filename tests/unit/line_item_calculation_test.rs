// Property-based tests for line totals and subtotals
//
// - line_total == round2(quantity × unit_price)
// - subtotal == round2(Σ line_total)
// - taxable_subtotal ≤ subtotal for non-negative lines

#[path = "../helpers/mod.rs"]
mod helpers;

use fieldbill::core::currency::round2;
use fieldbill::invoices::{LineItem, LineItemCalculator};
use helpers::TestDataFactory;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn line_strategy() -> impl Strategy<Value = LineItem> {
    (1u32..10_000u32, 0i64..5_000_000i64, any::<bool>()).prop_map(
        |(quantity_hundredths, price_cents, taxable)| {
            TestDataFactory::item(
                Decimal::new(quantity_hundredths as i64, 2),
                TestDataFactory::cents(price_cents),
                taxable,
            )
        },
    )
}

proptest! {
    #[test]
    fn test_line_total_is_rounded_product(
        quantity_thousandths in 0u32..1_000_000u32,
        price_cents in 0i64..10_000_000i64,
    ) {
        let quantity = Decimal::new(quantity_thousandths as i64, 3);
        let unit_price = TestDataFactory::cents(price_cents);

        let total = LineItemCalculator::line_total(quantity, unit_price);

        prop_assert_eq!(total, round2(quantity * unit_price));
        prop_assert!(total.scale() <= 2, "line total has scale {}", total.scale());
        prop_assert!(total >= Decimal::ZERO);
    }

    #[test]
    fn test_subtotal_is_rounded_sum_of_line_totals(
        items in prop::collection::vec(line_strategy(), 0..20)
    ) {
        let expected: Decimal = items.iter().map(LineItem::line_total).sum();
        prop_assert_eq!(LineItemCalculator::subtotal(&items), round2(expected));
    }

    #[test]
    fn test_taxable_subtotal_never_exceeds_subtotal(
        items in prop::collection::vec(line_strategy(), 0..20)
    ) {
        let subtotal = LineItemCalculator::subtotal(&items);
        let taxable = LineItemCalculator::taxable_subtotal(&items);

        prop_assert!(taxable <= subtotal, "taxable {} > subtotal {}", taxable, subtotal);
        prop_assert!(taxable >= Decimal::ZERO);
    }

    #[test]
    fn test_subtotal_is_order_independent(
        mut items in prop::collection::vec(line_strategy(), 0..20)
    ) {
        let before = LineItemCalculator::subtotal(&items);
        items.reverse();
        prop_assert_eq!(before, LineItemCalculator::subtotal(&items));
    }
}

#[test]
fn test_specific_line_totals() {
    assert_eq!(LineItemCalculator::line_total(dec!(1), dec!(1000)), dec!(1000.00));
    assert_eq!(LineItemCalculator::line_total(dec!(2.5), dec!(95)), dec!(237.50));
    assert_eq!(LineItemCalculator::line_total(dec!(3), dec!(0.335)), dec!(1.01));
}

#[test]
fn test_only_taxable_lines_count_toward_taxable_subtotal() {
    let items = vec![
        TestDataFactory::taxable(dec!(100)),
        TestDataFactory::non_taxable(dec!(50)),
    ];

    assert_eq!(LineItemCalculator::subtotal(&items), dec!(150.00));
    assert_eq!(LineItemCalculator::taxable_subtotal(&items), dec!(100.00));
}
