use rust_decimal::Decimal;

use crate::core::currency::round2;
use crate::modules::invoices::models::LineItem;

/// Per-line and aggregate subtotals
///
/// Negative quantities or prices are not rejected; they flow through as
/// credit lines. The plain variants expect amounts inside `Decimal` range;
/// untrusted input goes through the `checked_` variants first.
pub struct LineItemCalculator;

impl LineItemCalculator {
    /// quantity × unit_price, rounded to cents
    pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
        round2(quantity * unit_price)
    }

    /// Sum of every line total, taxable or not
    pub fn subtotal<'a, I>(items: I) -> Decimal
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        round2(items.into_iter().map(LineItem::line_total).sum())
    }

    /// Sum of line totals for lines flagged taxable
    pub fn taxable_subtotal<'a, I>(items: I) -> Decimal
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        Self::subtotal(items.into_iter().filter(|item| item.taxable))
    }

    /// `None` when quantity × unit_price leaves `Decimal` range
    pub fn checked_line_total(quantity: Decimal, unit_price: Decimal) -> Option<Decimal> {
        quantity.checked_mul(unit_price).map(round2)
    }

    /// `None` when any line total or running sum leaves `Decimal` range
    pub fn checked_subtotal<'a, I>(items: I) -> Option<Decimal>
    where
        I: IntoIterator<Item = &'a LineItem>,
    {
        items
            .into_iter()
            .try_fold(Decimal::ZERO, |acc, item| {
                acc.checked_add(Self::checked_line_total(item.quantity, item.unit_price)?)
            })
            .map(round2)
    }
}
