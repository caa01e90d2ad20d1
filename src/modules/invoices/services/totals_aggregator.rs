use rust_decimal::Decimal;
use tracing::debug;

use crate::core::currency::round2;
use crate::core::{Clock, SystemClock};
use crate::modules::discounts::models::{Discount, DiscountValidation};
use crate::modules::discounts::services::DiscountEngine;
use crate::modules::invoices::models::{InvoiceTotals, LineItem};
use crate::modules::invoices::services::LineItemCalculator;
use crate::modules::taxes::services::TaxCalculator;

/// Produces invoice totals from line items, a tax rate and an optional discount
///
/// A discount is spread over taxable and non-taxable lines alike: the taxable
/// base shrinks by the same ratio as the whole invoice. Targeting a discount
/// at specific lines would be a different pricing policy.
#[derive(Debug, Clone, Default)]
pub struct InvoiceTotalsAggregator<C = SystemClock> {
    discount_engine: DiscountEngine<C>,
}

impl InvoiceTotalsAggregator<SystemClock> {
    pub fn new() -> Self {
        Self {
            discount_engine: DiscountEngine::new(),
        }
    }
}

impl<C: Clock> InvoiceTotalsAggregator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            discount_engine: DiscountEngine::with_clock(clock),
        }
    }

    pub fn discount_engine(&self) -> &DiscountEngine<C> {
        &self.discount_engine
    }

    /// Compute totals; an absent or invalid discount counts as no discount
    pub fn compute_totals(
        &self,
        items: &[LineItem],
        tax_rate: Decimal,
        discount: Option<&Discount>,
    ) -> InvoiceTotals {
        let subtotal = LineItemCalculator::subtotal(items);
        let validation = discount.map(|d| self.discount_engine.validate(subtotal, d));
        Self::totals_with_discount(items, tax_rate, validation.as_ref())
    }

    /// Compute totals from an already validated discount
    pub fn totals_with_discount(
        items: &[LineItem],
        tax_rate: Decimal,
        validation: Option<&DiscountValidation>,
    ) -> InvoiceTotals {
        let subtotal = LineItemCalculator::subtotal(items);
        let taxable_subtotal = LineItemCalculator::taxable_subtotal(items);

        let (discount_amount, subtotal_after_discount) = match validation {
            Some(DiscountValidation::Valid {
                discount_amount,
                discounted_total,
            }) => (*discount_amount, *discounted_total),
            _ => (Decimal::ZERO, subtotal),
        };

        let ratio = discount_ratio(subtotal, subtotal_after_discount);
        // Intermediate value, rounded only once as tax
        let taxable_after_discount = taxable_subtotal * ratio;
        let tax = TaxCalculator::amount(taxable_after_discount, tax_rate);
        let total = round2(subtotal_after_discount + tax);

        debug!(
            "Totals: subtotal={}, taxable={}, discount={}, ratio={}, taxable_after_discount={}, tax={}, total={}",
            subtotal, taxable_subtotal, discount_amount, ratio, taxable_after_discount, tax, total
        );

        InvoiceTotals {
            subtotal,
            taxable_subtotal,
            discount_amount,
            subtotal_after_discount,
            tax,
            total,
        }
    }
}

/// Fraction of the subtotal left after the discount (1 when subtotal ≤ 0)
pub fn discount_ratio(subtotal: Decimal, subtotal_after_discount: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO {
        subtotal_after_discount / subtotal
    } else {
        Decimal::ONE
    }
}
