use rust_decimal::Decimal;
use tracing::debug;

use crate::core::currency::round2;
use crate::core::{Clock, SystemClock};
use crate::modules::discounts::models::{
    Discount, DiscountRejection, DiscountType, DiscountValidation,
};

/// Decides whether a discount applies to a subtotal and how much it takes off
///
/// Generic over the clock so expiration checks are reproducible.
#[derive(Debug, Clone, Default)]
pub struct DiscountEngine<C = SystemClock> {
    clock: C,
}

impl DiscountEngine<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> DiscountEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validate `discount` against `subtotal`
    ///
    /// Order of checks: minimum purchase, expiration, raw amount, cap,
    /// subtotal floor, rounding. The floor runs after the cap so the
    /// discount never exceeds the subtotal whatever the cap says.
    pub fn validate(&self, subtotal: Decimal, discount: &Discount) -> DiscountValidation {
        if let Some(minimum) = discount.min_purchase {
            if subtotal < minimum {
                debug!(
                    "Discount {} needs minimum purchase {}, subtotal is {}",
                    discount.code, minimum, subtotal
                );
                return DiscountValidation::Invalid(DiscountRejection::BelowMinimumPurchase {
                    minimum,
                    subtotal,
                });
            }
        }

        if let Some(expires_at) = discount.expires_at {
            if expires_at < self.clock.now() {
                debug!("Discount {} expired at {}", discount.code, expires_at);
                return DiscountValidation::Invalid(DiscountRejection::Expired { expires_at });
            }
        }

        let raw_amount = match discount.discount_type {
            DiscountType::Percentage => round2(percent_of(subtotal, discount.value)),
            DiscountType::Fixed => discount.value,
        };

        let capped = match discount.max_discount {
            Some(cap) => raw_amount.min(cap),
            None => raw_amount,
        };

        // Never below zero, never above the subtotal
        let discount_amount = round2(capped.min(subtotal).max(Decimal::ZERO));
        let discounted_total = round2(subtotal - discount_amount);

        debug!(
            "Discount {} applied: raw={}, amount={}, discounted_total={}",
            discount.code, raw_amount, discount_amount, discounted_total
        );

        DiscountValidation::Valid {
            discount_amount,
            discounted_total,
        }
    }
}

/// `percent`% of `amount` without overflowing on large subtotals
fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount
        .checked_mul(percent)
        .map(|scaled| scaled / Decimal::ONE_HUNDRED)
        .or_else(|| (amount / Decimal::ONE_HUNDRED).checked_mul(percent))
        // Only reachable for percentages far above 100; the subtotal floor applies
        .unwrap_or(if percent.is_sign_negative() { Decimal::ZERO } else { amount })
}
