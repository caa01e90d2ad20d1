// InvoiceTotals: the derived money figures of an invoice
//
// Recomputed from scratch whenever items, discount or jurisdiction change.
// Never mutated in place and never persisted by this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::currency::{self, round2};
use crate::core::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line totals
    pub subtotal: Decimal,

    /// Sum of line totals flagged taxable
    pub taxable_subtotal: Decimal,

    pub discount_amount: Decimal,

    /// subtotal - discount_amount
    pub subtotal_after_discount: Decimal,

    pub tax: Decimal,

    /// subtotal_after_discount + tax
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Totals of an invoice with no lines
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            taxable_subtotal: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            subtotal_after_discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Check the pricing invariants hold for these figures
    ///
    /// The taxable share is not checked against the subtotal: a non-taxable
    /// credit line can legitimately push the subtotal below it.
    pub fn verify(&self) -> Result<()> {
        let fields = [
            ("subtotal", self.subtotal),
            ("taxable_subtotal", self.taxable_subtotal),
            ("discount_amount", self.discount_amount),
            ("subtotal_after_discount", self.subtotal_after_discount),
            ("tax", self.tax),
            ("total", self.total),
        ];
        for (name, value) in fields {
            if round2(value) != value {
                return Err(AppError::internal(format!(
                    "{} carries more than cent precision: {}",
                    name, value
                )));
            }
        }

        if self.discount_amount < Decimal::ZERO {
            return Err(AppError::internal(format!(
                "Discount amount is negative: {}",
                self.discount_amount
            )));
        }

        if self.subtotal >= Decimal::ZERO {
            if self.discount_amount > self.subtotal {
                return Err(AppError::internal(format!(
                    "Discount {} exceeds subtotal {}",
                    self.discount_amount, self.subtotal
                )));
            }
        } else if self.discount_amount != Decimal::ZERO {
            return Err(AppError::internal(
                "Discount applied to a negative subtotal",
            ));
        }

        if self.subtotal_after_discount != self.subtotal - self.discount_amount {
            return Err(AppError::internal(format!(
                "Subtotal after discount {} != {} - {}",
                self.subtotal_after_discount, self.subtotal, self.discount_amount
            )));
        }

        if self.tax < Decimal::ZERO {
            return Err(AppError::internal(format!("Tax is negative: {}", self.tax)));
        }

        if self.total != self.subtotal_after_discount + self.tax {
            return Err(AppError::internal(format!(
                "Total {} != {} + {}",
                self.total, self.subtotal_after_discount, self.tax
            )));
        }

        Ok(())
    }

    /// One-line human summary, e.g. for logs
    pub fn summary(&self) -> String {
        format!(
            "subtotal {} - discount {} + tax {} = {}",
            currency::format(self.subtotal),
            currency::format(self.discount_amount),
            currency::format(self.tax),
            currency::format(self.total)
        )
    }
}
