use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::currency;

/// Why a discount was not applied
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountRejection {
    #[error(
        "Minimum purchase of {} required for this discount; add {} more",
        money(.minimum),
        shortfall(.minimum, .subtotal)
    )]
    BelowMinimumPurchase { minimum: Decimal, subtotal: Decimal },

    #[error("This discount code expired on {}", .expires_at.format("%Y-%m-%d"))]
    Expired { expires_at: DateTime<Utc> },

    #[error("Discount code {code} is not recognized")]
    UnknownCode { code: String },
}

fn money(amount: &Decimal) -> String {
    currency::format(*amount)
}

fn shortfall(minimum: &Decimal, subtotal: &Decimal) -> String {
    currency::format(*minimum - *subtotal)
}

/// Result of checking one discount against one subtotal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountValidation {
    Valid {
        discount_amount: Decimal,
        discounted_total: Decimal,
    },
    Invalid(DiscountRejection),
}

impl DiscountValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, DiscountValidation::Valid { .. })
    }

    /// User-facing explanation when the discount was rejected
    pub fn message(&self) -> Option<String> {
        match self {
            DiscountValidation::Valid { .. } => None,
            DiscountValidation::Invalid(rejection) => Some(rejection.to_string()),
        }
    }

    /// Amount to deduct; zero when the discount is invalid
    pub fn discount_amount(&self) -> Decimal {
        match self {
            DiscountValidation::Valid {
                discount_amount, ..
            } => *discount_amount,
            DiscountValidation::Invalid(_) => Decimal::ZERO,
        }
    }

    pub fn rejection(&self) -> Option<&DiscountRejection> {
        match self {
            DiscountValidation::Valid { .. } => None,
            DiscountValidation::Invalid(rejection) => Some(rejection),
        }
    }
}
