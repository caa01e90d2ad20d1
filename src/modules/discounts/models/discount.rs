// Discount value object and coupon code format gate
//
// Discounts come from an external lookup. This module only describes them;
// whether one applies to a given subtotal is decided by the DiscountEngine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

const COUPON_MIN_LEN: usize = 4;
const COUPON_MAX_LEN: usize = 20;

/// Returns true when `code` matches `^[A-Z0-9]{4,20}$` case-insensitively
///
/// This is a format check only; it says nothing about whether the code exists.
pub fn is_valid_coupon_format(code: &str) -> bool {
    (COUPON_MIN_LEN..=COUPON_MAX_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Canonical (uppercase) coupon code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CouponCode(String);

impl CouponCode {
    /// Trim, uppercase and format-check a user-entered code
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !is_valid_coupon_format(trimmed) {
            return Err(AppError::validation(format!(
                "Coupon code must be {}-{} letters or digits, got {:?}",
                COUPON_MIN_LEN, COUPON_MAX_LEN, input
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CouponCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CouponCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CouponCode {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<CouponCode> for String {
    fn from(code: CouponCode) -> Self {
        code.0
    }
}

/// How a discount's `value` is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `value` is a percentage of the subtotal (0-100)
    Percentage,
    /// `value` is a monetary amount
    Fixed,
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

/// A discount as returned by the discount lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub code: CouponCode,

    #[serde(rename = "type")]
    pub discount_type: DiscountType,

    pub value: Decimal,

    #[serde(default)]
    pub description: String,

    /// Subtotal required before the discount applies
    #[serde(default)]
    pub min_purchase: Option<Decimal>,

    /// Upper bound on the computed discount amount
    #[serde(default)]
    pub max_discount: Option<Decimal>,

    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Discount {
    pub fn new(code: CouponCode, discount_type: DiscountType, value: Decimal) -> Self {
        Self {
            code,
            discount_type,
            value,
            description: String::new(),
            min_purchase: None,
            max_discount: None,
            expires_at: None,
        }
    }

    pub fn percentage(code: CouponCode, percent: Decimal) -> Self {
        Self::new(code, DiscountType::Percentage, percent)
    }

    pub fn fixed(code: CouponCode, amount: Decimal) -> Self {
        Self::new(code, DiscountType::Fixed, amount)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_min_purchase(mut self, min_purchase: Decimal) -> Self {
        self.min_purchase = Some(min_purchase);
        self
    }

    pub fn with_max_discount(mut self, max_discount: Decimal) -> Self {
        self.max_discount = Some(max_discount);
        self
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Checks the discount definition itself (not its applicability)
    pub fn validate(&self) -> Result<()> {
        match self.discount_type {
            DiscountType::Percentage => {
                if self.value < Decimal::ZERO || self.value > Decimal::ONE_HUNDRED {
                    return Err(AppError::validation(format!(
                        "Percentage discount {} must be between 0 and 100, got {}",
                        self.code, self.value
                    )));
                }
            }
            DiscountType::Fixed => {
                if self.value < Decimal::ZERO {
                    return Err(AppError::validation(format!(
                        "Fixed discount {} cannot be negative, got {}",
                        self.code, self.value
                    )));
                }
            }
        }

        if self.min_purchase.is_some_and(|m| m < Decimal::ZERO) {
            return Err(AppError::validation(format!(
                "Minimum purchase for {} cannot be negative",
                self.code
            )));
        }

        if self.max_discount.is_some_and(|m| m < Decimal::ZERO) {
            return Err(AppError::validation(format!(
                "Maximum discount for {} cannot be negative",
                self.code
            )));
        }

        Ok(())
    }
}
