use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Smallest principal eligible for financing (500.00)
pub const FINANCING_MIN_AMOUNT: Decimal = Decimal::from_parts(50_000, 0, 0, false, 2);

/// Largest principal eligible for financing (50,000.00)
pub const FINANCING_MAX_AMOUNT: Decimal = Decimal::from_parts(5_000_000, 0, 0, false, 2);

/// One entry of the financing plan catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingPlan {
    /// Term length in months
    pub months: i32,

    /// Nominal annual rate as a fraction (0.0599 = 5.99% APR); 0 for promotional plans
    pub annual_rate: Decimal,

    pub label: String,
}

impl FinancingPlan {
    pub fn new(months: i32, annual_rate: Decimal, label: impl Into<String>) -> Self {
        Self {
            months,
            annual_rate,
            label: label.into(),
        }
    }

    pub fn is_promotional(&self) -> bool {
        self.annual_rate.is_zero()
    }

    pub fn validate(&self) -> Result<()> {
        if self.months <= 0 {
            return Err(AppError::configuration(format!(
                "Financing plan {:?} must have a positive term, got {} months",
                self.label, self.months
            )));
        }

        if self.annual_rate < Decimal::ZERO {
            return Err(AppError::configuration(format!(
                "Financing plan {:?} cannot have a negative rate, got {}",
                self.label, self.annual_rate
            )));
        }

        Ok(())
    }
}

/// Principal range eligible for financing, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingLimits {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

impl FinancingLimits {
    pub fn new(min_amount: Decimal, max_amount: Decimal) -> Result<Self> {
        let limits = Self {
            min_amount,
            max_amount,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn is_eligible(&self, principal: Decimal) -> bool {
        principal >= self.min_amount && principal <= self.max_amount
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_amount < Decimal::ZERO {
            return Err(AppError::configuration(
                "Financing minimum amount cannot be negative",
            ));
        }

        if self.min_amount > self.max_amount {
            return Err(AppError::configuration(format!(
                "Financing minimum {} exceeds maximum {}",
                self.min_amount, self.max_amount
            )));
        }

        Ok(())
    }
}

impl Default for FinancingLimits {
    fn default() -> Self {
        Self {
            min_amount: FINANCING_MIN_AMOUNT,
            max_amount: FINANCING_MAX_AMOUNT,
        }
    }
}
