use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::financing_plan::FinancingPlan;

/// Equal monthly payment for a financed principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

impl AmortizationResult {
    /// Result for an empty selection (no principal or no term)
    pub fn zero() -> Self {
        Self {
            monthly_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        }
    }
}

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number
    pub number: i32,
    pub payment: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
    /// Balance remaining after this payment
    pub balance: Decimal,
}

/// A catalog plan priced for a principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingOption {
    pub plan: FinancingPlan,
    pub result: AmortizationResult,
}

/// Financing offered on an invoice total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingQuote {
    pub principal: Decimal,
    pub eligible: bool,
    pub options: Vec<FinancingOption>,
}
