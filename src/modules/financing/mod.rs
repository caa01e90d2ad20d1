// Financing module

pub mod models;
pub mod services;

pub use models::{
    AmortizationResult, AmortizationRow, FinancingLimits, FinancingOption, FinancingPlan,
    FinancingQuote, FINANCING_MAX_AMOUNT, FINANCING_MIN_AMOUNT,
};
pub use services::FinancingCalculator;
