mod amortization;
mod financing_plan;

pub use amortization::{AmortizationResult, AmortizationRow, FinancingOption, FinancingQuote};
pub use financing_plan::{
    FinancingLimits, FinancingPlan, FINANCING_MAX_AMOUNT, FINANCING_MIN_AMOUNT,
};
