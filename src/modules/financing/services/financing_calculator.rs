use rust_decimal::prelude::*;
use rust_decimal::MathematicalOps;
use tracing::{debug, warn};

use crate::core::currency::round2;
use crate::modules::financing::models::{
    AmortizationResult, AmortizationRow, FinancingLimits, FinancingOption, FinancingPlan,
    FinancingQuote,
};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Fixed-rate amortization over a plan catalog
///
/// Independent of invoicing; callers usually pass the invoice total as the
/// principal.
#[derive(Debug, Clone)]
pub struct FinancingCalculator {
    limits: FinancingLimits,
    plans: Vec<FinancingPlan>,
}

impl FinancingCalculator {
    pub fn new(limits: FinancingLimits, plans: Vec<FinancingPlan>) -> Self {
        Self { limits, plans }
    }

    pub fn limits(&self) -> &FinancingLimits {
        &self.limits
    }

    pub fn plans(&self) -> &[FinancingPlan] {
        &self.plans
    }

    /// Whether `principal` falls inside the configured financing range
    pub fn is_eligible(&self, principal: Decimal) -> bool {
        self.limits.is_eligible(principal)
    }

    /// Monthly payment, total paid and total interest for a loan
    ///
    /// A non-positive principal or term is an empty selection and yields an
    /// all-zero result. A zero (or negative) rate splits the principal into
    /// equal installments; the amortization formula is undefined there.
    pub fn monthly_payment(
        principal: Decimal,
        months: i32,
        annual_rate: Decimal,
    ) -> AmortizationResult {
        if principal <= Decimal::ZERO || months <= 0 {
            return AmortizationResult::zero();
        }

        let principal = round2(principal);
        let monthly_rate = Self::monthly_rate(annual_rate);

        if monthly_rate.is_zero() {
            return Self::equal_installments(principal, months);
        }

        match Self::amortize(principal, months, monthly_rate) {
            Some(result) => result,
            None => {
                warn!(
                    "Amortization overflowed for principal={}, months={}, annual_rate={}",
                    principal, months, annual_rate
                );
                AmortizationResult::zero()
            }
        }
    }

    /// Periodic rate; zero for non-positive rates and for rates too small to
    /// survive the division by twelve
    fn monthly_rate(annual_rate: Decimal) -> Decimal {
        if annual_rate <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        annual_rate / MONTHS_PER_YEAR
    }

    fn equal_installments(principal: Decimal, months: i32) -> AmortizationResult {
        AmortizationResult {
            monthly_payment: round2(principal / Decimal::from(months)),
            total_payment: principal,
            total_interest: Decimal::ZERO,
        }
    }

    fn amortize(principal: Decimal, months: i32, monthly_rate: Decimal) -> Option<AmortizationResult> {
        let factor = (Decimal::ONE + monthly_rate).checked_powu(u64::try_from(months).ok()?)?;
        let growth = factor - Decimal::ONE;
        if growth.is_zero() {
            // Rate vanished in the compounding precision
            return Some(Self::equal_installments(principal, months));
        }

        let numerator = principal.checked_mul(monthly_rate)?.checked_mul(factor)?;
        let monthly_payment = round2(numerator.checked_div(growth)?);

        let total_payment = round2(monthly_payment.checked_mul(Decimal::from(months))?);
        let total_interest = round2(total_payment - principal);

        Some(AmortizationResult {
            monthly_payment,
            total_payment,
            total_interest,
        })
    }

    /// Month-by-month breakdown of a loan
    ///
    /// Interest is charged on the opening balance each month. The final row
    /// pays off whatever balance remains, so the schedule always closes at
    /// exactly zero.
    pub fn schedule(principal: Decimal, months: i32, annual_rate: Decimal) -> Vec<AmortizationRow> {
        if principal <= Decimal::ZERO || months <= 0 {
            return Vec::new();
        }

        let result = Self::monthly_payment(principal, months, annual_rate);
        if result == AmortizationResult::zero() {
            // Amortization overflowed
            return Vec::new();
        }
        let monthly_rate = Self::monthly_rate(annual_rate);

        let mut rows = Vec::new();
        let mut balance = round2(principal);

        for number in 1..=months {
            let interest = round2(balance * monthly_rate);
            let principal_part = if number == months {
                balance
            } else {
                (result.monthly_payment - interest).min(balance)
            };
            balance -= principal_part;

            rows.push(AmortizationRow {
                number,
                payment: principal_part + interest,
                interest,
                principal: principal_part,
                balance,
            });
        }

        rows
    }

    /// Every catalog plan priced for `principal`; empty when ineligible
    pub fn options(&self, principal: Decimal) -> Vec<FinancingOption> {
        if !self.is_eligible(principal) {
            debug!(
                "Principal {} outside financing range [{}, {}]",
                principal, self.limits.min_amount, self.limits.max_amount
            );
            return Vec::new();
        }

        self.plans
            .iter()
            .map(|plan| FinancingOption {
                plan: plan.clone(),
                result: Self::monthly_payment(principal, plan.months, plan.annual_rate),
            })
            .collect()
    }

    pub fn quote(&self, principal: Decimal) -> FinancingQuote {
        FinancingQuote {
            principal: round2(principal),
            eligible: self.is_eligible(principal),
            options: self.options(principal),
        }
    }
}
