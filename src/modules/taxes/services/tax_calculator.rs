use rust_decimal::Decimal;
use tracing::debug;

use crate::core::currency::round2;
use crate::modules::taxes::models::JurisdictionTaxTable;

/// Resolves jurisdictions to tax rates and computes tax on a taxable base
#[derive(Debug, Clone)]
pub struct TaxCalculator {
    table: JurisdictionTaxTable,
}

impl TaxCalculator {
    pub fn new(table: JurisdictionTaxTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &JurisdictionTaxTable {
        &self.table
    }

    /// Tax rate for a jurisdiction, falling back to the DEFAULT entry
    pub fn rate(&self, jurisdiction: &str) -> Decimal {
        match self.table.get(jurisdiction) {
            Some(rate) => rate,
            None => {
                debug!(
                    "Unknown jurisdiction {:?}, using default rate {}",
                    jurisdiction,
                    self.table.default_rate()
                );
                self.table.default_rate()
            }
        }
    }

    /// Whether the jurisdiction has its own entry in the table
    pub fn is_known(&self, jurisdiction: &str) -> bool {
        self.table.get(jurisdiction).is_some()
    }

    /// Tax owed on `base` at `rate`, rounded to cents
    ///
    /// A non-positive base (credit-heavy invoice) or a negative rate yields
    /// zero tax rather than a negative tax credit.
    pub fn amount(base: Decimal, rate: Decimal) -> Decimal {
        if base <= Decimal::ZERO || rate < Decimal::ZERO {
            return Decimal::ZERO;
        }

        round2(base * rate)
    }
}
