// Pricing catalog: the read-only tables the pricing engine is configured with
//
// Loaded from YAML so alternate jurisdictions, plans and promotions can be
// swapped in without touching shared state.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::discounts::{Discount, InMemoryDiscounts};
use crate::modules::financing::{
    FinancingCalculator, FinancingLimits, FinancingPlan, FINANCING_MAX_AMOUNT,
    FINANCING_MIN_AMOUNT,
};
use crate::modules::pricebook::ServiceCatalog;
use crate::modules::taxes::{JurisdictionTaxTable, TaxCalculator};

const BUILTIN_CATALOG: &str = include_str!("../../config/pricing.yaml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingCatalog {
    pub tax_rates: JurisdictionTaxTable,

    #[serde(default)]
    pub services: ServiceCatalog,

    #[serde(default)]
    pub financing: FinancingCatalog,

    #[serde(default)]
    pub promotions: Vec<Discount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancingCatalog {
    #[serde(default = "default_min_amount")]
    pub min_amount: Decimal,

    #[serde(default = "default_max_amount")]
    pub max_amount: Decimal,

    #[serde(default)]
    pub plans: Vec<FinancingPlan>,
}

fn default_min_amount() -> Decimal {
    FINANCING_MIN_AMOUNT
}

fn default_max_amount() -> Decimal {
    FINANCING_MAX_AMOUNT
}

impl Default for FinancingCatalog {
    fn default() -> Self {
        Self {
            min_amount: FINANCING_MIN_AMOUNT,
            max_amount: FINANCING_MAX_AMOUNT,
            plans: Vec::new(),
        }
    }
}

impl FinancingCatalog {
    pub fn limits(&self) -> FinancingLimits {
        FinancingLimits {
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }
}

impl PricingCatalog {
    /// The catalog shipped with the crate (`config/pricing.yaml`)
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let catalog: Self = serde_yaml::from_str(yaml)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::configuration(format!(
                "Cannot read pricing catalog {}: {}",
                path.display(),
                e
            ))
        })?;
        let catalog = Self::from_yaml_str(&contents)?;

        info!(
            "Loaded pricing catalog from {} ({} jurisdictions, {} services, {} plans, {} promotions)",
            path.display(),
            catalog.tax_rates.jurisdictions().count(),
            catalog.services.len(),
            catalog.financing.plans.len(),
            catalog.promotions.len()
        );

        Ok(catalog)
    }

    /// Cross-table validation; tax rates are already checked when parsed
    pub fn validate(&self) -> Result<()> {
        self.services.validate()?;
        self.financing.limits().validate()?;

        for plan in &self.financing.plans {
            plan.validate()?;
        }

        for promotion in &self.promotions {
            promotion
                .validate()
                .map_err(|e| AppError::configuration(format!("Invalid promotion: {}", e)))?;
        }

        Ok(())
    }

    pub fn tax_calculator(&self) -> TaxCalculator {
        TaxCalculator::new(self.tax_rates.clone())
    }

    pub fn financing_calculator(&self) -> FinancingCalculator {
        FinancingCalculator::new(self.financing.limits(), self.financing.plans.clone())
    }

    pub fn discount_lookup(&self) -> InMemoryDiscounts {
        InMemoryDiscounts::new(self.promotions.iter().cloned())
    }
}
