use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Catalog entry for a billable service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePrice {
    /// Display name, used as the default line description
    pub name: String,

    /// Default price per unit
    pub base_price: Decimal,

    /// Unit label ("visit", "hour", "each"...)
    pub unit: String,

    /// Whether the service is taxable unless the editor says otherwise
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn default_taxable() -> bool {
    true
}

impl ServicePrice {
    pub fn new(name: impl Into<String>, base_price: Decimal, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_price,
            unit: unit.into(),
            taxable: true,
        }
    }

    pub fn non_taxable(mut self) -> Self {
        self.taxable = false;
        self
    }

    pub fn validate(&self, code: &str) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::configuration(format!(
                "Service {} must have a name",
                code
            )));
        }

        if self.base_price < Decimal::ZERO {
            return Err(AppError::configuration(format!(
                "Service {} cannot have a negative price, got {}",
                code, self.base_price
            )));
        }

        Ok(())
    }
}
