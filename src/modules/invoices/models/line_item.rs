// LineItem model
//
// A line item is one billable entry on an invoice: a service, how much of it,
// at what unit price, and whether it is subject to sales tax. Quantity and
// price may be edited while drafting; totals are recomputed from scratch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::services::LineItemCalculator;

const MAX_DESCRIPTION_LEN: usize = 255;

/// Represents a single line item in an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique identifier for the line item
    #[serde(default = "new_line_item_id")]
    pub id: String,

    /// Code of the service in the price catalog
    pub service_code: String,

    /// Free-text description shown on the invoice
    #[serde(default)]
    pub description: String,

    /// Quantity (hours, units, visits...)
    pub quantity: Decimal,

    /// Price per unit
    pub unit_price: Decimal,

    /// Whether sales tax applies to this line
    #[serde(default = "default_taxable")]
    pub taxable: bool,
}

fn new_line_item_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_taxable() -> bool {
    true
}

impl LineItem {
    /// Create a new line item
    ///
    /// No validation happens here: negative quantities or prices are allowed
    /// and represent credit lines. Use [`LineItem::validate`] for form input.
    pub fn new(
        service_code: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        taxable: bool,
    ) -> Self {
        Self {
            id: new_line_item_id(),
            service_code: service_code.into(),
            description: description.into(),
            quantity,
            unit_price,
            taxable,
        }
    }

    /// quantity × unit_price, rounded to cents
    pub fn line_total(&self) -> Decimal {
        LineItemCalculator::line_total(self.quantity, self.unit_price)
    }

    /// Field validation for user-entered line items
    pub fn validate(&self) -> Result<()> {
        Self::validate_description(&self.description)?;
        Self::validate_quantity(self.quantity)?;
        Self::validate_unit_price(self.unit_price)?;
        Ok(())
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().is_empty() {
            return Err(AppError::validation("Line item description cannot be empty"));
        }

        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AppError::validation(format!(
                "Line item description cannot exceed {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }

        Ok(())
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }
}
