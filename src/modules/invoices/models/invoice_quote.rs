// Invoice draft (input) and priced quote (output)
//
// A draft is what the line-item editor hands over: jurisdiction, lines that
// may lean on the service catalog for price and name, and an optional coupon.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::invoice_totals::InvoiceTotals;
use super::line_item::LineItem;
use crate::modules::financing::models::FinancingQuote;

/// A line as entered in the editor; price/description default from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftLineItem {
    pub service_code: String,

    #[serde(default)]
    pub description: Option<String>,

    pub quantity: Decimal,

    #[serde(default)]
    pub unit_price: Option<Decimal>,

    #[serde(default)]
    pub taxable: Option<bool>,
}

impl DraftLineItem {
    pub fn new(service_code: impl Into<String>, quantity: Decimal) -> Self {
        Self {
            service_code: service_code.into(),
            description: None,
            quantity,
            unit_price: None,
            taxable: None,
        }
    }

    pub fn priced_at(mut self, unit_price: Decimal) -> Self {
        self.unit_price = Some(unit_price);
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn taxable(mut self, taxable: bool) -> Self {
        self.taxable = Some(taxable);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Jurisdiction code used for the tax-rate lookup
    pub jurisdiction: String,

    pub line_items: Vec<DraftLineItem>,

    #[serde(default)]
    pub coupon_code: Option<String>,
}

/// What happened to the coupon entered on the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSummary {
    pub code: String,

    pub applied: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Reason the discount was not applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A fully priced invoice draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceQuote {
    /// Canonical (uppercase) jurisdiction code as entered
    pub jurisdiction: String,

    pub tax_rate: Decimal,

    pub line_items: Vec<LineItem>,

    pub totals: InvoiceTotals,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount: Option<DiscountSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financing: Option<FinancingQuote>,
}
