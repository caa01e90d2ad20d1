use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::invoices::models::LineItem;
use crate::modules::pricebook::models::ServicePrice;

/// Service code → price entry; codes are case-insensitive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, ServicePrice>", into = "BTreeMap<String, ServicePrice>")]
pub struct ServiceCatalog {
    services: BTreeMap<String, ServicePrice>,
}

impl ServiceCatalog {
    pub fn new(entries: impl IntoIterator<Item = (String, ServicePrice)>) -> Self {
        let services = entries
            .into_iter()
            .map(|(code, price)| (code.to_uppercase(), price))
            .collect();
        Self { services }
    }

    pub fn get(&self, code: &str) -> Option<&ServicePrice> {
        self.services.get(&code.to_uppercase())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// A line item pre-populated with the catalog name and price
    pub fn line_item(&self, code: &str, quantity: Decimal) -> Option<LineItem> {
        self.get(code).map(|service| {
            LineItem::new(
                code.to_uppercase(),
                service.name.clone(),
                quantity,
                service.base_price,
                service.taxable,
            )
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (code, service) in &self.services {
            service.validate(code)?;
        }
        Ok(())
    }
}

impl From<BTreeMap<String, ServicePrice>> for ServiceCatalog {
    fn from(map: BTreeMap<String, ServicePrice>) -> Self {
        Self::new(map)
    }
}

impl From<ServiceCatalog> for BTreeMap<String, ServicePrice> {
    fn from(catalog: ServiceCatalog) -> Self {
        catalog.services
    }
}
