use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::config::PricingCatalog;
use crate::core::{AppError, Clock, Result, SystemClock};
use crate::modules::discounts::models::{CouponCode, DiscountRejection, DiscountValidation};
use crate::modules::discounts::services::{DiscountLookup, InMemoryDiscounts};
use crate::modules::financing::FinancingCalculator;
use crate::modules::invoices::models::{
    DiscountSummary, DraftLineItem, InvoiceDraft, InvoiceQuote, LineItem,
};
use crate::modules::invoices::services::{InvoiceTotalsAggregator, LineItemCalculator};
use crate::modules::pricebook::ServiceCatalog;
use crate::modules::taxes::TaxCalculator;

/// Prices an invoice draft end to end
///
/// Resolves lines against the service catalog, the jurisdiction against the
/// tax table and the coupon against the discount lookup, then computes
/// totals and financing options.
pub struct QuoteService<C = SystemClock, L = InMemoryDiscounts> {
    services: ServiceCatalog,
    tax_calculator: TaxCalculator,
    financing: FinancingCalculator,
    discounts: L,
    aggregator: InvoiceTotalsAggregator<C>,
}

impl QuoteService<SystemClock, InMemoryDiscounts> {
    /// Service backed by the catalog's own promotions and the system clock
    pub fn from_catalog(catalog: &PricingCatalog) -> Self {
        Self::new(catalog, catalog.discount_lookup(), SystemClock)
    }
}

impl<C: Clock, L: DiscountLookup> QuoteService<C, L> {
    pub fn new(catalog: &PricingCatalog, discounts: L, clock: C) -> Self {
        Self {
            services: catalog.services.clone(),
            tax_calculator: catalog.tax_calculator(),
            financing: catalog.financing_calculator(),
            discounts,
            aggregator: InvoiceTotalsAggregator::with_clock(clock),
        }
    }

    pub fn quote(&self, draft: &InvoiceDraft) -> Result<InvoiceQuote> {
        let line_items = self.resolve_line_items(&draft.line_items)?;

        let jurisdiction = draft.jurisdiction.to_uppercase();
        if !self.tax_calculator.is_known(&jurisdiction) {
            warn!(
                "Jurisdiction {:?} not in tax table, falling back to DEFAULT",
                draft.jurisdiction
            );
        }
        let tax_rate = self.tax_calculator.rate(&jurisdiction);

        let subtotal = LineItemCalculator::subtotal(&line_items);
        let (discount, validation) = match draft.coupon_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => {
                let (summary, validation) = self.apply_coupon(code, subtotal);
                (Some(summary), Some(validation))
            }
            _ => (None, None),
        };

        let totals = InvoiceTotalsAggregator::<C>::totals_with_discount(
            &line_items,
            tax_rate,
            validation.as_ref(),
        );

        if let Err(e) = totals.verify() {
            error!("Pricing invariant broken for draft: {}", e);
            return Err(e);
        }

        let financing = if self.financing.plans().is_empty() {
            None
        } else {
            Some(self.financing.quote(totals.total))
        };

        info!(
            "Quoted {} line items in {} at rate {}: {}",
            line_items.len(),
            jurisdiction,
            tax_rate,
            totals.summary()
        );

        Ok(InvoiceQuote {
            jurisdiction,
            tax_rate,
            line_items,
            totals,
            discount,
            financing,
        })
    }

    /// Fill missing prices and descriptions from the service catalog
    ///
    /// Rejects drafts whose amounts cannot be totalled and taxed inside
    /// `Decimal` range.
    pub fn resolve_line_items(&self, lines: &[DraftLineItem]) -> Result<Vec<LineItem>> {
        let items = lines
            .iter()
            .map(|line| {
                let service = self.services.get(&line.service_code);

                let unit_price = line
                    .unit_price
                    .or_else(|| service.map(|s| s.base_price))
                    .ok_or_else(|| {
                        AppError::validation(format!(
                            "Unknown service code {} and no unit price given",
                            line.service_code
                        ))
                    })?;

                let description = line
                    .description
                    .clone()
                    .or_else(|| service.map(|s| s.name.clone()))
                    .unwrap_or_else(|| line.service_code.clone());

                let taxable = line
                    .taxable
                    .or_else(|| service.map(|s| s.taxable))
                    .unwrap_or(true);

                if LineItemCalculator::checked_line_total(line.quantity, unit_price).is_none() {
                    return Err(AppError::validation(format!(
                        "Line {}: quantity {} × unit price {} is out of range",
                        line.service_code, line.quantity, unit_price
                    )));
                }

                Ok(LineItem::new(
                    line.service_code.to_uppercase(),
                    description,
                    line.quantity,
                    unit_price,
                    taxable,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::ensure_in_range(&items)?;
        Ok(items)
    }

    fn ensure_in_range(items: &[LineItem]) -> Result<()> {
        let out_of_range = || AppError::validation("Invoice amounts are out of range");

        let subtotal = LineItemCalculator::checked_subtotal(items).ok_or_else(out_of_range)?;
        let taxable = LineItemCalculator::checked_subtotal(items.iter().filter(|i| i.taxable))
            .ok_or_else(out_of_range)?;

        // Tax on the taxable share is added on top of the discounted subtotal
        subtotal
            .abs()
            .checked_add(taxable.abs())
            .map(|_| ())
            .ok_or_else(out_of_range)
    }

    fn apply_coupon(
        &self,
        code: &str,
        subtotal: Decimal,
    ) -> (DiscountSummary, DiscountValidation) {
        let found = CouponCode::parse(code)
            .ok()
            .and_then(|canonical| self.discounts.find(&canonical));

        let Some(discount) = found else {
            warn!("Coupon code {:?} not recognized", code);
            let validation = DiscountValidation::Invalid(DiscountRejection::UnknownCode {
                code: code.to_uppercase(),
            });
            let summary = DiscountSummary {
                code: code.to_uppercase(),
                applied: false,
                description: None,
                message: validation.message(),
            };
            return (summary, validation);
        };

        let validation = self.aggregator.discount_engine().validate(subtotal, &discount);
        if let Some(message) = validation.message() {
            warn!("Discount {} not applied: {}", discount.code, message);
        }

        let summary = DiscountSummary {
            code: discount.code.to_string(),
            applied: validation.is_valid(),
            description: Some(discount.description.clone()).filter(|d| !d.is_empty()),
            message: validation.message(),
        };

        (summary, validation)
    }
}
