// Integration tests for the full quote flow
//
// Draft → catalog resolution → jurisdiction lookup → coupon lookup →
// discount validation → totals → financing options.

#[path = "../helpers/mod.rs"]
mod helpers;

use chrono::Duration;
use fieldbill::config::PricingCatalog;
use fieldbill::core::{AppError, FixedClock};
use fieldbill::discounts::InMemoryDiscounts;
use fieldbill::invoices::{DraftLineItem, InvoiceDraft, QuoteService};
use helpers::TestDataFactory;
use rust_decimal_macros::dec;

fn builtin_service() -> QuoteService<FixedClock> {
    let catalog = PricingCatalog::builtin().expect("built-in catalog must load");
    QuoteService::new(&catalog, catalog.discount_lookup(), TestDataFactory::clock())
}

#[test]
fn test_quote_with_capped_promotion_and_financing() {
    let draft = InvoiceDraft {
        jurisdiction: "ca".to_string(),
        line_items: vec![
            DraftLineItem::new("WATER-HEATER", dec!(1)),
            DraftLineItem::new("LABOR", dec!(3)),
        ],
        coupon_code: Some("welcome10".to_string()),
    };

    let quote = builtin_service().quote(&draft).unwrap();

    assert_eq!(quote.jurisdiction, "CA");
    assert_eq!(quote.tax_rate, dec!(0.0725));
    assert_eq!(quote.totals.subtotal, dec!(1735.00));
    assert_eq!(quote.totals.taxable_subtotal, dec!(1450.00));
    // 10% would be 173.50, the promotion caps it at 150
    assert_eq!(quote.totals.discount_amount, dec!(150.00));
    assert_eq!(quote.totals.subtotal_after_discount, dec!(1585.00));
    assert_eq!(quote.totals.tax, dec!(96.04));
    assert_eq!(quote.totals.total, dec!(1681.04));

    let discount = quote.discount.as_ref().unwrap();
    assert!(discount.applied);
    assert_eq!(discount.description.as_deref(), Some("10% off your first service"));

    let financing = quote.financing.as_ref().unwrap();
    assert!(financing.eligible);
    assert_eq!(financing.principal, dec!(1681.04));
    assert_eq!(financing.options.len(), 5);
    assert_eq!(financing.options[0].plan.months, 6);
    assert_eq!(financing.options[0].result.monthly_payment, dec!(280.17));
    assert_eq!(financing.options[0].result.total_interest, dec!(0));
    assert!(financing.options[4].result.total_interest > dec!(0));
}

#[test]
fn test_minimum_purchase_not_met_in_quote() {
    let draft = InvoiceDraft {
        jurisdiction: "TX".to_string(),
        line_items: vec![DraftLineItem::new("DIAG", dec!(1))],
        coupon_code: Some("TUNEUP25".to_string()),
    };

    let quote = builtin_service().quote(&draft).unwrap();

    assert_eq!(quote.totals.discount_amount, dec!(0));
    assert_eq!(quote.totals.subtotal_after_discount, dec!(89.00));
    assert_eq!(quote.totals.tax, dec!(7.34));
    assert_eq!(quote.totals.total, dec!(96.34));

    let discount = quote.discount.unwrap();
    assert!(!discount.applied);
    assert!(discount.message.unwrap().contains("add $11.00 more"));
}

#[test]
fn test_unknown_jurisdiction_uses_default_rate() {
    let draft = InvoiceDraft {
        jurisdiction: "zz".to_string(),
        line_items: vec![DraftLineItem::new("DUCT-CLEAN", dec!(1))],
        coupon_code: None,
    };

    let quote = builtin_service().quote(&draft).unwrap();

    assert_eq!(quote.jurisdiction, "ZZ");
    assert_eq!(quote.tax_rate, dec!(0.0825));
    assert_eq!(quote.totals.tax, dec!(32.92));
    assert!(quote.discount.is_none());
}

#[test]
fn test_expired_promotion_from_custom_catalog() {
    let yaml = r#"
tax_rates:
  DEFAULT: 0.06
services:
  PUMP:
    name: Sump pump replacement
    base_price: 620.00
    unit: each
financing:
  plans:
    - months: 12
      annual_rate: 0
      label: 12 months same as cash
promotions:
  - code: SUMMER50
    type: fixed
    value: 50
    expires_at: 2025-09-01T00:00:00Z
"#;
    let catalog = PricingCatalog::from_yaml_str(yaml).unwrap();
    let service = QuoteService::new(&catalog, catalog.discount_lookup(), TestDataFactory::clock());

    let draft = InvoiceDraft {
        jurisdiction: "FL".to_string(),
        line_items: vec![DraftLineItem::new("pump", dec!(1))],
        coupon_code: Some("summer50".to_string()),
    };

    let quote = service.quote(&draft).unwrap();

    assert_eq!(quote.totals.discount_amount, dec!(0));
    assert_eq!(quote.totals.tax, dec!(37.20));
    assert_eq!(quote.totals.total, dec!(657.20));
    assert!(quote
        .discount
        .unwrap()
        .message
        .unwrap()
        .contains("expired on 2025-09-01"));

    let financing = quote.financing.unwrap();
    assert_eq!(financing.options.len(), 1);
    assert_eq!(financing.options[0].result.monthly_payment, dec!(51.67));
}

#[test]
fn test_external_discount_lookup() {
    let catalog = PricingCatalog::builtin().unwrap();
    let partner = InMemoryDiscounts::new([TestDataFactory::fixed(dec!(500))
        .with_description("Partner credit")
        .expiring_at(TestDataFactory::now() + Duration::days(1))]);
    let service = QuoteService::new(&catalog, partner, TestDataFactory::clock());

    let draft = InvoiceDraft {
        jurisdiction: "NY".to_string(),
        line_items: vec![
            DraftLineItem::new("FILTER", dec!(4)),
            DraftLineItem::new("LABOR", dec!(0.5)),
        ],
        coupon_code: Some("testfixed".to_string()),
    };

    let quote = service.quote(&draft).unwrap();

    // Fixed 500 is floored to the 147.46 subtotal
    assert_eq!(quote.totals.subtotal, dec!(147.46));
    assert_eq!(quote.totals.discount_amount, dec!(147.46));
    assert_eq!(quote.totals.subtotal_after_discount, dec!(0));
    assert_eq!(quote.totals.tax, dec!(0));
    assert_eq!(quote.totals.total, dec!(0));

    let financing = quote.financing.unwrap();
    assert!(!financing.eligible);
    assert!(financing.options.is_empty());
}

#[test]
fn test_quote_serializes_to_json() {
    let draft: InvoiceDraft = serde_json::from_str(
        r#"{
            "jurisdiction": "OR",
            "line_items": [
                {"service_code": "DRAIN-CLEAR", "quantity": "1"},
                {"service_code": "GOODWILL", "description": "Returning customer credit",
                 "quantity": "1", "unit_price": "-20.00", "taxable": false}
            ]
        }"#,
    )
    .unwrap();

    let quote = builtin_service().quote(&draft).unwrap();
    assert_eq!(quote.totals.subtotal, dec!(155.00));
    assert_eq!(quote.totals.tax, dec!(0));
    assert_eq!(quote.totals.total, dec!(155.00));

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["jurisdiction"], "OR");
    assert_eq!(json["line_items"].as_array().unwrap().len(), 2);
    assert!(json.get("discount").is_none());
    assert!(json["financing"]["options"].as_array().unwrap().is_empty());
}

#[test]
fn test_oversized_draft_is_rejected_not_priced() {
    let draft: InvoiceDraft = serde_json::from_str(
        r#"{
            "jurisdiction": "TX",
            "line_items": [
                {"service_code": "BULK", "description": "Bulk order",
                 "quantity": "79228162514264337593543950335", "unit_price": "2"}
            ],
            "coupon_code": "WELCOME10"
        }"#,
    )
    .unwrap();

    let err = builtin_service().quote(&draft).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert!(err.to_string().contains("out of range"));

    // A large but representable draft still prices, discount included
    let draft = InvoiceDraft {
        jurisdiction: "TX".to_string(),
        line_items: vec![DraftLineItem::new("FILTER", dec!(1000000000000000000000))],
        coupon_code: Some("WELCOME10".to_string()),
    };
    let quote = builtin_service().quote(&draft).unwrap();
    assert_eq!(quote.totals.discount_amount, dec!(150));
    assert!(quote.totals.verify().is_ok());
    assert!(!quote.financing.unwrap().eligible);
}
