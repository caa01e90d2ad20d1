pub mod line_item_calculator;
pub mod quote_service;
pub mod totals_aggregator;

pub use line_item_calculator::LineItemCalculator;
pub use quote_service::QuoteService;
pub use totals_aggregator::{discount_ratio, InvoiceTotalsAggregator};
