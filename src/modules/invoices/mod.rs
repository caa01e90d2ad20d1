// Invoices module

pub mod models;
pub mod services;

pub use models::{
    DiscountSummary, DraftLineItem, InvoiceDraft, InvoiceQuote, InvoiceTotals, LineItem,
};
pub use services::{discount_ratio, InvoiceTotalsAggregator, LineItemCalculator, QuoteService};
