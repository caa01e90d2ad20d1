mod invoice_quote;
mod invoice_totals;
mod line_item;

pub use invoice_quote::{DiscountSummary, DraftLineItem, InvoiceDraft, InvoiceQuote};
pub use invoice_totals::InvoiceTotals;
pub use line_item::LineItem;
