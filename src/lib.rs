//! FieldBill invoice pricing library
//!
//! Turns billable line items, an optional discount and a jurisdiction into
//! consistent invoice totals, and prices financing plans for the result.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::discounts;
pub use modules::financing;
pub use modules::invoices;
pub use modules::pricebook;
pub use modules::taxes;
