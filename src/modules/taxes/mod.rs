pub mod models;
pub mod services;

pub use models::{JurisdictionTaxTable, DEFAULT_JURISDICTION};
pub use services::TaxCalculator;
