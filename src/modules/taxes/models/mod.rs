mod jurisdiction_tax;

pub use jurisdiction_tax::{JurisdictionTaxTable, DEFAULT_JURISDICTION};
