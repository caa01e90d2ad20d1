// Service price catalog
//
// Used by the line-item editor to pre-populate prices; invoice totals never
// read it.

pub mod models;
pub mod services;

pub use models::ServicePrice;
pub use services::ServiceCatalog;
