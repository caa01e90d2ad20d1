mod service_catalog;

pub use service_catalog::ServiceCatalog;
