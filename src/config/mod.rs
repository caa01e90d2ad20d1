use crate::core::{AppError, Result};
use std::env;
use std::path::PathBuf;

pub mod catalog;

pub use catalog::{FinancingCatalog, PricingCatalog};

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub pricing: PricingCatalog,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Pricing catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let catalog_path = match env::var("PRICING_CATALOG_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(AppError::configuration("PRICING_CATALOG_PATH is empty"));
            }
            Ok(path) => Some(PathBuf::from(path)),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => {
                return Err(AppError::configuration(
                    "PRICING_CATALOG_PATH is not valid UTF-8",
                ));
            }
        };

        Ok(AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            catalog_path,
        })
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let app = AppConfig::from_env()?;
        let pricing = match &app.catalog_path {
            Some(path) => PricingCatalog::from_file(path)?,
            None => PricingCatalog::builtin()?,
        };

        Ok(Config { app, pricing })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.log_level.trim().is_empty() {
            return Err(AppError::configuration("LOG_LEVEL cannot be empty"));
        }

        self.pricing.validate()
    }
}
