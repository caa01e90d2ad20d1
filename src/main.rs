use std::io::Read;

use anyhow::Context;
use fieldbill::config::Config;
use fieldbill::invoices::{InvoiceDraft, QuoteService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing; stdout is reserved for the quote
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("fieldbill={}", config.app.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.app.env == "production" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::debug!(
        "Environment: {}, pricing catalog: {}",
        config.app.env,
        config
            .app
            .catalog_path
            .as_deref()
            .map_or_else(|| "built-in".to_string(), |p| p.display().to_string())
    );

    let draft_json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read invoice draft {}", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read invoice draft from stdin")?;
            buf
        }
    };

    let draft: InvoiceDraft =
        serde_json::from_str(&draft_json).context("Invoice draft is not valid JSON")?;

    let service = QuoteService::from_catalog(&config.pricing);
    let quote = service.quote(&draft)?;

    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
