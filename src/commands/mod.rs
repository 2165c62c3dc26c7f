pub mod ingest;
pub mod query;
pub mod serve;

use anyhow::{Context, Result};
use serde::Serialize;

use hashpulse::config::Config;
use hashpulse::models::{Category, Platform};
use hashpulse::service::AnalyticsService;
use hashpulse::store::create_sqlite_store;

// Re-export command functions for convenience
pub use ingest::ingest;
pub use query::{
    growth, predict, report_categories, report_overview, report_platforms, report_sentiment,
    trend, trending, ReportFilters,
};
pub use serve::serve;

/// Open the configured store and wrap it in a service
fn open_service(config: &Config) -> Result<AnalyticsService> {
    let store = create_sqlite_store(&config.database.sqlite_path).with_context(|| {
        format!(
            "Failed to open database: {}",
            config.database.sqlite_path.display()
        )
    })?;
    Ok(AnalyticsService::new(store, config.analytics.clone()))
}

fn parse_platform(raw: Option<&str>) -> Result<Option<Platform>> {
    raw.map(|p| p.parse::<Platform>().map_err(anyhow::Error::msg))
        .transpose()
}

fn parse_category(raw: Option<&str>) -> Result<Option<Category>> {
    raw.map(|c| c.parse::<Category>().map_err(anyhow::Error::msg))
        .transpose()
}

/// Print a value as pretty JSON on stdout
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{json}");
    Ok(())
}
