use std::path::Path;

use anyhow::{Context, Result};

use hashpulse::config::Config;
use hashpulse::models::HashtagSnapshot;

use super::{open_service, print_json};

pub fn ingest(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read snapshot file: {}", file.display()))?;
    let snapshots: Vec<HashtagSnapshot> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshots: {}", file.display()))?;

    let service = open_service(config)?;
    let summary = service
        .ingest(&snapshots)
        .context("Failed to ingest snapshots")?;

    tracing::info!(
        ingested = summary.ingested,
        tracked = summary.tracked,
        "Ingest completed"
    );
    print_json(&summary)
}
