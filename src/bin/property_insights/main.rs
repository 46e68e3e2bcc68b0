//! Property insights runner - derives page figures for snapshot files

mod snapshot;

use anyhow::Result;
use chrono::Utc;
use property_insights::{derive_insights, similar_properties, DerivationDefaults};
use snapshot::{load_input, similar_listings, InsightsReport};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting property insights");

    // Load configuration from environment
    dotenvy::dotenv().ok();
    let defaults = DerivationDefaults::from_env()?;
    info!("Configuration loaded: {:?}", defaults);

    let paths: Vec<PathBuf> = env::args().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        anyhow::bail!("Usage: property-insights <snapshot.json>...");
    }

    let mut failures = 0;
    for path in &paths {
        match run_snapshot(path, &defaults) {
            Ok(report) => {
                println!("{}", serde_json::to_string_pretty(&report)?);
                info!("✓ {} complete", path.display());
            }
            Err(e) => {
                failures += 1;
                error!("✗ {} failed: {:#}", path.display(), e);
            }
        }
    }

    info!(
        "Property insights complete: {} ok, {} failed",
        paths.len() - failures,
        failures
    );

    if failures > 0 {
        anyhow::bail!("{} snapshot(s) failed", failures);
    }
    Ok(())
}

/// Load one snapshot and run the derivation pass over it
fn run_snapshot(path: &Path, defaults: &DerivationDefaults) -> Result<InsightsReport> {
    let input = load_input(path)?;

    let insights = derive_insights(&input.snapshot, defaults)?;
    let ranked = similar_properties(&input.snapshot, &input.candidates, defaults);
    let similar = similar_listings(&input.snapshot, &ranked);

    Ok(InsightsReport {
        source: path.display().to_string(),
        generated_at: Utc::now(),
        insights,
        similar,
    })
}
