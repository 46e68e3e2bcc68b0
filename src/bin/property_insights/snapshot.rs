//! Input/output documents for the command line runner

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use property_insights::insights::similarity::similarity_score;
use property_insights::insights::{Property, PropertySnapshot};
use property_insights::PropertyInsights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// One property page worth of API data plus listings to compare against
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsInput {
    #[serde(flatten)]
    pub snapshot: PropertySnapshot,
    #[serde(default)]
    pub candidates: Vec<Property>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarListing {
    pub id: i64,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub insights: PropertyInsights,
    pub similar: Vec<SimilarListing>,
}

/// Read and deserialize a snapshot file
pub fn load_input(path: &Path) -> Result<InsightsInput> {
    info!("Loading snapshot from {:?}", path);
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let input: InsightsInput =
        serde_json::from_str(&raw).with_context(|| format!("Invalid snapshot JSON in {:?}", path))?;
    info!(
        "Loaded property {} with {} configurations and {} candidates",
        input.snapshot.property.id,
        input.snapshot.configurations.len(),
        input.candidates.len()
    );
    Ok(input)
}

pub fn similar_listings(snapshot: &PropertySnapshot, ranked: &[&Property]) -> Vec<SimilarListing> {
    let has_configurations = !snapshot.configurations.is_empty();
    ranked
        .iter()
        .map(|p| SimilarListing {
            id: p.id,
            name: p.name.clone(),
            score: similarity_score(&snapshot.property, p, has_configurations),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SNAPSHOT_JSON: &str = r#"{
        "property": {"id": 1, "name": "Skyline", "zone": "north", "type": "apartment"},
        "configurations": [
            {"id": 1, "propertyId": 1, "configuration": "3 BHK", "builtUpArea": 1200, "pricePerSqft": 8500}
        ],
        "civilReport": {"overallScore": 7.5, "investmentRecommendation": "highly-recommended"},
        "candidates": [
            {"id": 2, "name": "Lakeview", "zone": "north"},
            {"id": 3, "name": "Hilltop", "zone": "south"}
        ]
    }"#;

    #[test]
    fn test_load_input() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT_JSON.as_bytes()).unwrap();

        let input = load_input(file.path()).unwrap();

        // Test snapshot and candidates share one document
        assert_eq!(input.snapshot.property.id, 1);
        assert_eq!(input.snapshot.configurations[0].price_per_sqft, Some(8500.0));
        assert!(input.snapshot.civil_report.is_some());
        assert!(input.snapshot.valuation_report.is_none());
        assert_eq!(input.candidates.len(), 2);
    }

    #[test]
    fn test_load_input_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = load_input(file.path()).unwrap_err();
        // Test parse errors carry context
        assert!(err.to_string().contains("Invalid snapshot JSON"));
    }

    #[test]
    fn test_similar_listings_scores() {
        let input: InsightsInput = serde_json::from_str(SNAPSHOT_JSON).unwrap();
        let ranked: Vec<&Property> = input.candidates.iter().collect();

        let listings = similar_listings(&input.snapshot, &ranked);

        // Test zone 40 + zone again 10 (reference has configurations)
        assert_eq!(listings[0].score, 50);
        assert_eq!(listings[1].score, 0);
        assert_eq!(listings[0].name, "Lakeview");
    }
}
