//! Similar-property ranking by weighted attribute overlap

use crate::insights::types::Property;
use std::collections::HashSet;
use tracing::debug;

pub const ZONE_POINTS: u32 = 40;
pub const TYPE_POINTS: u32 = 30;
pub const DEVELOPER_POINTS: u32 = 20;
pub const STATUS_POINTS: u32 = 15;
pub const TAG_POINTS: u32 = 5;
pub const MAX_TAG_POINTS: u32 = 25;
/// Awarded for the same zone again when the reference has configurations.
/// Stands in for a price comparison that was never written.
pub const PRICE_PROXIMITY_POINTS: u32 = 10;

pub const DEFAULT_TOP_N: usize = 3;

/// `Property::id` when the document carried no id
const UNSET_ID: i64 = 0;

/// Field present on both sides and equal; missing never matches
fn same<T: PartialEq>(a: &Option<T>, b: &Option<T>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

fn is_reference(reference: &Property, candidate: &Property) -> bool {
    reference.id != UNSET_ID && candidate.id == reference.id
}

/// Score one candidate against the reference (higher = more similar)
pub fn similarity_score(
    reference: &Property,
    candidate: &Property,
    reference_has_configurations: bool,
) -> u32 {
    let mut score = 0;

    let same_zone = same(&reference.zone, &candidate.zone);
    if same_zone {
        score += ZONE_POINTS;
    }
    if same(&reference.property_type, &candidate.property_type) {
        score += TYPE_POINTS;
    }
    if same(&reference.developer, &candidate.developer) {
        score += DEVELOPER_POINTS;
    }
    if same(&reference.status, &candidate.status) {
        score += STATUS_POINTS;
    }

    let reference_tags: HashSet<&str> = reference.tags.iter().map(String::as_str).collect();
    let common_tags = candidate
        .tags
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(&reference_tags)
        .count() as u32;
    score += (common_tags * TAG_POINTS).min(MAX_TAG_POINTS);

    if reference_has_configurations && same_zone {
        score += PRICE_PROXIMITY_POINTS;
    }

    score
}

/// Up to `top_n` candidates most similar to the reference, best first.
/// Equal scores keep their candidate-list order. A candidate sharing the
/// reference's id is skipped; id 0 means unset and never excludes anything.
pub fn rank_similar<'a>(
    reference: &Property,
    reference_has_configurations: bool,
    candidates: &'a [Property],
    top_n: usize,
) -> Vec<&'a Property> {
    let mut scored: Vec<(u32, &Property)> = candidates
        .iter()
        .filter(|c| !is_reference(reference, c))
        .map(|c| (similarity_score(reference, c, reference_has_configurations), c))
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    debug!(
        "Ranked {} candidates for property {} (top score: {:?})",
        scored.len(),
        reference.id,
        scored.first().map(|(score, _)| *score)
    );

    scored.into_iter().take(top_n).map(|(_, c)| c).collect()
}
