//! Scoring - lifestyle, investment and property scores
//!
//! Inputs are plain numbers on whatever scale the source form used; nothing
//! here rescales. Missing inputs are replaced by a caller-supplied default.

/// Investment score shown when no report or property score exists
pub const DEFAULT_INVESTMENT_SCORE: f64 = 7.5;

/// Arithmetic mean, None for an empty set
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of location and amenities
pub fn lifestyle_score(location: Option<f64>, amenities: Option<f64>, missing: f64) -> f64 {
    (location.unwrap_or(missing) + amenities.unwrap_or(missing)) / 2.0
}

/// First score present, in order: valuation report, civil report, property.
/// Not an average.
pub fn investment_score(
    valuation: Option<f64>,
    civil_overall: Option<f64>,
    property_overall: Option<f64>,
    default: f64,
) -> f64 {
    valuation.or(civil_overall).or(property_overall).unwrap_or(default)
}

/// Unweighted mean of location, amenities and value
pub fn property_score(
    location: Option<f64>,
    amenities: Option<f64>,
    value: Option<f64>,
    missing: f64,
) -> f64 {
    let scores = [
        location.unwrap_or(missing),
        amenities.unwrap_or(missing),
        value.unwrap_or(missing),
    ];
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        // Test empty input has no mean
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4.0, 5.0]), Some(4.5));
    }

    #[test]
    fn test_lifestyle_score() {
        // Test location and amenities averaged
        assert_eq!(lifestyle_score(Some(4.0), Some(5.0), 0.0), 4.5);
        // Test missing amenities falls back to what the caller chose
        assert_eq!(lifestyle_score(Some(4.0), None, 0.0), 2.0);
        assert_eq!(lifestyle_score(Some(4.0), None, 3.0), 3.5);
    }

    #[test]
    fn test_investment_score_precedence() {
        // Test valuation, then civil, then property, then default
        assert_eq!(investment_score(Some(6.0), Some(8.0), Some(9.0), 7.5), 6.0);
        assert_eq!(investment_score(None, Some(8.0), Some(9.0), 7.5), 8.0);
        assert_eq!(investment_score(None, None, Some(9.0), 7.5), 9.0);
        assert_eq!(
            investment_score(None, None, None, DEFAULT_INVESTMENT_SCORE),
            7.5
        );
        // Test a present zero is still a score
        assert_eq!(investment_score(Some(0.0), Some(8.0), None, 7.5), 0.0);
    }

    #[test]
    fn test_property_score() {
        // Test mean of the three sub-scores
        assert_eq!(property_score(Some(3.0), Some(4.0), Some(5.0), 0.0), 4.0);
        assert_eq!(property_score(None, None, None, 0.0), 0.0);
        assert_eq!(property_score(Some(9.0), None, Some(6.0), 0.0), 5.0);
    }

    #[test]
    fn test_scales_are_not_normalized() {
        // Test 4.5/5 and 90/100 are averaged as given
        assert_eq!(lifestyle_score(Some(4.5), Some(90.0), 0.0), 47.25);
    }
}
