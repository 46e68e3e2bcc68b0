//! Core data types for the derivation pass
//! Snapshots of API records plus the derived outputs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Listing lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyStatus {
    PreLaunch,
    Active,
    UnderConstruction,
    Completed,
    SoldOut,
}

impl std::fmt::Display for PropertyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyStatus::PreLaunch => write!(f, "pre-launch"),
            PropertyStatus::Active => write!(f, "active"),
            PropertyStatus::UnderConstruction => write!(f, "under-construction"),
            PropertyStatus::Completed => write!(f, "completed"),
            PropertyStatus::SoldOut => write!(f, "sold-out"),
        }
    }
}

/// Unit availability within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Available,
    Limited,
    SoldOut,
}

impl AvailabilityStatus {
    pub fn is_purchasable(&self) -> bool {
        !matches!(self, AvailabilityStatus::SoldOut)
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "available"),
            AvailabilityStatus::Limited => write!(f, "limited"),
            AvailabilityStatus::SoldOut => write!(f, "sold-out"),
        }
    }
}

/// A score together with the scale it was recorded on.
/// Scores arrive as /5, /10 or /100 depending on the form that produced them,
/// so conversion is always explicit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub value: f64,
    pub scale_max: f64,
}

impl Score {
    pub fn new(value: f64, scale_max: f64) -> Self {
        Score { value, scale_max }
    }

    pub fn out_of_five(value: f64) -> Self {
        Score::new(value, 5.0)
    }

    pub fn out_of_ten(value: f64) -> Self {
        Score::new(value, 10.0)
    }

    /// Fraction of the scale, None when the scale itself is unusable
    pub fn ratio(&self) -> Option<f64> {
        if self.scale_max.is_finite() && self.scale_max > 0.0 && self.value.is_finite() {
            Some(self.value / self.scale_max)
        } else {
            None
        }
    }

    /// Convert to another scale, e.g. 4.2/5 -> 8.4/10
    pub fn rescale(&self, scale_max: f64) -> Option<Score> {
        if !(scale_max.is_finite() && scale_max > 0.0) {
            return None;
        }
        self.ratio().map(|r| Score::new(r * scale_max, scale_max))
    }
}

/// Property listing - pure data, no behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub id: i64,
    pub name: String,

    // Location
    pub zone: Option<String>,
    pub area: Option<String>,

    // Project attributes
    pub developer: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub status: Option<PropertyStatus>,
    pub tags: Vec<String>,
    pub rera_approved: bool,

    // Scores as entered by admins, scale depends on the form
    pub overall_score: Option<f64>,
    pub location_score: Option<f64>,
    pub amenities_score: Option<f64>,
    pub value_score: Option<f64>,

    // Market bands, per sqft
    pub area_avg_price_min: Option<f64>,
    pub area_avg_price_max: Option<f64>,
    pub city_avg_price_min: Option<f64>,
    pub city_avg_price_max: Option<f64>,

    // Media
    pub images: Vec<String>,
    pub youtube_video_url: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One unit layout within a property, e.g. "3 BHK"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyConfiguration {
    pub id: i64,
    pub property_id: i64,
    pub configuration: String,
    pub built_up_area: Option<f64>,
    pub price_per_sqft: Option<f64>,
    /// Stored by some admin forms, never used when area and rate are present
    pub price: Option<f64>,
    pub availability_status: Option<AvailabilityStatus>,
    pub plot_size: Option<String>,
}

/// Civil/MEP verdict set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CivilRecommendation {
    HighlyRecommended,
    Recommended,
    Conditional,
    NotRecommended,
}

/// Civil / MEP engineering audit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CivilMepReport {
    pub id: i64,
    pub property_id: i64,
    /// 0-10
    pub overall_score: Option<f64>,
    pub investment_recommendation: Option<CivilRecommendation>,
    pub executive_summary: Option<String>,
    pub structural_analysis: Option<String>,
    pub mep_analysis: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Rating form used by the detailed valuation editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValuationRating {
    ExcellentBuy,
    GoodBuy,
    Hold,
    Avoid,
}

/// Buy/hold/sell form used by the quick valuation editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TradeVerdict {
    Buy,
    Hold,
    Sell,
}

/// Valuation reports carry one of two verdict sets depending on which form
/// wrote them. "hold" exists in both and deserializes as a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValuationRecommendation {
    Rating(ValuationRating),
    Verdict(TradeVerdict),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The ten fixed cost heads of a valuation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostComponents {
    pub land_value: f64,
    pub construction_cost: f64,
    pub development_charges: f64,
    pub registration_stamp_duty: f64,
    pub gst_on_construction: f64,
    pub parking_charges: f64,
    pub clubhouse_maintenance: f64,
    pub interior_fittings: f64,
    pub moving_costs: f64,
    pub legal_charges: f64,
}

impl CostComponents {
    /// Field name and value pairs, in form order
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            ("landValue", self.land_value),
            ("constructionCost", self.construction_cost),
            ("developmentCharges", self.development_charges),
            ("registrationStampDuty", self.registration_stamp_duty),
            ("gstOnConstruction", self.gst_on_construction),
            ("parkingCharges", self.parking_charges),
            ("clubhouseMaintenance", self.clubhouse_maintenance),
            ("interiorFittings", self.interior_fittings),
            ("movingCosts", self.moving_costs),
            ("legalCharges", self.legal_charges),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HiddenCost {
    pub item: String,
    pub amount: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CostBreakdown {
    #[serde(flatten)]
    pub components: CostComponents,
    pub hidden_costs: Vec<HiddenCost>,
    /// Stored total; may have drifted from the parts
    pub total_estimated_cost: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketAnalysis {
    pub average_price_per_sqft: Option<f64>,
    pub annual_appreciation_rate: Option<f64>,
    pub demand_level: Option<String>,
    pub comparable_properties: Vec<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoiAnalysis {
    pub break_even_period: Option<f64>,
    pub total_roi_5_years: Option<f64>,
    pub total_roi_10_years: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanEligibility {
    pub max_loan_amount: f64,
    pub suggested_down_payment: f64,
    pub emi_estimate: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialAnalysis {
    pub current_valuation: Option<f64>,
    /// Percentage as entered, e.g. 3.2
    pub rental_yield: Option<f64>,
    pub monthly_rental_income: Option<f64>,
    pub roi_analysis: RoiAnalysis,
    pub loan_eligibility: Option<LoanEligibility>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiskAssessment {
    pub overall_risk: Option<RiskLevel>,
    pub risk_factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
}

/// Admin-authored valuation report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyValuationReport {
    pub id: i64,
    pub property_id: i64,
    pub cost_breakdown: CostBreakdown,
    pub market_analysis: MarketAnalysis,
    pub financial_analysis: FinancialAnalysis,
    pub risk_assessment: RiskAssessment,
    pub investment_recommendation: Option<ValuationRecommendation>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Everything a property page fetches before deriving
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySnapshot {
    pub property: Property,
    pub configurations: Vec<PropertyConfiguration>,
    pub civil_report: Option<CivilMepReport>,
    pub valuation_report: Option<PropertyValuationReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_rescale() {
        let score = Score::out_of_five(4.2);
        // Test 4.2 out of 5 is 8.4 out of 10
        let ten = score.rescale(10.0).unwrap();
        assert!((ten.value - 8.4).abs() < 1e-9);
        assert_eq!(ten.scale_max, 10.0);

        // Test a zero or negative scale has no ratio
        assert!(Score::new(3.0, 0.0).ratio().is_none());
        assert!(score.rescale(-1.0).is_none());
    }

    #[test]
    fn test_status_serde_kebab_case() {
        let status: PropertyStatus = serde_json::from_str("\"under-construction\"").unwrap();
        // Test kebab-case both ways
        assert_eq!(status, PropertyStatus::UnderConstruction);
        assert_eq!(status.to_string(), "under-construction");
        assert_eq!(
            serde_json::to_string(&AvailabilityStatus::SoldOut).unwrap(),
            "\"sold-out\""
        );
        // Test only sold-out blocks a booking
        assert!(!AvailabilityStatus::SoldOut.is_purchasable());
        assert!(AvailabilityStatus::Limited.is_purchasable());
    }

    #[test]
    fn test_valuation_recommendation_keeps_both_sets() {
        let rating: ValuationRecommendation = serde_json::from_str("\"good-buy\"").unwrap();
        assert_eq!(
            rating,
            ValuationRecommendation::Rating(ValuationRating::GoodBuy)
        );

        // Test the trade verdict set is kept apart from ratings
        let verdict: ValuationRecommendation = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(verdict, ValuationRecommendation::Verdict(TradeVerdict::Sell));

        // Test a civil recommendation is not a valuation recommendation
        assert!(serde_json::from_str::<ValuationRecommendation>("\"recommended\"").is_err());
    }

    #[test]
    fn test_property_deserializes_from_api_json() {
        let json = r#"{
            "id": 7,
            "name": "Skyline Residences",
            "zone": "north",
            "type": "apartment",
            "status": "pre-launch",
            "tags": ["gym", "rera-approved"],
            "reraApproved": true,
            "locationScore": 4.5,
            "areaAvgPriceMin": 7000
        }"#;

        let property: Property = serde_json::from_str(json).unwrap();

        // Test "type" maps to property_type and camelCase fields load
        assert_eq!(property.property_type.as_deref(), Some("apartment"));
        assert_eq!(property.status, Some(PropertyStatus::PreLaunch));
        assert_eq!(property.tags.len(), 2);
        assert!(property.rera_approved);
        assert_eq!(property.location_score, Some(4.5));
        assert_eq!(property.area_avg_price_min, Some(7000.0));
        // Test absent fields default
        assert!(property.developer.is_none());
    }

    #[test]
    fn test_cost_breakdown_flattens_components() {
        let json = r#"{
            "landValue": 1000000,
            "constructionCost": 500000,
            "hiddenCosts": [{"item": "Society deposit", "amount": 50000}],
            "totalEstimatedCost": 1500000
        }"#;

        let breakdown: CostBreakdown = serde_json::from_str(json).unwrap();

        // Test cost heads sit at the top level of the JSON
        assert_eq!(breakdown.components.land_value, 1_000_000.0);
        assert_eq!(breakdown.components.legal_charges, 0.0);
        assert_eq!(breakdown.hidden_costs[0].amount, 50_000.0);
        assert_eq!(breakdown.components.entries()[1], ("constructionCost", 500_000.0));
    }
}
