//! Derivation pass - runs one property snapshot through pricing, finance,
//! scoring and formatting to produce everything a detail page displays

use crate::config::DerivationDefaults;
use crate::error::Result;
use crate::insights::finance::{
    annual_rental_income, break_even_years, emi, five_year_appreciation, gross_rental_yield,
    loan_eligibility, total_cost_breakdown,
};
use crate::insights::format::{format_price, format_price_range};
use crate::insights::pricing::{
    available_configurations, market_position, range_of, resolve_config_price_with_fallback,
    MarketPosition, PriceRange, ResolvedPrice,
};
use crate::insights::scoring::{investment_score, lifestyle_score, property_score};
use crate::insights::similarity::rank_similar;
use crate::insights::types::{
    AvailabilityStatus, CivilRecommendation, CostBreakdown, FinancialAnalysis, LoanEligibility,
    Property, PropertySnapshot, RiskLevel, ValuationRecommendation,
};
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationInsight {
    pub configuration: String,
    pub availability_status: Option<AvailabilityStatus>,
    pub price: ResolvedPrice,
    pub price_display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSummary {
    pub total: f64,
    pub total_display: String,
    pub stored_total: f64,
    pub drifted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalInsight {
    pub monthly_rent: f64,
    pub annual_income: f64,
    /// Ratio, 0.042 = 4.2%
    pub gross_yield: Option<f64>,
    /// Years of rent to recover the total estimated cost
    pub break_even_years: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInsights {
    pub property_id: i64,
    pub configurations: Vec<ConfigurationInsight>,
    /// Configurations not sold out
    pub available_count: usize,
    /// None when the property has no configurations
    pub price_range: Option<PriceRange>,
    pub price_display: Option<String>,
    pub starting_emi: Option<f64>,
    pub loan: Option<LoanEligibility>,
    pub projected_value_five_years: Option<f64>,
    pub market_position: Option<MarketPosition>,
    pub lifestyle_score: f64,
    pub investment_score: f64,
    pub property_score: f64,
    pub cost: Option<CostSummary>,
    pub rental: Option<RentalInsight>,
    pub civil_recommendation: Option<CivilRecommendation>,
    pub valuation_recommendation: Option<ValuationRecommendation>,
    pub overall_risk: Option<RiskLevel>,
}

/// Resolve every configuration, falling back to the configured defaults
fn resolve_configurations(
    snapshot: &PropertySnapshot,
    defaults: &DerivationDefaults,
) -> Result<Vec<ConfigurationInsight>> {
    snapshot
        .configurations
        .iter()
        .map(|config| {
            let price = resolve_config_price_with_fallback(config, &defaults.price_fallback)?;
            if price.estimated {
                warn!(
                    "Property {} configuration {:?} priced from fallback values",
                    snapshot.property.id, config.configuration
                );
            }
            Ok(ConfigurationInsight {
                configuration: config.configuration.clone(),
                availability_status: config.availability_status,
                price_display: format_price(price.total_price, defaults.price_precision)?,
                price,
            })
        })
        .collect()
}

fn summarize_costs(breakdown: &CostBreakdown, precision: u32) -> Result<CostSummary> {
    let total = total_cost_breakdown(&breakdown.components, &breakdown.hidden_costs)?;
    let drifted = breakdown.has_drifted();
    if drifted {
        warn!(
            "Stored cost total {} differs from recomputed {}",
            breakdown.total_estimated_cost, total
        );
    }

    Ok(CostSummary {
        total,
        total_display: format_price(total, precision)?,
        stored_total: breakdown.total_estimated_cost,
        drifted,
    })
}

fn summarize_rental(
    financial: &FinancialAnalysis,
    total_cost: Option<f64>,
) -> Result<Option<RentalInsight>> {
    let monthly_rent = match financial.monthly_rental_income {
        Some(rent) => rent,
        None => return Ok(None),
    };

    let annual_income = annual_rental_income(monthly_rent)?;
    let gross_yield = match financial.current_valuation {
        Some(value) if value > 0.0 => Some(gross_rental_yield(annual_income, value)?),
        _ => None,
    };
    let break_even = match total_cost {
        Some(cost) if annual_income > 0.0 => Some(break_even_years(cost, annual_income)?),
        _ => None,
    };

    Ok(Some(RentalInsight {
        monthly_rent,
        annual_income,
        gross_yield,
        break_even_years: break_even,
    }))
}

/// Entry rate against the property's area band. A malformed band only
/// loses this field, not the whole pass.
fn entry_market_position(
    property: &Property,
    prices: &[ResolvedPrice],
) -> Option<MarketPosition> {
    let entry_rate = prices
        .iter()
        .map(|p| p.price_per_sqft)
        .fold(None, |min: Option<f64>, rate| Some(min.map_or(rate, |m| m.min(rate))));

    match (entry_rate, property.area_avg_price_min, property.area_avg_price_max) {
        (Some(rate), Some(min), Some(max)) => match market_position(rate, min, max) {
            Ok(position) => Some(position),
            Err(e) => {
                warn!(
                    "Property {}: skipping market position for area band {}-{}: {}",
                    property.id, min, max, e
                );
                None
            }
        },
        _ => None,
    }
}

/// Derive all displayed figures for one property
pub fn derive_insights(
    snapshot: &PropertySnapshot,
    defaults: &DerivationDefaults,
) -> Result<PropertyInsights> {
    let property = &snapshot.property;
    info!(
        "Deriving insights for property {} ({} configurations)",
        property.id,
        snapshot.configurations.len()
    );

    // Step 1: Resolve configuration prices
    let configurations = resolve_configurations(snapshot, defaults)?;
    let prices: Vec<ResolvedPrice> = configurations.iter().map(|c| c.price).collect();
    let totals: Vec<f64> = prices.iter().map(|p| p.total_price).collect();

    let price_range = range_of(&totals).ok();
    let price_display = price_range
        .as_ref()
        .map(|range| format_price_range(range, defaults.price_precision))
        .transpose()?;

    // Step 2: Financials from the entry price
    let entry_price = price_range.map(|range| range.min);
    let starting_emi = entry_price
        .map(|price| emi(price, defaults.down_payment_fraction, defaults.loan_term_years))
        .transpose()?;
    let loan = entry_price
        .map(|price| {
            loan_eligibility(price, defaults.down_payment_fraction, defaults.loan_term_years)
        })
        .transpose()?;
    let projected_value_five_years = entry_price
        .map(|price| five_year_appreciation(price, defaults.five_year_appreciation_rate))
        .transpose()?;
    let market_position = entry_market_position(property, &prices);

    debug!(
        "Property {}: range {:?}, emi {:?}, market {:?}",
        property.id, price_range, starting_emi, market_position
    );

    // Step 3: Scores
    let valuation = snapshot.valuation_report.as_ref();
    let civil = snapshot.civil_report.as_ref();

    let lifestyle = lifestyle_score(
        property.location_score,
        property.amenities_score,
        defaults.missing_score,
    );
    let investment = investment_score(
        valuation.and_then(|v| v.financial_analysis.rental_yield),
        civil.and_then(|c| c.overall_score),
        property.overall_score,
        defaults.default_investment_score,
    );
    let overall = property_score(
        property.location_score,
        property.amenities_score,
        property.value_score,
        defaults.missing_score,
    );

    // Step 4: Report-backed figures
    let cost = valuation
        .map(|v| summarize_costs(&v.cost_breakdown, defaults.price_precision))
        .transpose()?;
    let rental = match valuation {
        Some(v) => summarize_rental(&v.financial_analysis, cost.as_ref().map(|c| c.total))?,
        None => None,
    };

    info!(
        "Derived insights for property {} (lifestyle: {:.2}, investment: {:.2})",
        property.id, lifestyle, investment
    );

    Ok(PropertyInsights {
        property_id: property.id,
        configurations,
        available_count: available_configurations(&snapshot.configurations).len(),
        price_range,
        price_display,
        starting_emi,
        loan,
        projected_value_five_years,
        market_position,
        lifestyle_score: lifestyle,
        investment_score: investment,
        property_score: overall,
        cost,
        rental,
        civil_recommendation: civil.and_then(|c| c.investment_recommendation),
        valuation_recommendation: valuation.and_then(|v| v.investment_recommendation),
        overall_risk: valuation.and_then(|v| v.risk_assessment.overall_risk),
    })
}

/// Similar listings for the snapshot's property
pub fn similar_properties<'a>(
    snapshot: &PropertySnapshot,
    candidates: &'a [Property],
    defaults: &DerivationDefaults,
) -> Vec<&'a Property> {
    rank_similar(
        &snapshot.property,
        !snapshot.configurations.is_empty(),
        candidates,
        defaults.similar_top_n,
    )
}
