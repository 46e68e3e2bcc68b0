//! Configuration price resolution - total price is always rate × area

use crate::error::{non_negative, positive, InsightError, Result};
use crate::insights::types::PropertyConfiguration;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Historical page fallbacks for configurations with no rate or area
pub const FALLBACK_PRICE_PER_SQFT: f64 = 12_000.0;
pub const FALLBACK_BUILT_UP_AREA: f64 = 1_200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    pub total_price: f64,
    pub price_per_sqft: f64,
    pub area: f64,
    /// True when a fallback value stood in for a missing input
    pub estimated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// A single configuration (or identical prices) is shown as one price
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

/// Values used in place of missing configuration inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFallback {
    pub price_per_sqft: f64,
    pub built_up_area: f64,
}

impl Default for PriceFallback {
    fn default() -> Self {
        PriceFallback {
            price_per_sqft: FALLBACK_PRICE_PER_SQFT,
            built_up_area: FALLBACK_BUILT_UP_AREA,
        }
    }
}

/// Where a unit's rate sits against an average price band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarketPosition {
    Below,
    Within,
    Above,
}

fn positive_input(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Derive a configuration's total price from its rate and area.
/// The stored `price` field is ignored.
pub fn resolve_config_price(config: &PropertyConfiguration) -> Result<ResolvedPrice> {
    let incomplete = |field| InsightError::IncompleteConfiguration {
        label: config.configuration.clone(),
        field,
    };

    let price_per_sqft =
        positive_input(config.price_per_sqft).ok_or_else(|| incomplete("pricePerSqft"))?;
    let area = positive_input(config.built_up_area).ok_or_else(|| incomplete("builtUpArea"))?;

    Ok(ResolvedPrice {
        total_price: price_per_sqft * area,
        price_per_sqft,
        area,
        estimated: false,
    })
}

/// Same as `resolve_config_price`, substituting caller-supplied values for
/// missing or non-positive inputs. Fails only if the fallback itself is unusable.
pub fn resolve_config_price_with_fallback(
    config: &PropertyConfiguration,
    fallback: &PriceFallback,
) -> Result<ResolvedPrice> {
    let rate = positive_input(config.price_per_sqft);
    let area = positive_input(config.built_up_area);

    if let (Some(_), Some(_)) = (rate, area) {
        return resolve_config_price(config);
    }

    debug!(
        "Configuration {:?} missing inputs (rate: {:?}, area: {:?}), using fallback",
        config.configuration, config.price_per_sqft, config.built_up_area
    );

    let patched = PropertyConfiguration {
        price_per_sqft: rate.or(Some(fallback.price_per_sqft)),
        built_up_area: area.or(Some(fallback.built_up_area)),
        ..config.clone()
    };

    let resolved = resolve_config_price(&patched)?;
    Ok(ResolvedPrice {
        estimated: true,
        ..resolved
    })
}

/// Min/max resolved total price across a property's configurations
pub fn resolve_price_range(configs: &[PropertyConfiguration]) -> Result<PriceRange> {
    let prices = configs
        .iter()
        .map(|c| resolve_config_price(c).map(|r| r.total_price))
        .collect::<Result<Vec<_>>>()?;

    range_of(&prices)
}

/// Price range over already-resolved prices
pub fn range_of(prices: &[f64]) -> Result<PriceRange> {
    let (first, rest) = prices.split_first().ok_or(InsightError::NoConfigurations)?;

    Ok(rest.iter().fold(
        PriceRange {
            min: *first,
            max: *first,
        },
        |range, &price| PriceRange {
            min: range.min.min(price),
            max: range.max.max(price),
        },
    ))
}

/// Configurations a buyer can still book
pub fn available_configurations(configs: &[PropertyConfiguration]) -> Vec<&PropertyConfiguration> {
    configs
        .iter()
        .filter(|c| c.availability_status.map_or(true, |s| s.is_purchasable()))
        .collect()
}

/// Compare a per-sqft rate against an average band (area or city)
pub fn market_position(
    price_per_sqft: f64,
    band_min: f64,
    band_max: f64,
) -> Result<MarketPosition> {
    positive("pricePerSqft", price_per_sqft)?;
    non_negative("bandMin", band_min)?;
    non_negative("bandMax", band_max)?;
    if band_min > band_max {
        return Err(InsightError::financial("bandMin", band_min));
    }

    Ok(if price_per_sqft < band_min {
        MarketPosition::Below
    } else if price_per_sqft > band_max {
        MarketPosition::Above
    } else {
        MarketPosition::Within
    })
}
