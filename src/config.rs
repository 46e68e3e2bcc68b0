//! Derivation defaults - every fallback constant in one overridable place

use crate::insights::finance::{
    DEFAULT_DOWN_PAYMENT_FRACTION, DEFAULT_FIVE_YEAR_APPRECIATION, DEFAULT_LOAN_TERM_YEARS,
};
use crate::insights::format::DEFAULT_PRICE_PRECISION;
use crate::insights::pricing::PriceFallback;
use crate::insights::scoring::DEFAULT_INVESTMENT_SCORE;
use crate::insights::similarity::DEFAULT_TOP_N;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Values the derivation pass uses where data is missing or a rate is assumed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivationDefaults {
    pub price_precision: u32,
    pub price_fallback: PriceFallback,
    pub default_investment_score: f64,
    pub five_year_appreciation_rate: f64,
    pub down_payment_fraction: f64,
    pub loan_term_years: f64,
    pub missing_score: f64,
    pub similar_top_n: usize,
}

impl Default for DerivationDefaults {
    fn default() -> Self {
        DerivationDefaults {
            price_precision: DEFAULT_PRICE_PRECISION,
            price_fallback: PriceFallback::default(),
            default_investment_score: DEFAULT_INVESTMENT_SCORE,
            five_year_appreciation_rate: DEFAULT_FIVE_YEAR_APPRECIATION,
            down_payment_fraction: DEFAULT_DOWN_PAYMENT_FRACTION,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            missing_score: 0.0,
            similar_top_n: DEFAULT_TOP_N,
        }
    }
}

impl DerivationDefaults {
    /// Load overrides from environment variables (call `dotenvy::dotenv()` first)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load overrides through any key lookup; unset keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = DerivationDefaults::default();

        let defaults = DerivationDefaults {
            price_precision: parse_or(&lookup, "PRICE_PRECISION", base.price_precision)?,
            price_fallback: PriceFallback {
                price_per_sqft: parse_or(
                    &lookup,
                    "FALLBACK_PRICE_PER_SQFT",
                    base.price_fallback.price_per_sqft,
                )?,
                built_up_area: parse_or(
                    &lookup,
                    "FALLBACK_BUILT_UP_AREA",
                    base.price_fallback.built_up_area,
                )?,
            },
            default_investment_score: parse_or(
                &lookup,
                "DEFAULT_INVESTMENT_SCORE",
                base.default_investment_score,
            )?,
            five_year_appreciation_rate: parse_or(
                &lookup,
                "FIVE_YEAR_APPRECIATION_RATE",
                base.five_year_appreciation_rate,
            )?,
            down_payment_fraction: parse_or(
                &lookup,
                "DOWN_PAYMENT_FRACTION",
                base.down_payment_fraction,
            )?,
            loan_term_years: parse_or(&lookup, "LOAN_TERM_YEARS", base.loan_term_years)?,
            missing_score: parse_or(&lookup, "MISSING_SCORE", base.missing_score)?,
            similar_top_n: parse_or(&lookup, "SIMILAR_TOP_N", base.similar_top_n)?,
        };

        defaults.validate()?;
        Ok(defaults)
    }

    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("FALLBACK_PRICE_PER_SQFT", self.price_fallback.price_per_sqft),
            ("FALLBACK_BUILT_UP_AREA", self.price_fallback.built_up_area),
            ("DEFAULT_INVESTMENT_SCORE", self.default_investment_score),
            ("FIVE_YEAR_APPRECIATION_RATE", self.five_year_appreciation_rate),
            ("DOWN_PAYMENT_FRACTION", self.down_payment_fraction),
            ("LOAN_TERM_YEARS", self.loan_term_years),
            ("MISSING_SCORE", self.missing_score),
        ];
        if let Some((key, value)) = numbers.iter().find(|(_, value)| !value.is_finite()) {
            anyhow::bail!("{} must be a finite number, got {}", key, value);
        }

        if self.price_precision > 8 {
            anyhow::bail!("PRICE_PRECISION must be at most 8, got {}", self.price_precision);
        }
        if !(self.price_fallback.price_per_sqft > 0.0 && self.price_fallback.built_up_area > 0.0) {
            anyhow::bail!("Fallback price per sqft and built-up area must be positive");
        }
        if !(0.0..=1.0).contains(&self.down_payment_fraction) {
            anyhow::bail!(
                "DOWN_PAYMENT_FRACTION must be between 0 and 1, got {}",
                self.down_payment_fraction
            );
        }
        if !(self.loan_term_years > 0.0) {
            anyhow::bail!("LOAN_TERM_YEARS must be positive, got {}", self.loan_term_years);
        }
        if !(self.five_year_appreciation_rate >= 0.0) {
            anyhow::bail!(
                "FIVE_YEAR_APPRECIATION_RATE must be non-negative, got {}",
                self.five_year_appreciation_rate
            );
        }
        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number, got {:?}", key, raw)),
        None => Ok(default),
    }
}
