//! Error kinds produced by the derivation functions

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InsightError>;

/// Every derivation either returns a value or exactly one of these.
/// Callers decide the user-visible fallback text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    #[error("Invalid amount: {0} (must be finite and non-negative)")]
    InvalidAmount(f64),

    #[error("Incomplete configuration {label:?}: {field} must be a positive number")]
    IncompleteConfiguration { label: String, field: &'static str },

    #[error("No configurations to compute a price range from")]
    NoConfigurations,

    #[error("Invalid financial input: {field} = {value}")]
    InvalidFinancialInput { field: &'static str, value: f64 },
}

impl InsightError {
    pub(crate) fn financial(field: &'static str, value: f64) -> Self {
        InsightError::InvalidFinancialInput { field, value }
    }
}

/// Reject NaN, infinities and negatives
pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(InsightError::financial(field, value))
    }
}

/// Reject anything that is not a finite number above zero (denominators)
pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(InsightError::financial(field, value))
    }
}
