//! Price formatting in Indian units (lakh / crore)

use crate::error::{InsightError, Result};
use crate::insights::pricing::PriceRange;
use rust_decimal::{Decimal, RoundingStrategy};

pub const LAKH: f64 = 100_000.0;
pub const CRORE: f64 = 10_000_000.0;

/// Decimal places used when a caller has no preference
pub const DEFAULT_PRICE_PRECISION: u32 = 2;

const MAX_PRECISION: u32 = 8;

/// Format a rupee amount for display
///
/// - `>= 1 Cr` -> `"₹2.80 Cr"`
/// - `>= 1 L`  -> `"₹85.50 L"`
/// - otherwise whole rupees with grouping, `"₹45,000"`
///
/// `precision` applies to the Cr and L forms.
pub fn format_price(amount: f64, precision: u32) -> Result<String> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(InsightError::InvalidAmount(amount));
    }

    // fold -0.0 into 0.0
    let amount = amount + 0.0;
    let precision = precision.min(MAX_PRECISION);
    let value = match Decimal::from_f64_retain(amount) {
        Some(value) => value,
        // beyond Decimal's range (~7.9e28), only the Cr form applies
        None => return Ok(format!("₹{:.*} Cr", precision as usize, amount / CRORE)),
    };

    if amount >= CRORE {
        let crores = round_half_up(value / Decimal::from(10_000_000), precision);
        Ok(format!("₹{:.*} Cr", precision as usize, crores))
    } else if amount >= LAKH {
        let lakhs = round_half_up(value / Decimal::from(100_000), precision);
        Ok(format!("₹{:.*} L", precision as usize, lakhs))
    } else {
        let rupees = round_half_up(value, 0);
        Ok(format!("₹{}", group_indian(&rupees.trunc().to_string())))
    }
}

/// `"₹85 L - ₹1.2 Cr"`, or a single price when min == max
pub fn format_price_range(range: &PriceRange, precision: u32) -> Result<String> {
    let min = format_price(range.min, precision)?;
    if range.is_single() {
        return Ok(min);
    }
    let max = format_price(range.max, precision)?;
    Ok(format!("{} - {}", min, max))
}

/// Ratio to percentage text, 0.0425 -> "4.25%"
pub fn format_percentage(ratio: f64, precision: u32) -> Result<String> {
    let value = Decimal::from_f64_retain(ratio)
        .filter(|_| ratio.is_finite())
        .ok_or(InsightError::InvalidAmount(ratio))?;
    let precision = precision.min(MAX_PRECISION);
    match value.checked_mul(Decimal::from(100)) {
        Some(pct) => Ok(format!("{:.*}%", precision as usize, round_half_up(pct, precision))),
        None => Ok(format!("{:.*}%", precision as usize, ratio * 100.0)),
    }
}

fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Indian digit grouping: last three digits, then pairs (12,34,567)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = left;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crore_format() {
        // Test precision controls the decimals shown
        assert_eq!(format_price(28_000_000.0, 1).unwrap(), "₹2.8 Cr");
        assert_eq!(format_price(28_000_000.0, 2).unwrap(), "₹2.80 Cr");
        assert_eq!(format_price(15_000_000.0, 0).unwrap(), "₹2 Cr"); // 1.5 rounds up
    }

    #[test]
    fn test_lakh_format() {
        // Test lakh amounts keep trailing zeros
        assert_eq!(format_price(8_550_000.0, 2).unwrap(), "₹85.50 L");
        assert_eq!(format_price(100_000.0, 1).unwrap(), "₹1.0 L");
    }

    #[test]
    fn test_crore_boundary() {
        // Test just under a crore stays in lakhs even when it rounds to 100
        let below = format_price(9_999_999.0, DEFAULT_PRICE_PRECISION).unwrap();
        assert!(below.ends_with(" L"), "got {}", below);
        assert_eq!(below, "₹100.00 L");

        // Test exactly one crore switches unit
        let at = format_price(10_000_000.0, DEFAULT_PRICE_PRECISION).unwrap();
        assert_eq!(at, "₹1.00 Cr");
    }

    #[test]
    fn test_small_amounts_grouped() {
        // Test whole rupees with Indian grouping below one lakh
        assert_eq!(format_price(45_000.0, 2).unwrap(), "₹45,000");
        assert_eq!(format_price(999.0, 2).unwrap(), "₹999");
        assert_eq!(format_price(0.0, 2).unwrap(), "₹0");
        assert_eq!(format_price(99_999.4, 2).unwrap(), "₹99,999");
    }

    #[test]
    fn test_invalid_amounts() {
        // Test negative and non-finite amounts are rejected
        assert_eq!(format_price(-1.0, 2), Err(InsightError::InvalidAmount(-1.0)));
        assert!(format_price(f64::NAN, 2).is_err());
        assert!(format_price(f64::INFINITY, 2).is_err());
    }

    #[test]
    fn test_format_is_idempotent() {
        for amount in [0.0, 12_345.0, 7_654_321.0, 123_456_789.0] {
            // Test same input, same text
            assert_eq!(format_price(amount, 2), format_price(amount, 2));
        }
    }

    #[test]
    fn test_group_indian() {
        // Test last three digits, then pairs
        assert_eq!(group_indian("1234"), "1,234");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_price_range_format() {
        let range = PriceRange {
            min: 8_500_000.0,
            max: 12_000_000.0,
        };
        // Test ends in different units
        assert_eq!(format_price_range(&range, 1).unwrap(), "₹85.0 L - ₹1.2 Cr");

        let single = PriceRange {
            min: 10_200_000.0,
            max: 10_200_000.0,
        };
        // Test a single price is not shown as a range
        assert_eq!(format_price_range(&single, 2).unwrap(), "₹1.02 Cr");
    }

    #[test]
    fn test_percentage_format() {
        // Test ratio to percent
        assert_eq!(format_percentage(0.0425, 2).unwrap(), "4.25%");
        assert_eq!(format_percentage(0.05, 1).unwrap(), "5.0%");
        assert!(format_percentage(f64::NAN, 1).is_err());
    }

    #[test]
    fn test_amounts_beyond_decimal_range() {
        let huge = format_price(1e29, 2).unwrap();
        // Test a finite amount too large for Decimal still formats in crores
        assert!(huge.ends_with(" Cr"), "got {}", huge);

        // Test the largest finite f64 is still a valid amount
        assert!(format_price(f64::MAX, 0).is_ok());
    }

    #[test]
    fn test_percentage_beyond_decimal_range() {
        // Test a ratio whose percentage overflows Decimal does not panic
        let pct = format_percentage(1e27, 0).unwrap();
        assert!(pct.ends_with('%'), "got {}", pct);
    }
}
