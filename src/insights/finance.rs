//! Financial derivations - EMI, rental yield, cost totals, appreciation, ROI
//! Pure functions, each rejects negative/NaN/zero-denominator input

use crate::error::{non_negative, positive, InsightError, Result};
use crate::insights::types::{CostBreakdown, CostComponents, HiddenCost, LoanEligibility};

/// Appreciation over five years used across listing pages (1.65×)
pub const DEFAULT_FIVE_YEAR_APPRECIATION: f64 = 0.65;
pub const DEFAULT_DOWN_PAYMENT_FRACTION: f64 = 0.15;
pub const DEFAULT_LOAN_TERM_YEARS: f64 = 25.0;

const COST_EPSILON: f64 = 1e-6;

fn fraction(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(InsightError::financial(field, value))
    }
}

/// Monthly installment estimate, rounded to whole rupees (half away from zero).
///
/// `principal × (1 − down_payment) / (term_years × 12)`
///
/// This is a straight-line split with no interest; it is NOT an amortized
/// EMI. Listing pages have always shown this figure, so it is kept as is.
pub fn emi(principal: f64, down_payment_fraction: f64, term_years: f64) -> Result<f64> {
    let principal = non_negative("principal", principal)?;
    let down_payment = fraction("downPaymentFraction", down_payment_fraction)?;
    let term_years = positive("termYears", term_years)?;

    let financed = principal * (1.0 - down_payment);
    Ok((financed / (term_years * 12.0)).round())
}

pub fn annual_rental_income(monthly_rent: f64) -> Result<f64> {
    Ok(non_negative("monthlyRent", monthly_rent)? * 12.0)
}

/// Gross yield as a ratio (0.042 = 4.2%)
pub fn gross_rental_yield(annual_rental_income: f64, property_value: f64) -> Result<f64> {
    let income = non_negative("annualRentalIncome", annual_rental_income)?;
    let value = positive("propertyValue", property_value)?;
    Ok(income / value)
}

/// Monthly rent implied by a yield ratio
pub fn monthly_rent_from_yield(property_value: f64, yield_ratio: f64) -> Result<f64> {
    let value = non_negative("propertyValue", property_value)?;
    let ratio = non_negative("yieldRatio", yield_ratio)?;
    Ok(value * ratio / 12.0)
}

/// Sum of the ten fixed cost heads plus every hidden cost
pub fn total_cost_breakdown(
    components: &CostComponents,
    hidden_costs: &[HiddenCost],
) -> Result<f64> {
    let fixed = components
        .entries()
        .into_iter()
        .try_fold(0.0, |sum, (field, amount)| {
            Ok::<_, InsightError>(sum + non_negative(field, amount)?)
        })?;

    let hidden = hidden_costs.iter().try_fold(0.0, |sum, cost| {
        Ok::<_, InsightError>(sum + non_negative("hiddenCosts.amount", cost.amount)?)
    })?;

    Ok(fixed + hidden)
}

impl CostBreakdown {
    /// The breakdown with its total rebuilt from the parts
    pub fn recomputed(self) -> Result<CostBreakdown> {
        let total = total_cost_breakdown(&self.components, &self.hidden_costs)?;
        Ok(CostBreakdown {
            total_estimated_cost: total,
            ..self
        })
    }

    /// Stored total disagrees with the parts
    pub fn has_drifted(&self) -> bool {
        match total_cost_breakdown(&self.components, &self.hidden_costs) {
            Ok(total) => (total - self.total_estimated_cost).abs() > COST_EPSILON,
            Err(_) => true,
        }
    }
}

/// Value after appreciating by `rate` (0.65 -> 1.65×)
pub fn five_year_appreciation(current_price: f64, rate: f64) -> Result<f64> {
    let price = non_negative("currentPrice", current_price)?;
    let rate = non_negative("appreciationRate", rate)?;
    Ok(price * (1.0 + rate))
}

/// Loan amount, down payment and EMI for a property value
pub fn loan_eligibility(
    property_value: f64,
    down_payment_fraction: f64,
    term_years: f64,
) -> Result<LoanEligibility> {
    let value = non_negative("propertyValue", property_value)?;
    let down_payment = fraction("downPaymentFraction", down_payment_fraction)?;
    let emi_estimate = emi(value, down_payment, term_years)?;

    Ok(LoanEligibility {
        max_loan_amount: value * (1.0 - down_payment),
        suggested_down_payment: value * down_payment,
        emi_estimate,
    })
}

/// Years of rent needed to recover the total cost
pub fn break_even_years(total_cost: f64, annual_rental_income: f64) -> Result<f64> {
    let cost = non_negative("totalCost", total_cost)?;
    let income = positive("annualRentalIncome", annual_rental_income)?;
    Ok(cost / income)
}

/// Total return ratio: (projected value + rent collected − cost) / cost
pub fn total_roi(total_cost: f64, projected_value: f64, cumulative_rent: f64) -> Result<f64> {
    let cost = positive("totalCost", total_cost)?;
    let value = non_negative("projectedValue", projected_value)?;
    let rent = non_negative("cumulativeRent", cumulative_rent)?;
    Ok((value + rent - cost) / cost)
}
