//! Savings account remuneration under the Brazilian piecewise rule

use crate::core::series::Observation;

/// Fixed monthly remuneration paid while SELIC is above the threshold, in
/// percent.
pub const BASE_MONTHLY_RATE: f64 = 0.5;

/// Annualized SELIC level that selects the remuneration branch, in percent.
pub const SELIC_THRESHOLD: f64 = 8.5;

/// Fraction of the annualized SELIC paid at or below the threshold.
pub const SELIC_FRACTION: f64 = 0.7;

/// Projects the annual savings account yield from the annualized SELIC and
/// the accumulated TR, both in percent on the 0..100 scale.
///
/// Above the threshold the deposit pays the fixed monthly rate compounded
/// over twelve months; at or below it, a fraction of SELIC. TR is added on
/// top in either branch. Callers must supply rates already in 0..100 form;
/// no scale conversion happens here.
pub fn annual_savings_yield(selic_annual: f64, tr_annual: f64) -> f64 {
    let base = if selic_annual > SELIC_THRESHOLD {
        ((1.0 + BASE_MONTHLY_RATE / 100.0).powi(12) - 1.0) * 100.0
    } else {
        selic_annual * SELIC_FRACTION
    };
    base + tr_annual
}

/// The two fetched observations plus the yield derived from them.
#[derive(Debug, Clone)]
pub struct SavingsProjection {
    pub selic: Observation,
    pub tr: Observation,
    pub projected_yield: f64,
}

impl SavingsProjection {
    pub fn from_observations(selic: Observation, tr: Observation) -> Self {
        let projected_yield = annual_savings_yield(selic.value, tr.value);
        SavingsProjection {
            selic,
            tr,
            projected_yield,
        }
    }
}
