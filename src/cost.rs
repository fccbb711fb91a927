//! Per-call cost estimation from input length.
//!
//! Both backends price by characters, so the estimate is a pure function of
//! the text and a [`CostRate`].  Length is counted in Unicode scalar values,
//! not bytes, to match how the services bill.

use crate::config::CostRate;

/// Estimated price of one backend call, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostEstimate {
    pub amount: f64,
}

impl CostEstimate {
    /// Estimate the cost of sending `text` at `rate`.
    pub fn for_text(text: &str, rate: CostRate) -> Self {
        Self {
            amount: estimate_cost(text, rate.rate_per_unit, rate.unit_size),
        }
    }

    /// Render as a dollar amount with `precision` decimal places.
    ///
    /// ```
    /// use moderation_compare::cost::CostEstimate;
    ///
    /// let c = CostEstimate { amount: 0.000115 };
    /// assert_eq!(c.display(10), "$0.0001150000");
    /// ```
    pub fn display(&self, precision: usize) -> String {
        format!("${:.*}", precision, self.amount)
    }
}

/// `(chars(text) / unit_size) * rate_per_unit`.
///
/// Total for every input; the empty string costs `0.0`.
pub fn estimate_cost(text: &str, rate_per_unit: f64, unit_size: f64) -> f64 {
    (text.chars().count() as f64 / unit_size) * rate_per_unit
}
