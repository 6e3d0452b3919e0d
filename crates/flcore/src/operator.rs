//! Fuzzy operators
//!
//! Combine two membership degrees into one firing strength. All variants
//! are pure and never panic; inputs are not validated.

use serde::{Deserialize, Serialize};

/// Binary fuzzy operator applied to two membership degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FuzzyOp {
    /// Algebraic product `a * b`
    #[default]
    Product,
    /// Minimum `min(a, b)`
    And,
    /// Maximum `max(a, b)`
    Or,
    /// Plain sum `a + b`
    Sum,
    /// Bounded sum `min(1, a + b)`
    BoundedSum,
    /// Bounded difference `max(0, a + b - 1)`
    BoundedDiff,
}

impl FuzzyOp {
    /// Combine two membership degrees into a firing strength.
    pub fn combine(&self, a: f64, b: f64) -> f64 {
        match self {
            FuzzyOp::Product => a * b,
            FuzzyOp::And => a.min(b),
            FuzzyOp::Or => a.max(b),
            FuzzyOp::Sum => a + b,
            FuzzyOp::BoundedSum => (a + b).min(1.0),
            FuzzyOp::BoundedDiff => (a + b - 1.0).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product() {
        assert!((FuzzyOp::Product.combine(0.5, 0.4) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn and_takes_minimum() {
        assert_eq!(FuzzyOp::And.combine(0.3, 0.8), 0.3);
        assert_eq!(FuzzyOp::And.combine(0.9, 0.2), 0.2);
    }

    #[test]
    fn or_takes_maximum() {
        assert_eq!(FuzzyOp::Or.combine(0.3, 0.8), 0.8);
    }

    #[test]
    fn bounded_sum_caps_at_one() {
        assert!((FuzzyOp::Sum.combine(0.7, 0.6) - 1.3).abs() < 1e-12);
        assert_eq!(FuzzyOp::BoundedSum.combine(0.7, 0.6), 1.0);
        assert!((FuzzyOp::BoundedSum.combine(0.2, 0.3) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn bounded_diff_floors_at_zero() {
        assert_eq!(FuzzyOp::BoundedDiff.combine(0.2, 0.3), 0.0);
        assert!((FuzzyOp::BoundedDiff.combine(0.7, 0.6) - 0.3).abs() < 1e-12);
    }
}
