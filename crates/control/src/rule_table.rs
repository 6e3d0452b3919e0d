//! Standard rule table
//!
//! The fixed eight-rule table used by the stock controller: paired
//! positive/negative rules for the P, D and I groups plus a Gaussian
//! overshoot-damping group, with one weight per group.

use serde::{Deserialize, Serialize};

use flcore::{ErrorTerm, FuzzyOp, MembershipFunction};

use crate::rule::{Condition, Polarity, Rule};

/// Per-group rule weights: `[P, D, I, overshoot]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RuleWeights(pub [f64; 4]);

impl Default for RuleWeights {
    fn default() -> Self {
        RuleWeights([1.0, 1.0, 1.0, 1.0])
    }
}

impl RuleWeights {
    /// Steady-state hold: strong damping and overshoot suppression.
    pub fn hold() -> Self {
        RuleWeights([1.0, 0.35, 1.0, 0.7])
    }

    /// Setpoint transition: aggressive proportional action, no
    /// overshoot group.
    pub fn transition() -> Self {
        RuleWeights([1.3, 0.15, 1.0, 0.0])
    }
}

/// Build the standard eight-rule table with the given group weights.
///
/// All rules combine with the algebraic product. Weights are non-negative
/// by construction of [`RuleWeights`] presets; a caller-supplied negative
/// weight surfaces as a `ConfigError` from [`Rule::new`] here.
pub fn standard_rules(weights: RuleWeights) -> Result<Vec<Rule>, flcore::ConfigError> {
    let [w_p, w_d, w_i, w_over] = weights.0;

    let pos = MembershipFunction::LinearPositive;
    let neg = MembershipFunction::LinearNegative;
    let gauss = MembershipFunction::gaussian();

    let cond = Condition::new;
    let rules = vec![
        // P group: error and its trend agree
        Rule::new(
            cond(neg, ErrorTerm::P),
            cond(neg, ErrorTerm::D),
            FuzzyOp::Product,
            w_p,
            Polarity::Negative,
        )?,
        Rule::new(
            cond(pos, ErrorTerm::P),
            cond(pos, ErrorTerm::D),
            FuzzyOp::Product,
            w_p,
            Polarity::Positive,
        )?,
        // D group: trend opposes the error, damp the correction
        Rule::new(
            cond(neg, ErrorTerm::P),
            cond(pos, ErrorTerm::D),
            FuzzyOp::Product,
            w_d,
            Polarity::Positive,
        )?,
        Rule::new(
            cond(pos, ErrorTerm::P),
            cond(neg, ErrorTerm::D),
            FuzzyOp::Product,
            w_d,
            Polarity::Negative,
        )?,
        // I group: sustained accumulated error
        Rule::new(
            cond(neg, ErrorTerm::P),
            cond(neg, ErrorTerm::I),
            FuzzyOp::Product,
            w_i,
            Polarity::Negative,
        )?,
        Rule::new(
            cond(pos, ErrorTerm::P),
            cond(pos, ErrorTerm::I),
            FuzzyOp::Product,
            w_i,
            Polarity::Positive,
        )?,
        // Overshoot group: near zero error, brake against the trend
        Rule::new(
            cond(gauss, ErrorTerm::P),
            cond(pos, ErrorTerm::D),
            FuzzyOp::Product,
            w_over,
            Polarity::Positive,
        )?,
        Rule::new(
            cond(gauss, ErrorTerm::P),
            cond(neg, ErrorTerm::D),
            FuzzyOp::Product,
            w_over,
            Polarity::Negative,
        )?,
    ];
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{FlcConfig, FlController};
    use flcore::NormMode;

    fn controller(weights: RuleWeights) -> FlController {
        FlController::new(FlcConfig::new(NormMode::range(-100.0, 100.0)))
            .unwrap()
            .with_rules(standard_rules(weights).unwrap())
    }

    #[test]
    fn builds_eight_rules() {
        assert_eq!(standard_rules(RuleWeights::default()).unwrap().len(), 8);
    }

    #[test]
    fn equal_weights_balance_at_origin() {
        let mut flc = controller(RuleWeights::default());
        assert_eq!(flc.evaluate(0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn output_sign_follows_error() {
        let mut flc = controller(RuleWeights::hold());
        // Below setpoint: positive error, controller drives up
        assert!(flc.evaluate(20.0, 50.0, 1.0) > 0.0);

        flc.reset();
        // Above setpoint: negative error, controller drives down
        assert!(flc.evaluate(80.0, 50.0, 1.0) < 0.0);
    }

    #[test]
    fn transition_weights_hit_harder_than_hold() {
        let mut hold = controller(RuleWeights::hold());
        let mut transition = controller(RuleWeights::transition());
        let (h, t) = (hold.evaluate(0.0, 60.0, 1.0), transition.evaluate(0.0, 60.0, 1.0));
        assert!(t > h, "transition {t} should exceed hold {h}");
    }

    #[test]
    fn sustained_error_engages_integral_group() {
        let mut flc = controller(RuleWeights::default());
        let first = flc.evaluate(40.0, 50.0, 1.0);
        let mut last = first;
        for _ in 0..10 {
            last = flc.evaluate(40.0, 50.0, 1.0);
        }
        // Integral windup under constant error pushes the output further
        assert!(last > first, "last {last} should exceed first {first}");
    }
}
