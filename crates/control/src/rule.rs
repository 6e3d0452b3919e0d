//! Conditions and rules
//!
//! A [`Condition`] fuzzifies one normalized error term through a
//! membership function; a [`Rule`] combines two conditions with a fuzzy
//! operator into a firing strength and a signed Sugeno singleton output.

use serde::{Deserialize, Serialize};

use flcore::{ConfigError, ErrorTerm, ErrorTrack, FuzzyOp, MembershipFunction};

/// Binds a membership function to one of the tracked error terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub mf: MembershipFunction,
    pub term: ErrorTerm,
}

impl Condition {
    pub fn new(mf: MembershipFunction, term: ErrorTerm) -> Self {
        Self { mf, term }
    }

    /// Membership degree of the current tick's normalized term.
    pub fn evaluate(&self, track: &ErrorTrack) -> f64 {
        self.mf.evaluate(track.normalized(self.term))
    }
}

/// Sign applied to a rule's singleton output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
    /// The rule contributes firing strength to the defuzzification
    /// denominator but asserts no output of its own.
    Zero,
}

/// Result of firing one rule for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleActivation {
    /// Combined membership degree, used as the defuzzification weight.
    pub strength: f64,
    /// Weight- and polarity-scaled singleton contribution.
    pub signed_output: f64,
}

/// One fuzzy inference rule: two conditions, an operator, a non-negative
/// weight and an output polarity. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    a: Condition,
    b: Condition,
    op: FuzzyOp,
    weight: f64,
    polarity: Polarity,
}

impl Rule {
    pub fn new(
        a: Condition,
        b: Condition,
        op: FuzzyOp,
        weight: f64,
        polarity: Polarity,
    ) -> Result<Self, ConfigError> {
        if !weight.is_finite() {
            return Err(ConfigError::NonFinite { name: "rule weight", value: weight });
        }
        if weight < 0.0 {
            return Err(ConfigError::NegativeWeight(weight));
        }
        Ok(Self { a, b, op, weight, polarity })
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Fire the rule against the current error state.
    pub fn evaluate(&self, track: &ErrorTrack) -> RuleActivation {
        let strength = self.op.combine(self.a.evaluate(track), self.b.evaluate(track));
        let signed_output = match self.polarity {
            Polarity::Positive => strength * self.weight,
            Polarity::Negative => -(strength * self.weight),
            Polarity::Zero => 0.0,
        };
        RuleActivation { strength, signed_output }
    }
}
