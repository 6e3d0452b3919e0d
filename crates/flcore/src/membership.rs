//! Membership functions
//!
//! Pure evaluators mapping a normalized scalar in [-1, 1] to a degree of
//! membership in [0, 1]. The function set is fixed and small, so it is a
//! closed enum rather than a trait object; instances are plain values that
//! can be copied into every rule that needs them.

use serde::{Deserialize, Serialize};

/// Default Gaussian width used by the standard rule table.
pub const DEFAULT_GAUSSIAN_SIGMA: f64 = 0.3;

/// A membership function over the normalized input domain [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MembershipFunction {
    /// Rising ramp: 0 at x = -1, 1 at x = +1.
    LinearPositive,
    /// Falling ramp: 1 at x = -1, 0 at x = +1.
    LinearNegative,
    /// Bell curve centered on `mean`, peak value exactly 1.
    Gaussian { mean: f64, sigma: f64 },
    /// Cubic-blended rising ramp, soft saturation near the bounds.
    NonlinearPositive,
    /// Cubic-blended falling ramp.
    NonlinearNegative,
}

impl MembershipFunction {
    /// Gaussian with the default width, centered at zero.
    pub fn gaussian() -> Self {
        MembershipFunction::Gaussian {
            mean: 0.0,
            sigma: DEFAULT_GAUSSIAN_SIGMA,
        }
    }

    /// Evaluate the membership degree at a normalized point `x`.
    ///
    /// Total over all real inputs: out-of-domain values saturate rather
    /// than panic or produce NaN.
    pub fn evaluate(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::LinearPositive => ((x + 1.0) / 2.0).clamp(0.0, 1.0),
            MembershipFunction::LinearNegative => ((1.0 - x) / 2.0).clamp(0.0, 1.0),
            MembershipFunction::Gaussian { mean, sigma } => {
                if sigma == 0.0 {
                    // Degenerate width: indicator at the mean, not NaN
                    return if x == mean { 1.0 } else { 0.0 };
                }
                let d = x - mean;
                (-(d * d) / (2.0 * sigma * sigma)).exp()
            }
            MembershipFunction::NonlinearPositive => (x * x * x + x) / 2020.0 + 0.5,
            MembershipFunction::NonlinearNegative => (-x * x * x - x) / 2020.0 + 0.5,
        }
    }

    /// Normalize `x / max` into [-1, 1], then evaluate.
    ///
    /// Returns 0 for a non-positive `max` (degenerate domain).
    pub fn evaluate_normalized(&self, x: f64, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        self.evaluate((x / max).clamp(-1.0, 1.0))
    }
}
