//! Error tracking
//!
//! Maintains the proportional/integral/derivative error state of a
//! closed-loop controller across ticks, and exposes each term normalized
//! into [-1, 1] for downstream membership evaluation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Selects one of the three tracked error terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorTerm {
    P,
    I,
    D,
}

/// Normalization scheme mapping physical-unit error terms into [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NormMode {
    /// Per-term symmetric limits: `clamp(x / |limit|, -1, 1)`.
    /// All limits must be positive.
    Limits { p: f64, i: f64, d: f64 },
    /// Shared min/max range: `((x - min) / (max - min)) * 2 - 1`, clamped.
    /// Requires `min < max`.
    Range { min: f64, max: f64 },
}

impl NormMode {
    /// Symmetric per-term limits, the common configuration.
    pub fn limits(p: f64, i: f64, d: f64) -> Self {
        NormMode::Limits { p, i, d }
    }

    /// Shared range for all three terms.
    pub fn range(min: f64, max: f64) -> Self {
        NormMode::Range { min, max }
    }

    /// Reject degenerate configurations before they can reach a tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            NormMode::Limits { p, i, d } => {
                for limit in [p, i, d] {
                    if !limit.is_finite() {
                        return Err(ConfigError::NonFinite { name: "limit", value: limit });
                    }
                    if limit <= 0.0 {
                        return Err(ConfigError::NonPositiveLimit(limit));
                    }
                }
                Ok(())
            }
            NormMode::Range { min, max } => {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(ConfigError::InvalidRange { min, max });
                }
                Ok(())
            }
        }
    }

    fn normalize(&self, term: ErrorTerm, x: f64) -> f64 {
        let n = match *self {
            NormMode::Limits { p, i, d } => {
                let limit = match term {
                    ErrorTerm::P => p,
                    ErrorTerm::I => i,
                    ErrorTerm::D => d,
                };
                x / limit.abs()
            }
            NormMode::Range { min, max } => ((x - min) / (max - min)) * 2.0 - 1.0,
        };
        n.clamp(-1.0, 1.0)
    }

    /// Anti-windup bound on the raw integral accumulator.
    fn integral_bound(&self) -> f64 {
        match *self {
            NormMode::Limits { i, .. } => i.abs(),
            NormMode::Range { min, max } => (max - min) / 2.0,
        }
    }
}

/// P/I/D error state for one controller instance.
///
/// Mutated exactly once per tick, either from a raw error sample
/// ([`ErrorTrack::update_error`]) or from pre-split terms computed by an
/// outer PID stage ([`ErrorTrack::set_terms`]).
#[derive(Debug, Clone)]
pub struct ErrorTrack {
    mode: NormMode,
    error: f64,
    last_error: f64,
    integral: f64,
    derivative: f64,
    started: bool,
}

impl ErrorTrack {
    pub fn new(mode: NormMode) -> Result<Self, ConfigError> {
        mode.validate()?;
        Ok(Self {
            mode,
            error: 0.0,
            last_error: 0.0,
            integral: 0.0,
            derivative: 0.0,
            started: false,
        })
    }

    /// Update from a raw error sample (`setpoint - measured`).
    ///
    /// The derivative is `(error - last_error) / dt`; with `dt == 0` it is
    /// held at its previous value instead of going infinite. The integral
    /// accumulates `error * dt` and is clamped to the anti-windup bound.
    /// The first update after a reset seeds `last_error` so the derivative
    /// does not spike on startup.
    pub fn update_error(&mut self, error: f64, dt: f64) {
        if !self.started {
            self.last_error = error;
            self.started = true;
        }
        if dt > 0.0 {
            self.derivative = (error - self.last_error) / dt;
        }
        self.last_error = error;
        self.error = error;

        let bound = self.mode.integral_bound();
        self.integral = (self.integral + error * dt).clamp(-bound, bound);
    }

    /// Store pre-split P/I/D terms directly. Values are taken as-is and
    /// normalized on read; no accumulation or differentiation happens.
    pub fn set_terms(&mut self, p: f64, i: f64, d: f64) {
        self.error = p;
        self.integral = i;
        self.derivative = d;
        self.last_error = p;
        self.started = true;
    }

    /// Read one term normalized into [-1, 1].
    pub fn normalized(&self, term: ErrorTerm) -> f64 {
        let raw = match term {
            ErrorTerm::P => self.error,
            ErrorTerm::I => self.integral,
            ErrorTerm::D => self.derivative,
        };
        self.mode.normalize(term, raw)
    }

    /// Raw (unnormalized) current error.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Raw accumulated integral.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Raw derivative.
    pub fn derivative(&self) -> f64 {
        self.derivative
    }

    pub fn mode(&self) -> NormMode {
        self.mode
    }

    /// Swap the normalization mode without touching accumulated state.
    pub fn set_mode(&mut self, mode: NormMode) -> Result<(), ConfigError> {
        mode.validate()?;
        self.mode = mode;
        Ok(())
    }

    /// Zero all accumulators and re-arm first-tick derivative seeding.
    pub fn reset(&mut self) {
        self.error = 0.0;
        self.last_error = 0.0;
        self.integral = 0.0;
        self.derivative = 0.0;
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_track() -> ErrorTrack {
        ErrorTrack::new(NormMode::range(-100.0, 100.0)).unwrap()
    }

    #[test]
    fn proportional_normalization_table() {
        let cases = [
            (0.0, 0.0),
            (25.0, 0.25),
            (60.0, 0.6),
            (80.0, 0.8),
            (100.0, 1.0),
            (110.0, 1.0),
            (-10.0, -0.1),
            (-50.0, -0.5),
        ];
        for (input, expected) in cases {
            let mut track = range_track();
            track.update_error(input, 1.0);
            let got = track.normalized(ErrorTerm::P);
            assert!((got - expected).abs() < 1e-9, "P({input}) = {got}, want {expected}");
        }
    }

    #[test]
    fn derivative_normalization_sequence() {
        // First sample seeds last_error, so the first derivative is 0.
        let inputs = [0.0, 10.0, 25.0, 50.0, 20.0, -30.0, -10.0];
        let expected = [0.0, 0.1, 0.15, 0.25, -0.3, -0.5, 0.2];
        let mut track = range_track();
        for (input, want) in inputs.iter().zip(expected) {
            track.update_error(*input, 1.0);
            let got = track.normalized(ErrorTerm::D);
            assert!((got - want).abs() < 1e-9, "D after {input} = {got}, want {want}");
        }
    }

    #[test]
    fn integral_accumulates_with_anti_windup() {
        // Accumulator clamps at the range half-width (100), so the
        // 105 step saturates and later samples subtract from 100.
        let inputs = [0.0, 10.0, 25.0, 50.0, 20.0, -30.0, -10.0];
        let expected = [0.0, 0.1, 0.35, 0.85, 1.0, 0.7, 0.6];
        let mut track = range_track();
        for (input, want) in inputs.iter().zip(expected) {
            track.update_error(*input, 1.0);
            let got = track.normalized(ErrorTerm::I);
            assert!((got - want).abs() < 1e-9, "I after {input} = {got}, want {want}");
        }
    }

    #[test]
    fn first_tick_has_no_derivative_spike() {
        let mut track = range_track();
        track.update_error(80.0, 0.01);
        assert_eq!(track.normalized(ErrorTerm::D), 0.0);
        // Second tick differentiates normally
        track.update_error(81.0, 0.01);
        assert!((track.derivative() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_dt_holds_previous_derivative() {
        let mut track = range_track();
        track.update_error(0.0, 1.0);
        track.update_error(10.0, 1.0);
        let before = track.derivative();
        assert!((before - 10.0).abs() < 1e-9);
        track.update_error(50.0, 0.0);
        assert_eq!(track.derivative(), before);
        assert!(track.derivative().is_finite());
    }

    #[test]
    fn limits_mode_normalizes_per_term() {
        let mut track = ErrorTrack::new(NormMode::limits(10.0, 100.0, 5.0)).unwrap();
        track.set_terms(5.0, 50.0, -2.5);
        assert!((track.normalized(ErrorTerm::P) - 0.5).abs() < 1e-12);
        assert!((track.normalized(ErrorTerm::I) - 0.5).abs() < 1e-12);
        assert!((track.normalized(ErrorTerm::D) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn normalized_values_always_bounded() {
        let mut track = ErrorTrack::new(NormMode::limits(1.0, 1.0, 1.0)).unwrap();
        track.set_terms(1e9, -1e9, 42.0);
        assert_eq!(track.normalized(ErrorTerm::P), 1.0);
        assert_eq!(track.normalized(ErrorTerm::I), -1.0);
        assert_eq!(track.normalized(ErrorTerm::D), 1.0);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut track = range_track();
        track.update_error(50.0, 1.0);
        track.update_error(60.0, 1.0);
        track.reset();
        track.reset();
        assert_eq!(track.normalized(ErrorTerm::P), 0.0);
        assert_eq!(track.normalized(ErrorTerm::I), 0.0);
        assert_eq!(track.normalized(ErrorTerm::D), 0.0);
        // First tick after reset seeds again: no spike
        track.update_error(90.0, 1.0);
        assert_eq!(track.derivative(), 0.0);
    }

    #[test]
    fn rejects_degenerate_configuration() {
        assert!(matches!(
            ErrorTrack::new(NormMode::limits(0.0, 1.0, 1.0)),
            Err(ConfigError::NonPositiveLimit(_))
        ));
        assert!(matches!(
            ErrorTrack::new(NormMode::range(5.0, 5.0)),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(
            ErrorTrack::new(NormMode::range(10.0, -10.0)),
            Err(ConfigError::InvalidRange { .. })
        ));
    }
}
