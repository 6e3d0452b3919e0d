//! Fuzzy inference controller
//!
//! Runs an ordered rule set over the tracked error state each tick,
//! defuzzifies by weighted average of the signed rule outputs, then
//! applies output gain and saturation.

use serde::{Deserialize, Serialize};

use flcore::{ConfigError, ErrorTerm, ErrorTrack, NormMode};

use crate::rule::Rule;
use crate::trace::{NoopSink, TickTrace, TraceSink};

/// Configuration for a fuzzy-logic controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlcConfig {
    /// Error-term normalization scheme.
    pub norm: NormMode,
    /// Scalar gain applied to the defuzzified output.
    pub output_gain: f64,
    /// Saturation bound: output is clamped to [-output_max, output_max].
    pub output_max: f64,
}

impl Default for FlcConfig {
    fn default() -> Self {
        Self {
            norm: NormMode::limits(1.0, 1.0, 1.0),
            output_gain: 1.0,
            output_max: f64::INFINITY,
        }
    }
}

impl FlcConfig {
    pub fn new(norm: NormMode) -> Self {
        Self { norm, ..Default::default() }
    }

    /// Set the output gain
    pub fn with_output_gain(mut self, gain: f64) -> Self {
        self.output_gain = gain;
        self
    }

    /// Set the output saturation bound
    pub fn with_output_max(mut self, max: f64) -> Self {
        self.output_max = max;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.norm.validate()?;
        if self.output_gain.is_nan() || self.output_gain.is_infinite() {
            return Err(ConfigError::NonFinite { name: "output gain", value: self.output_gain });
        }
        if self.output_max.is_nan() || self.output_max < 0.0 {
            return Err(ConfigError::NegativeOutputMax(self.output_max));
        }
        Ok(())
    }
}

/// Diagnostic view of the controller state after the latest tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    pub last_output: f64,
}

/// Fuzzy-logic inference controller.
///
/// Owns its error track and rule set; one instance serves one control
/// loop, called synchronously once per tick. Two states: Idle (fresh or
/// reset) and Running (has evaluated at least once since the last reset).
pub struct FlController {
    track: ErrorTrack,
    rules: Vec<Rule>,
    output_gain: f64,
    output_max: f64,
    last_output: f64,
    running: bool,
    sink: Box<dyn TraceSink>,
}

impl FlController {
    /// Build a controller from a validated configuration. Rules are
    /// attached afterward via [`FlController::set_rules`].
    pub fn new(config: FlcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            track: ErrorTrack::new(config.norm)?,
            rules: Vec::new(),
            output_gain: config.output_gain,
            output_max: config.output_max,
            last_output: 0.0,
            running: false,
            sink: Box::new(NoopSink),
        })
    }

    /// Replace the diagnostic sink (defaults to a no-op).
    pub fn with_sink(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Attach rules at construction time.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    /// Atomically replace the active rule set. Must not race a concurrent
    /// `evaluate`; the `&mut self` receiver enforces that for safe code.
    pub fn set_rules(&mut self, rules: Vec<Rule>) {
        self.rules = rules;
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Swap the normalization scheme without touching rules or error state.
    pub fn set_limits(&mut self, norm: NormMode) -> Result<(), ConfigError> {
        self.track.set_mode(norm)
    }

    pub fn set_output_max(&mut self, max: f64) -> Result<(), ConfigError> {
        if max.is_nan() || max < 0.0 {
            return Err(ConfigError::NegativeOutputMax(max));
        }
        self.output_max = max;
        Ok(())
    }

    pub fn set_output_gain(&mut self, gain: f64) -> Result<(), ConfigError> {
        if gain.is_nan() || gain.is_infinite() {
            return Err(ConfigError::NonFinite { name: "output gain", value: gain });
        }
        self.output_gain = gain;
        Ok(())
    }

    pub fn output_gain(&self) -> f64 {
        self.output_gain
    }

    pub fn output_max(&self) -> f64 {
        self.output_max
    }

    /// True once `evaluate` has run since construction or the last reset.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Per-tick evaluation, raw process form: derives the error from the
    /// measured value and setpoint, updates the error track, then infers.
    pub fn evaluate(&mut self, measured: f64, setpoint: f64, dt: f64) -> f64 {
        let error = setpoint - measured;
        self.track.update_error(error, dt);
        self.infer()
    }

    /// Per-tick evaluation, pre-split form: stores P/I/D terms computed by
    /// an outer stage, then infers.
    pub fn evaluate_terms(&mut self, p: f64, i: f64, d: f64) -> f64 {
        self.track.set_terms(p, i, d);
        self.infer()
    }

    /// Zero the error track; rules and scaling configuration survive.
    pub fn reset(&mut self) {
        self.track.reset();
        self.last_output = 0.0;
        self.running = false;
    }

    /// Latest normalized error terms and output, for external telemetry.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            p: self.track.normalized(ErrorTerm::P),
            i: self.track.normalized(ErrorTerm::I),
            d: self.track.normalized(ErrorTerm::D),
            last_output: self.last_output,
        }
    }

    /// Weighted-average defuzzification over the active rule set.
    ///
    /// The per-rule weight scales the numerator contribution only; the
    /// denominator accumulates unweighted firing strength. A zero total
    /// strength means no rule fired, which degrades to output 0 (no
    /// authority asserted) rather than an error.
    fn infer(&mut self) -> f64 {
        self.running = true;

        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for rule in &self.rules {
            let activation = rule.evaluate(&self.track);
            numerator += activation.signed_output;
            denominator += activation.strength;
        }

        let raw = if denominator != 0.0 { numerator / denominator } else { 0.0 };
        let output = (raw * self.output_gain).clamp(-self.output_max, self.output_max);
        self.last_output = output;

        self.sink.record(&TickTrace {
            p: self.track.normalized(ErrorTerm::P),
            i: self.track.normalized(ErrorTerm::I),
            d: self.track.normalized(ErrorTerm::D),
            numerator,
            denominator,
            output,
        });

        output
    }
}
