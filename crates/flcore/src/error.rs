use thiserror::Error;

/// Configuration contract violations, rejected at construction time
/// rather than propagated as NaN through control ticks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("normalization limit must be positive, got {0}")]
    NonPositiveLimit(f64),
    #[error("normalization range is empty or inverted: [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("output saturation bound must be non-negative, got {0}")]
    NegativeOutputMax(f64),
    #[error("rule weight must be non-negative, got {0}")]
    NegativeWeight(f64),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}
