//! Per-tick diagnostic tracing
//!
//! The controller records one [`TickTrace`] per evaluation and hands it to
//! an injected [`TraceSink`]. The default sink discards everything, so
//! tracing costs nothing unless a caller opts in.

/// Snapshot of one inference tick, for telemetry and debugging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTrace {
    /// Normalized proportional term seen by the rules.
    pub p: f64,
    /// Normalized integral term.
    pub i: f64,
    /// Normalized derivative term.
    pub d: f64,
    /// Sum of signed rule outputs.
    pub numerator: f64,
    /// Sum of rule firing strengths.
    pub denominator: f64,
    /// Final gain-scaled, clamped output.
    pub output: f64,
}

/// Consumer of per-tick traces.
pub trait TraceSink {
    fn record(&mut self, trace: &TickTrace);
}

/// Discards every trace. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn record(&mut self, _trace: &TickTrace) {}
}

/// Forwards traces to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, trace: &TickTrace) {
        log::trace!(
            "flc tick: p={:.4} i={:.4} d={:.4} num={:.4} den={:.4} out={:.4}",
            trace.p,
            trace.i,
            trace.d,
            trace.numerator,
            trace.denominator,
            trace.output
        );
    }
}
