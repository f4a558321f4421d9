use super::dimensions::DimensionId;
use super::engine::FallbackReason;

/// Observation hook over the engine's decision flow. Default methods are
/// no-ops so implementations only override what they watch; the engine
/// calls `evaluator_invoked` once per registered dimension per scored
/// template, and `fallback_engaged` whenever the degraded path runs.
pub trait MatchProbe: Send + Sync {
    fn evaluator_invoked(&self, _dimension: DimensionId) {}
    fn fallback_engaged(&self, _reason: FallbackReason) {}
}

/// The production default: observe nothing.
pub struct NoopProbe;

impl MatchProbe for NoopProbe {}
