//! The template matching engine.
//!
//! Seven independently weighted criteria score each (content, template)
//! pair; weights renormalize per template over the criteria that could
//! actually be evaluated, over-capacity templates are vetoed before
//! scoring, and a dependency-free fallback matcher guarantees a selection
//! whenever the rich pipeline cannot or should not run.

pub(crate) mod config;
pub(crate) mod dimensions;
pub(crate) mod engine;
pub(crate) mod fallback;
pub(crate) mod filter;
pub(crate) mod probe;
pub(crate) mod registry;
pub(crate) mod scoring;

pub use config::{
    DimensionToggles, DimensionWeights, MatchConfigError, MatchingConfig, WEIGHT_SUM_TOLERANCE,
};
pub use dimensions::{DimensionId, UnknownDimension};
pub use engine::{
    FallbackReason, MatchError, MatchStrategy, TemplateMatchEngine, TemplateSelection,
};
pub use fallback::{EntropySelection, SeededSelection, SelectionRng};
pub use probe::{MatchProbe, NoopProbe};
pub use registry::DimensionRegistry;
pub use scoring::{DimensionScore, MatchResult};
