//! Slide content intake and template matching for the presentation
//! editor: the domain model crossing the wire, the matching engine, the
//! template pool abstraction, and the HTTP surface over them.

pub mod domain;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ContentBlock, ContentItem, ElementFrame, ElementRole, SemanticFeatures, Template,
    TemplateAnnotation, TemplateElement, TemplateId,
};
pub use matching::{
    DimensionId, DimensionScore, DimensionToggles, DimensionWeights, EntropySelection,
    FallbackReason, MatchConfigError, MatchError, MatchProbe, MatchResult, MatchStrategy,
    MatchingConfig, NoopProbe, SeededSelection, SelectionRng, TemplateMatchEngine,
    TemplateSelection, UnknownDimension,
};
pub use repository::{RepositoryError, TemplateRecord, TemplateRepository};
pub use router::slides_router;
pub use service::{SlideMatchOutcome, SlideMatchingError, SlideMatchingService};
