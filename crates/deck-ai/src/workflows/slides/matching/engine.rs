use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{MatchConfigError, MatchingConfig};
use super::dimensions::DimensionId;
use super::fallback::{fallback_pick, SelectionRng};
use super::filter::filter_candidates;
use super::probe::{MatchProbe, NoopProbe};
use super::registry::DimensionRegistry;
use super::scoring::{combine, DimensionScore, MatchResult};
use crate::workflows::slides::domain::{ContentBlock, Template, TemplateId};

/// Which strategy produced the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Rich,
    Fallback,
}

/// Why the engine degraded to the fallback matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    MissingSemanticFeatures,
    NoViableCandidates,
    ZeroScores,
    EvaluationFailure,
}

impl FallbackReason {
    pub const fn label(self) -> &'static str {
        match self {
            FallbackReason::MissingSemanticFeatures => "missing_semantic_features",
            FallbackReason::NoViableCandidates => "no_viable_candidates",
            FallbackReason::ZeroScores => "zero_scores",
            FallbackReason::EvaluationFailure => "evaluation_failure",
        }
    }
}

/// Selection handed to the rendering layer: the chosen template by id,
/// plus the rich-path diagnostics when that path ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSelection {
    pub template_id: TemplateId,
    pub strategy: MatchStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<MatchResult>,
}

/// The engine's public contract never fails for data-quality reasons;
/// only an empty pool has no answer at all.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("cannot select a template from an empty pool")]
    EmptyTemplatePool,
}

enum RichOutcome {
    Winner(MatchResult),
    Degraded(FallbackReason),
}

/// Orchestrates the match: candidate filter, per-template evaluation,
/// renormalizing scoring, best-of reduction, with the fallback matcher as
/// the safety net whenever the rich signals are absent or not
/// discriminating.
pub struct TemplateMatchEngine {
    registry: DimensionRegistry,
    rng: Arc<dyn SelectionRng>,
    probe: Arc<dyn MatchProbe>,
}

impl TemplateMatchEngine {
    pub fn new(
        config: MatchingConfig,
        rng: Arc<dyn SelectionRng>,
    ) -> Result<Self, MatchConfigError> {
        Self::with_probe(config, rng, Arc::new(NoopProbe))
    }

    pub fn with_probe(
        config: MatchingConfig,
        rng: Arc<dyn SelectionRng>,
        probe: Arc<dyn MatchProbe>,
    ) -> Result<Self, MatchConfigError> {
        let registry = DimensionRegistry::from_config(&config)?;
        Ok(Self {
            registry,
            rng,
            probe,
        })
    }

    pub fn registered_dimensions(&self) -> Vec<DimensionId> {
        self.registry.registered_ids()
    }

    /// Select the best template for one slide's content. Total for every
    /// non-empty pool: data-quality problems degrade to the fallback
    /// matcher, they never surface as errors.
    pub fn select_template(
        &self,
        content: &ContentBlock,
        templates: &[Template],
    ) -> Result<TemplateSelection, MatchError> {
        if templates.is_empty() {
            return Err(MatchError::EmptyTemplatePool);
        }

        if content.semantic_features.is_none() {
            return Ok(self.fallback_selection(
                content,
                templates,
                FallbackReason::MissingSemanticFeatures,
            ));
        }

        // A panicking evaluator (malformed template data, future evaluator
        // bugs) must not take down the request: isolate the rich path and
        // degrade instead.
        let outcome = catch_unwind(AssertUnwindSafe(|| self.rich_match(content, templates)))
            .unwrap_or(RichOutcome::Degraded(FallbackReason::EvaluationFailure));

        match outcome {
            RichOutcome::Winner(result) => Ok(TemplateSelection {
                template_id: result.template_id.clone(),
                strategy: MatchStrategy::Rich,
                fallback_reason: None,
                result: Some(result),
            }),
            RichOutcome::Degraded(reason) => {
                if reason == FallbackReason::EvaluationFailure {
                    warn!(reason = reason.label(), "rich match failed, degrading");
                }
                Ok(self.fallback_selection(content, templates, reason))
            }
        }
    }

    fn rich_match(&self, content: &ContentBlock, templates: &[Template]) -> RichOutcome {
        let candidates = filter_candidates(content, templates);
        if candidates.is_empty() {
            return RichOutcome::Degraded(FallbackReason::NoViableCandidates);
        }

        let scored: Vec<MatchResult> = candidates
            .iter()
            .map(|template| self.score_template(content, template))
            .collect();

        // Only a strictly greater score moves the cursor, so equal top
        // scores resolve to the first candidate in pool order.
        let mut best = &scored[0];
        for result in &scored[1..] {
            if result.total_score > best.total_score {
                best = result;
            }
        }

        if best.total_score <= 0.0 {
            // Nothing discriminated; an arbitrary zero-score pick is worse
            // than the capacity heuristic.
            return RichOutcome::Degraded(FallbackReason::ZeroScores);
        }

        RichOutcome::Winner(best.clone())
    }

    fn score_template(&self, content: &ContentBlock, template: &Template) -> MatchResult {
        let mut per_dimension = Vec::with_capacity(self.registry.entries().len());
        for entry in self.registry.entries() {
            self.probe.evaluator_invoked(entry.evaluator.id());
            let available = entry.evaluator.is_available(content, template);
            let raw_score =
                available.then(|| entry.evaluator.score(content, template).clamp(0.0, 1.0));
            per_dimension.push(DimensionScore {
                dimension: entry.evaluator.id(),
                raw_score,
                weight: entry.weight,
                available,
            });
        }

        let (total_score, dimensions_used) = combine(&per_dimension);
        MatchResult {
            template_id: template.id.clone(),
            total_score,
            per_dimension,
            dimensions_used,
        }
    }

    fn fallback_selection(
        &self,
        content: &ContentBlock,
        templates: &[Template],
        reason: FallbackReason,
    ) -> TemplateSelection {
        self.probe.fallback_engaged(reason);
        let template = fallback_pick(content, templates, self.rng.as_ref())
            .expect("fallback requires a non-empty template pool");
        TemplateSelection {
            template_id: template.id.clone(),
            strategy: MatchStrategy::Fallback,
            fallback_reason: Some(reason),
            result: None,
        }
    }
}
