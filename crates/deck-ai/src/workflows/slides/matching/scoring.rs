use serde::{Deserialize, Serialize};

use super::dimensions::DimensionId;
use crate::workflows::slides::domain::TemplateId;

/// Per-dimension evidence retained for audits and telemetry. `weight` is
/// the base configured weight of the dimension, unmodified; an unavailable
/// dimension carries `raw_score: None` and `available: false`, which is a
/// different state from a legitimate score of 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore {
    pub dimension: DimensionId,
    pub raw_score: Option<f32>,
    pub weight: f32,
    pub available: bool,
}

/// Outcome of scoring one template against one content block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub template_id: TemplateId,
    pub total_score: f32,
    pub per_dimension: Vec<DimensionScore>,
    pub dimensions_used: Vec<DimensionId>,
}

/// Weighted combination with per-template renormalization: weights of the
/// available dimensions are rescaled to sum to 1, so a template is never
/// penalized merely because an optional annotation was absent on both
/// sides. Returns total 0 and an empty used set when nothing was
/// available (or when the available weights carry no mass).
pub(crate) fn combine(scores: &[DimensionScore]) -> (f32, Vec<DimensionId>) {
    let usable: Vec<&DimensionScore> = scores.iter().filter(|score| score.available).collect();
    if usable.is_empty() {
        return (0.0, Vec::new());
    }

    let weight_sum: f32 = usable.iter().map(|score| score.weight).sum();
    if weight_sum <= f32::EPSILON {
        return (0.0, Vec::new());
    }

    let total: f32 = usable
        .iter()
        .map(|score| (score.weight / weight_sum) * score.raw_score.unwrap_or(0.0))
        .sum();
    let used = usable.iter().map(|score| score.dimension).collect();

    (total.clamp(0.0, 1.0), used)
}
