use serde::{Deserialize, Serialize};

use super::dimensions::DimensionId;

/// Allowed drift when checking that enabled weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f32 = 1e-4;

/// Base weight table covering every dimension the registry can register.
/// These are the configured weights; renormalization over available
/// dimensions happens per template inside the scoring engine and never
/// writes back here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub layout_type: f32,
    pub content_type: f32,
    pub capacity: f32,
    pub title_structure: f32,
    pub text_structure: f32,
    pub text_amount: f32,
    pub visual: f32,
}

impl DimensionWeights {
    /// The shipped weight distribution.
    pub fn standard() -> Self {
        Self {
            layout_type: 0.25,
            content_type: 0.20,
            capacity: 0.20,
            title_structure: 0.10,
            text_structure: 0.10,
            text_amount: 0.10,
            visual: 0.05,
        }
    }

    pub fn of(&self, dimension: DimensionId) -> f32 {
        match dimension {
            DimensionId::LayoutType => self.layout_type,
            DimensionId::ContentType => self.content_type,
            DimensionId::Capacity => self.capacity,
            DimensionId::TitleStructure => self.title_structure,
            DimensionId::TextStructure => self.text_structure,
            DimensionId::TextAmount => self.text_amount,
            DimensionId::Visual => self.visual,
        }
    }

    pub fn set(&mut self, dimension: DimensionId, weight: f32) {
        match dimension {
            DimensionId::LayoutType => self.layout_type = weight,
            DimensionId::ContentType => self.content_type = weight,
            DimensionId::Capacity => self.capacity = weight,
            DimensionId::TitleStructure => self.title_structure = weight,
            DimensionId::TextStructure => self.text_structure = weight,
            DimensionId::TextAmount => self.text_amount = weight,
            DimensionId::Visual => self.visual = weight,
        }
    }
}

/// Per-dimension enabled flags. Disabled dimensions are never registered
/// and never evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionToggles {
    pub layout_type: bool,
    pub content_type: bool,
    pub capacity: bool,
    pub title_structure: bool,
    pub text_structure: bool,
    pub text_amount: bool,
    pub visual: bool,
}

impl Default for DimensionToggles {
    fn default() -> Self {
        Self {
            layout_type: true,
            content_type: true,
            capacity: true,
            title_structure: true,
            text_structure: true,
            text_amount: true,
            visual: true,
        }
    }
}

impl DimensionToggles {
    pub fn is_enabled(&self, dimension: DimensionId) -> bool {
        match dimension {
            DimensionId::LayoutType => self.layout_type,
            DimensionId::ContentType => self.content_type,
            DimensionId::Capacity => self.capacity,
            DimensionId::TitleStructure => self.title_structure,
            DimensionId::TextStructure => self.text_structure,
            DimensionId::TextAmount => self.text_amount,
            DimensionId::Visual => self.visual,
        }
    }

    pub fn disable(&mut self, dimension: DimensionId) {
        match dimension {
            DimensionId::LayoutType => self.layout_type = false,
            DimensionId::ContentType => self.content_type = false,
            DimensionId::Capacity => self.capacity = false,
            DimensionId::TitleStructure => self.title_structure = false,
            DimensionId::TextStructure => self.text_structure = false,
            DimensionId::TextAmount => self.text_amount = false,
            DimensionId::Visual => self.visual = false,
        }
    }

    pub fn enabled_ids(&self) -> Vec<DimensionId> {
        DimensionId::ALL
            .iter()
            .copied()
            .filter(|dimension| self.is_enabled(*dimension))
            .collect()
    }
}

/// The engine's only tunables: the weight table and the per-dimension
/// enabled flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub weights: DimensionWeights,
    pub enabled: DimensionToggles,
}

impl MatchingConfig {
    pub fn standard() -> Self {
        Self {
            weights: DimensionWeights::standard(),
            enabled: DimensionToggles::default(),
        }
    }

    /// Startup validation over the registered (enabled) dimension set:
    /// every weight finite and in `[0, 1]`, the sum within
    /// [`WEIGHT_SUM_TOLERANCE`] of 1.0, at least one dimension enabled.
    pub fn validate(&self) -> Result<(), MatchConfigError> {
        let enabled = self.enabled.enabled_ids();
        if enabled.is_empty() {
            return Err(MatchConfigError::NoDimensionsEnabled);
        }

        for dimension in &enabled {
            let weight = self.weights.of(*dimension);
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(MatchConfigError::WeightOutOfRange {
                    dimension: *dimension,
                    weight,
                });
            }
        }

        let sum: f32 = enabled
            .iter()
            .map(|dimension| self.weights.of(*dimension))
            .sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchConfigError::WeightSum { sum });
        }

        Ok(())
    }
}

/// Configuration problems are the one fatal error class: the service must
/// refuse to serve matches rather than run with a skewed weight table.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MatchConfigError {
    #[error("no scoring dimensions enabled")]
    NoDimensionsEnabled,
    #[error("weight for {dimension} is {weight}, expected a finite value in [0, 1]")]
    WeightOutOfRange { dimension: DimensionId, weight: f32 },
    #[error("enabled dimension weights sum to {sum}, expected 1.0")]
    WeightSum { sum: f32 },
}
