use super::config::{MatchConfigError, MatchingConfig};
use super::dimensions::{evaluator_for, DimensionEvaluator, DimensionId};

/// One registered criterion: the evaluator plus its base configured
/// weight. The weight stored here is never renormalized.
pub(crate) struct RegisteredDimension {
    pub(crate) weight: f32,
    pub(crate) evaluator: Box<dyn DimensionEvaluator>,
}

/// Fixed table of enabled dimensions, built once at startup from a
/// validated configuration. The dimension set only changes at build time;
/// there is no runtime registration.
pub struct DimensionRegistry {
    entries: Vec<RegisteredDimension>,
}

impl DimensionRegistry {
    pub fn from_config(config: &MatchingConfig) -> Result<Self, MatchConfigError> {
        config.validate()?;

        let entries = config
            .enabled
            .enabled_ids()
            .into_iter()
            .map(|dimension| RegisteredDimension {
                weight: config.weights.of(dimension),
                evaluator: evaluator_for(dimension),
            })
            .collect();

        Ok(Self { entries })
    }

    pub(crate) fn entries(&self) -> &[RegisteredDimension] {
        &self.entries
    }

    pub fn registered_ids(&self) -> Vec<DimensionId> {
        self.entries
            .iter()
            .map(|entry| entry.evaluator.id())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_registers_all_enabled_dimensions_in_order() {
        let registry = DimensionRegistry::from_config(&MatchingConfig::standard())
            .expect("standard config builds");

        assert_eq!(registry.registered_ids(), DimensionId::ALL.to_vec());
    }

    #[test]
    fn registry_skips_disabled_dimensions() {
        let mut config = MatchingConfig::standard();
        config.enabled.disable(DimensionId::Visual);
        config.weights.capacity = 0.25;

        let registry = DimensionRegistry::from_config(&config).expect("config builds");

        assert!(!registry.registered_ids().contains(&DimensionId::Visual));
        assert_eq!(registry.entries().len(), 6);
    }

    #[test]
    fn registry_refuses_invalid_config() {
        let mut config = MatchingConfig::standard();
        config.weights.layout_type = 0.9;

        assert!(DimensionRegistry::from_config(&config).is_err());
    }
}
