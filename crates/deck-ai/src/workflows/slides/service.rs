use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ContentBlock, Template, TemplateId};
use super::matching::{
    MatchConfigError, MatchError, MatchingConfig, SelectionRng, TemplateMatchEngine,
    TemplateSelection,
};
use super::repository::{RepositoryError, TemplateRecord, TemplateRepository};

/// Service composing the template pool and the matching engine. Holds no
/// mutable matching state of its own; every call reads the pool fresh and
/// produces an outcome owned by the caller.
pub struct SlideMatchingService<R> {
    repository: Arc<R>,
    engine: TemplateMatchEngine,
}

impl<R> SlideMatchingService<R>
where
    R: TemplateRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        config: MatchingConfig,
        rng: Arc<dyn SelectionRng>,
    ) -> Result<Self, MatchConfigError> {
        let engine = TemplateMatchEngine::new(config, rng)?;
        Ok(Self::with_engine(repository, engine))
    }

    pub fn with_engine(repository: Arc<R>, engine: TemplateMatchEngine) -> Self {
        Self { repository, engine }
    }

    /// Register a template into the pool.
    pub fn register_template(
        &self,
        template: Template,
    ) -> Result<TemplateRecord, SlideMatchingError> {
        let record = TemplateRecord {
            template,
            registered_at: Utc::now(),
        };
        Ok(self.repository.insert(record)?)
    }

    pub fn template(&self, id: &TemplateId) -> Result<TemplateRecord, SlideMatchingError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Match one slide's content against the registered pool.
    pub fn match_content(
        &self,
        content: &ContentBlock,
    ) -> Result<SlideMatchOutcome, SlideMatchingError> {
        let records = self.repository.list()?;
        let templates: Vec<Template> = records
            .into_iter()
            .map(|record| record.template)
            .collect();

        let selection = self.engine.select_template(content, &templates)?;
        Ok(SlideMatchOutcome {
            selection,
            evaluated_at: Utc::now(),
        })
    }
}

/// What the rendering layer receives: the selection (template id, strategy,
/// rich-path diagnostics when present) stamped with the evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideMatchOutcome {
    #[serde(flatten)]
    pub selection: TemplateSelection,
    pub evaluated_at: DateTime<Utc>,
}

/// Error raised by the slide matching service.
#[derive(Debug, thiserror::Error)]
pub enum SlideMatchingError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Match(#[from] MatchError),
}
