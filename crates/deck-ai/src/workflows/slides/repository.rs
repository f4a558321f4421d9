use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Template, TemplateId};

/// Stored template plus the bookkeeping the pool keeps for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    pub template: Template,
    pub registered_at: DateTime<Utc>,
}

/// Read/write access to the template pool. `list` must return records in
/// insertion order: the engine's first-seen tie-break depends on a stable
/// pool order.
pub trait TemplateRepository: Send + Sync {
    fn insert(&self, record: TemplateRecord) -> Result<TemplateRecord, RepositoryError>;
    fn fetch(&self, id: &TemplateId) -> Result<Option<TemplateRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<TemplateRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("template already exists")]
    Conflict,
    #[error("template not found")]
    NotFound,
    #[error("template store unavailable: {0}")]
    Unavailable(String),
}
