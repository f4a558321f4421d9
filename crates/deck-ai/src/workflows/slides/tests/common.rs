use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::slides::domain::{
    ContentBlock, ContentItem, ElementFrame, ElementRole, SemanticFeatures, Template,
    TemplateAnnotation, TemplateElement, TemplateId,
};
use crate::workflows::slides::matching::{
    DimensionId, DimensionScore, FallbackReason, MatchProbe, MatchResult, MatchingConfig,
    SeededSelection, TemplateMatchEngine,
};
use crate::workflows::slides::repository::{
    RepositoryError, TemplateRecord, TemplateRepository,
};
use crate::workflows::slides::service::SlideMatchingService;

/// 35 characters; three of them plus the standard title land the text
/// amount ratio for a 3-slot template in the top bucket.
pub(super) const ITEM_TEXT: &str = "Review the western region pipeline.";
pub(super) const SLIDE_TITLE: &str = "Quarterly case analysis";

pub(super) fn element(role: ElementRole, width: f32, height: f32) -> TemplateElement {
    TemplateElement {
        role,
        frame: ElementFrame {
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
    }
}

/// A title element plus `item_slots` item elements, all 400x50.
pub(super) fn template(id: &str, item_slots: usize) -> Template {
    let mut elements = vec![element(ElementRole::Title, 400.0, 50.0)];
    elements.extend((0..item_slots).map(|_| element(ElementRole::Item, 400.0, 50.0)));
    Template {
        id: TemplateId(id.to_string()),
        elements,
        annotation: None,
    }
}

pub(super) fn annotated_template(
    id: &str,
    item_slots: usize,
    content_type: Option<&str>,
    layout_type: Option<&str>,
    visual_style: Option<&str>,
) -> Template {
    let mut built = template(id, item_slots);
    built.annotation = Some(TemplateAnnotation {
        content_type: content_type.map(str::to_string),
        layout_type: layout_type.map(str::to_string),
        visual_style: visual_style.map(str::to_string),
    });
    built
}

pub(super) fn item(title: Option<&str>, text: Option<&str>) -> ContentItem {
    ContentItem {
        title: title.map(str::to_string),
        text: text.map(str::to_string),
    }
}

/// Untagged content: `items` body-text entries, no semantic features.
pub(super) fn content(items: usize) -> ContentBlock {
    ContentBlock {
        title: SLIDE_TITLE.to_string(),
        items: (0..items).map(|_| item(None, Some(ITEM_TEXT))).collect(),
        semantic_features: None,
    }
}

pub(super) fn features(
    content_type: &str,
    layout_type: Option<&str>,
    visual_style: Option<&str>,
) -> SemanticFeatures {
    SemanticFeatures {
        content_type: content_type.to_string(),
        layout_type: layout_type.map(str::to_string),
        visual_style: visual_style.map(str::to_string),
    }
}

pub(super) fn annotated_content(
    items: usize,
    content_type: &str,
    layout_type: Option<&str>,
) -> ContentBlock {
    let mut block = content(items);
    block.semantic_features = Some(features(content_type, layout_type, None));
    block
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::standard()
}

pub(super) fn engine() -> TemplateMatchEngine {
    engine_with_seed(7)
}

pub(super) fn engine_with_seed(seed: u64) -> TemplateMatchEngine {
    TemplateMatchEngine::new(matching_config(), Arc::new(SeededSelection::new(seed)))
        .expect("standard config builds")
}

pub(super) fn engine_with_probe(probe: Arc<dyn MatchProbe>) -> TemplateMatchEngine {
    TemplateMatchEngine::with_probe(
        matching_config(),
        Arc::new(SeededSelection::new(7)),
        probe,
    )
    .expect("standard config builds")
}

pub(super) fn dimension_score(result: &MatchResult, dimension: DimensionId) -> &DimensionScore {
    result
        .per_dimension
        .iter()
        .find(|score| score.dimension == dimension)
        .unwrap_or_else(|| panic!("dimension {dimension} missing from result"))
}

#[derive(Default)]
pub(super) struct CountingProbe {
    evaluations: AtomicUsize,
    fallbacks: Mutex<Vec<FallbackReason>>,
}

impl CountingProbe {
    pub(super) fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::Relaxed)
    }

    pub(super) fn fallbacks(&self) -> Vec<FallbackReason> {
        self.fallbacks.lock().expect("probe mutex poisoned").clone()
    }
}

impl MatchProbe for CountingProbe {
    fn evaluator_invoked(&self, _dimension: DimensionId) {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
    }

    fn fallback_engaged(&self, reason: FallbackReason) {
        self.fallbacks
            .lock()
            .expect("probe mutex poisoned")
            .push(reason);
    }
}

/// Simulates an unexpected failure inside the rich pipeline.
pub(super) struct PanickingProbe;

impl MatchProbe for PanickingProbe {
    fn evaluator_invoked(&self, _dimension: DimensionId) {
        panic!("probe exploded");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryTemplateRepository {
    records: Arc<Mutex<Vec<TemplateRecord>>>,
}

impl TemplateRepository for MemoryTemplateRepository {
    fn insert(&self, record: TemplateRecord) -> Result<TemplateRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.template.id == record.template.id)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &TemplateId) -> Result<Option<TemplateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.template.id == id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<TemplateRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

pub(super) fn service_with_templates(
    templates: Vec<Template>,
) -> SlideMatchingService<MemoryTemplateRepository> {
    let repository = Arc::new(MemoryTemplateRepository::default());
    for template in templates {
        repository
            .insert(TemplateRecord {
                template,
                registered_at: Utc::now(),
            })
            .expect("seed template inserts");
    }
    SlideMatchingService::new(
        repository,
        matching_config(),
        Arc::new(SeededSelection::new(7)),
    )
    .expect("standard config builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
