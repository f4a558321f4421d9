use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use deck_ai::workflows::slides::{
    ElementFrame, ElementRole, RepositoryError, Template, TemplateAnnotation, TemplateElement,
    TemplateId, TemplateRecord, TemplateRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insertion-ordered in-memory pool; order matters because the engine's
/// deterministic tie-break follows it.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTemplateRepository {
    records: Arc<Mutex<Vec<TemplateRecord>>>,
}

impl TemplateRepository for InMemoryTemplateRepository {
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

/// Repository pre-loaded with the built-in template pool.
pub(crate) fn seeded_repository() -> Arc<InMemoryTemplateRepository> {
    let repository = Arc::new(InMemoryTemplateRepository::default());
    for template in sample_templates() {
        repository
            .insert(TemplateRecord {
                template,
                registered_at: Utc::now(),
            })
            .expect("sample template ids are unique");
    }
    repository
}

fn element(role: ElementRole, x: f32, y: f32, width: f32, height: f32) -> TemplateElement {
    TemplateElement {
        role,
        frame: ElementFrame {
            x,
            y,
            width,
            height,
        },
    }
}

/// Starter pool covering the common deck shapes: a matrix, a headed list,
/// a roomy unannotated list, and an image-led layout.
pub(crate) fn sample_templates() -> Vec<Template> {
    vec![
        Template {
            id: TemplateId("matrix-four".to_string()),
            elements: vec![
                element(ElementRole::Title, 80.0, 40.0, 1120.0, 90.0),
                element(ElementRole::Item, 90.0, 170.0, 530.0, 230.0),
                element(ElementRole::Item, 660.0, 170.0, 530.0, 230.0),
                element(ElementRole::Item, 90.0, 430.0, 530.0, 230.0),
                element(ElementRole::Item, 660.0, 430.0, 530.0, 230.0),
            ],
            annotation: Some(TemplateAnnotation {
                content_type: Some("case_analysis".to_string()),
                layout_type: Some("basic_matrix".to_string()),
                visual_style: Some("minimal".to_string()),
            }),
        },
        Template {
            id: TemplateId("headed-list-three".to_string()),
            elements: vec![
                element(ElementRole::Title, 80.0, 40.0, 1120.0, 90.0),
                element(ElementRole::Subtitle, 80.0, 140.0, 1120.0, 50.0),
                element(ElementRole::ItemTitle, 90.0, 230.0, 1100.0, 40.0),
                element(ElementRole::Item, 90.0, 280.0, 1100.0, 90.0),
                element(ElementRole::ItemTitle, 90.0, 390.0, 1100.0, 40.0),
                element(ElementRole::Item, 90.0, 440.0, 1100.0, 90.0),
                element(ElementRole::ItemTitle, 90.0, 550.0, 1100.0, 40.0),
                element(ElementRole::Item, 90.0, 600.0, 1100.0, 90.0),
            ],
            annotation: Some(TemplateAnnotation {
                content_type: Some("key_points".to_string()),
                layout_type: Some("titled_list".to_string()),
                visual_style: None,
            }),
        },
        Template {
            id: TemplateId("loose-list-six".to_string()),
            elements: vec![
                element(ElementRole::Title, 80.0, 40.0, 1120.0, 90.0),
                element(ElementRole::Item, 90.0, 160.0, 1100.0, 80.0),
                element(ElementRole::Item, 90.0, 250.0, 1100.0, 80.0),
                element(ElementRole::Item, 90.0, 340.0, 1100.0, 80.0),
                element(ElementRole::Item, 90.0, 430.0, 1100.0, 80.0),
                element(ElementRole::Item, 90.0, 520.0, 1100.0, 80.0),
                element(ElementRole::Item, 90.0, 610.0, 1100.0, 80.0),
            ],
            annotation: None,
        },
        Template {
            id: TemplateId("image-split-two".to_string()),
            elements: vec![
                element(ElementRole::Title, 80.0, 40.0, 540.0, 90.0),
                element(ElementRole::Image, 660.0, 40.0, 540.0, 640.0),
                element(ElementRole::Item, 80.0, 170.0, 540.0, 240.0),
                element(ElementRole::Item, 80.0, 440.0, 540.0, 240.0),
            ],
            annotation: Some(TemplateAnnotation {
                content_type: None,
                layout_type: Some("image_split".to_string()),
                visual_style: Some("vivid".to_string()),
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_pool_has_unique_ids_and_sane_capacities() {
        let templates = sample_templates();
        let ids: HashSet<&str> = templates
            .iter()
            .map(|template| template.id.0.as_str())
            .collect();

        assert_eq!(ids.len(), templates.len());
        assert!(templates
            .iter()
            .all(|template| template.item_capacity() >= 2));
    }

    #[test]
    fn seeded_repository_lists_in_insertion_order() {
        let repository = seeded_repository();
        let listed = repository.list().expect("repository lists");
        let ids: Vec<String> = listed
            .iter()
            .map(|record| record.template.id.0.clone())
            .collect();

        assert_eq!(
            ids,
            vec![
                "matrix-four".to_string(),
                "headed-list-three".to_string(),
                "loose-list-six".to_string(),
                "image-split-two".to_string(),
            ]
        );
    }
}
