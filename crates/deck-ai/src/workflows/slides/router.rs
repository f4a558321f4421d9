use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{ContentBlock, Template, TemplateId};
use super::matching::MatchError;
use super::repository::{RepositoryError, TemplateRepository};
use super::service::{SlideMatchingError, SlideMatchingService};

/// Router builder exposing HTTP endpoints for template registration and
/// slide matching.
pub fn slides_router<R>(service: Arc<SlideMatchingService<R>>) -> Router
where
    R: TemplateRepository + 'static,
{
    Router::new()
        .route("/api/v1/slides/match", post(match_handler::<R>))
        .route("/api/v1/templates", post(register_template_handler::<R>))
        .route("/api/v1/templates/:template_id", get(template_handler::<R>))
        .with_state(service)
}

pub(crate) async fn match_handler<R>(
    State(service): State<Arc<SlideMatchingService<R>>>,
    axum::Json(content): axum::Json<ContentBlock>,
) -> Response
where
    R: TemplateRepository + 'static,
{
    match service.match_content(&content) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(SlideMatchingError::Match(MatchError::EmptyTemplatePool)) => {
            let payload = json!({
                "error": "template pool is empty",
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_template_handler<R>(
    State(service): State<Arc<SlideMatchingService<R>>>,
    axum::Json(template): axum::Json<Template>,
) -> Response
where
    R: TemplateRepository + 'static,
{
    match service.register_template(template) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(SlideMatchingError::Repository(RepositoryError::Conflict)) => {
            let payload = json!({
                "error": "template already exists",
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn template_handler<R>(
    State(service): State<Arc<SlideMatchingService<R>>>,
    Path(template_id): Path<String>,
) -> Response
where
    R: TemplateRepository + 'static,
{
    let id = TemplateId(template_id);
    match service.template(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(SlideMatchingError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "template_id": id.0,
                "error": "template not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
