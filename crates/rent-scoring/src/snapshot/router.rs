use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Local;
use serde_json::json;

use super::domain::PropertyId;
use super::service::{PropertyScoringError, PropertyScoringService};
use super::source::SnapshotSource;

/// Router builder exposing per-property scores.
pub fn property_scores_router<S>(service: Arc<PropertyScoringService<S>>) -> Router
where
    S: SnapshotSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/properties/:property_id/scores",
            get(scores_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn scores_handler<S>(
    State(service): State<Arc<PropertyScoringService<S>>>,
    Path(property_id): Path<String>,
) -> Response
where
    S: SnapshotSource + 'static,
{
    let id = PropertyId(property_id);
    let today = Local::now().date_naive();

    match service.score(&id, today) {
        Ok(scores) => (StatusCode::OK, axum::Json(scores)).into_response(),
        Err(PropertyScoringError::NotFound(id)) => {
            let payload = json!({
                "property_id": id.0,
                "error": "property not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
