use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rent_scoring::error::AppError;
use rent_scoring::snapshot::{property_scores_router, PropertyScoringService, SnapshotSource};
use rent_scoring::{
    calculate_deal_score, calculate_leverage_score, DealScoreInput, DealScoreResult,
    LeverageScoreInput, LeverageScoreResult,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_scoring_routes<S>(service: Arc<PropertyScoringService<S>>) -> axum::Router
where
    S: SnapshotSource + 'static,
{
    property_scores_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/scores/deal",
            axum::routing::post(deal_score_endpoint),
        )
        .route(
            "/api/v1/scores/leverage",
            axum::routing::post(leverage_score_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn deal_score_endpoint(
    Json(input): Json<DealScoreInput>,
) -> Result<Json<DealScoreResult>, AppError> {
    let result = calculate_deal_score(input).await?;
    Ok(Json(result))
}

pub(crate) async fn leverage_score_endpoint(
    Json(input): Json<LeverageScoreInput>,
) -> Result<Json<LeverageScoreResult>, AppError> {
    let result = calculate_leverage_score(input).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemorySnapshotStore;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use rent_scoring::scoring::{DealRating, LeverageLevel, ScoringConfig, ScoringEngine};
    use tower::ServiceExt;

    fn deal_input() -> DealScoreInput {
        DealScoreInput {
            current_rent: 1700.0,
            market_rent: 2000.0,
            avg_rent_per_sqft: 2.0,
            unit_sqft: 1000.0,
            occupancy_rate: 86.0,
            market_occupancy: 94.0,
            concession_value: 300.0,
            market_concession_value: 100.0,
            rent_trend_3mo: -1.0,
            rent_trend_12mo: 0.0,
            google_rating: Some(4.4),
            building_year: 2016,
            amenity_count: 10,
        }
    }

    fn app() -> axum::Router {
        let engine = ScoringEngine::new(ScoringConfig {
            reference_year: Some(2025),
            ..ScoringConfig::default()
        })
        .expect("default config is valid");
        let service = Arc::new(PropertyScoringService::new(
            Arc::new(InMemorySnapshotStore::default()),
            Arc::new(engine),
        ));
        with_scoring_routes(service)
    }

    #[tokio::test]
    async fn deal_endpoint_scores_input() {
        let Json(result) = deal_score_endpoint(Json(deal_input()))
            .await
            .expect("engine available");

        assert!(result.score >= 65.0, "deal scored {}", result.score);
        assert!(matches!(
            result.rating,
            DealRating::Excellent | DealRating::Good
        ));
        assert_eq!(result.factors.len(), 5);
    }

    #[tokio::test]
    async fn leverage_endpoint_scores_input() {
        let input = LeverageScoreInput {
            occupancy_rate: 85.0,
            market_occupancy: 95.0,
            current_month: 12,
            rent_vs_market_pct: 1.1,
            concession_prevalence: 0.5,
            building_age: 30.0,
            google_rating: Some(3.0),
            property_units: 250,
        };

        let Json(result) = leverage_score_endpoint(Json(input))
            .await
            .expect("engine available");

        assert_eq!(result.level, LeverageLevel::High);
        assert!(!result.negotiation_tips.is_empty());
        assert!(result.best_timing.starts_with("Now is a strong time"));
    }

    #[tokio::test]
    async fn health_route_responds() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let payload: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(payload["status"], "ok");
    }

    #[tokio::test]
    async fn malformed_payload_is_rejected() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/scores/deal")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"current_rent":"lots"}"#))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn out_of_range_counts_still_score() {
        let payload = json!({
            "occupancy_rate": 91.0,
            "market_occupancy": 93.0,
            "current_month": -1,
            "rent_vs_market_pct": 1.0,
            "concession_prevalence": 0.2,
            "building_age": 8.5,
            "property_units": 60.7
        });
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/scores/leverage")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let result: LeverageScoreResult = serde_json::from_slice(&body).expect("json body");
        assert_eq!(result.factors.len(), 5);
    }

    #[tokio::test]
    async fn unknown_property_returns_not_found() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/properties/missing/scores")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
