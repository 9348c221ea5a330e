use super::*;
use crate::scoring::{ScoringConfig, ScoringEngine};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

#[derive(Default)]
struct MemorySource {
    snapshots: Mutex<HashMap<PropertyId, PropertyMarketSnapshot>>,
}

impl MemorySource {
    fn with(snapshots: Vec<PropertyMarketSnapshot>) -> Self {
        let source = Self::default();
        {
            let mut guard = source.snapshots.lock().expect("source mutex poisoned");
            for snapshot in snapshots {
                guard.insert(snapshot.property_id.clone(), snapshot);
            }
        }
        source
    }
}

impl SnapshotSource for MemorySource {
    fn snapshot(&self, id: &PropertyId) -> Result<Option<PropertyMarketSnapshot>, SnapshotError> {
        let guard = self.snapshots.lock().expect("source mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

struct OfflineSource;

impl SnapshotSource for OfflineSource {
    fn snapshot(&self, _id: &PropertyId) -> Result<Option<PropertyMarketSnapshot>, SnapshotError> {
        Err(SnapshotError::Unavailable("database offline".to_string()))
    }
}

fn engine() -> Arc<ScoringEngine> {
    let config = ScoringConfig {
        reference_year: Some(2025),
        ..ScoringConfig::default()
    };
    Arc::new(ScoringEngine::new(config).expect("valid config"))
}

fn snapshot(id: &str) -> PropertyMarketSnapshot {
    PropertyMarketSnapshot {
        property_id: PropertyId(id.to_string()),
        property: PropertySnapshot {
            average_unit_size: 850.0,
            occupancy_rate: 89.0,
            google_rating: Some(4.1),
            year_built: 1998,
            amenity_count: 6,
            total_units: 220,
        },
        rent: Some(PropertyRent {
            current_rent: 1725.0,
        }),
        occupancy: None,
        concession: Some(PropertyConcession {
            concession_value: 900.0,
        }),
        market: MarketSnapshot {
            avg_rent: 1850.0,
            avg_rent_per_sq_ft: 2.1,
            avg_occupancy: 93.0,
            avg_concession_value: 400.0,
            rent_trend_3mo: -1.5,
            rent_trend_12mo: -0.5,
            concession_prevalence: 0.4,
            property_count: 31,
        },
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).expect("valid date")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

#[test]
fn service_scores_known_property() {
    let source = Arc::new(MemorySource::with(vec![snapshot("oak-terrace")]));
    let service = PropertyScoringService::new(source, engine());

    let scores = service
        .score(&PropertyId("oak-terrace".to_string()), today())
        .expect("property scores");

    let deal = scores.deal.expect("deal score present");
    let leverage = scores.leverage.expect("leverage score present");
    assert!(deal.score > 50.0, "below-market rent should score well");
    assert_eq!(deal.factors.len(), 5);
    assert_eq!(leverage.factors.len(), 5);
    assert!(leverage.best_timing.contains("winter"));
}

#[test]
fn service_reports_unknown_property() {
    let service = PropertyScoringService::new(Arc::new(MemorySource::default()), engine());

    match service.score(&PropertyId("ghost".to_string()), today()) {
        Err(PropertyScoringError::NotFound(id)) => assert_eq!(id.0, "ghost"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn degenerate_snapshot_yields_no_badges() {
    let mut empty = snapshot("vacant-lot");
    empty.rent = None;
    empty.market.avg_rent = 0.0;
    empty.property.occupancy_rate = 0.0;
    empty.market.avg_occupancy = 0.0;

    let scores = score_snapshot(&engine(), &empty, today());

    assert!(scores.deal.is_none());
    assert!(scores.leverage.is_none());
}

#[test]
fn missing_rent_record_keeps_rent_factor_neutral() {
    let mut unlisted = snapshot("unlisted");
    unlisted.rent = None;

    let scores = score_snapshot(&engine(), &unlisted, today());

    let deal = scores.deal.expect("market rent still allows a deal score");
    let rent = &deal.factors[0];
    assert_eq!(rent.value, 50.0);
    assert!(!rent.description.contains("$0"));
    assert!(!deal.summary.contains("priced below"));
}

#[tokio::test]
async fn scores_route_returns_payload() {
    let source = Arc::new(MemorySource::with(vec![snapshot("oak-terrace")]));
    let router = property_scores_router(Arc::new(PropertyScoringService::new(source, engine())));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/properties/oak-terrace/scores")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("property_id").and_then(Value::as_str),
        Some("oak-terrace")
    );
    let factors = payload
        .pointer("/deal/factors")
        .and_then(Value::as_array)
        .expect("deal factors present");
    assert_eq!(factors.len(), 5);
    assert!(payload.pointer("/leverage/negotiation_tips").is_some());
}

#[tokio::test]
async fn scores_route_returns_not_found() {
    let router = property_scores_router(Arc::new(PropertyScoringService::new(
        Arc::new(MemorySource::default()),
        engine(),
    )));

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/properties/missing/scores")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("property_id"), Some(&Value::from("missing")));
}

#[tokio::test]
async fn scores_handler_reports_unavailable_source() {
    let service = Arc::new(PropertyScoringService::new(Arc::new(OfflineSource), engine()));

    let response = router::scores_handler::<OfflineSource>(
        State(service),
        axum::extract::Path("oak-terrace".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("database offline"));
}
