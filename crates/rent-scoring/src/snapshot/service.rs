use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use super::domain::{PropertyId, PropertyMarketSnapshot};
use super::source::{SnapshotError, SnapshotSource};
use crate::scoring::{DealScoreResult, LeverageScoreResult, ScoringEngine};

/// Both scores for one property. A missing score means the snapshot had no
/// usable signal for that engine and no badge should be shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyScores {
    pub property_id: PropertyId,
    pub as_of: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal: Option<DealScoreResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<LeverageScoreResult>,
}

/// Service composing the snapshot source with a scoring engine.
pub struct PropertyScoringService<S> {
    source: Arc<S>,
    engine: Arc<ScoringEngine>,
}

impl<S> PropertyScoringService<S>
where
    S: SnapshotSource + 'static,
{
    pub fn new(source: Arc<S>, engine: Arc<ScoringEngine>) -> Self {
        Self { source, engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Look up a property's snapshot and score it as of `today`.
    pub fn score(
        &self,
        property_id: &PropertyId,
        today: NaiveDate,
    ) -> Result<PropertyScores, PropertyScoringError> {
        let snapshot = self
            .source
            .snapshot(property_id)?
            .ok_or_else(|| PropertyScoringError::NotFound(property_id.clone()))?;

        Ok(score_snapshot(&self.engine, &snapshot, today))
    }
}

/// Score a snapshot, skipping any engine whose call-site precondition fails.
pub fn score_snapshot(
    engine: &ScoringEngine,
    snapshot: &PropertyMarketSnapshot,
    today: NaiveDate,
) -> PropertyScores {
    let deal = snapshot
        .deal_input()
        .map(|input| engine.deal_score(&input));
    let leverage = snapshot
        .leverage_input(today)
        .map(|input| engine.leverage_score(&input));

    debug!(
        property_id = %snapshot.property_id,
        deal = deal.is_some(),
        leverage = leverage.is_some(),
        "property scored"
    );

    PropertyScores {
        property_id: snapshot.property_id.clone(),
        as_of: today,
        deal,
        leverage,
    }
}

/// Error raised by the property scoring service.
#[derive(Debug, thiserror::Error)]
pub enum PropertyScoringError {
    #[error("property {0} not found")]
    NotFound(PropertyId),
    #[error(transparent)]
    Source(#[from] SnapshotError),
}
