use super::aggregate::aggregate;
use super::config::{ScoringConfig, ScoringConfigError};
use super::model::{
    DealRating, DealScoreInput, DealScoreResult, LeverageLevel, LeverageScoreInput,
    LeverageScoreResult,
};
use super::{deal, leverage, narrative};
use chrono::{Datelike, Local};
use tracing::debug;

/// Scoring engine holding the validated tables. Scoring is pure: the same
/// input always produces the same result for a given engine.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
    reference_year: i32,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let reference_year = config
            .reference_year
            .unwrap_or_else(|| Local::now().year());

        Ok(Self {
            config,
            reference_year,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Year buildings are aged against.
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn deal_score(&self, input: &DealScoreInput) -> DealScoreResult {
        let weights = self.config.deal_weights;
        let quality = deal::quality_modifier(input, weights.quality, self.reference_year);
        let factors = vec![
            deal::rent_vs_market(input, weights.rent_vs_market),
            deal::occupancy_differential(input, weights.occupancy),
            deal::concession_value(input, weights.concessions),
            deal::rent_trend(input, weights.rent_trend),
            quality.factor,
        ];

        let score = aggregate(&factors, quality.dampener);
        let rating = DealRating::from_score(score);
        debug!(score, ?rating, dampener = quality.dampener, "deal score computed");

        DealScoreResult {
            score,
            rating,
            summary: narrative::deal_summary(&factors),
            recommendation: narrative::deal_recommendation(rating),
            factors,
        }
    }

    pub fn leverage_score(&self, input: &LeverageScoreInput) -> LeverageScoreResult {
        let weights = self.config.leverage_weights;
        let seasonality =
            leverage::seasonality(input, weights.seasonality, &self.config.seasonal_leverage);
        let best_timing = narrative::best_timing(seasonality.value);
        let factors = vec![
            leverage::occupancy_gap(input, weights.occupancy_gap),
            seasonality,
            leverage::rent_positioning(input, weights.rent_positioning),
            leverage::concession_prevalence(input, weights.concession_prevalence),
            leverage::property_characteristics(input, weights.property_characteristics),
        ];

        let score = aggregate(&factors, 1.0);
        let level = LeverageLevel::from_score(score);
        debug!(score, ?level, month = input.current_month, "leverage score computed");

        LeverageScoreResult {
            score,
            level,
            negotiation_tips: narrative::negotiation_tips(
                &factors,
                self.config.tip_threshold,
                self.config.max_tips,
            ),
            best_timing,
            factors,
        }
    }
}

/// Raised when the scoring engine cannot be brought up.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("scoring engine unavailable: {0}")]
    Unavailable(#[from] ScoringConfigError),
}
