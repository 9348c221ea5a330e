//! Deal and leverage scoring for rental listings.
//!
//! Both engines turn a flat snapshot of property and market figures into five
//! bounded factors, a weighted score, and narrative copy for rendering.

mod aggregate;
pub mod config;
mod deal;
mod engine;
mod leverage;
pub mod model;
mod narrative;
pub mod normalize;
pub mod runtime;
pub mod weights;

#[cfg(test)]
mod tests;

pub use config::{ScoringConfig, ScoringConfigError};
pub use engine::{EngineError, ScoringEngine};
pub use model::{
    DealFactorKind, DealRating, DealScoreInput, DealScoreResult, LeverageFactorKind,
    LeverageLevel, LeverageScoreInput, LeverageScoreResult, ScoreFactor,
};
pub use runtime::{
    calculate_deal_score, calculate_leverage_score, shared_engine, shared_engine_from, EngineCell,
};
pub use weights::{DealWeights, LeverageWeights, DEAL_WEIGHTS, LEVERAGE_WEIGHTS};
