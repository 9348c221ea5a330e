//! Deal and leverage scoring for rental listings.
//!
//! The [`scoring`] module holds the engines; [`snapshot`] adapts merged
//! property and market records into engine inputs and serves them over HTTP.

pub mod config;
pub mod error;
pub mod scoring;
pub mod snapshot;
pub mod telemetry;

pub use scoring::{
    calculate_deal_score, calculate_leverage_score, DealScoreInput, DealScoreResult,
    EngineError, LeverageScoreInput, LeverageScoreResult, ScoreFactor, ScoringEngine,
};
