use super::weights::{DealWeights, LeverageWeights};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const SCORING_CONFIG_PATH_VAR: &str = "SCORING_CONFIG_PATH";

/// Leverage contribution of each calendar month, January first. Winter favors
/// renters, mid-summer favors landlords.
pub const DEFAULT_SEASONAL_LEVERAGE: [f64; 12] = [
    80.0, 75.0, 60.0, 50.0, 40.0, 30.0, 25.0, 30.0, 50.0, 60.0, 75.0, 85.0,
];

pub const DEFAULT_TIP_THRESHOLD: f64 = 65.0;
pub const DEFAULT_MAX_TIPS: usize = 3;

/// Tables and thresholds fixed for the lifetime of a scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub deal_weights: DealWeights,
    pub leverage_weights: LeverageWeights,
    pub seasonal_leverage: [f64; 12],
    pub tip_threshold: f64,
    pub max_tips: usize,
    /// Calendar year used to age buildings. Captured from the local clock at
    /// engine instantiation when unset.
    pub reference_year: Option<i32>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            deal_weights: DealWeights::default(),
            leverage_weights: LeverageWeights::default(),
            seasonal_leverage: DEFAULT_SEASONAL_LEVERAGE,
            tip_threshold: DEFAULT_TIP_THRESHOLD,
            max_tips: DEFAULT_MAX_TIPS,
            reference_year: None,
        }
    }
}

impl ScoringConfig {
    /// Read the configuration named by `SCORING_CONFIG_PATH`, or the defaults.
    pub async fn from_env() -> Result<Self, ScoringConfigError> {
        match env::var(SCORING_CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_path(path.trim()).await,
            _ => Ok(Self::default()),
        }
    }

    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringConfigError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ScoringConfigError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ScoringConfigError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ScoringConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if !self.deal_weights.is_valid() {
            return Err(ScoringConfigError::InvalidWeights {
                engine: "deal",
                sum: self.deal_weights.sum(),
            });
        }
        if !self.leverage_weights.is_valid() {
            return Err(ScoringConfigError::InvalidWeights {
                engine: "leverage",
                sum: self.leverage_weights.sum(),
            });
        }

        for (index, value) in self.seasonal_leverage.iter().enumerate() {
            if !value.is_finite() || !(0.0..=100.0).contains(value) {
                return Err(ScoringConfigError::InvalidSeasonalValue {
                    month: index as u32 + 1,
                    value: *value,
                });
            }
        }

        if !self.tip_threshold.is_finite() {
            return Err(ScoringConfigError::InvalidTipThreshold(self.tip_threshold));
        }
        if self.max_tips == 0 {
            return Err(ScoringConfigError::InvalidTipLimit);
        }

        Ok(())
    }
}

/// Raised while loading or validating a [`ScoringConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("unable to read scoring config {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error("scoring config is not valid JSON: {0}")]
    Parse(String),
    #[error("{engine} weights must be non-negative and sum to 1.0 (got {sum:.4})")]
    InvalidWeights { engine: &'static str, sum: f64 },
    #[error("seasonal leverage for month {month} must be within 0-100 (got {value})")]
    InvalidSeasonalValue { month: u32, value: f64 },
    #[error("tip threshold must be a finite number (got {0})")]
    InvalidTipThreshold(f64),
    #[error("max_tips must be at least 1")]
    InvalidTipLimit,
}
