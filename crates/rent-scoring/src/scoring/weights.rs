use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Deal score weights. Favors price position over softer market signals.
pub const DEAL_WEIGHTS: DealWeights = DealWeights {
    rent_vs_market: 0.35,
    occupancy: 0.20,
    concessions: 0.20,
    rent_trend: 0.15,
    quality: 0.10,
};

/// Leverage score weights. Occupancy pressure dominates negotiating power.
pub const LEVERAGE_WEIGHTS: LeverageWeights = LeverageWeights {
    occupancy_gap: 0.30,
    seasonality: 0.20,
    rent_positioning: 0.20,
    concession_prevalence: 0.15,
    property_characteristics: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealWeights {
    pub rent_vs_market: f64,
    pub occupancy: f64,
    pub concessions: f64,
    pub rent_trend: f64,
    pub quality: f64,
}

impl Default for DealWeights {
    fn default() -> Self {
        DEAL_WEIGHTS
    }
}

impl DealWeights {
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Weights in factor order: rent, occupancy, concessions, trend, quality.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.rent_vs_market,
            self.occupancy,
            self.concessions,
            self.rent_trend,
            self.quality,
        ]
    }

    pub fn is_valid(&self) -> bool {
        weights_valid(&self.as_array())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeverageWeights {
    pub occupancy_gap: f64,
    pub seasonality: f64,
    pub rent_positioning: f64,
    pub concession_prevalence: f64,
    pub property_characteristics: f64,
}

impl Default for LeverageWeights {
    fn default() -> Self {
        LEVERAGE_WEIGHTS
    }
}

impl LeverageWeights {
    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Weights in factor order: occupancy, season, rent, concessions, property.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.occupancy_gap,
            self.seasonality,
            self.rent_positioning,
            self.concession_prevalence,
            self.property_characteristics,
        ]
    }

    pub fn is_valid(&self) -> bool {
        weights_valid(&self.as_array())
    }
}

fn weights_valid(weights: &[f64]) -> bool {
    let all_usable = weights
        .iter()
        .all(|weight| weight.is_finite() && *weight >= 0.0);
    all_usable && (weights.iter().sum::<f64>() - 1.0).abs() < WEIGHT_TOLERANCE
}
