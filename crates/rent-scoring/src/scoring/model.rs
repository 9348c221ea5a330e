use super::normalize::{count_from, year_from};
use serde::{Deserialize, Deserializer, Serialize};

/// Whole-number fields accept any JSON number; negatives floor to zero and
/// fractions round.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(count_from)
}

fn lenient_year<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(year_from)
}

/// Flattened property, rent, concession, and market figures scored by the deal
/// engine. Occupancy values are percentages (0-100); trends are percent change
/// and may be negative; every other field is expected to be non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealScoreInput {
    pub current_rent: f64,
    pub market_rent: f64,
    pub avg_rent_per_sqft: f64,
    pub unit_sqft: f64,
    pub occupancy_rate: f64,
    pub market_occupancy: f64,
    pub concession_value: f64,
    pub market_concession_value: f64,
    pub rent_trend_3mo: f64,
    pub rent_trend_12mo: f64,
    #[serde(default)]
    pub google_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_year")]
    pub building_year: i32,
    #[serde(deserialize_with = "lenient_count")]
    pub amenity_count: u32,
}

impl DealScoreInput {
    /// Whether the input carries any rent signal worth scoring.
    pub fn has_rent_signal(&self) -> bool {
        self.current_rent > 0.0 || self.market_rent > 0.0
    }
}

/// Figures scored by the leverage engine.
///
/// `concession_prevalence` is the FRACTION of comparable properties offering
/// concessions (0.0-1.0); values outside that range are clamped, never
/// rescaled. `rent_vs_market_pct` is a ratio where 1.0 means at market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageScoreInput {
    pub occupancy_rate: f64,
    pub market_occupancy: f64,
    /// Calendar month, 1-12. Out-of-range months clamp to January or December.
    #[serde(deserialize_with = "lenient_count")]
    pub current_month: u32,
    pub rent_vs_market_pct: f64,
    pub concession_prevalence: f64,
    pub building_age: f64,
    #[serde(default)]
    pub google_rating: Option<f64>,
    #[serde(deserialize_with = "lenient_count")]
    pub property_units: u32,
}

impl LeverageScoreInput {
    /// Whether the input carries any occupancy signal worth scoring.
    pub fn has_occupancy_signal(&self) -> bool {
        self.occupancy_rate > 0.0 || self.market_occupancy > 0.0
    }
}

/// One named, bounded contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub name: String,
    pub value: f64,
    pub weight: f64,
    pub description: String,
}

impl ScoreFactor {
    pub fn deviation(&self) -> f64 {
        (self.value - super::normalize::NEUTRAL_SCORE).abs()
    }

    pub fn contribution(&self) -> f64 {
        self.value * self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealFactorKind {
    RentVsMarket,
    OccupancyDifferential,
    ConcessionValue,
    RentTrend,
    QualityModifier,
}

impl DealFactorKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::RentVsMarket,
            Self::OccupancyDifferential,
            Self::ConcessionValue,
            Self::RentTrend,
            Self::QualityModifier,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RentVsMarket => "Rent vs Market",
            Self::OccupancyDifferential => "Occupancy Differential",
            Self::ConcessionValue => "Concession Value",
            Self::RentTrend => "Rent Trend",
            Self::QualityModifier => "Quality Modifier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageFactorKind {
    OccupancyGap,
    Seasonality,
    RentPositioning,
    ConcessionPrevalence,
    PropertyCharacteristics,
}

impl LeverageFactorKind {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::OccupancyGap,
            Self::Seasonality,
            Self::RentPositioning,
            Self::ConcessionPrevalence,
            Self::PropertyCharacteristics,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OccupancyGap => "Occupancy Gap",
            Self::Seasonality => "Seasonality",
            Self::RentPositioning => "Rent Positioning",
            Self::ConcessionPrevalence => "Concession Prevalence",
            Self::PropertyCharacteristics => "Property Characteristics",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealRating {
    Excellent,
    Good,
    Fair,
    BelowAverage,
}

impl DealRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::BelowAverage
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent Deal",
            Self::Good => "Good Deal",
            Self::Fair => "Fair Deal",
            Self::BelowAverage => "Below Average",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeverageLevel {
    High,
    Moderate,
    Low,
}

impl LeverageLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::High
        } else if score >= 45.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Leverage",
            Self::Moderate => "Moderate Leverage",
            Self::Low => "Low Leverage",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealScoreResult {
    pub score: f64,
    pub rating: DealRating,
    pub factors: Vec<ScoreFactor>,
    pub summary: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageScoreResult {
    pub score: f64,
    pub level: LeverageLevel,
    pub factors: Vec<ScoreFactor>,
    pub negotiation_tips: Vec<String>,
    pub best_timing: String,
}
