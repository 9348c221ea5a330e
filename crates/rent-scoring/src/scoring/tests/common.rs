use crate::scoring::{DealScoreInput, LeverageScoreInput, ScoringConfig, ScoringEngine};

pub(super) const REFERENCE_YEAR: i32 = 2025;

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig {
        reference_year: Some(REFERENCE_YEAR),
        ..ScoringConfig::default()
    }
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(scoring_config()).expect("default config is valid")
}

/// Subject property priced exactly at its market.
pub(super) fn neutral_deal_input() -> DealScoreInput {
    DealScoreInput {
        current_rent: 2000.0,
        market_rent: 2000.0,
        avg_rent_per_sqft: 2.0,
        unit_sqft: 1000.0,
        occupancy_rate: 90.0,
        market_occupancy: 90.0,
        concession_value: 0.0,
        market_concession_value: 0.0,
        rent_trend_3mo: 0.0,
        rent_trend_12mo: 0.0,
        google_rating: None,
        building_year: 2015,
        amenity_count: 5,
    }
}

/// Well-reviewed property renting under market in a softening area.
pub(super) fn bargain_deal_input() -> DealScoreInput {
    DealScoreInput {
        current_rent: 1700.0,
        market_rent: 2000.0,
        avg_rent_per_sqft: 2.0,
        unit_sqft: 1000.0,
        occupancy_rate: 85.0,
        market_occupancy: 92.0,
        concession_value: 1000.0,
        market_concession_value: 200.0,
        rent_trend_3mo: -2.0,
        rent_trend_12mo: -1.0,
        google_rating: Some(4.5),
        building_year: 2018,
        amenity_count: 10,
    }
}

pub(super) fn overpriced_deal_input() -> DealScoreInput {
    DealScoreInput {
        current_rent: 2400.0,
        occupancy_rate: 97.0,
        market_occupancy: 92.0,
        concession_value: 0.0,
        market_concession_value: 500.0,
        rent_trend_3mo: 3.0,
        rent_trend_12mo: 5.0,
        ..neutral_deal_input()
    }
}

pub(super) fn neutral_leverage_input() -> LeverageScoreInput {
    LeverageScoreInput {
        occupancy_rate: 92.0,
        market_occupancy: 92.0,
        current_month: 4,
        rent_vs_market_pct: 1.0,
        concession_prevalence: 0.25,
        building_age: 15.0,
        google_rating: None,
        property_units: 40,
    }
}

/// Half-empty winter listing priced over market at a large, older complex.
pub(super) fn strong_leverage_input() -> LeverageScoreInput {
    LeverageScoreInput {
        occupancy_rate: 85.0,
        market_occupancy: 94.0,
        current_month: 12,
        rent_vs_market_pct: 1.08,
        concession_prevalence: 0.45,
        building_age: 30.0,
        google_rating: Some(3.0),
        property_units: 250,
    }
}
