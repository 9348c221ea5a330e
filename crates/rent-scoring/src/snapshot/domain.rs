use crate::scoring::normalize::{age_from_year, safe_ratio};
use crate::scoring::{DealScoreInput, LeverageScoreInput};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for listed properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Property attributes the scoring engines consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub average_unit_size: f64,
    pub occupancy_rate: f64,
    #[serde(default)]
    pub google_rating: Option<f64>,
    pub year_built: i32,
    pub amenity_count: u32,
    pub total_units: u32,
}

/// Aggregates for the comparable market area around a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub avg_rent: f64,
    pub avg_rent_per_sq_ft: f64,
    pub avg_occupancy: f64,
    pub avg_concession_value: f64,
    pub rent_trend_3mo: f64,
    pub rent_trend_12mo: f64,
    /// Fraction (0.0-1.0) of comparable properties offering concessions.
    pub concession_prevalence: f64,
    pub property_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyRent {
    pub current_rent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyOccupancy {
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropertyConcession {
    pub concession_value: f64,
}

/// Merged property and market records for one property, as supplied by the
/// record store. Monthly records are optional; the latest occupancy record
/// takes precedence over the property's own occupancy figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyMarketSnapshot {
    pub property_id: PropertyId,
    pub property: PropertySnapshot,
    #[serde(default)]
    pub rent: Option<PropertyRent>,
    #[serde(default)]
    pub occupancy: Option<PropertyOccupancy>,
    #[serde(default)]
    pub concession: Option<PropertyConcession>,
    pub market: MarketSnapshot,
}

impl PropertyMarketSnapshot {
    pub fn current_rent(&self) -> f64 {
        self.rent.map(|rent| rent.current_rent).unwrap_or(0.0)
    }

    pub fn occupancy_rate(&self) -> f64 {
        self.occupancy
            .map(|occupancy| occupancy.occupancy_rate)
            .unwrap_or(self.property.occupancy_rate)
    }

    pub fn concession_value(&self) -> f64 {
        self.concession
            .map(|concession| concession.concession_value)
            .unwrap_or(0.0)
    }

    /// Deal input, or `None` when neither the property nor its market has a
    /// rent figure to compare.
    pub fn deal_input(&self) -> Option<DealScoreInput> {
        let input = DealScoreInput {
            current_rent: self.current_rent(),
            market_rent: self.market.avg_rent,
            avg_rent_per_sqft: self.market.avg_rent_per_sq_ft,
            unit_sqft: self.property.average_unit_size,
            occupancy_rate: self.occupancy_rate(),
            market_occupancy: self.market.avg_occupancy,
            concession_value: self.concession_value(),
            market_concession_value: self.market.avg_concession_value,
            rent_trend_3mo: self.market.rent_trend_3mo,
            rent_trend_12mo: self.market.rent_trend_12mo,
            google_rating: self.property.google_rating,
            building_year: self.property.year_built,
            amenity_count: self.property.amenity_count,
        };

        input.has_rent_signal().then_some(input)
    }

    /// Leverage input as of `today`, or `None` when there is no occupancy
    /// signal for either the property or its market.
    pub fn leverage_input(&self, today: NaiveDate) -> Option<LeverageScoreInput> {
        let current_rent = self.current_rent();
        let rent_vs_market_pct = if current_rent > 0.0 {
            safe_ratio(current_rent, self.market.avg_rent, 1.0)
        } else {
            1.0
        };

        let input = LeverageScoreInput {
            occupancy_rate: self.occupancy_rate(),
            market_occupancy: self.market.avg_occupancy,
            current_month: today.month(),
            rent_vs_market_pct,
            concession_prevalence: self.market.concession_prevalence,
            building_age: age_from_year(self.property.year_built, today.year()),
            google_rating: self.property.google_rating,
            property_units: self.property.total_units,
        };

        input.has_occupancy_signal().then_some(input)
    }
}
