use super::model::{DealFactorKind, DealScoreInput, ScoreFactor};
use super::normalize::{
    age_from_year, clamp_score, finite_or_zero, non_negative, ratio_to_pct, round_to, safe_ratio,
    EPSILON, NEUTRAL_SCORE,
};

/// Points lost per unit of rent ratio above market (and gained below it).
const RENT_SENSITIVITY: f64 = 250.0;
const MARKET_RATIO_SHARE: f64 = 0.7;
const SQFT_RATIO_SHARE: f64 = 0.3;
/// Points per percentage point of occupancy below the market.
const OCCUPANCY_SENSITIVITY: f64 = 5.0;
/// Points per percent of monthly rent in extra concessions.
const CONCESSION_SENSITIVITY: f64 = 0.5;
const TREND_SHORT_SHARE: f64 = 0.6;
const TREND_LONG_SHARE: f64 = 0.4;
/// Points per percent of blended rent movement.
const TREND_SENSITIVITY: f64 = 5.0;

pub(crate) const NEUTRAL_RATING: f64 = 3.5;
const RATING_POINTS: f64 = 20.0;
const AGE_BASELINE_YEARS: f64 = 15.0;
const AGE_CAP_YEARS: f64 = 60.0;
const AGE_POINTS: f64 = 0.5;
const AMENITY_BASELINE: f64 = 5.0;
const AMENITY_CAP: u32 = 20;
const AMENITY_POINTS: f64 = 2.0;
const DAMPENER_FLOOR: f64 = 0.85;
const DAMPENER_SPAN: f64 = 0.30;

/// Quality factor plus the multiplier it applies to the weighted deal score.
#[derive(Debug, Clone)]
pub(crate) struct QualityAssessment {
    pub factor: ScoreFactor,
    pub dampener: f64,
}

fn factor(kind: DealFactorKind, value: f64, weight: f64, description: String) -> ScoreFactor {
    ScoreFactor {
        name: kind.label().to_string(),
        value: round_to(clamp_score(value), 1),
        weight,
        description,
    }
}

pub(crate) fn rent_vs_market(input: &DealScoreInput, weight: f64) -> ScoreFactor {
    let current = non_negative(input.current_rent);
    let market = non_negative(input.market_rent);
    let expected = non_negative(input.avg_rent_per_sqft) * non_negative(input.unit_sqft);

    if current < EPSILON {
        return factor(
            DealFactorKind::RentVsMarket,
            NEUTRAL_SCORE,
            weight,
            "No current rent on record; treated as priced at market".to_string(),
        );
    }

    let market_ratio = (market > EPSILON).then(|| safe_ratio(current, market, 1.0));
    let sqft_ratio = (expected > EPSILON).then(|| safe_ratio(current, expected, 1.0));

    let ratio = match (market_ratio, sqft_ratio) {
        (Some(by_market), Some(by_sqft)) => {
            by_market * MARKET_RATIO_SHARE + by_sqft * SQFT_RATIO_SHARE
        }
        (Some(by_market), None) => by_market,
        (None, Some(by_sqft)) => by_sqft,
        (None, None) => {
            return factor(
                DealFactorKind::RentVsMarket,
                NEUTRAL_SCORE,
                weight,
                "No market rent reference available; treated as priced at market".to_string(),
            );
        }
    };

    let value = NEUTRAL_SCORE - (ratio - 1.0) * RENT_SENSITIVITY;
    let difference_pct = ratio_to_pct(ratio - 1.0);
    let description = if difference_pct.abs() < 1.0 {
        format!("Rent of ${current:.0} is in line with the market")
    } else if difference_pct < 0.0 {
        format!(
            "Rent of ${current:.0} is {:.1}% below comparable units",
            difference_pct.abs()
        )
    } else {
        format!("Rent of ${current:.0} is {difference_pct:.1}% above comparable units")
    };

    factor(DealFactorKind::RentVsMarket, value, weight, description)
}

pub(crate) fn occupancy_differential(input: &DealScoreInput, weight: f64) -> ScoreFactor {
    let occupancy = non_negative(input.occupancy_rate);
    let market = non_negative(input.market_occupancy);

    if market < EPSILON {
        return factor(
            DealFactorKind::OccupancyDifferential,
            NEUTRAL_SCORE,
            weight,
            "No market occupancy benchmark available".to_string(),
        );
    }

    let gap = market - occupancy;
    let description = if gap > 0.5 {
        format!(
            "Occupancy of {occupancy:.1}% trails the market ({market:.1}%) by {gap:.1} points"
        )
    } else if gap < -0.5 {
        format!(
            "Occupancy of {occupancy:.1}% runs {:.1} points above the market ({market:.1}%)",
            gap.abs()
        )
    } else {
        format!("Occupancy matches the market at {occupancy:.1}%")
    };

    factor(
        DealFactorKind::OccupancyDifferential,
        NEUTRAL_SCORE + gap * OCCUPANCY_SENSITIVITY,
        weight,
        description,
    )
}

pub(crate) fn concession_value(input: &DealScoreInput, weight: f64) -> ScoreFactor {
    let offered = non_negative(input.concession_value);
    let market_offered = non_negative(input.market_concession_value);
    let market_rent = non_negative(input.market_rent);
    let reference_rent = if market_rent > EPSILON {
        market_rent
    } else {
        non_negative(input.current_rent)
    };

    if reference_rent < EPSILON {
        return factor(
            DealFactorKind::ConcessionValue,
            NEUTRAL_SCORE,
            weight,
            "No rent reference available to value concessions".to_string(),
        );
    }

    let difference = offered - market_offered;
    let difference_pct = ratio_to_pct(safe_ratio(difference, reference_rent, 0.0));
    let description = if offered < EPSILON && market_offered < EPSILON {
        "No concessions offered here or across the market".to_string()
    } else if difference > 0.5 {
        format!(
            "Concessions worth ${offered:.0} beat the market average by ${difference:.0}"
        )
    } else if difference < -0.5 {
        format!(
            "Concessions trail the market average of ${market_offered:.0} by ${:.0}",
            difference.abs()
        )
    } else {
        format!("Concessions match the market average of ${market_offered:.0}")
    };

    factor(
        DealFactorKind::ConcessionValue,
        NEUTRAL_SCORE + difference_pct * CONCESSION_SENSITIVITY,
        weight,
        description,
    )
}

pub(crate) fn rent_trend(input: &DealScoreInput, weight: f64) -> ScoreFactor {
    let short = finite_or_zero(input.rent_trend_3mo);
    let long = finite_or_zero(input.rent_trend_12mo);
    let blended = short * TREND_SHORT_SHARE + long * TREND_LONG_SHARE;

    let direction = if blended < -0.25 {
        "Rents are softening"
    } else if blended > 0.25 {
        "Rents are rising"
    } else {
        "Rents are flat"
    };
    let description =
        format!("{direction} ({short:+.1}% over 3 months, {long:+.1}% over 12 months)");

    factor(
        DealFactorKind::RentTrend,
        NEUTRAL_SCORE - blended * TREND_SENSITIVITY,
        weight,
        description,
    )
}

pub(crate) fn quality_modifier(
    input: &DealScoreInput,
    weight: f64,
    reference_year: i32,
) -> QualityAssessment {
    let rating = input
        .google_rating
        .filter(|rating| rating.is_finite())
        .map(|rating| rating.clamp(0.0, 5.0));
    let effective_rating = rating.unwrap_or(NEUTRAL_RATING);
    let age = age_from_year(input.building_year, reference_year);
    let amenities = input.amenity_count.min(AMENITY_CAP);

    let value = NEUTRAL_SCORE
        + (effective_rating - NEUTRAL_RATING) * RATING_POINTS
        + (AGE_BASELINE_YEARS - age.min(AGE_CAP_YEARS)) * AGE_POINTS
        + (f64::from(amenities) - AMENITY_BASELINE) * AMENITY_POINTS;
    let quality = factor(DealFactorKind::QualityModifier, value, weight, String::new());
    let dampener = DAMPENER_FLOOR + DAMPENER_SPAN * quality.value / 100.0;

    let rating_text = match rating {
        Some(rating) => format!("{rating:.1}-star rating"),
        None => format!("no rating (assumed {NEUTRAL_RATING:.1})"),
    };
    let age_text = if input.building_year > 0 {
        format!("built {age:.0} years ago")
    } else {
        "build year unknown".to_string()
    };

    QualityAssessment {
        factor: ScoreFactor {
            description: format!(
                "{rating_text}, {age_text}, {amenities} amenities (x{dampener:.2} adjustment)"
            ),
            ..quality
        },
        dampener,
    }
}
