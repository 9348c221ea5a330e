use super::deal::NEUTRAL_RATING;
use super::model::{LeverageFactorKind, LeverageScoreInput, ScoreFactor};
use super::normalize::{
    clamp_score, non_negative, ratio_to_pct, round_to, EPSILON, NEUTRAL_SCORE,
};

const OCCUPANCY_SENSITIVITY: f64 = 6.0;
const RENT_SENSITIVITY: f64 = 250.0;
/// 25% prevalence reads as neutral; half the market conceding saturates.
const PREVALENCE_POINTS: f64 = 200.0;
const AGE_CAP_YEARS: f64 = 50.0;
const AGE_POINTS: f64 = 0.4;
const AGE_OFFSET: f64 = 6.0;
const RATING_POINTS: f64 = 10.0;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn factor(kind: LeverageFactorKind, value: f64, weight: f64, description: String) -> ScoreFactor {
    ScoreFactor {
        name: kind.label().to_string(),
        value: round_to(clamp_score(value), 1),
        weight,
        description,
    }
}

/// Month clamped to 1..=12.
pub(crate) fn month_index(current_month: u32) -> usize {
    current_month.clamp(1, 12) as usize - 1
}

pub(crate) fn occupancy_gap(input: &LeverageScoreInput, weight: f64) -> ScoreFactor {
    let occupancy = non_negative(input.occupancy_rate);
    let market = non_negative(input.market_occupancy);

    if market < EPSILON {
        return factor(
            LeverageFactorKind::OccupancyGap,
            NEUTRAL_SCORE,
            weight,
            "No market occupancy benchmark; occupancy leverage treated as neutral".to_string(),
        );
    }

    let gap = market - occupancy;
    let description = if gap > 0.5 {
        format!("{gap:.1} points emptier than the market ({occupancy:.1}% vs {market:.1}%)")
    } else if gap < -0.5 {
        format!(
            "{:.1} points fuller than the market ({occupancy:.1}% vs {market:.1}%)",
            gap.abs()
        )
    } else {
        format!("Occupancy in line with the market at {occupancy:.1}%")
    };

    factor(
        LeverageFactorKind::OccupancyGap,
        NEUTRAL_SCORE + gap * OCCUPANCY_SENSITIVITY,
        weight,
        description,
    )
}

pub(crate) fn seasonality(
    input: &LeverageScoreInput,
    weight: f64,
    seasonal_leverage: &[f64; 12],
) -> ScoreFactor {
    let index = month_index(input.current_month);
    let season = match index {
        10 | 11 | 0 | 1 => "winter low season",
        4..=7 => "peak summer season",
        _ => "shoulder season",
    };

    factor(
        LeverageFactorKind::Seasonality,
        seasonal_leverage[index],
        weight,
        format!("{} falls in the {season} for leasing demand", MONTH_NAMES[index]),
    )
}

pub(crate) fn rent_positioning(input: &LeverageScoreInput, weight: f64) -> ScoreFactor {
    let ratio = if input.rent_vs_market_pct.is_finite() && input.rent_vs_market_pct > EPSILON {
        input.rent_vs_market_pct
    } else {
        1.0
    };

    let difference_pct = ratio_to_pct(ratio - 1.0);
    let description = if difference_pct.abs() < 1.0 {
        "Asking rent sits at the market rate".to_string()
    } else if difference_pct > 0.0 {
        format!("Asking rent is {difference_pct:.1}% above the market rate")
    } else {
        format!(
            "Asking rent is already {:.1}% below the market rate",
            difference_pct.abs()
        )
    };

    factor(
        LeverageFactorKind::RentPositioning,
        NEUTRAL_SCORE + (ratio - 1.0) * RENT_SENSITIVITY,
        weight,
        description,
    )
}

pub(crate) fn concession_prevalence(input: &LeverageScoreInput, weight: f64) -> ScoreFactor {
    let prevalence = non_negative(input.concession_prevalence).min(1.0);

    factor(
        LeverageFactorKind::ConcessionPrevalence,
        prevalence * PREVALENCE_POINTS,
        weight,
        format!(
            "{:.0}% of comparable properties are offering concessions",
            ratio_to_pct(prevalence)
        ),
    )
}

pub(crate) fn property_characteristics(input: &LeverageScoreInput, weight: f64) -> ScoreFactor {
    let units = input.property_units;
    let units_points = match units {
        200.. => 15.0,
        100..=199 => 10.0,
        50..=99 => 5.0,
        20..=49 => 0.0,
        _ => -10.0,
    };
    let age = non_negative(input.building_age).min(AGE_CAP_YEARS);
    let rating = input
        .google_rating
        .filter(|rating| rating.is_finite())
        .map(|rating| rating.clamp(0.0, 5.0));
    let effective_rating = rating.unwrap_or(NEUTRAL_RATING);

    let value = NEUTRAL_SCORE + units_points + age * AGE_POINTS - AGE_OFFSET
        - (effective_rating - NEUTRAL_RATING) * RATING_POINTS;

    let rating_text = match rating {
        Some(rating) => format!("{rating:.1}-star rating"),
        None => "unrated".to_string(),
    };

    factor(
        LeverageFactorKind::PropertyCharacteristics,
        value,
        weight,
        format!("{units} units, {age:.0} years old, {rating_text}"),
    )
}
