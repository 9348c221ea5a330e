//! Rule tables turning factor state into summary, recommendation, and
//! negotiation copy. Wording is product copy and may change without affecting
//! scores.

use super::aggregate::dominant;
use super::model::{DealFactorKind, DealRating, LeverageFactorKind, ScoreFactor};

/// Below this deviation from neutral no single factor is worth calling out.
const BALANCED_DEVIATION: f64 = 5.0;
const WINTER_LEVERAGE: f64 = 70.0;
const PEAK_LEVERAGE: f64 = 40.0;

const BALANCED_SUMMARY: &str = "Pricing is in line with the market across every signal.";
const LIMITED_LEVERAGE_TIP: &str =
    "Leverage is limited; negotiate on lease length or move-in date rather than price.";

pub(crate) fn deal_summary(factors: &[ScoreFactor]) -> String {
    let Some((kind, factor)) = dominant(DealFactorKind::ordered(), factors) else {
        return BALANCED_SUMMARY.to_string();
    };
    if factor.deviation() < BALANCED_DEVIATION {
        return BALANCED_SUMMARY.to_string();
    }

    let favorable = factor.value > 50.0;
    let summary = match (kind, favorable) {
        (DealFactorKind::RentVsMarket, true) => {
            "Rent is priced below comparable properties in this market."
        }
        (DealFactorKind::RentVsMarket, false) => {
            "Rent is priced above comparable properties in this market."
        }
        (DealFactorKind::OccupancyDifferential, true) => {
            "Occupancy trails the market, so the landlord has units to fill."
        }
        (DealFactorKind::OccupancyDifferential, false) => {
            "The property is fuller than its market, which limits flexibility on price."
        }
        (DealFactorKind::ConcessionValue, true) => {
            "Concessions here are richer than the market average."
        }
        (DealFactorKind::ConcessionValue, false) => {
            "Concessions here are thinner than the market average."
        }
        (DealFactorKind::RentTrend, true) => "Market rents are softening, favoring renters.",
        (DealFactorKind::RentTrend, false) => "Market rents are climbing, favoring landlords.",
        (DealFactorKind::QualityModifier, true) => {
            "Strong ratings and amenities add to the value of this rent."
        }
        (DealFactorKind::QualityModifier, false) => {
            "Weak ratings, age, or amenities detract from the value of this rent."
        }
    };

    summary.to_string()
}

pub(crate) fn deal_recommendation(rating: DealRating) -> String {
    match rating {
        DealRating::Excellent => "Excellent deal: act now before pricing catches up.",
        DealRating::Good => "Good deal: reasonable to proceed at current terms.",
        DealRating::Fair => "Fair deal: there is room to negotiate on rent or concessions.",
        DealRating::BelowAverage => "Below average: negotiate hard or look elsewhere.",
    }
    .to_string()
}

fn tip_for(kind: LeverageFactorKind) -> &'static str {
    match kind {
        LeverageFactorKind::OccupancyGap => {
            "Occupancy is below the market; ask for reduced rent or waived fees to fill the unit."
        }
        LeverageFactorKind::Seasonality => {
            "It is the off-season; landlords are more flexible on price and lease terms now."
        }
        LeverageFactorKind::RentPositioning => {
            "Asking rent is above market; bring comparable listings to negotiate it down."
        }
        LeverageFactorKind::ConcessionPrevalence => {
            "Concessions are common nearby; ask for a free month or a reduced deposit."
        }
        LeverageFactorKind::PropertyCharacteristics => {
            "Large or older properties can absorb concessions; request upgrades or a longer-term discount."
        }
    }
}

/// Tips for every factor at or above `threshold`, largest weighted
/// contribution first, capped at `max_tips`.
pub(crate) fn negotiation_tips(
    factors: &[ScoreFactor],
    threshold: f64,
    max_tips: usize,
) -> Vec<String> {
    let mut triggered: Vec<(LeverageFactorKind, &ScoreFactor)> = LeverageFactorKind::ordered()
        .into_iter()
        .zip(factors.iter())
        .filter(|(_, factor)| factor.value >= threshold)
        .collect();
    triggered.sort_by(|a, b| b.1.contribution().total_cmp(&a.1.contribution()));

    let mut tips: Vec<String> = triggered
        .into_iter()
        .take(max_tips)
        .map(|(kind, _)| tip_for(kind).to_string())
        .collect();

    if tips.is_empty() {
        tips.push(LIMITED_LEVERAGE_TIP.to_string());
    }
    tips
}

pub(crate) fn best_timing(seasonal_value: f64) -> String {
    if seasonal_value >= WINTER_LEVERAGE {
        "Now is a strong time to negotiate: winter demand is at its low point."
    } else if seasonal_value <= PEAK_LEVERAGE {
        "Limited leverage during peak season; expect better terms from November through February."
    } else {
        "Moderate leverage in the shoulder season; winter months offer the best terms."
    }
    .to_string()
}
