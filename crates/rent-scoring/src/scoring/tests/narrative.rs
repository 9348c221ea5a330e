use crate::scoring::model::{DealRating, ScoreFactor};
use crate::scoring::narrative::{best_timing, deal_recommendation, deal_summary, negotiation_tips};

fn factor(name: &str, value: f64, weight: f64) -> ScoreFactor {
    ScoreFactor {
        name: name.to_string(),
        value,
        weight,
        description: format!("{name} at {value}"),
    }
}

#[test]
fn summary_calls_out_the_most_extreme_factor() {
    let factors = vec![
        factor("Rent vs Market", 58.0, 0.35),
        factor("Occupancy Differential", 50.0, 0.2),
        factor("Concession Value", 50.0, 0.2),
        factor("Rent Trend", 20.0, 0.15),
        factor("Quality Modifier", 55.0, 0.1),
    ];

    assert_eq!(
        deal_summary(&factors),
        "Market rents are climbing, favoring landlords."
    );
}

#[test]
fn summary_is_balanced_when_nothing_stands_out() {
    let factors = vec![
        factor("Rent vs Market", 52.0, 0.35),
        factor("Occupancy Differential", 47.0, 0.2),
        factor("Concession Value", 50.0, 0.2),
        factor("Rent Trend", 53.0, 0.15),
        factor("Quality Modifier", 51.0, 0.1),
    ];

    assert!(deal_summary(&factors).contains("in line with the market"));
}

#[test]
fn recommendation_tracks_rating_buckets() {
    assert!(deal_recommendation(DealRating::from_score(80.0)).starts_with("Excellent"));
    assert!(deal_recommendation(DealRating::from_score(79.9)).starts_with("Good"));
    assert!(deal_recommendation(DealRating::from_score(64.9)).starts_with("Fair"));
    assert!(deal_recommendation(DealRating::from_score(49.9)).starts_with("Below average"));
}

#[test]
fn tips_with_equal_impact_keep_factor_order() {
    let factors = vec![
        factor("Occupancy Gap", 40.0, 0.3),
        factor("Seasonality", 80.0, 0.15),
        factor("Rent Positioning", 50.0, 0.2),
        factor("Concession Prevalence", 80.0, 0.15),
        factor("Property Characteristics", 60.0, 0.2),
    ];

    let tips = negotiation_tips(&factors, 65.0, 3);

    assert_eq!(tips.len(), 2);
    assert!(tips[0].contains("off-season"));
    assert!(tips[1].contains("Concessions are common"));
}

#[test]
fn timing_reflects_seasonal_value() {
    assert!(best_timing(85.0).contains("winter demand"));
    assert!(best_timing(25.0).starts_with("Limited leverage"));
    assert!(best_timing(60.0).contains("shoulder season"));
}
