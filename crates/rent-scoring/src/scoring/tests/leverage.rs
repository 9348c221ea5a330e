use super::common::*;
use crate::scoring::{LeverageFactorKind, LeverageLevel, LeverageScoreInput};

#[test]
fn neutral_inputs_give_moderate_leverage() {
    let result = engine().leverage_score(&neutral_leverage_input());

    assert_eq!(result.score, 50.0);
    assert_eq!(result.level, LeverageLevel::Moderate);
    assert_eq!(result.negotiation_tips.len(), 1);
    assert!(result.negotiation_tips[0].starts_with("Leverage is limited"));
    assert!(result.best_timing.contains("shoulder season"));
}

#[test]
fn strong_position_orders_tips_by_impact() {
    let result = engine().leverage_score(&strong_leverage_input());

    assert!(result.score >= 80.0, "got {}", result.score);
    assert_eq!(result.level, LeverageLevel::High);
    assert_eq!(result.negotiation_tips.len(), 3);
    assert!(result.negotiation_tips[0].starts_with("Occupancy is below the market"));
    assert!(result.negotiation_tips[1].contains("off-season"));
    assert!(result.negotiation_tips[2].contains("above market"));
    assert!(result.best_timing.contains("winter"));
}

#[test]
fn january_beats_july_all_else_equal() {
    let engine = engine();
    let mut january = neutral_leverage_input();
    january.current_month = 1;
    let mut july = neutral_leverage_input();
    july.current_month = 7;

    let january = engine.leverage_score(&january);
    let july = engine.leverage_score(&july);

    assert!(january.score >= july.score);
    assert!(july.best_timing.starts_with("Limited leverage"));
}

#[test]
fn rising_occupancy_never_raises_occupancy_gap() {
    let engine = engine();
    let mut previous = f64::INFINITY;

    for occupancy in (0..=100).map(f64::from) {
        let mut input = neutral_leverage_input();
        input.occupancy_rate = occupancy;
        let result = engine.leverage_score(&input);
        let gap = result.factors[0].value;
        assert!(gap <= previous, "gap rose at occupancy {occupancy}");
        previous = gap;
    }
}

#[test]
fn factor_names_match_leverage_kinds() {
    let result = engine().leverage_score(&strong_leverage_input());

    assert_eq!(result.factors.len(), 5);
    for (factor, kind) in result.factors.iter().zip(LeverageFactorKind::ordered()) {
        assert_eq!(factor.name, kind.label());
        assert!(!factor.description.is_empty());
    }
}

#[test]
fn missing_market_occupancy_is_neutral() {
    let mut input = strong_leverage_input();
    input.market_occupancy = 0.0;

    let result = engine().leverage_score(&input);

    assert_eq!(result.factors[0].value, 50.0);
    assert!(result.score.is_finite());
}

#[test]
fn tip_cap_follows_configuration() {
    let mut config = scoring_config();
    config.max_tips = 1;
    let engine = crate::scoring::ScoringEngine::new(config).expect("valid config");

    let result = engine.leverage_score(&strong_leverage_input());

    assert_eq!(result.negotiation_tips.len(), 1);
}

#[test]
fn out_of_range_whole_numbers_are_clamped_not_rejected() {
    let input: LeverageScoreInput = serde_json::from_value(serde_json::json!({
        "occupancy_rate": 90.0,
        "market_occupancy": 94.0,
        "current_month": -1,
        "rent_vs_market_pct": 1.05,
        "concession_prevalence": 0.3,
        "building_age": 20.0,
        "property_units": -5
    }))
    .expect("negative counts still deserialize");

    assert_eq!(input.current_month, 0);
    assert_eq!(input.property_units, 0);

    let result = engine().leverage_score(&input);
    assert_eq!(result.factors[1].value, 80.0, "month clamps to January");
    assert!((0.0..=100.0).contains(&result.score));
}
