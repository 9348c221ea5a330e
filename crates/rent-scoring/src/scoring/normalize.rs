//! Numeric guards shared by every factor calculator.
//!
//! None of these functions fail: each one returns a finite number for any input,
//! which is what lets the calculators promise bounded output by construction.

/// Denominators smaller than this are treated as zero.
pub const EPSILON: f64 = 1e-9;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Divide `numerator` by `denominator`, returning `fallback` when the
/// denominator is (near) zero or either side is not a finite number.
pub fn safe_ratio(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if !numerator.is_finite() || !denominator.is_finite() || denominator.abs() < EPSILON {
        return fallback;
    }

    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        fallback
    }
}

/// Bound a factor value or score to `[0, 100]`.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return NEUTRAL_SCORE;
    }
    value.clamp(SCORE_MIN, SCORE_MAX)
}

pub fn ratio_to_pct(ratio: f64) -> f64 {
    if ratio.is_finite() {
        ratio * 100.0
    } else {
        0.0
    }
}

/// Years since `built_year`, never negative. A non-positive year means the
/// build year is unknown and yields an age of zero.
pub fn age_from_year(built_year: i32, now_year: i32) -> f64 {
    if built_year <= 0 {
        return 0.0;
    }
    f64::from(now_year.saturating_sub(built_year).max(0))
}

/// Coerce a field that must not be negative.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Coerce a signed field (trends) to a finite value.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Round a count-like field to the nearest whole number in `0..=u32::MAX`.
pub fn count_from(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(u32::MAX)) as u32
}

/// Round a calendar year; anything non-finite or non-positive reads as unknown (0).
pub fn year_from(value: f64) -> i32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.round().min(f64::from(i32::MAX)) as i32
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
