use super::model::ScoreFactor;
use super::normalize::{clamp_score, round_to};

/// Weighted sum of factor values, multiplied by `multiplier` and bounded to
/// `[0, 100]`. Shared by both engines; leverage passes a multiplier of 1.0.
pub(crate) fn aggregate(factors: &[ScoreFactor], multiplier: f64) -> f64 {
    let weighted: f64 = factors.iter().map(ScoreFactor::contribution).sum();
    let multiplier = if multiplier.is_finite() { multiplier } else { 1.0 };
    round_to(clamp_score(weighted * multiplier), 1)
}

/// The factor furthest from neutral. Ties resolve to the earliest factor.
pub(crate) fn dominant<K: Copy>(
    kinds: impl IntoIterator<Item = K>,
    factors: &[ScoreFactor],
) -> Option<(K, &ScoreFactor)> {
    kinds
        .into_iter()
        .zip(factors.iter())
        .fold(None, |best: Option<(K, &ScoreFactor)>, candidate| match best {
            Some(current) if current.1.deviation() >= candidate.1.deviation() => Some(current),
            _ => Some(candidate),
        })
}
