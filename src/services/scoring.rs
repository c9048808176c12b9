//! Display score derivation
//!
//! An agent's score is its average review rating when one exists, otherwise a
//! pseudo-rating on the same 0-5 scale derived from its vote ratio. A score of
//! `0.0` means "no data": real ratings never fall below 1.0.

use crate::models::Agent;

/// Score shown for agents with neither reviews nor votes
pub const UNRATED_SCORE: f64 = 0.0;

/// Top of the rating scale
pub const MAX_SCORE: f64 = 5.0;

/// Round the non-negative ratio `numerator / denominator` to one decimal,
/// halves up.
///
/// Works in integers: `x.x5` ties are exact here but not after float division.
pub fn round_ratio_to_tenth(numerator: i64, denominator: i64) -> f64 {
    debug_assert!(numerator >= 0 && denominator > 0);
    let tenths = (20 * numerator + denominator) / (2 * denominator);
    tenths as f64 / 10.0
}

/// Derive the display score for an agent
pub fn score(agent: &Agent) -> f64 {
    if let Some(avg) = agent.avg_rating {
        return avg;
    }
    vote_score(agent.upvotes, agent.downvotes)
}

/// Vote-ratio pseudo-rating: `round(up / (up + down) * 5, 1)`, or 0 with no votes
pub fn vote_score(upvotes: i32, downvotes: i32) -> f64 {
    let up = i64::from(upvotes.max(0));
    let total = up + i64::from(downvotes.max(0));
    if total == 0 {
        return UNRATED_SCORE;
    }
    round_ratio_to_tenth(up * MAX_SCORE as i64, total)
}
