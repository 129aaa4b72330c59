//! Final score. A pure read of the finished state.

use crate::constants::{
    SCORE_DEBT_PENALTY, SCORE_PER_LEVEL, SCORE_PER_REPUTATION, SCORE_PER_UNLOCK,
};
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::state::GameState;

/// Compute the campaign score.
///
/// Cumulative profit plus bonuses for levels beyond the first, unlocked
/// areas and methods, and reputation, minus half the outstanding debt, all
/// scaled by the tier multiplier and floored at zero.
#[must_use]
pub fn compute_score(state: &GameState) -> i64 {
    let tier = state.difficulty.config();
    let unlocks = state.unlocked_areas.len() + state.unlocked_methods.len();

    let base = i64_to_f64(state.total_profit)
        + f64::from(state.level.saturating_sub(1)) * i64_to_f64(SCORE_PER_LEVEL)
        + i64_to_f64(unlocks as i64) * i64_to_f64(SCORE_PER_UNLOCK)
        + f64::from(state.reputation) * i64_to_f64(SCORE_PER_REPUTATION)
        - i64_to_f64(state.debt) * SCORE_DEBT_PENALTY;

    round_f64_to_i64(base * tier.score_multiplier).max(0)
}
