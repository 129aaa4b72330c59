//! Company level and the growth-phase unlock pass.

use crate::catalog::Catalog;
use crate::constants::{LEVEL_THRESHOLDS, MAX_LEVEL};
use crate::state::{GamePhase, GameState, LogKind};

/// Level is a pure function of cumulative profit: the highest threshold
/// reached, capped at `MAX_LEVEL`. Negative cumulative profit still clears
/// the zero threshold, so the floor is level 1.
#[must_use]
pub fn calc_level(total_profit: i64) -> u8 {
    for (index, threshold) in LEVEL_THRESHOLDS.iter().enumerate().rev() {
        if total_profit >= *threshold {
            let level = u8::try_from(index + 1).unwrap_or(MAX_LEVEL);
            return level.min(MAX_LEVEL);
        }
    }
    1
}

/// Recompute the level and unlock every catalog area and method whose gate
/// the company now clears. Idempotent; unlock sets only grow.
pub fn check_growth(state: &mut GameState, catalog: &Catalog) {
    let level = calc_level(state.total_profit);
    let leveled_up = level > state.level;
    state.level = level;

    for area in &catalog.areas {
        if area.unlock_level <= level && !state.unlocked_areas.contains(&area.id) {
            state.unlocked_areas.push(area.id.clone());
            state.push_log(
                None,
                LogKind::System,
                format!("新しい漁場が解放：{}", area.name),
            );
        }
    }
    for method in &catalog.methods {
        if method.unlock_level <= level && !state.unlocked_methods.contains(&method.id) {
            state.unlocked_methods.push(method.id.clone());
            state.push_log(
                None,
                LogKind::System,
                format!("新しい漁法が解放：{}", method.name),
            );
        }
    }
    if leveled_up {
        state.push_log(
            None,
            LogKind::System,
            format!("会社レベルが{level}に上昇"),
        );
    }

    state.set_phase(GamePhase::Growth);
}
