//! Month-end settlement: fold the resolver's outcome into the company books.

use crate::catalog::Catalog;
use crate::economy::{self, MonthResult};
use crate::progress::calc_level;
use crate::state::{GamePhase, GameState, LearningBonus, LogKind};
use crate::weather::Weather;

/// A trigger-condition to bonus-descriptor mapping. The shipped table holds a
/// single rule; new "learn from a bad month" effects are added here, not in
/// `finish_month`.
pub struct LearningRule {
    pub key: &'static str,
    pub description: &'static str,
    pub duration_months: u8,
    pub yield_multiplier: f64,
    pub trigger: fn(&MonthResult) -> bool,
}

fn storm_loss(result: &MonthResult) -> bool {
    result.weather == Weather::Stormy && result.profit < 0
}

pub const LEARNING_RULES: &[LearningRule] = &[LearningRule {
    key: "storm-resilience",
    description: "荒天を経験：次回荒天時の損失軽減",
    duration_months: 3,
    yield_multiplier: 1.1,
    trigger: storm_loss,
}];

/// Bonuses earned from this month's outcome. Rules never stack with a bonus
/// the company already holds under the same key.
fn derive_learning_bonuses(result: &MonthResult, existing: &[LearningBonus]) -> Vec<LearningBonus> {
    LEARNING_RULES
        .iter()
        .filter(|rule| (rule.trigger)(result))
        .filter(|rule| !existing.iter().any(|bonus| bonus.key == rule.key))
        .map(|rule| LearningBonus {
            key: rule.key.to_string(),
            description: rule.description.to_string(),
            yield_multiplier: rule.yield_multiplier,
            remaining_months: rule.duration_months,
        })
        .collect()
}

/// Settle the month: apply the result to money, roll the aggregates, age the
/// learning bonuses, count down the debt grace, and move to Result.
pub fn finish_month(state: &mut GameState, catalog: &Catalog) {
    let result = economy::calculate_month_result(state, catalog);
    let tier = state.difficulty.config();

    state.money += result.total_revenue - result.fuel_cost - result.fixed_cost
        + result.event_cost_delta
        - result.interest_cost;
    if state.is_resting {
        state.money += tier.rest_income;
    }

    state.total_profit += result.profit;
    state.total_revenue += result.total_revenue;
    state.level = calc_level(state.total_profit);

    if state.debt > 0 {
        state.debt_turns_left = state.debt_turns_left.saturating_sub(1);
    }

    // New bonuses are checked against the pre-aging list so a bonus expiring
    // this very month still blocks an immediate re-grant.
    let new_bonuses = derive_learning_bonuses(&result, &state.learning_bonuses);
    for bonus in &mut state.learning_bonuses {
        bonus.remaining_months = bonus.remaining_months.saturating_sub(1);
    }
    state.learning_bonuses.retain(|bonus| bonus.remaining_months > 0);
    state.learning_bonuses.extend(new_bonuses);

    state.push_log(
        None,
        LogKind::Result,
        format!("{}月結果：利益 {}円", state.month, result.profit),
    );
    state.month_history.push(result.clone());
    state.month_result = Some(result);
    state.set_phase(GamePhase::Result);
}
