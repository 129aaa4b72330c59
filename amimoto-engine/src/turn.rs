//! Month lifecycle: opening a month, locking the decision, and deciding
//! whether the campaign continues.

use crate::catalog::Catalog;
use crate::constants::MONTHS_PER_GAME;
use crate::state::{GamePhase, GameState, LogKind};
use crate::weather::{self, Weather};

/// The player's choice for the coming month. `fisherman_id` of `None` keeps
/// the current crew; a resting month ignores the area and method.
#[derive(Debug, Clone, Default)]
pub struct Decision {
    pub area_id: Option<String>,
    pub method_id: Option<String>,
    pub fisherman_id: Option<String>,
    pub resting: bool,
}

/// Open the month: roll weather on the tier's weights, load this month's
/// regulations and news, clear the working fields, and enter MonthStart.
pub fn start_month(state: &mut GameState, catalog: &Catalog) {
    let tier = state.difficulty.config();
    state.current_weather = state
        .rng
        .as_mut()
        .map_or(Weather::Sunny, |rng| weather::roll_weather(tier.weather_weights, rng));

    state.current_regulations = catalog.regulations_for_month(state.month);
    state.current_news = catalog.news_for_month(state.month);
    let reasons: Vec<String> = state
        .current_regulations
        .iter()
        .map(|regulation| regulation.reason.clone())
        .collect();
    for reason in reasons {
        state.push_log(None, LogKind::Regulation, reason);
    }

    state.reset_month_fields();
    state.set_phase(GamePhase::MonthStart);
}

/// Record the month's decision and enter the Decision phase. Validation of
/// the selected area and method against unlocks and regulations is the
/// caller's concern; unknown ids simply resolve to an empty month.
pub fn lock_decision(state: &mut GameState, decision: Decision) {
    state.selected_area_id = decision.area_id;
    state.selected_method_id = decision.method_id;
    if decision.fisherman_id.is_some() {
        state.selected_fisherman_id = decision.fisherman_id;
    }
    state.is_resting = decision.resting;
    state.set_phase(GamePhase::Decision);
}

/// Advance the calendar or end the game.
///
/// Termination rules are checked in order: expired debt grace, debt above
/// the ceiling, insolvency with debt at the ceiling, and the twelve-month
/// campaign limit. Any hit moves to End; otherwise the month increments and
/// play returns to MonthStart.
pub fn proceed_to_next_month(state: &mut GameState) {
    let tier = state.difficulty.config();

    if state.debt > 0 && state.debt_turns_left == 0 {
        state.push_log(None, LogKind::System, "返済期限切れにより倒産".to_string());
        state.set_phase(GamePhase::End);
        return;
    }
    if state.debt > tier.debt_ceiling {
        state.push_log(None, LogKind::System, "債務超過により倒産".to_string());
        state.set_phase(GamePhase::End);
        return;
    }
    if state.money < 0 && state.debt >= tier.debt_ceiling {
        state.push_log(None, LogKind::System, "資金繰りの破綻により倒産".to_string());
        state.set_phase(GamePhase::End);
        return;
    }
    if state.month >= MONTHS_PER_GAME {
        state.push_log(None, LogKind::System, "1年間の操業を完了".to_string());
        state.set_phase(GamePhase::End);
        return;
    }

    state.month += 1;
    state.reset_month_fields();
    state.set_phase(GamePhase::MonthStart);
}
