//! Month-end economic resolver: yield, per-species revenue, costs, profit.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::constants::{MIN_YIELD_VARIANCE, SPECIALTY_METHOD_BONUS, STABILITY_VARIANCE_FACTOR};
use crate::events::EventSchedule;
use crate::numbers::{i64_to_f64, round_f64_to_i64};
use crate::state::GameState;
use crate::weather::Weather;

/// One species line in a month's landing report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub species_id: String,
    pub species_name: String,
    /// Kilograms landed.
    pub quantity: i64,
    /// Yen per kilogram after seasonality and price noise.
    pub unit_price: i64,
    pub subtotal: i64,
}

/// The settled outcome of one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthResult {
    pub is_resting: bool,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    pub weather: Weather,
    pub catches: Vec<CatchRecord>,
    pub total_revenue: i64,
    pub fuel_cost: i64,
    pub fixed_cost: i64,
    pub event_cost_delta: i64,
    pub interest_cost: i64,
    pub profit: i64,
    /// The composite multiplier the landed weight was scaled by.
    pub yield_multiplier: f64,
    pub events: EventSchedule,
}

/// Interest due this month, zero while out of debt.
#[must_use]
pub fn calc_interest(state: &GameState) -> i64 {
    if state.debt <= 0 {
        return 0;
    }
    round_f64_to_i64(i64_to_f64(state.debt) * state.interest_rate)
}

fn empty_result(weather: Weather, fixed_cost: i64, interest_cost: i64) -> MonthResult {
    MonthResult {
        is_resting: false,
        area: None,
        method: None,
        weather,
        catches: Vec::new(),
        total_revenue: 0,
        fuel_cost: 0,
        fixed_cost,
        event_cost_delta: 0,
        interest_cost,
        profit: -fixed_cost - interest_cost,
        yield_multiplier: 1.0,
        events: EventSchedule::new(),
    }
}

/// Yield multiplier and money delta accumulated over resolved events.
fn resolved_event_totals(schedule: &EventSchedule) -> (f64, i64) {
    let mut yield_multiplier = 1.0;
    let mut money_delta = 0;
    for event in schedule {
        if let Some(option) = event.chosen_option.as_ref().filter(|_| event.resolved) {
            yield_multiplier *= option.effect.yield_multiplier;
            money_delta += option.effect.money_delta;
        }
    }
    (yield_multiplier, money_delta)
}

/// Compute the month's outcome from the locked decisions and resolved events.
///
/// Resting months earn the tier's side income against fixed cost and
/// interest. A chosen area×method pair whose species sets do not intersect is
/// a legitimate zero-catch month, not an error; so is an unknown id.
pub fn calculate_month_result(state: &mut GameState, catalog: &Catalog) -> MonthResult {
    let tier = state.difficulty.config();
    let weather = state.current_weather;
    let interest_cost = calc_interest(state);
    let fixed_cost = tier.fixed_cost;

    if state.is_resting {
        return MonthResult {
            is_resting: true,
            area: None,
            method: None,
            weather,
            catches: Vec::new(),
            total_revenue: 0,
            fuel_cost: 0,
            fixed_cost,
            event_cost_delta: 0,
            interest_cost,
            profit: -fixed_cost - interest_cost + tier.rest_income,
            yield_multiplier: 1.0,
            events: state.scheduled_events.clone(),
        };
    }

    let (Some(area_id), Some(method_id)) = (
        state.selected_area_id.clone(),
        state.selected_method_id.clone(),
    ) else {
        return empty_result(weather, fixed_cost, interest_cost);
    };
    let (Some(area), Some(method)) = (catalog.area(&area_id), catalog.method(&method_id)) else {
        return empty_result(weather, fixed_cost, interest_cost);
    };

    let valid_fish = catalog.species_for(&area.id, &method.id);
    if valid_fish.is_empty() {
        return empty_result(weather, fixed_cost, interest_cost);
    }

    let weather_multiplier = weather.yield_multiplier(&method.id);
    let (event_yield_multiplier, event_cost_delta) =
        resolved_event_totals(&state.scheduled_events);

    let learning_multiplier: f64 = state
        .learning_bonuses
        .iter()
        .map(|bonus| bonus.yield_multiplier)
        .product();

    let crew = state
        .selected_fisherman_id
        .as_deref()
        .and_then(|id| catalog.fisherman(id));
    let crew_yield_bonus = crew.map_or(1.0, |c| c.yield_bonus);
    let crew_stability = crew.map_or(0.0, |c| c.stability_bonus);
    let specialty_bonus = crew
        .and_then(|c| c.special_method.as_deref())
        .filter(|special| *special == method.id)
        .map_or(1.0, |_| SPECIALTY_METHOD_BONUS);

    let fuel_reduction = state.fuel_cost_reduction();
    let price_variance_reduction = state.price_variance_reduction();
    let upgrade_yield_bonus = state.upgrade_yield_bonus();

    let yield_variance = (method.yield_variance - crew_stability * STABILITY_VARIANCE_FACTOR)
        .max(MIN_YIELD_VARIANCE);
    let yield_noise = state
        .rng
        .as_mut()
        .map_or(1.0, |rng| 1.0 + rng.gen_range(-1.0..=1.0) * yield_variance);

    let total_yield_multiplier = (tier.base_yield_multiplier
        * weather_multiplier
        * event_yield_multiplier
        * learning_multiplier
        * crew_yield_bonus
        * specialty_bonus
        * (1.0 + upgrade_yield_bonus)
        * yield_noise)
        .max(0.0);
    let base_yield = method.base_yield * total_yield_multiplier;

    let price_variance = (tier.price_variance * (1.0 - price_variance_reduction)).max(0.0);
    let month = state.month;

    // Abundance weights: seasonality discounted by rarity, negatives clamped.
    let weights: Vec<f64> = valid_fish
        .iter()
        .map(|fish| (fish.season_factor(month) * fish.rarity.abundance_weight()).max(0.0))
        .collect();
    let total_weight: f64 = weights.iter().sum();

    let mut catches = Vec::new();
    let mut total_revenue = 0;
    if total_weight > 0.0 {
        for (fish, weight) in valid_fish.iter().zip(&weights) {
            if *weight <= 0.0 {
                continue;
            }
            let share = weight / total_weight;
            let quantity = round_f64_to_i64(base_yield * share);
            if quantity <= 0 {
                continue;
            }

            let seasonal_price = i64_to_f64(fish.base_price) * fish.season_factor(month);
            let price_noise = state
                .rng
                .as_mut()
                .map_or(1.0, |rng| 1.0 + rng.gen_range(-1.0..=1.0) * price_variance);
            let unit_price = round_f64_to_i64(seasonal_price * price_noise);
            let subtotal = quantity * unit_price;

            catches.push(CatchRecord {
                species_id: fish.id.clone(),
                species_name: fish.name.clone(),
                quantity,
                unit_price,
                subtotal,
            });
            total_revenue += subtotal;
        }
    }

    let fuel_cost = round_f64_to_i64(
        i64_to_f64(tier.fuel_unit_cost)
            * area.distance
            * method.fuel_multiplier
            * (1.0 - fuel_reduction).max(0.0),
    );
    let profit = total_revenue - fuel_cost - fixed_cost + event_cost_delta - interest_cost;

    MonthResult {
        is_resting: false,
        area: Some(area.name.clone()),
        method: Some(method.name.clone()),
        weather,
        catches,
        total_revenue,
        fuel_cost,
        fixed_cost,
        event_cost_delta,
        interest_cost,
        profit,
        yield_multiplier: total_yield_multiplier,
        events: state.scheduled_events.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::tier::Difficulty;

    fn state_for(difficulty: Difficulty, seed: u64) -> (GameState, Catalog) {
        let catalog = Catalog::default_config();
        let state = GameState::new("test", difficulty, &catalog, seed);
        (state, catalog)
    }

    #[test]
    fn resting_month_is_exactly_fixed_interest_and_side_income() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 3);
        state.is_resting = true;
        state.debt = 1_000_000;

        let result = calculate_month_result(&mut state, &catalog);
        let tier = Difficulty::Normal.config();
        let interest = round_f64_to_i64(1_000_000.0 * tier.interest_rate);
        assert!(result.is_resting);
        assert!(result.catches.is_empty());
        assert_eq!(result.fuel_cost, 0);
        assert_eq!(result.interest_cost, interest);
        assert_eq!(result.profit, -tier.fixed_cost - interest + tier.rest_income);
    }

    #[test]
    fn mismatched_area_and_method_yield_nothing() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 3);
        // Diving targets shellfish found only off Noto; Kaga waters have none.
        state.selected_area_id = Some("kaga".into());
        state.selected_method_id = Some("diving".into());

        let result = calculate_month_result(&mut state, &catalog);
        let tier = Difficulty::Normal.config();
        assert!(result.catches.is_empty());
        assert_eq!(result.total_revenue, 0);
        assert_eq!(result.fuel_cost, 0);
        assert_eq!(result.profit, -tier.fixed_cost);
    }

    #[test]
    fn unknown_ids_resolve_to_a_zero_catch_month() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 3);
        state.selected_area_id = Some("atlantis".into());
        state.selected_method_id = Some("trident".into());

        let result = calculate_month_result(&mut state, &catalog);
        assert!(result.catches.is_empty());
        assert_eq!(result.profit, -Difficulty::Normal.config().fixed_cost);
    }

    #[test]
    fn november_trawl_off_noto_lands_crab_at_seasonal_prices() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 11);
        state.month = 11;
        state.current_weather = Weather::Sunny;
        state.selected_area_id = Some("noto-soto".into());
        state.selected_method_id = Some("bottom-trawl".into());
        state.selected_fisherman_id = None;

        let result = calculate_month_result(&mut state, &catalog);
        assert!(!result.catches.is_empty());

        let tier = Difficulty::Normal.config();
        for crab_id in ["kano-kani", "koubako-gani"] {
            let record = result
                .catches
                .iter()
                .find(|record| record.species_id == crab_id)
                .unwrap_or_else(|| panic!("{crab_id} must appear in a November trawl"));
            assert!(record.quantity > 0);

            let fish = catalog
                .species
                .iter()
                .find(|fish| fish.id == crab_id)
                .unwrap();
            let seasonal = i64_to_f64(fish.base_price) * fish.season_factor(11);
            let low = seasonal * (1.0 - tier.price_variance) - 0.5;
            let high = seasonal * (1.0 + tier.price_variance) + 0.5;
            let price = i64_to_f64(record.unit_price);
            assert!(
                price >= low && price <= high,
                "{crab_id} unit price {price} outside [{low}, {high}]"
            );
        }
    }

    #[test]
    fn resolved_events_scale_yield_and_shift_cash() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 7);
        state.rng = None; // noise-free so multipliers compare exactly
        state.month = 6;
        state.selected_area_id = Some("nanao-bay".into());
        state.selected_method_id = Some("fixed-net".into());
        state.selected_fisherman_id = None;

        let baseline = calculate_month_result(&mut state, &catalog);

        let template = catalog.events[0].clone();
        let mut option = template.options[0].clone();
        option.effect.money_delta = -150_000;
        option.effect.yield_multiplier = 0.5;
        state.scheduled_events = EventSchedule::from_vec(vec![crate::events::ScheduledEvent {
            day: 10,
            template,
            resolved: true,
            chosen_option: Some(option),
        }]);

        let adjusted = calculate_month_result(&mut state, &catalog);
        assert_eq!(adjusted.event_cost_delta, -150_000);
        assert!(
            (adjusted.yield_multiplier - baseline.yield_multiplier * 0.5).abs() < 1e-9,
            "event multiplier must fold into the composite"
        );
        assert_eq!(
            adjusted.profit,
            adjusted.total_revenue - adjusted.fuel_cost - adjusted.fixed_cost - 150_000
        );
    }

    #[test]
    fn upgrades_are_consumed_declaratively() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 9);
        state.rng = None;
        state.month = 2;
        state.selected_area_id = Some("kaga".into());
        state.selected_method_id = Some("bottom-trawl".into());
        state.selected_fisherman_id = None;

        let plain = calculate_month_result(&mut state, &catalog);

        for upgrade in &mut state.upgrades {
            if upgrade.effect.fuel_cost_reduction > 0.0 {
                upgrade.purchased = true;
            }
        }
        let reduction = state.fuel_cost_reduction();
        assert!(reduction > 0.0);

        let upgraded = calculate_month_result(&mut state, &catalog);
        let expected = round_f64_to_i64(i64_to_f64(plain.fuel_cost) * (1.0 - reduction));
        assert!(
            (upgraded.fuel_cost - expected).abs() <= 1,
            "fuel cost must shrink by the purchased reduction"
        );
    }

    #[test]
    fn specialty_crew_outperforms_on_their_method() {
        let (mut state, catalog) = state_for(Difficulty::Normal, 1);
        state.rng = None;
        state.month = 2;
        state.selected_area_id = Some("kaga".into());
        state.selected_method_id = Some("bottom-trawl".into());

        state.selected_fisherman_id = None;
        let without = calculate_month_result(&mut state, &catalog);

        // craftsman specializes in bottom-trawl
        state.selected_fisherman_id = Some("craftsman".into());
        let with = calculate_month_result(&mut state, &catalog);

        let crew = catalog.fisherman("craftsman").unwrap();
        let expected = without.yield_multiplier * crew.yield_bonus * SPECIALTY_METHOD_BONUS;
        assert!((with.yield_multiplier - expected).abs() < 1e-9);
    }
}
