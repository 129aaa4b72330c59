//! Mid-month event scheduling, day advancement and resolution.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashSet;

use crate::catalog::{Catalog, EventOption, EventTemplate};
use crate::constants::{DAYS_PER_MONTH, EVENT_DAY_MAX, EVENT_DAY_MIN, MAX_EVENTS_PER_MONTH};
use crate::state::{GamePhase, GameState, LogKind};

/// Bounded schedule; holds at most `MAX_EVENTS_PER_MONTH` entries inline.
pub type EventSchedule = SmallVec<[ScheduledEvent; MAX_EVENTS_PER_MONTH]>;

/// An event pinned to a day of the operating month.
///
/// Immutable once scheduled except for `resolved`/`chosen_option`, which are
/// written exactly once when the player decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub day: u8,
    pub template: EventTemplate,
    pub resolved: bool,
    #[serde(default)]
    pub chosen_option: Option<EventOption>,
}

/// Outcome of advancing the day counter once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStep {
    /// The day ticked forward; keep driving the clock.
    Advanced,
    /// An event fired; the clock must stop until `resolve_event` is called.
    EventFired,
}

/// Lay out this month's event schedule and enter the Running phase.
///
/// Draws an event count in `[0, MAX_EVENTS_PER_MONTH]`, distinct days in
/// `[EVENT_DAY_MIN, EVENT_DAY_MAX]`, and distinct templates without
/// replacement, then sorts the pairs by day. Resting months get an empty
/// schedule.
pub fn prepare_operation(state: &mut GameState, catalog: &Catalog) {
    state.current_day = 0;
    state.event_cursor = 0;
    state.scheduled_events = EventSchedule::new();
    state.set_phase(GamePhase::Running);

    if state.is_resting {
        return;
    }
    let Some(rng) = state.rng.as_mut() else {
        return;
    };

    let count = rng
        .gen_range(0..=MAX_EVENTS_PER_MONTH)
        .min(catalog.events.len());
    if count == 0 {
        return;
    }

    let mut days: Vec<u8> = Vec::with_capacity(count);
    let mut seen = HashSet::new();
    while days.len() < count {
        let day = rng.gen_range(EVENT_DAY_MIN..=EVENT_DAY_MAX);
        if seen.insert(day) {
            days.push(day);
        }
    }

    let mut pool: Vec<&EventTemplate> = catalog.events.iter().collect();
    let mut schedule = EventSchedule::new();
    for day in days {
        let index = rng.gen_range(0..pool.len());
        let template = pool.swap_remove(index);
        schedule.push(ScheduledEvent {
            day,
            template: template.clone(),
            resolved: false,
            chosen_option: None,
        });
    }
    schedule.sort_by_key(|event| event.day);
    state.scheduled_events = schedule;
}

/// Advance the day counter once.
///
/// If the step reaches or passes the next unresolved event's day, the counter
/// snaps to that day and the phase becomes Event; the event fires even when a
/// caller stepped past it in larger increments. At most one event is ever
/// open, and same-day events fire one per advance.
pub fn advance_day(state: &mut GameState) -> DayStep {
    let next_day = state.current_day.saturating_add(1).min(DAYS_PER_MONTH);

    if let Some(event) = state.scheduled_events.get(state.event_cursor)
        && !event.resolved
        && next_day >= event.day
    {
        state.current_day = event.day;
        state.set_phase(GamePhase::Event);
        return DayStep::EventFired;
    }

    state.current_day = next_day;
    DayStep::Advanced
}

/// Resolve the pending event with the option at `option_index`.
///
/// The option's money delta (and any reputation delta) lands immediately;
/// its yield multiplier is deferred to month-end settlement, which folds in
/// every resolved event. Out-of-range cursor or option index is a no-op.
pub fn resolve_event(state: &mut GameState, option_index: usize) {
    let cursor = state.event_cursor;
    let Some(event) = state.scheduled_events.get_mut(cursor) else {
        return;
    };
    if event.resolved {
        return;
    }
    let Some(option) = event.template.options.get(option_index).cloned() else {
        return;
    };

    event.resolved = true;
    event.chosen_option = Some(option.clone());
    let day = event.day;
    let title = event.template.title.clone();

    state.money += option.effect.money_delta;
    state.add_reputation(option.effect.reputation_delta);
    state.event_cursor = cursor + 1;
    state.push_log(
        Some(day),
        LogKind::Event,
        format!("{title}: {}", option.label),
    );
    state.set_phase(GamePhase::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::state::GameState;
    use crate::tier::Difficulty;

    fn running_state(seed: u64) -> (GameState, Catalog) {
        let catalog = Catalog::default_config();
        let mut state = GameState::new("test", Difficulty::Normal, &catalog, seed);
        state.set_phase(GamePhase::Decision);
        (state, catalog)
    }

    #[test]
    fn schedule_is_sorted_distinct_and_bounded() {
        for seed in 0..64 {
            let (mut state, catalog) = running_state(seed);
            prepare_operation(&mut state, &catalog);
            assert_eq!(state.phase, GamePhase::Running);
            assert!(state.scheduled_events.len() <= MAX_EVENTS_PER_MONTH);

            let days: Vec<u8> = state.scheduled_events.iter().map(|e| e.day).collect();
            let mut sorted = days.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(days, sorted, "days must be sorted and distinct");
            assert!(days.iter().all(|d| (EVENT_DAY_MIN..=EVENT_DAY_MAX).contains(d)));

            let mut ids: Vec<&str> = state
                .scheduled_events
                .iter()
                .map(|e| e.template.id.as_str())
                .collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            assert_eq!(ids.len(), before, "templates must be drawn without replacement");
        }
    }

    #[test]
    fn resting_forces_empty_schedule() {
        let (mut state, catalog) = running_state(5);
        state.is_resting = true;
        prepare_operation(&mut state, &catalog);
        assert!(state.scheduled_events.is_empty());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn advance_snaps_to_event_day() {
        let (mut state, catalog) = running_state(0);
        prepare_operation(&mut state, &catalog);
        state.scheduled_events = EventSchedule::from_vec(vec![ScheduledEvent {
            day: 10,
            template: catalog.events[0].clone(),
            resolved: false,
            chosen_option: None,
        }]);
        state.event_cursor = 0;
        state.current_day = 14; // caller stepped past the event day

        assert_eq!(advance_day(&mut state), DayStep::EventFired);
        assert_eq!(state.current_day, 10);
        assert_eq!(state.phase, GamePhase::Event);
    }

    #[test]
    fn same_day_events_fire_one_per_advance() {
        let (mut state, catalog) = running_state(0);
        prepare_operation(&mut state, &catalog);
        let make = |resolved| ScheduledEvent {
            day: 8,
            template: catalog.events[1].clone(),
            resolved,
            chosen_option: None,
        };
        state.scheduled_events = EventSchedule::from_vec(vec![make(false), make(false)]);
        state.event_cursor = 0;
        state.current_day = 7;

        assert_eq!(advance_day(&mut state), DayStep::EventFired);
        resolve_event(&mut state, 0);
        assert_eq!(state.event_cursor, 1);
        assert_eq!(state.phase, GamePhase::Running);

        assert_eq!(advance_day(&mut state), DayStep::EventFired);
        resolve_event(&mut state, 0);
        assert_eq!(state.event_cursor, 2);
        assert_eq!(advance_day(&mut state), DayStep::Advanced);
    }

    #[test]
    fn resolve_applies_money_now_and_marks_once() {
        let (mut state, catalog) = running_state(0);
        let template = catalog
            .events
            .iter()
            .find(|event| event.options[0].effect.money_delta != 0)
            .expect("catalog has an option with a money delta");
        state.scheduled_events = EventSchedule::from_vec(vec![ScheduledEvent {
            day: 5,
            template: template.clone(),
            resolved: false,
            chosen_option: None,
        }]);
        let delta = template.options[0].effect.money_delta;
        let money_before = state.money;

        resolve_event(&mut state, 0);
        assert_eq!(state.money, money_before + delta);
        assert!(state.scheduled_events[0].resolved);
        assert_eq!(state.event_cursor, 1);
        assert_eq!(state.phase, GamePhase::Running);

        // Cursor moved past the only event; a second resolve is a no-op.
        resolve_event(&mut state, 0);
        assert_eq!(state.money, money_before + delta);
        assert_eq!(state.event_cursor, 1);
    }

    #[test]
    fn resolve_rejects_bad_option_index() {
        let (mut state, catalog) = running_state(0);
        state.scheduled_events = EventSchedule::from_vec(vec![ScheduledEvent {
            day: 5,
            template: catalog.events[0].clone(),
            resolved: false,
            chosen_option: None,
        }]);
        let money_before = state.money;
        resolve_event(&mut state, 99);
        assert_eq!(state.money, money_before);
        assert!(!state.scheduled_events[0].resolved);
        assert_eq!(state.event_cursor, 0);
    }
}
