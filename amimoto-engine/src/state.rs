//! The single game-in-progress aggregate and its phase enum.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Catalog, NewsItem, Regulation, Upgrade};
use crate::constants::{DAYS_PER_MONTH, REPUTATION_MAX, REPUTATION_START};
use crate::economy::MonthResult;
use crate::events::EventSchedule;
use crate::tier::Difficulty;
use crate::weather::Weather;

#[cfg(debug_assertions)]
fn debug_log_enabled() -> bool {
    matches!(std::env::var(crate::constants::DEBUG_ENV_VAR), Ok(val) if val != "0")
}

#[cfg(not(debug_assertions))]
const fn debug_log_enabled() -> bool {
    false
}

/// The ten named phases of a game.
///
/// `Event` is reachable only from `Running` and always returns there once the
/// pending event is resolved. `End` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Init,
    Setup,
    MonthStart,
    Decision,
    Running,
    Event,
    Result,
    News,
    Growth,
    End,
}

impl GamePhase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::End)
    }
}

/// Classification of an append-only log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Event,
    News,
    Result,
    Regulation,
    System,
}

/// One line in the company journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub month: u8,
    #[serde(default)]
    pub day: Option<u8>,
    pub kind: LogKind,
    pub text: String,
}

/// A temporary multiplicative bonus earned from a past outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningBonus {
    pub key: String,
    pub description: String,
    pub yield_multiplier: f64,
    pub remaining_months: u8,
}

/// The whole game state. Created once, advanced by the transition functions,
/// replaced wholesale on restart.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub company_name: String,
    pub difficulty: Difficulty,
    /// Calendar month 1..=12, monotonically increasing.
    pub month: u8,

    pub money: i64,
    pub debt: i64,
    /// Grace months left before outstanding debt ends the game.
    pub debt_turns_left: u8,
    /// Monthly rate, copied from the tier at game start.
    pub interest_rate: f64,

    pub reputation: i32,
    /// Company level 1..=5, a pure function of `total_profit`.
    pub level: u8,

    pub unlocked_areas: Vec<String>,
    pub unlocked_methods: Vec<String>,
    /// Per-state copies of catalog upgrades; only `purchased` ever changes.
    pub upgrades: Vec<Upgrade>,
    pub selected_fisherman_id: Option<String>,

    // This month's decision.
    pub selected_area_id: Option<String>,
    pub selected_method_id: Option<String>,
    pub is_resting: bool,
    pub borrowed_this_month: i64,

    // This month's progress.
    pub current_day: u8,
    pub scheduled_events: EventSchedule,
    pub event_cursor: usize,
    pub month_result: Option<MonthResult>,
    pub current_weather: Weather,
    pub current_regulations: Vec<Regulation>,
    pub current_news: Vec<NewsItem>,

    // History.
    pub log: Vec<LogEntry>,
    pub month_history: Vec<MonthResult>,
    pub learning_bonuses: Vec<LearningBonus>,

    // Aggregates across finished months.
    pub total_profit: i64,
    pub total_revenue: i64,

    #[serde(skip)]
    pub rng: Option<ChaCha20Rng>,
}

impl GameState {
    /// Construct the initial state for a company on the given tier.
    ///
    /// Level-1 catalog areas and methods start unlocked; everything else
    /// waits on profit thresholds.
    #[must_use]
    pub fn new(company_name: &str, difficulty: Difficulty, catalog: &Catalog, seed: u64) -> Self {
        let tier = difficulty.config();
        let unlocked_areas = catalog
            .areas
            .iter()
            .filter(|area| area.unlock_level <= 1)
            .map(|area| area.id.clone())
            .collect();
        let unlocked_methods = catalog
            .methods
            .iter()
            .filter(|method| method.unlock_level <= 1)
            .map(|method| method.id.clone())
            .collect();
        let upgrades = catalog
            .upgrades
            .iter()
            .map(|upgrade| Upgrade {
                purchased: false,
                ..upgrade.clone()
            })
            .collect();

        Self {
            phase: GamePhase::Init,
            company_name: company_name.to_string(),
            difficulty,
            month: 1,
            money: tier.initial_money,
            debt: 0,
            debt_turns_left: 0,
            interest_rate: tier.interest_rate,
            reputation: REPUTATION_START,
            level: 1,
            unlocked_areas,
            unlocked_methods,
            upgrades,
            selected_fisherman_id: catalog.fishermen.first().map(|crew| crew.id.clone()),
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
            ..Self::default()
        }
    }

    /// Move to a phase without other effects. Used for the pure-pause
    /// transitions (Setup, News) whose only content is presentation.
    pub fn set_phase(&mut self, phase: GamePhase) {
        if debug_log_enabled() {
            println!("phase {:?} -> {:?}", self.phase, phase);
        }
        self.phase = phase;
    }

    /// Reattach a random source, e.g. after deserializing.
    pub fn attach_rng(&mut self, rng: ChaCha20Rng) {
        self.rng = Some(rng);
    }

    pub fn push_log(&mut self, day: Option<u8>, kind: LogKind, text: String) {
        let month = self.month;
        self.log.push(LogEntry {
            month,
            day,
            kind,
            text,
        });
    }

    /// Bump reputation, clamped to the 0..=100 scale.
    pub fn add_reputation(&mut self, delta: i32) {
        self.reputation = (self.reputation + delta).clamp(0, REPUTATION_MAX);
    }

    /// Whether this month's regulations forbid operating in the area.
    #[must_use]
    pub fn is_area_restricted(&self, area_id: &str) -> bool {
        self.current_regulations
            .iter()
            .any(|regulation| regulation.restricted_areas.iter().any(|a| a == area_id))
    }

    /// Whether this month's regulations forbid the method.
    #[must_use]
    pub fn is_method_restricted(&self, method_id: &str) -> bool {
        self.current_regulations
            .iter()
            .any(|regulation| regulation.restricted_methods.iter().any(|m| m == method_id))
    }

    #[must_use]
    pub fn purchased_upgrades(&self) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(|upgrade| upgrade.purchased)
    }

    /// Summed purchased fuel-cost reduction.
    #[must_use]
    pub fn fuel_cost_reduction(&self) -> f64 {
        self.purchased_upgrades()
            .map(|upgrade| upgrade.effect.fuel_cost_reduction)
            .sum()
    }

    /// Summed purchased price-variance reduction.
    #[must_use]
    pub fn price_variance_reduction(&self) -> f64 {
        self.purchased_upgrades()
            .map(|upgrade| upgrade.effect.price_variance_reduction)
            .sum()
    }

    /// Summed purchased yield bonus.
    #[must_use]
    pub fn upgrade_yield_bonus(&self) -> f64 {
        self.purchased_upgrades()
            .map(|upgrade| upgrade.effect.yield_bonus)
            .sum()
    }

    /// Clear the per-month working fields ahead of a new month.
    pub(crate) fn reset_month_fields(&mut self) {
        self.selected_area_id = None;
        self.selected_method_id = None;
        self.is_resting = false;
        self.borrowed_this_month = 0;
        self.current_day = 0;
        self.scheduled_events = EventSchedule::new();
        self.event_cursor = 0;
        self.month_result = None;
    }

    /// Whether the day counter has reached the end of the operating month.
    #[must_use]
    pub const fn month_days_exhausted(&self) -> bool {
        self.current_day >= DAYS_PER_MONTH
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Setup => "setup",
            Self::MonthStart => "month_start",
            Self::Decision => "decision",
            Self::Running => "running",
            Self::Event => "event",
            Self::Result => "result",
            Self::News => "news",
            Self::Growth => "growth",
            Self::End => "end",
        };
        f.write_str(name)
    }
}
