//! Amimoto Game Engine
//!
//! Platform-agnostic core logic for Amimoto, a fishing-company management
//! simulation set on the Ishikawa coast. The crate holds all game mechanics
//! and no UI or platform-specific dependencies: a host drives the phase
//! machine through the transition functions and renders whatever it likes.

pub mod catalog;
pub mod constants;
pub mod economy;
pub mod events;
pub mod finance;
pub mod leaderboard;
pub mod numbers;
pub mod progress;
pub mod score;
pub mod settlement;
pub mod state;
pub mod tier;
pub mod turn;
pub mod weather;

// Re-export commonly used types
pub use catalog::{
    Catalog, CatalogError, EventEffect, EventOption, EventTemplate, Fisherman, FishingArea,
    FishingMethod, FishSpecies, MonthlyNews, NewsCategory, NewsItem, Rarity, Regulation, Risk,
    Upgrade, UpgradeEffect,
};
pub use economy::{CatchRecord, MonthResult, calc_interest, calculate_month_result};
pub use events::{
    DayStep, EventSchedule, ScheduledEvent, advance_day, prepare_operation, resolve_event,
};
pub use finance::{borrow, purchase_upgrade, repay};
pub use leaderboard::{
    LeaderboardClient, MemoryLeaderboard, ScoreEntry, fallback_board, fetch_or_fallback,
};
pub use progress::{calc_level, check_growth};
pub use score::compute_score;
pub use settlement::finish_month;
pub use state::{GamePhase, GameState, LearningBonus, LogEntry, LogKind};
pub use tier::{Difficulty, TierConfig};
pub use turn::{Decision, lock_decision, proceed_to_next_month, start_month};
pub use weather::{Weather, WeatherWeights, roll_weather};

/// Trait for abstracting catalog loading
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the game catalog from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or fails validation.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;
}

/// Main engine for managing game instances
pub struct GameEngine<C>
where
    C: CatalogSource,
{
    source: C,
}

impl<C> GameEngine<C>
where
    C: CatalogSource,
{
    /// Create a new engine with the provided catalog source
    pub const fn new(source: C) -> Self {
        Self { source }
    }

    /// Load the catalog from the source
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, anyhow::Error> {
        self.source.load_catalog().map_err(Into::into)
    }

    /// Start a new campaign for the named company on the given tier
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn new_game(
        &self,
        company_name: &str,
        difficulty: Difficulty,
        seed: u64,
    ) -> Result<GameState, anyhow::Error> {
        let catalog = self.source.load_catalog()?;
        let mut state = GameState::new(company_name, difficulty, &catalog, seed);
        state.set_phase(GamePhase::Setup);
        Ok(state)
    }
}
