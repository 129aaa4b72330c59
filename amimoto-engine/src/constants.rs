//! Tuning constants shared across the engine.

/// Cumulative-profit thresholds for company levels 1..=5.
pub const LEVEL_THRESHOLDS: [i64; 5] = [0, 2_000_000, 5_000_000, 10_000_000, 20_000_000];

/// Company level cap.
pub const MAX_LEVEL: u8 = 5;

/// Months in a full game.
pub const MONTHS_PER_GAME: u8 = 12;

/// Days in an operating month.
pub const DAYS_PER_MONTH: u8 = 30;

/// Upper bound (inclusive) on events scheduled per month.
pub const MAX_EVENTS_PER_MONTH: usize = 3;

/// Earliest day an event may be scheduled on.
pub const EVENT_DAY_MIN: u8 = 3;

/// Latest day an event may be scheduled on.
pub const EVENT_DAY_MAX: u8 = 27;

/// Yield multiplier when the crew's specialty matches the chosen method.
pub const SPECIALTY_METHOD_BONUS: f64 = 1.2;

/// Floor for the per-month yield noise variance.
pub const MIN_YIELD_VARIANCE: f64 = 0.05;

/// How strongly crew stability dampens the method's yield variance.
pub const STABILITY_VARIANCE_FACTOR: f64 = 0.2;

/// Reputation scale.
pub const REPUTATION_START: i32 = 50;
pub const REPUTATION_MAX: i32 = 100;

/// Score weights.
pub const SCORE_PER_LEVEL: i64 = 500_000;
pub const SCORE_PER_UNLOCK: i64 = 100_000;
pub const SCORE_PER_REPUTATION: i64 = 10_000;
pub const SCORE_DEBT_PENALTY: f64 = 0.5;

/// Method ids the weather model treats specially.
pub const METHOD_FIXED_NET: &str = "fixed-net";
pub const METHOD_DIVING: &str = "diving";
pub const METHOD_SQUID_FISHING: &str = "squid-fishing";

#[cfg(debug_assertions)]
pub const DEBUG_ENV_VAR: &str = "AMIMOTO_DEBUG_LOGS";
