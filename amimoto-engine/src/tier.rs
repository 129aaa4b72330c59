//! Difficulty tiers and the economic constant bundle each tier resolves to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::weather::WeatherWeights;

/// Named difficulty configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
    Extreme,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }

    /// Resolve the tier's constant bundle.
    #[must_use]
    pub const fn config(self) -> &'static TierConfig {
        match self {
            Self::Normal => &NORMAL_TIER,
            Self::Hard => &HARD_TIER,
            Self::Extreme => &EXTREME_TIER,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(()),
        }
    }
}

impl From<Difficulty> for String {
    fn from(value: Difficulty) -> Self {
        value.as_str().to_string()
    }
}

/// Economic constants supplied by a difficulty tier.
///
/// Every monetary field is in yen; `interest_rate` is per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    pub initial_money: i64,
    pub fixed_cost: i64,
    pub fuel_unit_cost: i64,
    pub interest_rate: f64,
    pub weather_weights: WeatherWeights,
    pub price_variance: f64,
    pub debt_ceiling: i64,
    pub debt_grace_months: u8,
    pub rest_income: i64,
    pub score_multiplier: f64,
    pub base_yield_multiplier: f64,
}

pub const NORMAL_TIER: TierConfig = TierConfig {
    initial_money: 3_000_000,
    fixed_cost: 200_000,
    fuel_unit_cost: 100_000,
    interest_rate: 0.05,
    weather_weights: WeatherWeights {
        sunny: 45,
        cloudy: 30,
        stormy: 25,
    },
    price_variance: 0.10,
    debt_ceiling: 5_000_000,
    debt_grace_months: 3,
    rest_income: 50_000,
    score_multiplier: 1.0,
    base_yield_multiplier: 1.0,
};

pub const HARD_TIER: TierConfig = TierConfig {
    initial_money: 2_000_000,
    fixed_cost: 250_000,
    fuel_unit_cost: 120_000,
    interest_rate: 0.08,
    weather_weights: WeatherWeights {
        sunny: 35,
        cloudy: 30,
        stormy: 35,
    },
    price_variance: 0.20,
    debt_ceiling: 3_000_000,
    debt_grace_months: 3,
    rest_income: 40_000,
    score_multiplier: 1.5,
    base_yield_multiplier: 0.9,
};

pub const EXTREME_TIER: TierConfig = TierConfig {
    initial_money: 1_500_000,
    fixed_cost: 300_000,
    fuel_unit_cost: 140_000,
    interest_rate: 0.10,
    weather_weights: WeatherWeights {
        sunny: 25,
        cloudy: 30,
        stormy: 45,
    },
    price_variance: 0.30,
    debt_ceiling: 2_000_000,
    debt_grace_months: 2,
    rest_income: 30_000,
    score_multiplier: 2.0,
    base_yield_multiplier: 0.8,
};
