//! Monthly weather roll and its effect on yield.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{METHOD_DIVING, METHOD_FIXED_NET, METHOD_SQUID_FISHING};

/// Weather drawn once per month from the tier's weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    #[default]
    Sunny,
    Cloudy,
    Stormy,
}

const WEATHER_ORDER: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Stormy];

impl Weather {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Stormy => "stormy",
        }
    }

    /// Yield multiplier for a method operating under this weather.
    ///
    /// Storms hit fixed nets less than open-water methods and divers hardest;
    /// clouds mostly bother the lamp-based squid boats.
    #[must_use]
    pub fn yield_multiplier(self, method_id: &str) -> f64 {
        match self {
            Self::Sunny => 1.0,
            Self::Cloudy => {
                if method_id == METHOD_SQUID_FISHING {
                    0.85
                } else {
                    0.9
                }
            }
            Self::Stormy => match method_id {
                METHOD_FIXED_NET => 0.7,
                METHOD_DIVING => 0.3,
                _ => 0.55,
            },
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weather {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sunny" => Ok(Self::Sunny),
            "cloudy" => Ok(Self::Cloudy),
            "stormy" => Ok(Self::Stormy),
            _ => Err(()),
        }
    }
}

/// Per-tier weather distribution, expressed as integer weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherWeights {
    pub sunny: u32,
    pub cloudy: u32,
    pub stormy: u32,
}

impl WeatherWeights {
    #[must_use]
    pub const fn weight(self, weather: Weather) -> u32 {
        match weather {
            Weather::Sunny => self.sunny,
            Weather::Cloudy => self.cloudy,
            Weather::Stormy => self.stormy,
        }
    }

    #[must_use]
    pub const fn total(self) -> u32 {
        self.sunny + self.cloudy + self.stormy
    }
}

/// Select this month's weather from the tier weights.
///
/// A zero total weight falls back to sunny so a degenerate tier table cannot
/// stall the month loop.
pub fn roll_weather<R: Rng>(weights: WeatherWeights, rng: &mut R) -> Weather {
    let total = weights.total();
    if total == 0 {
        return Weather::Sunny;
    }
    let mut roll = rng.gen_range(0..total);
    for weather in WEATHER_ORDER {
        let weight = weights.weight(weather);
        if weight == 0 {
            continue;
        }
        if roll < weight {
            return weather;
        }
        roll -= weight;
    }
    Weather::Sunny
}
