//! Reference catalog: the static tables the engine reads and never mutates.
//!
//! Areas, methods, species, crew, upgrades, event templates, regulations and
//! news are injected at startup as one immutable `Catalog` value, safe to
//! share across concurrent game sessions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog validation failed: {0}")]
    Invalid(String),
}

/// A fishing ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingArea {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Fuel-cost scale for the trip out, 1.0 and up.
    pub distance: f64,
    #[serde(default)]
    pub available_methods: Vec<String>,
    #[serde(default)]
    pub main_fish: Vec<String>,
    pub unlock_level: u8,
}

/// A fishing method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishingMethod {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub fuel_multiplier: f64,
    /// Baseline landed weight in kilograms before any multiplier.
    pub base_yield: f64,
    /// Spread of the monthly yield noise, 0..=1.
    pub yield_variance: f64,
    #[serde(default)]
    pub target_fish: Vec<String>,
    pub unlock_level: u8,
}

/// Abundance class discounting how much of the catch a species claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

impl Rarity {
    #[must_use]
    pub const fn abundance_weight(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Uncommon => 0.4,
            Self::Rare => 0.1,
        }
    }
}

/// A fish species with market and seasonal characteristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishSpecies {
    pub id: String,
    pub name: String,
    /// Yen per kilogram at the baseline season factor.
    pub base_price: i64,
    /// Twelve per-calendar-month factors applied to price and abundance.
    pub seasonality: Vec<f64>,
    pub areas: Vec<String>,
    pub methods: Vec<String>,
    pub rarity: Rarity,
}

impl FishSpecies {
    /// Season factor for a 1-based calendar month; out-of-range months read as 1.0.
    #[must_use]
    pub fn season_factor(&self, month: u8) -> f64 {
        month
            .checked_sub(1)
            .and_then(|index| self.seasonality.get(usize::from(index)))
            .copied()
            .unwrap_or(1.0)
    }
}

/// An NPC crew member the company can put on the boat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fisherman {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Multiplier on landed weight.
    pub yield_bonus: f64,
    /// Dampens the method's yield variance, may be negative.
    pub stability_bonus: f64,
    #[serde(default)]
    pub special_method: Option<String>,
    #[serde(default)]
    pub event_bonus: f64,
}

/// Declarative modifiers granted by a purchased upgrade.
///
/// The resolver reads these each month; purchasing never rewrites any other
/// state beyond the flag and a one-time reputation bump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct UpgradeEffect {
    #[serde(default)]
    pub price_variance_reduction: f64,
    #[serde(default)]
    pub fuel_cost_reduction: f64,
    #[serde(default)]
    pub news_precision: f64,
    #[serde(default)]
    pub yield_bonus: f64,
    #[serde(default)]
    pub reputation_bonus: i32,
}

/// A one-time company investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cost: i64,
    #[serde(default)]
    pub effect: UpgradeEffect,
    #[serde(default)]
    pub purchased: bool,
    pub unlock_level: u8,
}

/// Risk label shown with an event option. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Low,
    Medium,
    High,
}

const fn default_yield_multiplier() -> f64 {
    1.0
}

/// Effects of choosing an event option.
///
/// `money_delta` lands twice by design: once in cash at choice time and once
/// in the month's profit accounting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EventEffect {
    #[serde(default)]
    pub money_delta: i64,
    #[serde(default = "default_yield_multiplier")]
    pub yield_multiplier: f64,
    #[serde(default)]
    pub reputation_delta: i32,
}

impl Default for EventEffect {
    fn default() -> Self {
        Self {
            money_delta: 0,
            yield_multiplier: 1.0,
            reputation_delta: 0,
        }
    }
}

/// One selectable answer to a mid-month event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOption {
    pub label: String,
    #[serde(default)]
    pub description: String,
    pub risk: Risk,
    #[serde(default)]
    pub effect: EventEffect,
}

/// A random mid-month event with its player choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventTemplate {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub options: Vec<EventOption>,
}

/// Monthly fishing regulation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regulation {
    pub month: u8,
    #[serde(default)]
    pub restricted_areas: Vec<String>,
    #[serde(default)]
    pub restricted_methods: Vec<String>,
    #[serde(default)]
    pub reason: String,
}

/// Market-hint category of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Regulation,
    Weather,
    Market,
    Area,
}

/// One piece of monthly news shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub body: String,
    pub category: NewsCategory,
    #[serde(default)]
    pub hint: Option<String>,
}

/// News items grouped by calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyNews {
    pub month: u8,
    pub items: Vec<NewsItem>,
}

/// Container for all reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Catalog {
    #[serde(default)]
    pub areas: Vec<FishingArea>,
    #[serde(default)]
    pub methods: Vec<FishingMethod>,
    #[serde(default)]
    pub species: Vec<FishSpecies>,
    #[serde(default)]
    pub fishermen: Vec<Fisherman>,
    #[serde(default)]
    pub upgrades: Vec<Upgrade>,
    #[serde(default)]
    pub events: Vec<EventTemplate>,
    #[serde(default)]
    pub regulations: Vec<Regulation>,
    #[serde(default)]
    pub news: Vec<MonthlyNews>,
}

impl Catalog {
    /// Create an empty catalog (useful for tests).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load and validate a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or validation fails.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Embedded default catalog shipped with the crate.
    #[must_use]
    pub fn default_config() -> Self {
        Self::from_json(include_str!("../assets/catalog.json")).unwrap_or_else(|_| Self::empty())
    }

    #[must_use]
    pub fn area(&self, id: &str) -> Option<&FishingArea> {
        self.areas.iter().find(|area| area.id == id)
    }

    #[must_use]
    pub fn method(&self, id: &str) -> Option<&FishingMethod> {
        self.methods.iter().find(|method| method.id == id)
    }

    #[must_use]
    pub fn fisherman(&self, id: &str) -> Option<&Fisherman> {
        self.fishermen.iter().find(|crew| crew.id == id)
    }

    #[must_use]
    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|upgrade| upgrade.id == id)
    }

    /// Species catchable with `method_id` in `area_id` (the area×method
    /// intersection). An unknown pair simply intersects to nothing.
    #[must_use]
    pub fn species_for(&self, area_id: &str, method_id: &str) -> Vec<&FishSpecies> {
        self.species
            .iter()
            .filter(|fish| {
                fish.areas.iter().any(|a| a == area_id)
                    && fish.methods.iter().any(|m| m == method_id)
            })
            .collect()
    }

    #[must_use]
    pub fn regulations_for_month(&self, month: u8) -> Vec<Regulation> {
        self.regulations
            .iter()
            .filter(|regulation| regulation.month == month)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn news_for_month(&self, month: u8) -> Vec<NewsItem> {
        self.news
            .iter()
            .find(|entry| entry.month == month)
            .map(|entry| entry.items.clone())
            .unwrap_or_default()
    }

    /// Validate referential integrity and table shapes.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending table entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |msg: String| Err(CatalogError::Invalid(msg));

        for fish in &self.species {
            if fish.seasonality.len() != 12 {
                return invalid(format!(
                    "species {} has {} season factors, expected 12",
                    fish.id,
                    fish.seasonality.len()
                ));
            }
            for area_id in &fish.areas {
                if self.area(area_id).is_none() {
                    return invalid(format!("species {} references unknown area {area_id}", fish.id));
                }
            }
            for method_id in &fish.methods {
                if self.method(method_id).is_none() {
                    return invalid(format!(
                        "species {} references unknown method {method_id}",
                        fish.id
                    ));
                }
            }
        }

        for event in &self.events {
            if event.options.is_empty() {
                return invalid(format!("event {} has no options", event.id));
            }
        }

        for crew in &self.fishermen {
            if let Some(method_id) = &crew.special_method
                && self.method(method_id).is_none()
            {
                return invalid(format!(
                    "fisherman {} references unknown method {method_id}",
                    crew.id
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        let all_ids = self
            .areas
            .iter()
            .map(|a| a.id.as_str())
            .chain(self.methods.iter().map(|m| m.id.as_str()))
            .chain(self.species.iter().map(|s| s.id.as_str()))
            .chain(self.fishermen.iter().map(|f| f.id.as_str()))
            .chain(self.upgrades.iter().map(|u| u.id.as_str()))
            .chain(self.events.iter().map(|e| e.id.as_str()));
        for id in all_ids {
            if !seen.insert(id) {
                return invalid(format!("duplicate catalog id {id}"));
            }
        }

        Ok(())
    }
}
