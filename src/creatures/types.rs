//! Creature data and power derivation.

use crate::core::constants::{MAX_POWER_TIER, MIN_POWER_TIER, POWER_TIER_THRESHOLDS};
use serde::{Deserialize, Serialize};

/// A creature on the team or in storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub species_id: u32,
    pub name: String,
    /// Combat strength tier (1-5), derived from `base_stat_total`
    /// except for legendary encounters which force the top tier.
    pub power: u8,
    pub shiny: bool,
    pub base_stat_total: u32,
}

impl Creature {
    /// Build a creature from raw species data, deriving its power tier.
    pub fn from_stats(species_id: u32, name: impl Into<String>, base_stat_total: u32, shiny: bool) -> Self {
        Self {
            species_id,
            name: name.into(),
            power: power_tier(base_stat_total),
            shiny,
            base_stat_total,
        }
    }

    /// Same species data, different shiny roll.
    pub fn with_shiny(mut self, shiny: bool) -> Self {
        self.shiny = shiny;
        self
    }

    /// Short label used in team listings, e.g. "✨Pikachu (Pw:2)".
    pub fn label(&self) -> String {
        format!(
            "{}{} (Pw:{})",
            if self.shiny { "✨" } else { "" },
            self.name,
            self.power
        )
    }
}

/// Step function from base-stat total to power tier.
///
/// bst < 320 → 1, < 450 → 2, < 580 → 3, < 670 → 4, otherwise 5.
pub fn power_tier(base_stat_total: u32) -> u8 {
    let below = POWER_TIER_THRESHOLDS
        .iter()
        .position(|&threshold| base_stat_total < threshold);
    match below {
        Some(index) => MIN_POWER_TIER + index as u8,
        None => MAX_POWER_TIER,
    }
}

/// Capitalize the first letter of an API species name ("pikachu" → "Pikachu").
pub fn display_name(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
