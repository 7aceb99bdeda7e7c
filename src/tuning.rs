//! Data-driven game balance
//!
//! Spawn rates and score values. Defaults reproduce the shipped balance; a
//! JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Balance knobs read by the spawner, collision resolver and abilities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Spawn probabilities (per tick) ===
    /// Asteroid chance at level 0
    pub asteroid_base_chance: f64,
    /// Added asteroid chance per level
    pub asteroid_chance_per_level: f64,
    pub power_up_chance: f64,
    /// Event item chance (only while a cosmic event runs)
    pub event_item_chance: f64,
    /// Ally chance (only while allies are enabled and below the cap)
    pub ally_chance: f64,
    /// Fraction of asteroids flagged as event asteroids during an event
    pub event_asteroid_chance: f64,

    // === Scoring ===
    pub asteroid_points_per_level: u64,
    pub spinning_bonus: u64,
    pub event_asteroid_multiplier: u64,
    pub score_power_up_per_level: u64,
    pub event_item_per_level: u64,
    pub event_item_coins: u64,
    pub aura_points_per_level: u64,
    pub solar_points_per_level: u64,
    /// Final score divided by this is paid out as coins on game over
    pub score_per_coin: u64,

    // === Events ===
    /// Run a cosmic event from startup
    pub cosmic_events: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            asteroid_base_chance: 0.03,
            asteroid_chance_per_level: 0.005,
            power_up_chance: 0.002,
            event_item_chance: 0.005,
            ally_chance: 0.01,
            event_asteroid_chance: 0.2,

            asteroid_points_per_level: 15,
            spinning_bonus: 25,
            event_asteroid_multiplier: 2,
            score_power_up_per_level: 100,
            event_item_per_level: 200,
            event_item_coins: 50,
            aura_points_per_level: 10,
            solar_points_per_level: 20,
            score_per_coin: 10,

            cosmic_events: true,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Asteroid spawn probability for a level
    pub fn asteroid_chance(&self, level: u32) -> f64 {
        self.asteroid_base_chance + level as f64 * self.asteroid_chance_per_level
    }

    /// Coins paid for a finished run
    pub fn coins_for_score(&self, score: u64) -> u64 {
        score / self.score_per_coin.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asteroid_chance_scales_with_level() {
        let tuning = Tuning::default();
        assert!((tuning.asteroid_chance(1) - 0.035).abs() < 1e-9);
        assert!((tuning.asteroid_chance(4) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "power_up_chance": 0.5, "cosmic_events": false }"#)
            .unwrap();
        assert_eq!(tuning.power_up_chance, 0.5);
        assert!(!tuning.cosmic_events);
        assert_eq!(tuning.asteroid_points_per_level, 15);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Tuning::from_json("{ nope").is_err());
    }

    #[test]
    fn test_coins_for_score_floors() {
        let tuning = Tuning::default();
        assert_eq!(tuning.coins_for_score(1234), 123);
        assert_eq!(tuning.coins_for_score(9), 0);
    }
}
