//! Pet simulation parameters
//!
//! All tunable periods, gains and persistence settings for the pet engine.
//! Defaults reproduce the classic timings; values can be overridden from a
//! JSON file through the [`ConfigPort`](crate::app::ports::ConfigPort).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core simulation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Master clock ---
    /// Clock tick interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Hunger decays on every Nth tick
    pub hunger_decay_every: u32,
    /// Happiness decays on every Nth tick
    pub happiness_decay_every: u32,
    /// Health decays on every Nth tick
    pub health_decay_every: u32,
    /// Discipline need is raised on every Nth tick
    pub discipline_every: u32,
    /// Cleaning need is raised on every Nth tick
    pub cleaning_every: u32,
    /// Age stage advances on every Nth tick
    pub age_up_every: u32,
    /// Amount subtracted by one decay event
    pub decay_amount: u8,

    // --- Sickness ---
    /// Sickness loop period (milliseconds)
    pub sickness_interval_ms: u32,
    /// Health lost per sickness period
    pub sickness_health_loss: u8,
    /// Happiness lost per sickness period
    pub sickness_happiness_loss: u8,

    // --- Sleep ---
    /// Sleep loop period (milliseconds)
    pub sleep_interval_ms: u32,
    /// Number of periods in one nap
    pub sleep_periods: u32,
    /// Health recovers on every Nth sleep period
    pub sleep_health_every: u32,
    /// Health gained per recovery step
    pub sleep_health_gain: u8,
    /// Happiness recovers on every Nth sleep period
    pub sleep_happiness_every: u32,
    /// Happiness gained per recovery step
    pub sleep_happiness_gain: u8,

    // --- User actions ---
    /// Hunger restored by one feeding
    pub feed_gain: u8,
    /// Hunger and happiness restored by medicine
    pub medicine_gain: u8,
    /// Happiness gained by winning the minigame
    pub minigame_win_gain: u8,

    // --- Life cycle ---
    /// Last age stage; ageing past it is fatal
    pub max_age_stage: u8,

    // --- Persistence ---
    /// Directory holding save records
    pub save_dir: String,
    /// File extension of save records (without the dot)
    pub save_extension: String,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            // Master clock
            tick_interval_ms: 100, // 10 Hz
            hunger_decay_every: 2,
            happiness_decay_every: 3,
            health_decay_every: 5,
            discipline_every: 200, // 20 s
            cleaning_every: 250,   // 25 s
            age_up_every: 600,     // 1 min
            decay_amount: 1,

            // Sickness
            sickness_interval_ms: 1000,
            sickness_health_loss: 5,
            sickness_happiness_loss: 3,

            // Sleep: 50 x 100 ms = 5 s nap
            sleep_interval_ms: 100,
            sleep_periods: 50,
            sleep_health_every: 5,
            sleep_health_gain: 5,
            sleep_happiness_every: 10,
            sleep_happiness_gain: 1,

            // User actions
            feed_gain: 10,
            medicine_gain: 20,
            minigame_win_gain: 50,

            // Life cycle
            max_age_stage: 4,

            // Persistence
            save_dir: "saves".into(),
            save_extension: "TAMA".into(),
        }
    }
}

impl PetConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=60_000).contains(&self.tick_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "tick_interval_ms must be 1–60000",
            ));
        }
        let periods = [
            self.hunger_decay_every,
            self.happiness_decay_every,
            self.health_decay_every,
            self.discipline_every,
            self.cleaning_every,
            self.age_up_every,
        ];
        if periods.contains(&0) {
            return Err(ConfigError::ValidationFailed(
                "clock periods must be at least 1 tick",
            ));
        }
        if self.decay_amount == 0 || self.decay_amount > 100 {
            return Err(ConfigError::ValidationFailed("decay_amount must be 1–100"));
        }
        if !(1..=60_000).contains(&self.sickness_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "sickness_interval_ms must be 1–60000",
            ));
        }
        if !(1..=60_000).contains(&self.sleep_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "sleep_interval_ms must be 1–60000",
            ));
        }
        if self.sleep_periods == 0 || self.sleep_health_every == 0 || self.sleep_happiness_every == 0
        {
            return Err(ConfigError::ValidationFailed(
                "sleep periods must be at least 1",
            ));
        }
        let gains = [
            self.sickness_health_loss,
            self.sickness_happiness_loss,
            self.sleep_health_gain,
            self.sleep_happiness_gain,
            self.feed_gain,
            self.medicine_gain,
            self.minigame_win_gain,
        ];
        if gains.iter().any(|g| *g > 100) {
            return Err(ConfigError::ValidationFailed(
                "stat gains and losses must be 0–100",
            ));
        }
        if !(1..=9).contains(&self.max_age_stage) {
            return Err(ConfigError::ValidationFailed("max_age_stage must be 1–9"));
        }
        if self.save_dir.trim().is_empty() {
            return Err(ConfigError::ValidationFailed("save_dir must not be empty"));
        }
        if self.save_extension.is_empty()
            || self
                .save_extension
                .contains(['.', '/', '\\', '\n', '\r'])
        {
            return Err(ConfigError::ValidationFailed(
                "save_extension must be a bare, non-empty extension",
            ));
        }
        Ok(())
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Serialise to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|_| ConfigError::IoError)
    }
}
