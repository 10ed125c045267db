use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Engine tunables. Constructed once and passed into the engine explicitly;
/// the engine never reads ambient global state.
///
/// Every field has a documented default; deserialization layers partial
/// input over `EngineConfig::default()`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound of the energy pool.
    pub energy_max: f64,
    /// Below this, recovery behaviors get the low-energy bonus.
    pub energy_low_threshold: f64,
    /// At or below this, behaviors score zero (energy accounting still runs).
    pub energy_zero_threshold: f64,
    /// Multiplier on recovery deltas while depleted.
    pub low_energy_recovery_bonus: f64,
    /// Energy regained per idle minute once past the idle threshold.
    pub passive_recovery_rate: f64,
    /// Idle minutes that earn no passive recovery at all.
    pub passive_idle_minutes: f64,
    /// Daily-reset recovery when sleep (a prior activity) is on record.
    pub sleep_recovery: f64,
    /// Daily-reset recovery when no activity has ever been recorded.
    pub no_sleep_recovery: f64,
    /// Combo coefficient cap for streaks of three or more.
    pub max_combo_bonus: f64,
    /// Multiplier for the first positive behavior after a C/D break.
    pub rebound_bonus: f64,
    /// Multiplier when the whole positive streak shares the current level.
    pub same_field_bonus: f64,
    /// Behaviors at most this many minutes long get the start bonus.
    pub start_bonus_duration: u32,
    /// Score multiplier for start-bonus behaviors.
    pub start_bonus_score: f64,
    /// Energy-cost multiplier for start-bonus behaviors.
    pub start_bonus_energy: f64,
    /// Score multiplier during the beginner period.
    pub novice_bonus: f64,
    /// Days since first use that count as the beginner period.
    pub beginner_period_days: u32,
    /// How many recent behaviors the streak/balance rules look back over.
    pub recent_window: usize,
    /// Gap below which an identical behavior counts as a short-interval repeat.
    pub short_interval_minutes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            energy_max: 120.0,
            energy_low_threshold: 30.0,
            energy_zero_threshold: 0.0,
            low_energy_recovery_bonus: 1.2,
            passive_recovery_rate: 0.02,
            passive_idle_minutes: 30.0,
            sleep_recovery: 56.0,
            no_sleep_recovery: 50.0,
            max_combo_bonus: 1.3,
            rebound_bonus: 1.1,
            same_field_bonus: 1.15,
            start_bonus_duration: 5,
            start_bonus_score: 1.2,
            start_bonus_energy: 0.8,
            novice_bonus: 1.2,
            beginner_period_days: 7,
            recent_window: 10,
            short_interval_minutes: 10,
        }
    }
}

impl EngineConfig {
    /// Reject malformed tunables before an engine is built. Runs once at
    /// startup; the engine itself never re-checks.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite_fields = [
            ("energy_max", self.energy_max),
            ("energy_low_threshold", self.energy_low_threshold),
            ("energy_zero_threshold", self.energy_zero_threshold),
            ("low_energy_recovery_bonus", self.low_energy_recovery_bonus),
            ("passive_recovery_rate", self.passive_recovery_rate),
            ("passive_idle_minutes", self.passive_idle_minutes),
            ("sleep_recovery", self.sleep_recovery),
            ("no_sleep_recovery", self.no_sleep_recovery),
            ("max_combo_bonus", self.max_combo_bonus),
            ("rebound_bonus", self.rebound_bonus),
            ("same_field_bonus", self.same_field_bonus),
            ("start_bonus_score", self.start_bonus_score),
            ("start_bonus_energy", self.start_bonus_energy),
            ("novice_bonus", self.novice_bonus),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
        }

        if self.energy_max <= 0.0 {
            return Err(ConfigError::NonPositive("energy_max", self.energy_max));
        }
        if self.energy_low_threshold < 0.0 || self.energy_low_threshold > self.energy_max {
            return Err(ConfigError::OutOfRange(
                "energy_low_threshold",
                self.energy_low_threshold,
            ));
        }
        if self.energy_zero_threshold < 0.0 || self.energy_zero_threshold > self.energy_max {
            return Err(ConfigError::OutOfRange(
                "energy_zero_threshold",
                self.energy_zero_threshold,
            ));
        }
        for (field, value) in [
            ("passive_recovery_rate", self.passive_recovery_rate),
            ("passive_idle_minutes", self.passive_idle_minutes),
            ("sleep_recovery", self.sleep_recovery),
            ("no_sleep_recovery", self.no_sleep_recovery),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative(field, value));
            }
        }
        for (field, value) in [
            ("low_energy_recovery_bonus", self.low_energy_recovery_bonus),
            ("max_combo_bonus", self.max_combo_bonus),
            ("rebound_bonus", self.rebound_bonus),
            ("same_field_bonus", self.same_field_bonus),
            ("start_bonus_score", self.start_bonus_score),
            ("start_bonus_energy", self.start_bonus_energy),
            ("novice_bonus", self.novice_bonus),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive(field, value));
            }
        }
        if self.recent_window == 0 {
            return Err(ConfigError::ZeroWindow);
        }

        Ok(())
    }
}
