//! Score pipeline: zero-score gate, base score, dynamic coefficients,
//! session bonuses, and the energy delta.
//!
//! Scoring and energy accounting are independent paths: a depleted user
//! scores nothing but still pays (or recovers) energy.

use serde::{Deserialize, Serialize};

use crate::behavior::BehaviorRecord;
use crate::catalog::LevelCatalog;
use crate::combo;
use crate::config::EngineConfig;
use crate::constants::{
    ENERGY_BAND_HIGH, ENERGY_BAND_MID, ENERGY_BASE_MID, ENERGY_COEFF_LOW, ENERGY_SLOPE_HIGH,
    ENERGY_SLOPE_MID,
};
use crate::infer;
use crate::level::ResolvedLevel;
use crate::user::UserState;

/// Outcome of scoring one behavior. Pure data; the caller persists it and
/// applies the delta.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScoreResult {
    pub final_score: f64,
    /// Signed cost: positive drains energy, negative restores it.
    pub energy_delta: f64,
    pub is_recovery: bool,
    pub resolved_level: ResolvedLevel,
    /// Per-minute rate × duration, before any coefficient.
    pub base_score: f64,
    /// Energy coefficient × combo coefficient.
    pub dynamic_coeff: f64,
}

/// Computes score and energy delta for one behavior against one state
/// snapshot. Pure function over its inputs; no mutation, no side effects.
pub struct ScoreCalculator<'a> {
    config: &'a EngineConfig,
    catalog: &'a LevelCatalog,
}

impl<'a> ScoreCalculator<'a> {
    pub fn new(config: &'a EngineConfig, catalog: &'a LevelCatalog) -> Self {
        Self { config, catalog }
    }

    pub fn score(&self, behavior: &BehaviorRecord, state: &UserState) -> ScoreResult {
        let resolved = infer::resolve(behavior.level, behavior.duration, behavior.mood, &state.recent);
        let entry = self.catalog.entry(resolved);
        let duration = f64::from(behavior.duration);
        let start_bonus = behavior.duration <= self.config.start_bonus_duration;

        // Energy path first: it runs whether or not the gate fires.
        let mut energy_delta = entry.energy_cost_per_min * duration;
        if start_bonus {
            energy_delta *= self.config.start_bonus_energy;
        }
        let is_recovery = entry.is_recovery();
        if is_recovery && state.current_energy < self.config.energy_low_threshold {
            energy_delta *= self.config.low_energy_recovery_bonus;
        }

        // Zero-score gate: an exhausted user earns nothing.
        if state.current_energy <= self.config.energy_zero_threshold {
            return ScoreResult {
                final_score: 0.0,
                energy_delta,
                is_recovery,
                resolved_level: resolved,
                base_score: 0.0,
                dynamic_coeff: 0.0,
            };
        }

        let base_score = entry.base_score_per_min * duration;
        let energy_coeff = energy_coefficient(state.current_energy);
        let combo_coeff = combo::combo_coefficient(resolved, &state.recent, self.config);
        let dynamic_coeff = energy_coeff * combo_coeff;

        let start_bonus_score = if start_bonus {
            self.config.start_bonus_score
        } else {
            1.0
        };
        let novice_bonus = if state.beginner_period {
            self.config.novice_bonus
        } else {
            1.0
        };

        let final_score = base_score * dynamic_coeff * start_bonus_score * novice_bonus;

        ScoreResult {
            final_score,
            energy_delta,
            is_recovery,
            resolved_level: resolved,
            base_score,
            dynamic_coeff,
        }
    }
}

/// Piecewise-linear energy coefficient. Each band is defined by its own
/// formula; no continuity at the breakpoints is implied.
pub fn energy_coefficient(energy: f64) -> f64 {
    if energy > ENERGY_BAND_HIGH {
        1.0 + (energy - ENERGY_BAND_HIGH) * ENERGY_SLOPE_HIGH
    } else if energy > ENERGY_BAND_MID {
        ENERGY_BASE_MID + (energy - ENERGY_BAND_MID) * ENERGY_SLOPE_MID
    } else {
        ENERGY_COEFF_LOW
    }
}
