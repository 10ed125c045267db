//! Energy pool management: consumption, recovery, and the daily reset.
//!
//! The pool is a bounded scalar in [0, energy_max]. Exertion drains it,
//! recovery behaviors and idle time restore it, and the start of a new
//! calendar day tops it up. Clamping absorbs every overflow and underflow;
//! no operation here raises on valid numeric input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::constants::{
    STATUS_FRAC_ENERGIZED, STATUS_FRAC_FAIR, STATUS_FRAC_GOOD, STATUS_FRAC_LOW,
};
use crate::user::UserState;

/// Applies energy deltas and time-based recovery to a `UserState`.
/// Borrows the config; holds no state of its own.
pub struct EnergyManager<'a> {
    config: &'a EngineConfig,
}

impl<'a> EnergyManager<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Apply a signed cost to the pool and return the new level.
    /// Positive cost drains, negative restores (recovery behaviors supply
    /// a negative cost). Always succeeds; the clamp silently absorbs
    /// overflow and underflow.
    pub fn apply_delta(&self, state: &mut UserState, cost: f64) -> f64 {
        let next = (state.current_energy - cost).clamp(0.0, self.config.energy_max);
        state.current_energy = next;
        next
    }

    /// Energy earned by idle time since the last activity. Zero with no
    /// activity on record, and zero at or below the idle threshold; past
    /// it the whole gap counts.
    pub fn passive_recovery(&self, state: &UserState, now_ts: u64) -> f64 {
        let Some(last) = state.last_activity_ts else {
            return 0.0;
        };
        let elapsed_minutes = now_ts.saturating_sub(last) as f64 / 60.0;
        if elapsed_minutes <= self.config.passive_idle_minutes {
            return 0.0;
        }
        elapsed_minutes * self.config.passive_recovery_rate
    }

    /// Compute and apply passive recovery, returning the resulting energy.
    pub fn apply_passive_recovery(&self, state: &mut UserState, now_ts: u64) -> f64 {
        let recovered = self.passive_recovery(state, now_ts);
        if recovered > 0.0 {
            self.apply_delta(state, -recovered)
        } else {
            state.current_energy
        }
    }

    /// Start-of-day top-up. Adds the sleep-recovery amount, or the no-sleep
    /// default when no activity has ever been recorded; clamped to the
    /// pool bound. Invoked once per calendar-day boundary by the caller,
    /// since the engine does not track wall-clock scheduling.
    pub fn daily_reset(&self, state: &mut UserState) -> f64 {
        let recovery = if state.last_activity_ts.is_some() {
            self.config.sleep_recovery
        } else {
            self.config.no_sleep_recovery
        };
        self.apply_delta(state, -recovery)
    }

    pub fn is_low(&self, state: &UserState) -> bool {
        state.current_energy < self.config.energy_low_threshold
    }

    pub fn status(&self, state: &UserState) -> EnergyStatus {
        EnergyStatus::from_level(state.current_energy, self.config.energy_max)
    }
}

/// Qualitative energy band. Descending, non-overlapping, covering the
/// whole [0, energy_max] range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyStatus {
    Energized,
    Good,
    Fair,
    Low,
    Drained,
}

impl EnergyStatus {
    pub fn from_level(energy: f64, energy_max: f64) -> Self {
        let frac = if energy_max > 0.0 {
            energy / energy_max
        } else {
            0.0
        };
        if frac > STATUS_FRAC_ENERGIZED {
            EnergyStatus::Energized
        } else if frac > STATUS_FRAC_GOOD {
            EnergyStatus::Good
        } else if frac > STATUS_FRAC_FAIR {
            EnergyStatus::Fair
        } else if frac > STATUS_FRAC_LOW {
            EnergyStatus::Low
        } else {
            EnergyStatus::Drained
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergyStatus::Energized => "energized",
            EnergyStatus::Good => "in good shape",
            EnergyStatus::Fair => "holding steady",
            EnergyStatus::Low => "running low",
            EnergyStatus::Drained => "drained",
        }
    }
}

impl fmt::Display for EnergyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(energy: f64, last_activity_ts: Option<u64>) -> UserState {
        let mut state = UserState::new(&EngineConfig::default());
        state.current_energy = energy;
        state.last_activity_ts = last_activity_ts;
        state
    }

    #[test]
    fn test_apply_delta_drains_and_restores() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let mut state = state_with(50.0, None);

        assert_eq!(manager.apply_delta(&mut state, 10.0), 40.0);
        assert_eq!(manager.apply_delta(&mut state, -5.0), 45.0);
    }

    #[test]
    fn test_apply_delta_clamps_both_ends() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);

        let mut state = state_with(5.0, None);
        assert_eq!(manager.apply_delta(&mut state, 100.0), 0.0);

        let mut state = state_with(115.0, None);
        assert_eq!(manager.apply_delta(&mut state, -100.0), 120.0);
    }

    #[test]
    fn test_passive_recovery_requires_prior_activity() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let state = state_with(50.0, None);
        assert_eq!(manager.passive_recovery(&state, 1_000_000), 0.0);
    }

    #[test]
    fn test_passive_recovery_idle_threshold() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let state = state_with(50.0, Some(0));

        // Exactly 30 minutes: no credit at all.
        assert_eq!(manager.passive_recovery(&state, 30 * 60), 0.0);
        // Past the threshold the whole gap counts.
        let recovered = manager.passive_recovery(&state, 60 * 60);
        assert!((recovered - 60.0 * 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_apply_passive_recovery_updates_state() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let mut state = state_with(50.0, Some(0));

        let after = manager.apply_passive_recovery(&mut state, 100 * 60);
        assert!((after - 52.0).abs() < 1e-12);
        assert_eq!(state.current_energy, after);

        // Below threshold: a no-op that reports the unchanged level.
        let mut idle_state = state_with(50.0, Some(0));
        assert_eq!(manager.apply_passive_recovery(&mut idle_state, 60), 50.0);
    }

    #[test]
    fn test_daily_reset_with_sleep_data() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let mut state = state_with(40.0, Some(1000));
        assert_eq!(manager.daily_reset(&mut state), 96.0);
    }

    #[test]
    fn test_daily_reset_without_sleep_data_uses_default() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let mut state = state_with(40.0, None);
        assert_eq!(manager.daily_reset(&mut state), 90.0);
    }

    #[test]
    fn test_daily_reset_clamps_at_max() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let mut state = state_with(120.0, Some(1000));
        assert_eq!(manager.daily_reset(&mut state), 120.0);
    }

    #[test]
    fn test_is_low_uses_threshold() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        assert!(manager.is_low(&state_with(29.9, None)));
        assert!(!manager.is_low(&state_with(30.0, None)));
    }

    #[test]
    fn test_status_bands_cover_range() {
        // Default max 120: edges at 90 / 70 / 50 / 30.
        assert_eq!(EnergyStatus::from_level(120.0, 120.0), EnergyStatus::Energized);
        assert_eq!(EnergyStatus::from_level(91.0, 120.0), EnergyStatus::Energized);
        assert_eq!(EnergyStatus::from_level(90.0, 120.0), EnergyStatus::Good);
        assert_eq!(EnergyStatus::from_level(70.0, 120.0), EnergyStatus::Fair);
        assert_eq!(EnergyStatus::from_level(50.0, 120.0), EnergyStatus::Low);
        assert_eq!(EnergyStatus::from_level(30.0, 120.0), EnergyStatus::Drained);
        assert_eq!(EnergyStatus::from_level(0.0, 120.0), EnergyStatus::Drained);
    }

    #[test]
    fn test_status_is_idempotent() {
        let config = EngineConfig::default();
        let manager = EnergyManager::new(&config);
        let state = state_with(65.0, None);
        assert_eq!(manager.status(&state), manager.status(&state));
    }
}
