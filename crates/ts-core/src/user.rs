use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::behavior::LoggedBehavior;
use crate::config::EngineConfig;
use crate::constants::INITIAL_ENERGY;

/// Bounded, ordered window of recently scored behaviors, most-recent-last.
/// Sized to the largest lookback any rule needs; a push past capacity
/// evicts the oldest entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecentWindow {
    entries: VecDeque<LoggedBehavior>,
    capacity: usize,
}

impl RecentWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Build from a pre-loaded history, oldest→newest. Keeps only the
    /// newest `capacity` entries.
    pub fn from_entries(capacity: usize, entries: Vec<LoggedBehavior>) -> Self {
        let mut window = Self::new(capacity);
        for entry in entries {
            window.push(entry);
        }
        window
    }

    pub fn push(&mut self, behavior: LoggedBehavior) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(behavior);
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&LoggedBehavior> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoggedBehavior> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Everything the engine needs to know about the single user.
/// Mutated in place by `Engine::record_behavior` and the recovery/reset
/// operations; the caller owns persistence.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserState {
    pub current_energy: f64,
    pub recent: RecentWindow,
    /// True for the first configured days since first use.
    pub beginner_period: bool,
    /// Unix seconds of the last scored behavior, if any.
    pub last_activity_ts: Option<u64>,
}

impl UserState {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            current_energy: INITIAL_ENERGY.min(config.energy_max),
            recent: RecentWindow::new(config.recent_window),
            beginner_period: true,
            last_activity_ts: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ResolvedLevel;

    fn logged(level: ResolvedLevel, end_ts: u64) -> LoggedBehavior {
        LoggedBehavior {
            level,
            name: None,
            duration: 10,
            end_ts,
        }
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut window = RecentWindow::new(3);
        for i in 0..5 {
            window.push(logged(ResolvedLevel::B, i));
        }
        assert_eq!(window.len(), 3);
        let timestamps: Vec<u64> = window.iter().map(|b| b.end_ts).collect();
        assert_eq!(timestamps, vec![2, 3, 4]);
        assert_eq!(window.last().unwrap().end_ts, 4);
    }

    #[test]
    fn test_from_entries_keeps_newest() {
        let entries = (0..10).map(|i| logged(ResolvedLevel::A, i)).collect();
        let window = RecentWindow::from_entries(4, entries);
        assert_eq!(window.len(), 4);
        assert_eq!(window.iter().next().unwrap().end_ts, 6);
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut window = RecentWindow::new(0);
        window.push(logged(ResolvedLevel::S, 1));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_new_user_energy_clamped_to_max() {
        let config = EngineConfig {
            energy_max: 80.0,
            energy_low_threshold: 20.0,
            ..Default::default()
        };
        let state = UserState::new(&config);
        assert_eq!(state.current_energy, 80.0);

        let state = UserState::new(&EngineConfig::default());
        assert_eq!(state.current_energy, 100.0);
    }
}
