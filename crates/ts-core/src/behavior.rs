use serde::{Deserialize, Serialize};

use crate::level::{Level, ResolvedLevel};

/// One logged, timed activity as supplied by the caller. Immutable once
/// scored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BehaviorRecord {
    pub level: Level,
    /// Duration in whole minutes.
    pub duration: u32,
    /// Mood rating 1–5 at the time of the behavior.
    pub mood: u8,
    /// Unix seconds.
    pub start_ts: u64,
    pub end_ts: u64,
    /// Optional identity used for repetition dampening. Two behaviors with
    /// the same name count as repeats of each other.
    pub name: Option<String>,
}

impl BehaviorRecord {
    pub fn new(level: Level, duration: u32, mood: u8, start_ts: u64, end_ts: u64) -> Self {
        Self {
            level,
            duration,
            mood,
            start_ts,
            end_ts,
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A behavior after scoring, as it sits in the recent-behavior window.
/// Carries only what the streak, inference and balance rules look at.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedBehavior {
    pub level: ResolvedLevel,
    pub name: Option<String>,
    pub duration: u32,
    pub end_ts: u64,
}
