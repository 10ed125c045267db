//! TimeScore behavior scoring and energy simulation engine.
//!
//! Turns one logged behavior plus the user's current state into a final
//! score and an energy delta, and evolves the bounded energy pool over
//! time: tiered catalog rates, recovery sub-tier inference, streak
//! bonuses, anti-abuse dampening, passive recovery, and the daily reset.
//!
//! Zero I/O: a pure, synchronous state-transition engine with no
//! opinions about persistence or presentation.

pub mod behavior;
pub mod catalog;
pub mod combo;
pub mod config;
pub mod constants;
pub mod energy;
pub mod engine;
pub mod error;
pub mod infer;
pub mod level;
pub mod score;
pub mod time;
pub mod user;

pub use behavior::{BehaviorRecord, LoggedBehavior};
pub use catalog::{CatalogEntry, LevelCatalog};
pub use combo::{ComboResult, apply_balance_mechanisms, combo_coefficient, combo_result};
pub use config::EngineConfig;
pub use energy::{EnergyManager, EnergyStatus};
pub use engine::Engine;
pub use error::{ConfigError, ParseLevelError};
pub use infer::resolve;
pub use level::{Level, ResolvedLevel};
pub use score::{ScoreCalculator, ScoreResult, energy_coefficient};
pub use time::{now_unix_secs, unix_day, unix_to_hhmm, unix_to_iso8601};
pub use user::{RecentWindow, UserState};
