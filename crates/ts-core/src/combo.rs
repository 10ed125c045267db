//! Positive-behavior streak bonuses and anti-abuse dampening.
//!
//! A run of recent S/A/B behaviors earns a stepped multiplier, bouncing
//! back right after a C/D earns a little more, and specializing in one
//! level more still. The balance side pushes the other way: repeating the
//! same behavior, logging it again within minutes, or farming recovery
//! tiers all dampen the score. The three dampeners are independent and
//! compose multiplicatively.

use crate::config::EngineConfig;
use crate::constants::{
    COMBO_STEP_ONE, COMBO_STEP_TWO, RECOVERY_SPAM_DAMPENING, RECOVERY_SPAM_THRESHOLD,
    REPEAT_DAMPENING, REPEAT_THRESHOLD, SHORT_INTERVAL_DAMPENING,
};
use crate::level::ResolvedLevel;
use crate::user::RecentWindow;

/// Breakdown of one combo computation.
#[derive(Clone, Copy, Debug)]
pub struct ComboResult {
    pub coefficient: f64,
    /// Positive behaviors in the retention window.
    pub streak: usize,
    /// First positive behavior right after a C/D break.
    pub rebound: bool,
    /// The whole positive streak shares the current level.
    pub same_field: bool,
}

impl ComboResult {
    fn neutral() -> Self {
        Self {
            coefficient: 1.0,
            streak: 0,
            rebound: false,
            same_field: false,
        }
    }
}

/// Combo computation for one behavior against the retention window.
///
/// Recovery tiers always come back neutral; combo logic does not apply
/// to them, though their frequency still feeds the balance rule below.
pub fn combo_result(
    level: ResolvedLevel,
    recent: &RecentWindow,
    config: &EngineConfig,
) -> ComboResult {
    if level.is_recovery() {
        return ComboResult::neutral();
    }

    let positive: Vec<ResolvedLevel> = recent
        .iter()
        .filter(|b| b.level.is_positive())
        .map(|b| b.level)
        .collect();
    let streak = positive.len();

    let mut coefficient = match streak {
        0 => 1.0,
        1 => COMBO_STEP_ONE,
        2 => COMBO_STEP_TWO,
        _ => config.max_combo_bonus,
    };

    let rebound = level.is_positive() && recent.last().is_some_and(|b| b.level.is_negative());
    if rebound {
        coefficient *= config.rebound_bonus;
    }

    let same_field = !positive.is_empty() && positive.iter().all(|&l| l == level);
    if same_field {
        coefficient *= config.same_field_bonus;
    }

    ComboResult {
        coefficient,
        streak,
        rebound,
        same_field,
    }
}

pub fn combo_coefficient(level: ResolvedLevel, recent: &RecentWindow, config: &EngineConfig) -> f64 {
    combo_result(level, recent, config).coefficient
}

/// Apply the three independent anti-abuse dampeners to a computed score:
/// repetition of the same named behavior, an identical behavior within the
/// short-interval gap, and recovery farming. The repeat count and
/// short-interval flag are supplied by the caller; recovery frequency is
/// read from the window.
pub fn apply_balance_mechanisms(
    score: f64,
    same_behavior_repeats: u32,
    short_interval_repeat: bool,
    level: ResolvedLevel,
    recent: &RecentWindow,
) -> f64 {
    let mut adjusted = score;

    if same_behavior_repeats >= REPEAT_THRESHOLD {
        adjusted *= REPEAT_DAMPENING;
    }

    if short_interval_repeat {
        adjusted *= SHORT_INTERVAL_DAMPENING;
    }

    if level.is_recovery() {
        let recent_recovery = recent.iter().filter(|b| b.level.is_recovery()).count();
        if recent_recovery >= RECOVERY_SPAM_THRESHOLD {
            adjusted *= RECOVERY_SPAM_DAMPENING;
        }
    }

    adjusted
}
