//! Recovery sub-tier inference for behaviors logged as bare `R`.
//!
//! An under-specified recovery behavior is refined into R1/R2/R3 from
//! mood, duration, and what the user was just doing. Deterministic and
//! pure: same inputs, same tier.

use crate::level::{Level, ResolvedLevel};
use crate::user::RecentWindow;

/// Resolve a behavior level to a concrete scoring tier.
///
/// Already-resolved levels pass through unchanged. For bare `R`: mood
/// suggests a tier, the duration rule is evaluated last and is
/// authoritative wherever the two disagree, and a high-exertion (S/A)
/// behavior immediately before escalates the result by one step.
pub fn resolve(level: Level, duration: u32, mood: u8, recent: &RecentWindow) -> ResolvedLevel {
    if let Some(resolved) = level.as_resolved() {
        return resolved;
    }

    let suggested = mood_tier(mood);
    let mut tier = override_by_duration(suggested, duration);

    if let Some(prev) = recent.last()
        && prev.level.is_high_exertion()
    {
        tier = escalate(tier);
    }

    tier
}

/// Tier suggested by mood alone: a rough day reads as shallow recovery,
/// a good one as deep.
fn mood_tier(mood: u8) -> ResolvedLevel {
    match mood {
        0..=2 => ResolvedLevel::R1,
        3 => ResolvedLevel::R2,
        _ => ResolvedLevel::R3,
    }
}

/// Duration override: short sessions cap at light recovery regardless of
/// the suggested tier, long ones promote to deep recovery.
fn override_by_duration(_suggested: ResolvedLevel, duration: u32) -> ResolvedLevel {
    match duration {
        0..=14 => ResolvedLevel::R1,
        15..=30 => ResolvedLevel::R2,
        _ => ResolvedLevel::R3,
    }
}

/// One step deeper: R1→R2, R2→R3, R3 saturates.
fn escalate(tier: ResolvedLevel) -> ResolvedLevel {
    match tier {
        ResolvedLevel::R1 => ResolvedLevel::R2,
        ResolvedLevel::R2 => ResolvedLevel::R3,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::LoggedBehavior;

    fn window_with(levels: &[ResolvedLevel]) -> RecentWindow {
        let mut window = RecentWindow::new(10);
        for (i, &level) in levels.iter().enumerate() {
            window.push(LoggedBehavior {
                level,
                name: None,
                duration: 20,
                end_ts: i as u64 * 600,
            });
        }
        window
    }

    #[test]
    fn test_resolved_levels_pass_through() {
        let empty = RecentWindow::new(10);
        assert_eq!(resolve(Level::S, 5, 1, &empty), ResolvedLevel::S);
        assert_eq!(resolve(Level::R1, 120, 5, &empty), ResolvedLevel::R1);
    }

    #[test]
    fn test_duration_overrides_mood() {
        let empty = RecentWindow::new(10);
        // Low mood suggests R1 either way; duration decides.
        assert_eq!(resolve(Level::R, 10, 1, &empty), ResolvedLevel::R1);
        assert_eq!(resolve(Level::R, 40, 1, &empty), ResolvedLevel::R3);
        // High mood suggests R3, but a short break stays R1.
        assert_eq!(resolve(Level::R, 5, 5, &empty), ResolvedLevel::R1);
    }

    #[test]
    fn test_duration_band_edges() {
        let empty = RecentWindow::new(10);
        assert_eq!(resolve(Level::R, 14, 3, &empty), ResolvedLevel::R1);
        assert_eq!(resolve(Level::R, 15, 3, &empty), ResolvedLevel::R2);
        assert_eq!(resolve(Level::R, 30, 3, &empty), ResolvedLevel::R2);
        assert_eq!(resolve(Level::R, 31, 3, &empty), ResolvedLevel::R3);
    }

    #[test]
    fn test_high_exertion_escalates_one_step() {
        let empty = RecentWindow::new(10);
        let after_s = window_with(&[ResolvedLevel::S]);
        assert_eq!(resolve(Level::R, 20, 3, &empty), ResolvedLevel::R2);
        assert_eq!(resolve(Level::R, 20, 3, &after_s), ResolvedLevel::R3);

        let after_a = window_with(&[ResolvedLevel::A]);
        assert_eq!(resolve(Level::R, 10, 3, &after_a), ResolvedLevel::R2);
    }

    #[test]
    fn test_escalation_saturates_at_r3() {
        let after_s = window_with(&[ResolvedLevel::S]);
        assert_eq!(resolve(Level::R, 45, 3, &after_s), ResolvedLevel::R3);
    }

    #[test]
    fn test_only_immediately_preceding_behavior_escalates() {
        // S earlier in the window, but a B right before: no escalation.
        let window = window_with(&[ResolvedLevel::S, ResolvedLevel::B]);
        assert_eq!(resolve(Level::R, 20, 3, &window), ResolvedLevel::R2);
    }
}
