//! Property tests for the engine's hard invariants: the energy pool never
//! leaves its bounds and every scored result stays finite, for any
//! sequence of valid behaviors.

use proptest::prelude::*;

use ts_core::{BehaviorRecord, Engine, EngineConfig, Level, UserState};

const LEVELS: [Level; 9] = [
    Level::S,
    Level::A,
    Level::B,
    Level::C,
    Level::D,
    Level::R,
    Level::R1,
    Level::R2,
    Level::R3,
];

fn behavior_strategy() -> impl Strategy<Value = (usize, u32, u8, u64)> {
    // (level index, duration minutes, mood, gap to previous behavior in secs)
    (0..LEVELS.len(), 0u32..=600, 1u8..=5, 0u64..=86_400)
}

proptest! {
    #[test]
    fn energy_stays_bounded_and_scores_stay_finite(
        ops in prop::collection::vec(behavior_strategy(), 1..60),
        initial_energy in 0.0f64..=120.0,
    ) {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let mut state = UserState::new(engine.config());
        state.current_energy = initial_energy;

        let mut clock = 0u64;
        for (level_idx, duration, mood, gap) in ops {
            clock += gap;
            let start = clock;
            clock += u64::from(duration) * 60;
            let behavior =
                BehaviorRecord::new(LEVELS[level_idx], duration, mood, start, clock);

            let result = engine.record_behavior(&mut state, &behavior);

            prop_assert!(result.final_score.is_finite());
            prop_assert!(result.energy_delta.is_finite());
            prop_assert!(
                state.current_energy >= 0.0
                    && state.current_energy <= engine.config().energy_max,
                "energy {} escaped [0, {}]",
                state.current_energy,
                engine.config().energy_max
            );
            prop_assert!(state.recent.len() <= engine.config().recent_window);
        }
    }

    #[test]
    fn passive_recovery_never_overfills(
        initial_energy in 0.0f64..=120.0,
        idle_secs in 0u64..=7 * 86_400,
    ) {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let mut state = UserState::new(engine.config());
        state.current_energy = initial_energy;
        state.last_activity_ts = Some(0);

        let after = engine.apply_passive_recovery(&mut state, idle_secs);
        prop_assert!(after >= initial_energy);
        prop_assert!(after <= engine.config().energy_max);
    }

    #[test]
    fn daily_reset_respects_bounds(initial_energy in 0.0f64..=120.0) {
        let engine = Engine::new(EngineConfig::default()).unwrap();
        let mut state = UserState::new(engine.config());
        state.current_energy = initial_energy;
        state.last_activity_ts = Some(1_000);

        let after = engine.daily_reset(&mut state);
        prop_assert!(after >= initial_energy);
        prop_assert!(after <= engine.config().energy_max);
    }
}
