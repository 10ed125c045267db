use serde::{Deserialize, Serialize};

use crate::level::ResolvedLevel;

/// Scoring and energy rates for one behavior level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub base_score_per_min: f64,
    /// Positive drains the energy pool; negative restores it (recovery).
    pub energy_cost_per_min: f64,
    /// Short phrase describing what the level feels like.
    pub anchor: String,
    /// Representative activities for the level.
    pub example: String,
}

impl CatalogEntry {
    fn new(base_score_per_min: f64, energy_cost_per_min: f64, anchor: &str, example: &str) -> Self {
        Self {
            base_score_per_min,
            energy_cost_per_min,
            anchor: anchor.to_string(),
            example: example.to_string(),
        }
    }

    pub fn is_recovery(&self) -> bool {
        self.energy_cost_per_min < 0.0
    }
}

/// Per-level rate table. One entry per resolved level; bare `R` never
/// reaches the catalog, sublevel inference refines it first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LevelCatalog {
    pub s: CatalogEntry,
    pub a: CatalogEntry,
    pub b: CatalogEntry,
    pub c: CatalogEntry,
    pub d: CatalogEntry,
    pub r1: CatalogEntry,
    pub r2: CatalogEntry,
    pub r3: CatalogEntry,
}

impl LevelCatalog {
    pub fn entry(&self, level: ResolvedLevel) -> &CatalogEntry {
        match level {
            ResolvedLevel::S => &self.s,
            ResolvedLevel::A => &self.a,
            ResolvedLevel::B => &self.b,
            ResolvedLevel::C => &self.c,
            ResolvedLevel::D => &self.d,
            ResolvedLevel::R1 => &self.r1,
            ResolvedLevel::R2 => &self.r2,
            ResolvedLevel::R3 => &self.r3,
        }
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self {
            s: CatalogEntry::new(
                1.8,
                0.35,
                "breakthrough growth",
                "deep work, cracking hard problems, intense training",
            ),
            a: CatalogEntry::new(
                1.2,
                0.25,
                "real progress",
                "learning new material, creative work, focused reading",
            ),
            b: CatalogEntry::new(
                0.7,
                0.18,
                "steady upkeep",
                "review, tidying, light exercise, chores",
            ),
            c: CatalogEntry::new(
                -0.5,
                0.10,
                "time slipping away",
                "aimless scrolling, junk video",
            ),
            d: CatalogEntry::new(
                -1.0,
                0.15,
                "self-damage",
                "all-nighters, bingeing, overindulging",
            ),
            r1: CatalogEntry::new(
                0.2,
                -0.10,
                "light unwinding",
                "tea, music, a short break",
            ),
            r2: CatalogEntry::new(
                0.3,
                -0.20,
                "moderate recovery",
                "a walk, yoga, casual reading",
            ),
            r3: CatalogEntry::new(
                0.4,
                -0.30,
                "deep recovery",
                "a nap, meditation, mindfulness practice",
            ),
        }
    }
}
