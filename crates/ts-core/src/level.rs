use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLevelError;

/// Behavior quality tier as logged by the user.
///
/// `S` is the highest positive tier, `D` the most damaging. `R` is an
/// unresolved recovery level: sublevel inference refines it into one of
/// `R1`/`R2`/`R3` before anything is scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    S,
    A,
    B,
    C,
    D,
    R,
    R1,
    R2,
    R3,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::S => "S",
            Level::A => "A",
            Level::B => "B",
            Level::C => "C",
            Level::D => "D",
            Level::R => "R",
            Level::R1 => "R1",
            Level::R2 => "R2",
            Level::R3 => "R3",
        }
    }

    /// The concrete scoring tier, if this level already carries one.
    /// Only bare `R` returns `None`.
    pub fn as_resolved(self) -> Option<ResolvedLevel> {
        match self {
            Level::S => Some(ResolvedLevel::S),
            Level::A => Some(ResolvedLevel::A),
            Level::B => Some(ResolvedLevel::B),
            Level::C => Some(ResolvedLevel::C),
            Level::D => Some(ResolvedLevel::D),
            Level::R => None,
            Level::R1 => Some(ResolvedLevel::R1),
            Level::R2 => Some(ResolvedLevel::R2),
            Level::R3 => Some(ResolvedLevel::R3),
        }
    }

    pub fn is_recovery(self) -> bool {
        matches!(self, Level::R | Level::R1 | Level::R2 | Level::R3)
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Level::S),
            "A" => Ok(Level::A),
            "B" => Ok(Level::B),
            "C" => Ok(Level::C),
            "D" => Ok(Level::D),
            "R" => Ok(Level::R),
            "R1" => Ok(Level::R1),
            "R2" => Ok(Level::R2),
            "R3" => Ok(Level::R3),
            _ => Err(ParseLevelError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A level the catalog can price directly: bare `R` has been refined away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedLevel {
    S,
    A,
    B,
    C,
    D,
    R1,
    R2,
    R3,
}

impl ResolvedLevel {
    pub fn as_str(self) -> &'static str {
        Level::from(self).as_str()
    }

    /// S/A/B count toward the positive combo streak.
    pub fn is_positive(self) -> bool {
        matches!(self, ResolvedLevel::S | ResolvedLevel::A | ResolvedLevel::B)
    }

    /// C/D break a streak and arm the rebound bonus.
    pub fn is_negative(self) -> bool {
        matches!(self, ResolvedLevel::C | ResolvedLevel::D)
    }

    pub fn is_recovery(self) -> bool {
        matches!(
            self,
            ResolvedLevel::R1 | ResolvedLevel::R2 | ResolvedLevel::R3
        )
    }

    /// High-exertion levels escalate a recovery sub-tier that follows them.
    pub fn is_high_exertion(self) -> bool {
        matches!(self, ResolvedLevel::S | ResolvedLevel::A)
    }
}

impl From<ResolvedLevel> for Level {
    fn from(level: ResolvedLevel) -> Self {
        match level {
            ResolvedLevel::S => Level::S,
            ResolvedLevel::A => Level::A,
            ResolvedLevel::B => Level::B,
            ResolvedLevel::C => Level::C,
            ResolvedLevel::D => Level::D,
            ResolvedLevel::R1 => Level::R1,
            ResolvedLevel::R2 => Level::R2,
            ResolvedLevel::R3 => Level::R3,
        }
    }
}

impl FromStr for ResolvedLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: Level = s.parse()?;
        level.as_resolved().ok_or(ParseLevelError {
            input: s.to_string(),
        })
    }
}

impl fmt::Display for ResolvedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_levels() {
        for s in ["S", "A", "B", "C", "D", "R", "R1", "R2", "R3"] {
            let level: Level = s.parse().unwrap();
            assert_eq!(level.as_str(), s);
        }
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        assert_eq!(" r2 ".parse::<Level>().unwrap(), Level::R2);
        assert_eq!("s".parse::<Level>().unwrap(), Level::S);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "E".parse::<Level>().unwrap_err();
        assert_eq!(err.input, "E");
        assert!("R4".parse::<Level>().is_err());
        assert!("".parse::<Level>().is_err());
    }

    #[test]
    fn test_bare_r_is_unresolved() {
        assert_eq!(Level::R.as_resolved(), None);
        assert!("R".parse::<ResolvedLevel>().is_err());
        assert_eq!(
            Level::R1.as_resolved(),
            Some(ResolvedLevel::R1),
        );
    }

    #[test]
    fn test_classification() {
        assert!(Level::R.is_recovery());
        assert!(Level::R2.is_recovery());
        assert!(!Level::A.is_recovery());
        assert!(ResolvedLevel::S.is_positive());
        assert!(ResolvedLevel::B.is_positive());
        assert!(!ResolvedLevel::C.is_positive());
        assert!(ResolvedLevel::C.is_negative());
        assert!(ResolvedLevel::D.is_negative());
        assert!(ResolvedLevel::R2.is_recovery());
        assert!(!ResolvedLevel::R2.is_positive());
        assert!(ResolvedLevel::S.is_high_exertion());
        assert!(ResolvedLevel::A.is_high_exertion());
        assert!(!ResolvedLevel::B.is_high_exertion());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Level::R2).unwrap();
        assert_eq!(json, "\"R2\"");
        let back: Level = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Level::R2);
    }
}
