use std::fmt;

/// Unrecognized behavior-level string at the parse boundary.
/// Fatal to the single call; the caller rejects the input before it
/// reaches the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError {
    pub input: String,
}

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown behavior level '{}' (expected S, A, B, C, D, R, R1, R2 or R3)",
            self.input
        )
    }
}

impl std::error::Error for ParseLevelError {}

/// Malformed or out-of-range engine tunables. Fatal at startup, never
/// silently tolerated.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NotFinite(&'static str),
    NonPositive(&'static str, f64),
    Negative(&'static str, f64),
    OutOfRange(&'static str, f64),
    ZeroWindow,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFinite(field) => write!(f, "config field {field} is not finite"),
            ConfigError::NonPositive(field, v) => {
                write!(f, "config field {field} must be positive, got {v}")
            }
            ConfigError::Negative(field, v) => {
                write!(f, "config field {field} must not be negative, got {v}")
            }
            ConfigError::OutOfRange(field, v) => {
                write!(f, "config field {field} is out of range: {v}")
            }
            ConfigError::ZeroWindow => write!(f, "recent_window must hold at least one behavior"),
        }
    }
}

impl std::error::Error for ConfigError {}
