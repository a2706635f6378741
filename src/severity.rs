use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid severity level '{input}'. Valid levels: panic, fatal, error, warn, info, debug")]
pub struct ParseSeverityError {
    pub input: String,
}

/// Record severity. Declared most-severe-first so the discriminant doubles as
/// a priority rank (rank 0 = most severe, matching syslog convention), which
/// keeps `at_or_above` and `fire_levels` O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Panic,
    Fatal,
    Error,
    Warn,
    Info,
    Debug,
}

impl Severity {
    /// Every level, most severe first.
    pub const ALL: [Severity; 6] = [
        Severity::Panic,
        Severity::Fatal,
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Panic => "panic",
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// True when `self` is at least as severe as `threshold`.
    pub fn at_or_above(self, threshold: Severity) -> bool {
        (self as usize) <= (threshold as usize)
    }

    /// The ordered set of levels at or above `self`, most severe first and
    /// inclusive. Sinks whose delivery protocol only supports per-level
    /// opt-in firing take this enumeration instead of a threshold comparison.
    pub fn fire_levels(self) -> &'static [Severity] {
        &Self::ALL[..=self as usize]
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panic" => Ok(Severity::Panic),
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warn" | "warning" => Ok(Severity::Warn),
            "info" => Ok(Severity::Info),
            "debug" => Ok(Severity::Debug),
            _ => Err(ParseSeverityError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
