use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViceError};

/// Canonical severity of a record.
///
/// `User` is the sentinel for records whose level is not one of the six
/// well-known names or codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    #[serde(rename = "userlvl")]
    User,
}

impl Level {
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::User,
    ];

    /// Maps the numeric codes emitted by JSON loggers (10, 20, ..., 60).
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            10 => Some(Self::Trace),
            20 => Some(Self::Debug),
            30 => Some(Self::Info),
            40 => Some(Self::Warn),
            50 => Some(Self::Error),
            60 => Some(Self::Fatal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::User => "userlvl",
        }
    }

    /// Position in [`Level::ALL`], used to index per-level lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ViceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "userlvl" => Ok(Self::User),
            _ => Err(ViceError::Parse(format!("unknown level: {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes_map_to_canonical_names() {
        let mapped: Vec<_> = [10, 20, 30, 40, 50, 60]
            .into_iter()
            .map(|c| Level::from_code(c).unwrap().as_str())
            .collect();
        assert_eq!(mapped, ["trace", "debug", "info", "warn", "error", "fatal"]);
        assert_eq!(Level::from_code(35), None);
        assert_eq!(Level::from_code(0), None);
    }

    #[test]
    fn level_parse() {
        assert_eq!(Level::from_str("warn").unwrap(), Level::Warn);
        assert_eq!(Level::from_str("FATAL").unwrap(), Level::Fatal);
        assert_eq!(Level::from_str("userlvl").unwrap(), Level::User);
        assert!(Level::from_str("notice").is_err());
    }

    #[test]
    fn index_matches_all_table() {
        for (i, level) in Level::ALL.iter().enumerate() {
            assert_eq!(level.index(), i);
        }
    }
}
