use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Severity rank of a log record, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{0}' (expected debug, info, warn, error, fatal or panic)")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

/// Minimum-severity gate shared by every leveled call of a logger.
///
/// The check is a single comparison against an immutable threshold, so a
/// logger can consult it before touching fields or its backend and a
/// suppressed call costs nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCheck {
    threshold: Level,
}

impl LevelCheck {
    pub const fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    /// `true` when `candidate` is at least as severe as the threshold.
    #[inline]
    pub fn check(&self, candidate: Level) -> bool {
        candidate >= self.threshold
    }

    pub const fn threshold(&self) -> Level {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_total() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Panic);
    }

    #[test]
    fn check_matches_order_for_every_pair() {
        for threshold in Level::ALL {
            let gate = LevelCheck::new(threshold);
            for candidate in Level::ALL {
                assert_eq!(
                    gate.check(candidate),
                    candidate >= threshold,
                    "threshold={threshold} candidate={candidate}"
                );
            }
        }
    }

    #[test]
    fn warn_threshold() {
        let gate = LevelCheck::new(Level::Warn);
        assert!(!gate.check(Level::Debug));
        assert!(!gate.check(Level::Info));
        assert!(gate.check(Level::Warn));
        assert!(gate.check(Level::Error));
        assert!(gate.check(Level::Fatal));
        assert!(gate.check(Level::Panic));
        assert_eq!(gate.threshold(), Level::Warn);
    }

    #[test]
    fn parse_names() {
        assert_eq!("debug".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" Panic ".parse::<Level>().unwrap(), Level::Panic);
        let err = "verbose".parse::<Level>().unwrap_err();
        assert!(err.to_string().contains("verbose"));
    }

    #[test]
    fn display_round_trips() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>().unwrap(), level);
        }
    }
}
