use crate::filter::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log record, ordered by priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LogLevel {
    Verbose = 2,
    Debug = 3,
    Info = 4,
    Warn = 5,
    Error = 6,
    Assert = 7,
}

impl LogLevel {
    /// All levels from lowest to highest priority
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Verbose,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Assert,
    ];

    /// Numeric priority; higher means more severe
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Single-character code used by logcat output
    pub fn letter(self) -> char {
        match self {
            LogLevel::Verbose => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
            LogLevel::Assert => 'A',
        }
    }

    /// Lower-case textual name
    pub fn name(self) -> &'static str {
        match self {
            LogLevel::Verbose => "verbose",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Assert => "assert",
        }
    }

    /// Exact lookup by lower-case name
    pub fn by_name(name: &str) -> Option<LogLevel> {
        Self::ALL.into_iter().find(|level| level.name() == name)
    }

    /// Exact lookup by letter code. `F` is not a level; parsers map it themselves.
    pub fn by_letter(letter: char) -> Option<LogLevel> {
        Self::ALL.into_iter().find(|level| level.letter() == letter)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for LogLevel {
    type Err = FilterError;

    /// Lenient parse for user input: any-case name or a single letter
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(level) = LogLevel::by_name(&trimmed.to_lowercase()) {
            return Ok(level);
        }
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(level) = LogLevel::by_letter(c.to_ascii_uppercase())
        {
            return Ok(level);
        }
        Err(FilterError::UnknownLevel(s.to_string()))
    }
}
