// SPDX-License-Identifier: MIT OR Apache-2.0
use std::fmt::Display;

/**
Severity of a log call.

Levels are ordered, so `Level::Warn > Level::Info`.  Each level also has a stable numeric code,
which is what location-aware loggers receive (see [crate::Logger::log_located]).
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "notify", derive(serde::Deserialize))]
#[cfg_attr(feature = "notify", serde(rename_all = "UPPERCASE"))]
pub enum Level {
    /// Very detailed diagnostics
    Trace,
    /// Diagnostics for the developer of the component
    Debug,
    /// Normal operation worth recording
    Info,
    /// Suspicious condition
    Warn,
    /// Runtime error
    Error,
}

impl Level {
    pub const TRACE_CODE: i32 = 0;
    pub const DEBUG_CODE: i32 = 10;
    pub const INFO_CODE: i32 = 20;
    pub const WARN_CODE: i32 = 30;
    pub const ERROR_CODE: i32 = 40;

    /// All levels, least severe first.
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    /// The numeric code for this level.
    pub const fn code(self) -> i32 {
        match self {
            Level::Trace => Self::TRACE_CODE,
            Level::Debug => Self::DEBUG_CODE,
            Level::Info => Self::INFO_CODE,
            Level::Warn => Self::WARN_CODE,
            Level::Error => Self::ERROR_CODE,
        }
    }

    /**
    Resolves a numeric code back to a level.

    Returns `None` for codes that don't name a level.
    */
    pub const fn from_code(code: i32) -> Option<Level> {
        match code {
            Self::TRACE_CODE => Some(Level::Trace),
            Self::DEBUG_CODE => Some(Level::Debug),
            Self::INFO_CODE => Some(Level::Info),
            Self::WARN_CODE => Some(Level::Warn),
            Self::ERROR_CODE => Some(Level::Error),
            _ => None,
        }
    }

    /**
    Like [Self::from_code], but an unknown code is a programmer error.

    # Panics
    If `code` is not one of the level codes.
    */
    pub(crate) fn expect_code(code: i32) -> Level {
        match Self::from_code(code) {
            Some(level) => level,
            None => panic!("Level number {} is not recognized.", code),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
