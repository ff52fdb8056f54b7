// SPDX-License-Identifier: MIT OR Apache-2.0

//! # In-Memory Logger
//!
//! A [`Logger`] that keeps everything it receives, for tests and for examining log output
//! programmatically.
//!
//! Unlike a real sink it remembers *how* each call arrived: as a plain call, as a location-aware
//! call with a numeric level code and a call boundary, or as a whole record.  Which of those it
//! accepts is configurable, so it can stand in for any kind of backend.
//!
//! ```rust
//! use std::sync::Arc;
//! use tagwise::{Captured, InMemoryLogger, Level, TaggedLogger, IMPORTANT};
//!
//! let memory = Arc::new(
//!     InMemoryLogger::new()
//!         .with_threshold(Level::Warn)
//!         .with_tag_threshold("IMPORTANT", Level::Info),
//! );
//! let logger = TaggedLogger::new(memory.clone(), None);
//!
//! logger.info("dropped", ());
//! logger.info_tagged(&IMPORTANT, "kept", ());
//!
//! let entries = memory.drain();
//! assert_eq!(entries.len(), 1);
//! assert!(matches!(&entries[0], Captured::Plain { message, .. } if message == "IMPORTANT kept"));
//! ```

use crate::arg::{Arg, format_message};
use crate::log_record::{LogRecord, flatten};
use crate::logger::{CallBoundary, Capabilities, Logger};
use crate::tag::Tag;
use crate::Level;
use std::error::Error;
use std::fmt::Display;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One call received by an [InMemoryLogger].
#[derive(Debug, Clone)]
pub enum Captured {
    /// Arrived through [Logger::log].
    Plain {
        level: Level,
        tag: Option<Tag>,
        message: String,
        args: Vec<Arg>,
        error: Option<String>,
    },
    /// Arrived through [Logger::log_located].
    Located {
        code: i32,
        boundary: CallBoundary,
        tag: Option<Tag>,
        message: String,
        args: Vec<Arg>,
        error: Option<String>,
    },
    /// Arrived through [Logger::submit].
    Record(LogRecord),
}

impl Captured {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Captured::Plain { tag, .. } | Captured::Located { tag, .. } => tag.clone(),
            Captured::Record(record) => record.combined_tag(),
        }
    }

    /// The level code, which for [Captured::Located] may not name a level at all.
    pub fn code(&self) -> i32 {
        match self {
            Captured::Plain { level, .. } => level.code(),
            Captured::Located { code, .. } => *code,
            Captured::Record(record) => record.level().code(),
        }
    }

    /// The rendered error, if any.
    pub fn error(&self) -> Option<String> {
        match self {
            Captured::Plain { error, .. } | Captured::Located { error, .. } => error.clone(),
            Captured::Record(record) => record.error().map(|e| e.to_string()),
        }
    }
}

impl Display for Captured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.code();
        match Level::from_code(code) {
            Some(level) => write!(f, "[{}] ", level)?,
            None => write!(f, "[{}] ", code)?,
        }
        match self {
            Captured::Plain { message, args, .. } => {
                f.write_str(&format_message(message, args))?;
            }
            Captured::Located {
                tag, message, args, ..
            } => {
                let message = format_message(message, args);
                let prefix = tag.as_ref().map(|t| t.to_string());
                // flattened record fallbacks already start with the tag
                let prefixed = args.is_empty()
                    && prefix.as_deref().is_some_and(|p| {
                        message == p || message.starts_with(&format!("{} ", p))
                    });
                let text = if prefixed {
                    message
                } else {
                    flatten(prefix.into_iter(), &message)
                };
                f.write_str(&text)?;
            }
            Captured::Record(record) => f.write_str(&record.flattened_message())?,
        }
        if let Some(error) = self.error() {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

/**
An in-memory logger.

By default it only advertises the plain capability, accepts every level, and is named `memory`.
*/
#[derive(Debug)]
pub struct InMemoryLogger {
    name: String,
    capabilities: Capabilities,
    threshold: Level,
    tag_thresholds: Vec<(String, Level)>,
    enabled_checks: AtomicUsize,
    entries: Mutex<Vec<Captured>>,
}

/*
Boilerplate notes:

- Debug: derived, required by Logger
- Default: same as new()
- Clone: not implemented, a copy of the captured entries would silently diverge from the original
- PartialEq/Eq/Hash: not implemented, equality of loggers is meaningless
- Send/Sync: automatic through Mutex and AtomicUsize
*/

impl Default for InMemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLogger {
    pub fn new() -> Self {
        Self {
            name: "memory".to_string(),
            capabilities: Capabilities::PLAIN,
            threshold: Level::Trace,
            tag_thresholds: Vec::new(),
            enabled_checks: AtomicUsize::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Which optional entry points this logger claims to support.
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Levels below `threshold` are disabled.
    pub fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    /**
    Uses `threshold` instead when the tag contains a node named `name`.

    If several of these apply, the most permissive one wins.
    */
    pub fn with_tag_threshold(mut self, name: impl Into<String>, threshold: Level) -> Self {
        self.tag_thresholds.push((name.into(), threshold));
        self
    }

    /// How many times [Logger::is_enabled] has been asked.
    pub fn enabled_checks(&self) -> usize {
        self.enabled_checks.load(Ordering::Relaxed)
    }

    fn effective_threshold(&self, tag: Option<&Tag>) -> Level {
        let Some(tag) = tag else {
            return self.threshold;
        };
        self.tag_thresholds
            .iter()
            .filter(|(name, _)| tag.contains(name))
            .map(|(_, level)| *level)
            .min()
            .unwrap_or(self.threshold)
    }

    fn push(&self, entry: Captured) {
        self.entries.lock().unwrap().push(entry);
    }

    /// A copy of everything captured so far.
    pub fn entries(&self) -> Vec<Captured> {
        self.entries.lock().unwrap().clone()
    }

    /// The records received through [Logger::submit].
    pub fn records(&self) -> Vec<LogRecord> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter_map(|entry| match entry {
                Captured::Record(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }

    /// Takes everything captured so far, clearing the buffer.
    pub fn drain(&self) -> Vec<Captured> {
        std::mem::take(&mut *self.entries.lock().unwrap())
    }

    /**
    Drains the buffer into a single string, one rendered entry per line.

    ```rust
    use tagwise::{InMemoryLogger, Level, Logger};

    let logger = InMemoryLogger::new();
    logger.log(Level::Warn, None, "disk {} full", &[3.into()], None);
    assert_eq!(logger.drain_logs(), "[WARN] disk 3 full");
    assert_eq!(logger.drain_logs(), "");
    ```
    */
    pub fn drain_logs(&self) -> String {
        self.drain()
            .iter()
            .map(|entry| entry.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Logger for InMemoryLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level, tag: Option<&Tag>) -> bool {
        self.enabled_checks.fetch_add(1, Ordering::Relaxed);
        level >= self.effective_threshold(tag)
    }

    fn log(
        &self,
        level: Level,
        tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.push(Captured::Plain {
            level,
            tag: tag.cloned(),
            message: message.to_string(),
            args: args.to_vec(),
            error: error.map(|e| e.to_string()),
        });
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn log_located(
        &self,
        tag: Option<&Tag>,
        boundary: CallBoundary,
        level: i32,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        if !self.capabilities.location {
            let level = Level::expect_code(level);
            self.log(level, tag, &format_message(message, args), &[], error);
            return;
        }
        self.push(Captured::Located {
            code: level,
            boundary,
            tag: tag.cloned(),
            message: message.to_string(),
            args: args.to_vec(),
            error: error.map(|e| e.to_string()),
        });
    }

    fn submit(&self, record: LogRecord) {
        if !self.capabilities.records {
            let tag = record.combined_tag();
            self.log(
                record.level(),
                tag.as_ref(),
                &record.flattened_message(),
                &[],
                record.error(),
            );
            return;
        }
        self.push(Captured::Record(record));
    }
}
