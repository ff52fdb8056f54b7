// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log record type.
//!
//! A [`LogRecord`] is the "build it, then submit it" form of a log call.  Unlike the per-level
//! methods it can carry several independent tags and any number of structured key/value pairs,
//! and it keeps its arguments unformatted until a logger decides how to render them.
//!
//! # Example
//!
//! ```rust
//! use tagwise::{Level, LogRecord, SLACK};
//!
//! let record = LogRecord::new(Level::Warn, "disk {} is {}% full")
//!     .with_args(vec!["sda".into(), 93.into()])
//!     .with_key_value("host", "db-1")
//!     .with_tag(SLACK);
//!
//! assert_eq!(record.formatted_message(), "disk sda is 93% full");
//! assert_eq!(record.flattened_message(), "SLACK host=db-1 disk sda is 93% full");
//! ```

use crate::arg::{Arg, KeyValue, format_message};
use crate::logger::CallBoundary;
use crate::sys::SystemTime;
use crate::tag::names::CONTEXT;
use crate::tag::{ContextMap, Tag, combine, encode_context, find_tag, prune, take_context};
use crate::Level;
use std::error::Error;
use std::sync::Arc;

/// An error attached to a record.  Shared so records stay cheap to clone.
pub type Failure = Arc<dyn Error + Send + Sync + 'static>;

/**
An immutable-by-convention log record.

Records are built with the `with_*` methods and handed to [crate::Logger::submit].
*/
#[derive(Debug, Clone)]
pub struct LogRecord {
    level: Level,
    logger_name: Option<String>,
    message: String,
    args: Vec<Arg>,
    error: Option<Failure>,
    timestamp: SystemTime,
    boundary: Option<CallBoundary>,
    key_values: Vec<KeyValue>,
    tags: Vec<Tag>,
}

impl LogRecord {
    /// A record stamped with the current time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            logger_name: None,
            message: message.into(),
            args: Vec::new(),
            error: None,
            timestamp: SystemTime::now(),
            boundary: None,
            key_values: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_logger_name(mut self, name: impl Into<String>) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    pub fn with_args(mut self, args: Vec<Arg>) -> Self {
        self.args = args;
        self
    }

    pub fn with_arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_error(mut self, error: Failure) -> Self {
        self.error = Some(error);
        self
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_boundary(mut self, boundary: CallBoundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.key_values.push(KeyValue::new(key, value));
        self
    }

    /// Appends a tag.  Existing tags are kept.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }

    /**
    A copy of this record with `tag` appended.

    Level, message, arguments, error, timestamp, boundary, key/value pairs and the earlier tags
    are all preserved.
    */
    pub fn appending_tag(&self, tag: Tag) -> LogRecord {
        self.clone().with_tag(tag)
    }

    /**
    A copy of this record with `base` attached underneath its own tags.

    When the record carries no context this is [LogRecord::appending_tag].  Otherwise every
    `CONTEXT` node is lifted out of the record's tags and out of `base`, the maps are merged with
    the record's values winning (later tags over earlier ones), and the result is appended as a
    single `CONTEXT` tag after the remaining content of `base`.
    */
    pub fn merging_tag(&self, base: Tag) -> LogRecord {
        if !self.tags.iter().any(|t| find_tag(Some(t), CONTEXT).is_some()) {
            return self.appending_tag(base);
        }
        let mut copy = self.clone();
        let mut base = Some(base);
        let mut merged = drain_context(&mut base);
        let mut tags = Vec::with_capacity(copy.tags.len() + 2);
        for tag in copy.tags.drain(..) {
            let mut slot = Some(tag);
            merged.merge(drain_context(&mut slot));
            tags.extend(prune(slot));
        }
        tags.extend(prune(base));
        tags.extend(encode_context(&merged));
        copy.tags = tags;
        copy
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger_name(&self) -> Option<&str> {
        self.logger_name.as_deref()
    }

    /// The message template.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn error(&self) -> Option<&(dyn Error + 'static)> {
        match &self.error {
            Some(e) => {
                let e: &(dyn Error + 'static) = &**e;
                Some(e)
            }
            None => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn boundary(&self) -> Option<CallBoundary> {
        self.boundary
    }

    pub fn key_values(&self) -> &[KeyValue] {
        &self.key_values
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// The context carried by all of the record's tags, merged with later tags winning.
    pub fn context(&self) -> ContextMap {
        let mut map = ContextMap::new();
        for tag in &self.tags {
            map.merge(drain_context(&mut Some(tag.clone())));
        }
        map
    }

    /// All tags grouped into one, for loggers that only have a single tag slot.
    pub fn combined_tag(&self) -> Option<Tag> {
        combine(self.tags.iter().cloned().map(Some))
    }

    /// The message template with its arguments filled in.
    pub fn formatted_message(&self) -> String {
        format_message(&self.message, &self.args)
    }

    /**
    The formatted message prefixed with the record's tags and key/value pairs.

    Tags come first, then `key=value` pairs, then the message, all separated by single spaces.
    Empty segments are left out entirely.
    */
    pub fn flattened_message(&self) -> String {
        let tags = self.tags.iter().map(|t| t.to_string());
        let key_values = self.key_values.iter().map(|kv| kv.to_string());
        flatten(tags.chain(key_values), &self.formatted_message())
    }
}

/// Every `CONTEXT` node in `slot`, detached and merged in depth-first order.
fn drain_context(slot: &mut Option<Tag>) -> ContextMap {
    let mut map = ContextMap::new();
    while find_tag(slot.as_ref(), CONTEXT).is_some() {
        map.merge(take_context(slot));
    }
    map
}

/// Joins non-empty `prefix` segments and `message` with single spaces.
pub(crate) fn flatten(prefix: impl Iterator<Item = String>, message: &str) -> String {
    let mut out = String::new();
    for segment in prefix.chain(std::iter::once(message.to_string())) {
        if segment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&segment);
    }
    out
}

/*
Boilerplate notes for LogRecord:

IMPLEMENTED:
- Debug: Derived - essential for diagnostics
- Clone: Derived - the decorator copies records before appending its tag

NOT IMPLEMENTED:
- PartialEq/Eq/Hash: arguments and errors are type-erased, so there is no meaningful equality
- Default: a record without a level or message makes no sense
- Display: ambiguous between the formatted and the flattened message; use the methods
*/
