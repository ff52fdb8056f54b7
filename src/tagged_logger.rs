// SPDX-License-Identifier: MIT OR Apache-2.0

//! The context-injecting logger decorator.
//!
//! A [`TaggedLogger`] wraps any [`Logger`] and attaches its own tag to every call that goes
//! through it, merged with whatever tag the caller supplied.  Every call, whatever its level or
//! argument shape, goes through the same three steps:
//!
//! 1. **Filter**: the decorator's tag is produced (once) and merged with the caller's, and the
//!    wrapped logger is asked whether the level is enabled *for the merged tag*.  If not, nothing
//!    else happens.
//! 2. **Augment**: the merge itself; call-site context wins over the decorator's on key collisions.
//! 3. **Dispatch**: location-aware loggers get the raw template, arguments and call boundary.
//!    Everything else gets a message that is already formatted, prefixed with the rendered tag.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use tagwise::{ContextMap, InMemoryLogger, TaggedLogger};
//!
//! let memory = Arc::new(InMemoryLogger::new());
//! let logger = TaggedLogger::with_context(memory.clone(), &ContextMap::from([("service", "billing")]));
//!
//! logger.info("charged {} cents", (250,));
//! assert_eq!(memory.drain_logs(), "[INFO] service=billing charged 250 cents");
//! ```
//!
//! Context that must reflect call-time state is produced per call instead:
//!
//! ```rust
//! use std::sync::Arc;
//! use tagwise::{ContextMap, InMemoryLogger, TaggedLogger};
//!
//! fn current_request() -> String {
//!     "req-7".to_string()
//! }
//!
//! let memory = Arc::new(InMemoryLogger::new());
//! let logger = TaggedLogger::with_event_context(memory.clone(), || {
//!     ContextMap::from([("request", current_request())])
//! });
//!
//! logger.warn("slow", ());
//! assert_eq!(memory.drain_logs(), "[WARN] request=req-7 slow");
//! ```

mod levels;

use crate::arg::{Arg, IntoArgs, format_message};
use crate::log_record::{LogRecord, flatten};
use crate::logger::{CallBoundary, Capabilities, Logger};
use crate::record_builder::RecordBuilder;
use crate::tag::{ContextMap, Tag, combine_context, encode_context};
use crate::Level;
use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;

/**
Where a [TaggedLogger] gets its own tag.

The producer of [TagSource::Generated] runs exactly once for every call that reaches the filter
step, and never otherwise.  It is not synchronized; if it panics, the panic reaches the caller of
the logging method.
*/
#[derive(Clone)]
pub enum TagSource {
    /// The same tag for the lifetime of the decorator.
    Fixed(Option<Tag>),
    /// A fresh tag for every call.
    Generated(Arc<dyn Fn() -> Option<Tag> + Send + Sync>),
}

impl TagSource {
    fn produce(&self) -> Option<Tag> {
        match self {
            TagSource::Fixed(tag) => tag.clone(),
            TagSource::Generated(f) => f(),
        }
    }
}

impl Debug for TagSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagSource::Fixed(tag) => f.debug_tuple("Fixed").field(tag).finish(),
            TagSource::Generated(_) => f.write_str("Generated(..)"),
        }
    }
}

/**
A logger that attaches a tag to every call before handing it to the logger it wraps.

See the [module documentation](self) for the rules.
*/
#[derive(Debug, Clone)]
pub struct TaggedLogger {
    inner: Arc<dyn Logger>,
    source: TagSource,
    capabilities: Capabilities,
}

impl TaggedLogger {
    fn from_source(inner: Arc<dyn Logger>, source: TagSource) -> Self {
        let capabilities = inner.capabilities();
        Self {
            inner,
            source,
            capabilities,
        }
    }

    /// Attaches `tag` to every call.
    pub fn new(inner: Arc<dyn Logger>, tag: Option<Tag>) -> Self {
        Self::from_source(inner, TagSource::Fixed(tag))
    }

    /// Attaches a tag produced by `tag` at the time of each call.
    pub fn generated<F>(inner: Arc<dyn Logger>, tag: F) -> Self
    where
        F: Fn() -> Option<Tag> + Send + Sync + 'static,
    {
        Self::from_source(inner, TagSource::Generated(Arc::new(tag)))
    }

    /// Attaches `context` to every call.
    pub fn with_context(inner: Arc<dyn Logger>, context: &ContextMap) -> Self {
        Self::new(inner, encode_context(context))
    }

    /// Attaches the context produced by `context` at the time of each call.
    pub fn with_event_context<F>(inner: Arc<dyn Logger>, context: F) -> Self
    where
        F: Fn() -> ContextMap + Send + Sync + 'static,
    {
        Self::generated(inner, move || encode_context(&context()))
    }

    pub fn inner(&self) -> &Arc<dyn Logger> {
        &self.inner
    }

    pub fn source(&self) -> &TagSource {
        &self.source
    }

    /// Starts a record at `level`, to be finished with [RecordBuilder::log].
    pub fn at(&self, level: Level) -> RecordBuilder<'_> {
        RecordBuilder::new(self, level)
    }

    /// Logs at `level`.  The per-level methods are shorthands for this.
    #[track_caller]
    pub fn log_at(&self, level: Level, template: &str, args: impl IntoArgs) {
        self.handle(level, None, template, args, None, CallBoundary::caller());
    }

    /// Logs at `level`, merging `tag` with the decorator's own.
    #[track_caller]
    pub fn log_tagged_at(&self, level: Level, tag: &Tag, template: &str, args: impl IntoArgs) {
        self.handle(level, Some(tag), template, args, None, CallBoundary::caller());
    }

    fn augment(&self, call: Option<&Tag>) -> Option<Tag> {
        combine_context(self.source.produce(), call.cloned())
    }

    fn handle(
        &self,
        level: Level,
        call: Option<&Tag>,
        template: &str,
        args: impl IntoArgs,
        error: Option<&(dyn Error + 'static)>,
        boundary: CallBoundary,
    ) {
        let tag = self.augment(call);
        if !self.inner.is_enabled(level, tag.as_ref()) {
            return;
        }
        let args = args.into_args();
        if self.capabilities.location {
            self.inner.log_located(
                tag.as_ref(),
                boundary,
                level.code(),
                template,
                &args,
                error,
            );
        } else {
            self.dispatch_plain(level, tag.as_ref(), template, &args, error);
        }
    }

    /// Formats the message ourselves and prefixes it with the rendered tag.
    fn dispatch_plain(
        &self,
        level: Level,
        tag: Option<&Tag>,
        template: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        let message = flatten(
            tag.into_iter().map(|t| t.to_string()),
            &format_message(template, args),
        );
        self.inner.log(level, tag, &message, &[], error);
    }

    #[track_caller]
    fn handle_record(&self, record: LogRecord) {
        let record = match self.source.produce() {
            Some(tag) => record.merging_tag(tag),
            None => record,
        };
        let record = if record.logger_name().is_none() {
            record.with_logger_name(self.inner.name())
        } else {
            record
        };
        let tag = record.combined_tag();
        if !self.inner.is_enabled(record.level(), tag.as_ref()) {
            return;
        }
        if self.capabilities.records {
            self.inner.submit(record);
            return;
        }
        let message = record.flattened_message();
        if self.capabilities.location {
            let boundary = match record.boundary() {
                Some(boundary) => boundary,
                None => CallBoundary::caller(),
            };
            self.inner.log_located(
                tag.as_ref(),
                boundary,
                record.level().code(),
                &message,
                &[],
                record.error(),
            );
        } else {
            self.inner
                .log(record.level(), tag.as_ref(), &message, &[], record.error());
        }
    }
}

impl Logger for TaggedLogger {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn is_enabled(&self, level: Level, tag: Option<&Tag>) -> bool {
        self.inner.is_enabled(level, tag)
    }

    #[track_caller]
    fn log(
        &self,
        level: Level,
        tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        self.handle(level, tag, message, args, error, CallBoundary::caller());
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ALL
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
        let tag = self.augment(tag);
        if let Some(resolved) = Level::from_code(level) {
            if !self.inner.is_enabled(resolved, tag.as_ref()) {
                return;
            }
        }
        if self.capabilities.location {
            self.inner
                .log_located(tag.as_ref(), boundary, level, message, args, error);
        } else {
            let level = Level::expect_code(level);
            self.dispatch_plain(level, tag.as_ref(), message, args, error);
        }
    }

    #[track_caller]
    fn submit(&self, record: LogRecord) {
        self.handle_record(record);
    }
}
