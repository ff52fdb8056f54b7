// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::arg::Arg;
use crate::log_record::{Failure, LogRecord};
use crate::logger::{CallBoundary, Logger};
use crate::tag::Tag;
use crate::Level;
use std::error::Error;
use std::sync::Arc;

/**
Fluent construction of a [LogRecord], finished with [Self::log].

```rust
use std::sync::Arc;
use tagwise::{Capabilities, InMemoryLogger, TaggedLogger, IMPORTANT};

let memory = Arc::new(InMemoryLogger::new().with_capabilities(Capabilities::ALL));
let logger = TaggedLogger::new(memory.clone(), None);

logger
    .at_info()
    .tag(IMPORTANT)
    .key_value("user", "alice")
    .arg(3)
    .log("{} attempts");

let records = memory.records();
assert_eq!(records[0].key_values()[0].to_string(), "user=alice");
assert_eq!(records[0].formatted_message(), "3 attempts");
```
*/
#[derive(Debug)]
#[must_use = "a record is only logged when `log` is called"]
pub struct RecordBuilder<'a> {
    logger: &'a dyn Logger,
    record: LogRecord,
}

impl<'a> RecordBuilder<'a> {
    pub fn new(logger: &'a dyn Logger, level: Level) -> Self {
        Self {
            logger,
            record: LogRecord::new(level, "").with_logger_name(logger.name()),
        }
    }

    /// Adds a tag.  Records can carry several.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.record = self.record.with_tag(tag);
        self
    }

    /// Adds the next positional argument.
    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.record = self.record.with_arg(arg);
        self
    }

    pub fn key_value(mut self, key: impl Into<String>, value: impl Into<Arg>) -> Self {
        self.record = self.record.with_key_value(key, value);
        self
    }

    pub fn error<E: Error + Send + Sync + 'static>(self, error: E) -> Self {
        self.failure(Arc::new(error))
    }

    pub fn failure(mut self, failure: Failure) -> Self {
        self.record = self.record.with_error(failure);
        self
    }

    /// Finishes the record with `message` and submits it.
    #[track_caller]
    pub fn log(self, message: impl Into<String>) {
        let record = self
            .record
            .with_message(message)
            .with_boundary(CallBoundary::caller());
        self.logger.submit(record);
    }
}
