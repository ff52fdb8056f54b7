//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# tagwise

tagwise carries structured context through any logger's single tag slot.

# The problem

Most logging backends give a log call exactly one annotation slot: a marker, a tag, a category.
That is enough to say "page someone about this", but not enough to say "this happened for
request 42, user alice, on host db-1" in a way that a sink further down the pipeline can read
back as data rather than as text.

# The tag tree

A [Tag] is a small labeled tree that fits in that slot.  Key/value context is encoded as a
`CONTEXT` subtree, independent tags are grouped under a `WRAPPER`, and the whole thing can be
searched, merged, and decoded again.

```rust
use tagwise::tag::{combine, decode_context, encode_context};
use tagwise::{ContextMap, SLACK};

let context = ContextMap::from([("request", "42"), ("user", "alice")]);
let tag = combine([Some(SLACK), encode_context(&context)]);

assert_eq!(tag.as_ref().map(|t| t.to_string()).as_deref(), Some("SLACK request=42 user=alice"));
assert_eq!(decode_context(tag.as_ref()), context);
```

# The decorator

A [TaggedLogger] wraps any [Logger] and attaches its own context to every call, merged with
whatever the call site adds.  Call-site keys win on collisions.  Tags are produced once per call
and the wrapped logger's level check sees the merged tag, so backends can enable levels per tag.

```rust
use std::sync::Arc;
use tagwise::{ContextMap, InMemoryLogger, TaggedLogger};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::with_context(memory.clone(), &ContextMap::from([("host", "db-1")]));
let request = tagwise::context!(request = 42);

logger.info_tagged(&tagwise::tag::encode_context(&request).unwrap(), "started", ());
assert_eq!(memory.drain_logs(), "[INFO] host=db-1 request=42 started");
```

Decorators implement [Logger] themselves, so they stack.

# Records

For several tags and structured key/value pairs on one call, build a [LogRecord], either
directly or with the macros:

```rust
use std::sync::Arc;
use tagwise::{Capabilities, InMemoryLogger, TaggedLogger, IMPORTANT};

let memory = Arc::new(InMemoryLogger::new().with_capabilities(Capabilities::ALL));
let logger = TaggedLogger::new(memory.clone(), None);
let job = "nightly";

tagwise::warn!(logger, tag: IMPORTANT, "job {job} ran long", job = job);

let records = memory.records();
assert_eq!(records[0].formatted_message(), "job nightly ran long");
assert_eq!(records[0].flattened_message(), "IMPORTANT job=nightly job nightly ran long");
```

# Notifications

With the `notify` feature (on by default), [notify::NotifyLogger] turns records into chat
messages, with context as fields.  Records tagged `SLACK` are always sent, records tagged
`NO_SLACK` never are.
*/

mod arg;
mod error;
mod inmemory_logger;
mod level;
mod log_record;
mod logger;
#[cfg(feature = "notify")]
pub mod notify;
mod record_builder;
mod stderror_logger;
mod sys;
pub mod tag;
mod tagged_logger;

pub use arg::{Arg, IntoArgs, KeyValue, format_message};
#[cfg(feature = "notify")]
pub use error::DeliveryError;
pub use error::TagError;
pub use inmemory_logger::{Captured, InMemoryLogger};
pub use level::Level;
pub use log_record::{Failure, LogRecord};
pub use logger::{CallBoundary, Capabilities, Logger};
pub use record_builder::RecordBuilder;
pub use stderror_logger::StdErrorLogger;
pub use tag::{ContextMap, IMPORTANT, NO_SLACK, SLACK, Tag};
pub use tagged_logger::{TagSource, TaggedLogger};

pub use tagwise_proc::{context, debug, error, info, trace, warn};

pub use sys::{Duration, SystemTime};

extern crate self as tagwise;
