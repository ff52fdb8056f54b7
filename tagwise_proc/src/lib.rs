//SPDX-License-Identifier: MIT OR Apache-2.0

//! # Tagwise Procedural Macros
//!
//! Call-site macros for the tagwise logging library.  Use them through the `tagwise` crate,
//! which re-exports them.
//!
//! ## Level macros
//!
//! `trace!`, `debug!`, `info!`, `warn!` and `error!` all take the same arguments:
//!
//! ```text
//! info!(logger, [tag: EXPR,]* [error: EXPR,] "text with {key}", key = value, ...)
//! ```
//!
//! The logger is anything with an `at(Level)` method returning a record builder, usually a
//! `TaggedLogger`.  Each `{key}` placeholder becomes a positional argument, and every
//! `key = value` pair is also attached to the record as a structured key/value pair.  Values are
//! evaluated exactly once, in the order written, and rendered with `ToString`.
//!
//! `{{` and `}}` produce literal braces.
//!
//! ## Key-Value Parsing
//!
//! Tokens are parsed by hand, without `syn`.  Values may be arbitrary expressions as long as they
//! contain no top-level comma; wrap such expressions in parentheses.

mod context;
mod log;
mod parser;

use proc_macro::TokenStream;

/**
Logs at the trace level.

```
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::new(memory.clone(), None);
tagwise::trace!(logger, "entering {name}", name = "parse");
assert_eq!(memory.drain_logs(), "[TRACE] name=parse entering parse");
```
*/
#[proc_macro]
pub fn trace(input: TokenStream) -> TokenStream {
    log::log_impl("Trace", input)
}

/**
Logs at the debug level.

```
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::new(memory.clone(), None);
tagwise::debug!(logger, "braces {{like this}}");
assert_eq!(memory.drain_logs(), "[DEBUG] braces {like this}");
```
*/
#[proc_macro]
pub fn debug(input: TokenStream) -> TokenStream {
    log::log_impl("Debug", input)
}

/**
Logs at the info level.

```
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::new(memory.clone(), None);
let items = vec![1, 2, 3];
tagwise::info!(logger, "loaded {count} items", count = items.len());
assert_eq!(memory.drain_logs(), "[INFO] count=3 loaded 3 items");
```

Every placeholder needs a value:

```compile_fail
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let logger = TaggedLogger::new(Arc::new(InMemoryLogger::new()), None);
tagwise::info!(logger, "Hello {missing}!", provided = 123);
```

The message must be a literal:

```compile_fail
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let logger = TaggedLogger::new(Arc::new(InMemoryLogger::new()), None);
let message = "hello";
tagwise::info!(logger, message);
```
*/
#[proc_macro]
pub fn info(input: TokenStream) -> TokenStream {
    log::log_impl("Info", input)
}

/**
Logs at the warn level.

```
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger, SLACK};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::new(memory.clone(), None);
tagwise::warn!(logger, tag: SLACK, "disk {disk} at {pct}%", disk = "sda", pct = 93);
assert_eq!(memory.drain_logs(), "[WARN] SLACK disk=sda pct=93 disk sda at 93%");
```
*/
#[proc_macro]
pub fn warn(input: TokenStream) -> TokenStream {
    log::log_impl("Warn", input)
}

/**
Logs at the error level, usually with an error attached.

```
use std::sync::Arc;
use tagwise::{InMemoryLogger, TaggedLogger};

let memory = Arc::new(InMemoryLogger::new());
let logger = TaggedLogger::new(memory.clone(), None);
let failure = "x".parse::<u8>().unwrap_err();
tagwise::error!(logger, error: failure, "bad input");
assert_eq!(memory.drain_logs(), "[ERROR] bad input: invalid digit found in string");
```
*/
#[proc_macro]
pub fn error(input: TokenStream) -> TokenStream {
    log::log_impl("Error", input)
}

/**
Builds a `ContextMap`.  Values are rendered with `ToString`.

```
let context = tagwise::context!(request = 42, user = "alice");
assert_eq!(context.to_string(), "request=42 user=alice");
assert!(tagwise::context!().is_empty());
```
*/
#[proc_macro]
pub fn context(input: TokenStream) -> TokenStream {
    context::context_impl(input)
}
