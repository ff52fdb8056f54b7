// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::arg::{Arg, format_message};
use crate::log_record::LogRecord;
use crate::tag::Tag;
use crate::Level;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::panic::Location;

/**
Where a log call came from.

Captured with `#[track_caller]`, so every frame between the application and the logger that is
itself `#[track_caller]` is skipped.  Decorators pass the boundary along unchanged.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallBoundary(&'static Location<'static>);

impl CallBoundary {
    /// The location of the (first non-`#[track_caller]`) caller.
    #[track_caller]
    pub fn caller() -> Self {
        CallBoundary(Location::caller())
    }

    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    pub fn line(&self) -> u32 {
        self.0.line()
    }

    pub fn column(&self) -> u32 {
        self.0.column()
    }
}

impl Display for CallBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file(), self.line(), self.column())
    }
}

/**
Optional abilities of a [Logger].

Decorators read these once, when they are constructed.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Capabilities {
    /// The logger takes whole [LogRecord]s through [Logger::submit].
    pub records: bool,
    /// The logger takes a [CallBoundary] and formats messages itself in [Logger::log_located].
    pub location: bool,
}

impl Capabilities {
    pub const PLAIN: Capabilities = Capabilities {
        records: false,
        location: false,
    };
    pub const ALL: Capabilities = Capabilities {
        records: true,
        location: true,
    };
}

/**
The logging backend contract.

Only [Self::name], [Self::is_enabled] and [Self::log] are required.  Loggers that can do better
advertise it through [Self::capabilities] and override the matching methods.
*/
pub trait Logger: Debug + Send + Sync {
    fn name(&self) -> &str;

    /**
    Whether a call at `level` carrying `tag` would be logged.

    The tag is part of the question because a backend may enable levels per tag.
    */
    fn is_enabled(&self, level: Level, tag: Option<&Tag>) -> bool;

    /**
    Logs a message.

    `message` is a template; `args` fill its placeholders.  Callers that already formatted the
    message pass no args.
    */
    fn log(
        &self,
        level: Level,
        tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    );

    fn capabilities(&self) -> Capabilities {
        Capabilities::PLAIN
    }

    /**
    Logs a message on behalf of `boundary`, with the level given as its numeric code.

    The default formats the message and forwards to [Self::log].

    # Panics
    If `level` is not a level code.
    */
    fn log_located(
        &self,
        tag: Option<&Tag>,
        boundary: CallBoundary,
        level: i32,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        let _ = boundary;
        let level = Level::expect_code(level);
        self.log(level, tag, &format_message(message, args), &[], error);
    }

    /**
    Submits a prepared record.

    The default folds tags and key/value pairs into the message text and forwards to [Self::log].
    */
    fn submit(&self, record: LogRecord) {
        let tag = record.combined_tag();
        self.log(
            record.level(),
            tag.as_ref(),
            &record.flattened_message(),
            &[],
            record.error(),
        );
    }
}

/*
Boilerplate notes.

# Logger

Clone on a logger doesn't make sense in general; share them through Arc.
PartialEq/Eq would be ambiguous between data equality and identity, so no.
Default isn't sensible since who knows how the logger is constructed.
Send/Sync: required, loggers are called from everywhere.
*/
