// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-level entry points.
//!
//! Every level gets the same family of methods; they differ only in the level they pass on.

use super::TaggedLogger;
use crate::arg::IntoArgs;
use crate::logger::CallBoundary;
use crate::record_builder::RecordBuilder;
use crate::tag::Tag;
use crate::Level;
use std::error::Error;

macro_rules! level_methods {
    (
        $level:expr,
        $name:literal,
        $is_enabled:ident,
        $is_enabled_for:ident,
        $log:ident,
        $log_failure:ident,
        $log_tagged:ident,
        $log_tagged_failure:ident,
        $at:ident
    ) => {
        #[doc = concat!("Whether ", $name, " is enabled, ignoring any tag.")]
        pub fn $is_enabled(&self) -> bool {
            self.inner.is_enabled($level, None)
        }

        #[doc = concat!("Whether ", $name, " is enabled for `tag`.")]
        pub fn $is_enabled_for(&self, tag: &Tag) -> bool {
            self.inner.is_enabled($level, Some(tag))
        }

        #[doc = concat!("Logs at ", $name, ".  `args` fill the `{}` placeholders of `template`.")]
        #[track_caller]
        pub fn $log(&self, template: &str, args: impl IntoArgs) {
            self.handle($level, None, template, args, None, CallBoundary::caller());
        }

        #[doc = concat!("Logs `error` at ", $name, ".")]
        #[track_caller]
        pub fn $log_failure(&self, message: &str, error: &(dyn Error + 'static)) {
            self.handle($level, None, message, (), Some(error), CallBoundary::caller());
        }

        #[doc = concat!("Logs at ", $name, ", merging `tag` with the decorator's own.")]
        #[track_caller]
        pub fn $log_tagged(&self, tag: &Tag, template: &str, args: impl IntoArgs) {
            self.handle($level, Some(tag), template, args, None, CallBoundary::caller());
        }

        #[doc = concat!("Logs `error` at ", $name, ", merging `tag` with the decorator's own.")]
        #[track_caller]
        pub fn $log_tagged_failure(&self, tag: &Tag, message: &str, error: &(dyn Error + 'static)) {
            self.handle(
                $level,
                Some(tag),
                message,
                (),
                Some(error),
                CallBoundary::caller(),
            );
        }

        #[doc = concat!("Starts a record at ", $name, ".")]
        pub fn $at(&self) -> RecordBuilder<'_> {
            self.at($level)
        }
    };
}

impl TaggedLogger {
    level_methods!(
        Level::Trace,
        "trace",
        is_trace_enabled,
        is_trace_enabled_for,
        trace,
        trace_failure,
        trace_tagged,
        trace_tagged_failure,
        at_trace
    );
    level_methods!(
        Level::Debug,
        "debug",
        is_debug_enabled,
        is_debug_enabled_for,
        debug,
        debug_failure,
        debug_tagged,
        debug_tagged_failure,
        at_debug
    );
    level_methods!(
        Level::Info,
        "info",
        is_info_enabled,
        is_info_enabled_for,
        info,
        info_failure,
        info_tagged,
        info_tagged_failure,
        at_info
    );
    level_methods!(
        Level::Warn,
        "warn",
        is_warn_enabled,
        is_warn_enabled_for,
        warn,
        warn_failure,
        warn_tagged,
        warn_tagged_failure,
        at_warn
    );
    level_methods!(
        Level::Error,
        "error",
        is_error_enabled,
        is_error_enabled_for,
        error,
        error_failure,
        error_tagged,
        error_tagged_failure,
        at_error
    );
}
