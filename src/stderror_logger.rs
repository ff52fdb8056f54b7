// SPDX-License-Identifier: MIT OR Apache-2.0
use crate::arg::{Arg, format_message};
use crate::logger::Logger;
use crate::tag::Tag;
use crate::Level;
use std::borrow::Cow;
use std::error::Error;

/**
A reference logger that logs to stderr.

Lines look like `[WARN] name - message`, followed by `: error` when there is one.  On wasm the
browser console is used instead, with the console method matching the level.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StdErrorLogger {
    name: Cow<'static, str>,
    threshold: Level,
}

// ============================================================================
// BOILERPLATE TRAIT IMPLEMENTATIONS
// ============================================================================
//
// - Debug/Clone: derived, the logger is just configuration
// - PartialEq/Eq/Hash: derived, two loggers with the same configuration behave the same
// - Default: same as new()
// - Copy: NOT implemented, the name may be owned
// - Display: NOT implemented - no meaningful string representation
// - Send/Sync: automatic

impl Default for StdErrorLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl StdErrorLogger {
    pub const fn new() -> Self {
        Self {
            name: Cow::Borrowed("stderr"),
            threshold: Level::Trace,
        }
    }

    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    fn line(&self, level: Level, message: &str, error: Option<&(dyn Error + 'static)>) -> String {
        match error {
            Some(error) => format!("[{}] {} - {}: {}", level, self.name, message, error),
            None => format!("[{}] {} - {}", level, self.name, message),
        }
    }
}

impl Logger for StdErrorLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_enabled(&self, level: Level, _tag: Option<&Tag>) -> bool {
        level >= self.threshold
    }

    fn log(
        &self,
        level: Level,
        _tag: Option<&Tag>,
        message: &str,
        args: &[Arg],
        error: Option<&(dyn Error + 'static)>,
    ) {
        let msg = self.line(level, &format_message(message, args), error);
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::io::Write;
            let mut lock = std::io::stderr().lock();
            //nowhere left to report a failure to write to stderr
            let _ = writeln!(lock, "{}", msg);
        }
        #[cfg(target_arch = "wasm32")]
        {
            match level {
                Level::Trace => web_sys::console::trace_1(&msg.into()),
                Level::Debug => web_sys::console::debug_1(&msg.into()),
                Level::Info => web_sys::console::info_1(&msg.into()),
                Level::Warn => web_sys::console::warn_1(&msg.into()),
                Level::Error => web_sys::console::error_1(&msg.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StdErrorLogger;
    use crate::logger::Logger;
    use crate::Level;

    #[cfg(target_arch = "wasm32")]
    use wasm_bindgen_test::*;

    #[derive(Debug)]
    struct Refused;
    impl std::fmt::Display for Refused {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("connection refused")
        }
    }
    impl std::error::Error for Refused {}

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn line_layout() {
        let logger = StdErrorLogger::new().named("notify");
        let refused: &(dyn std::error::Error + 'static) = &Refused;
        assert_eq!(
            logger.line(Level::Warn, "slow", None),
            "[WARN] notify - slow"
        );
        assert_eq!(
            logger.line(Level::Error, "delivery failed", Some(refused)),
            "[ERROR] notify - delivery failed: connection refused"
        );
    }

    #[cfg_attr(not(target_arch = "wasm32"), test)]
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen_test)]
    fn threshold() {
        let logger = StdErrorLogger::new().with_threshold(Level::Info);
        assert!(!logger.is_enabled(Level::Debug, None));
        assert!(logger.is_enabled(Level::Error, None));
        logger.log(Level::Info, None, "stderr works {}", &["fine".into()], None);
    }
}
