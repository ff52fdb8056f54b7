// SPDX-License-Identifier: MIT OR Apache-2.0

//! Platform-specific time types for cross-platform compatibility.
//!
//! On native platforms these come from `std::time`, while on WASM they come from `web_time`,
//! since `std::time::SystemTime::now` panics in the browser.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Duration, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Duration, SystemTime, UNIX_EPOCH};
