// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the fallible parts of the API.
//!
//! Logging calls themselves never fail; these cover tag construction and notification delivery.

use thiserror::Error;

/// Errors from validating tags and context maps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    /// Tag names must be non-empty.
    #[error("tag names must not be empty")]
    EmptyName,

    /// Context keys must be non-empty.
    #[error("context keys must not be empty")]
    EmptyKey,

    /// The key contains one of the reserved encoding prefixes.
    #[error("context key {0:?} contains a reserved prefix")]
    ReservedKey(String),

    /// The value contains one of the reserved encoding prefixes.
    #[error("context value {value:?} for key {key:?} contains a reserved prefix")]
    ReservedValue { key: String, value: String },
}

/// Errors from handing a notification to its transport.
#[cfg(feature = "notify")]
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The payload could not be serialized.
    #[error("could not encode notification: {0}")]
    Encode(#[from] serde_json::Error),

    /// The transport rejected or failed to deliver the payload.
    #[error("transport error: {0}")]
    Transport(String),
}
