// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tag tree engine.
//!
//! Most loggers give each call exactly one annotation slot.  A [`Tag`] is a small labeled tree
//! that fits in that slot and can carry arbitrarily many key/value pairs through it, so that a
//! sink further down the pipeline can recover them.
//!
//! # Encoding
//!
//! A [`ContextMap`] is encoded as a `CONTEXT` composite.  Each entry becomes one child named
//! `CONTEXT_KEY_<key>`, which in turn has exactly one child named `CONTEXT_VAL_<value>`:
//!
//! ```text
//! CONTEXT
//! ├── CONTEXT_KEY_request
//! │   └── CONTEXT_VAL_42
//! └── CONTEXT_KEY_user
//!     └── CONTEXT_VAL_alice
//! ```
//!
//! Several independent tags are grouped under a `WRAPPER` composite by [`combine`].
//!
//! ```rust
//! use tagwise::tag::{combine, decode_context, encode_context, ContextMap, SLACK};
//!
//! let mut map = ContextMap::new();
//! map.insert("request", "42");
//! let tag = combine([Some(SLACK), encode_context(&map)]);
//!
//! assert_eq!(decode_context(tag.as_ref()), map);
//! ```
//!
//! # Identity
//!
//! Tags are plain values.  Search and merge match nodes by name, so two independently built
//! leaves with the same name are interchangeable.  Merging never touches a tree that belongs to
//! someone else; the decorator clones what it receives before stripping it.

mod context_map;
mod node;
mod ops;

#[cfg(test)]
mod tests;

pub use context_map::ContextMap;
pub use node::{IMPORTANT, NO_SLACK, SLACK, Tag};
pub use ops::{
    combine, combine_context, decode_context, encode_context, find_tag, slack_tag, take_context,
    take_tag, try_encode_context,
};
pub(crate) use ops::prune;

/// Reserved tag names and prefixes.
pub mod names {
    /// Marks a message that should be delivered to the notification sink.
    pub const SLACK: &str = "SLACK";
    /// Marks a message that should never be delivered to the notification sink.
    pub const NO_SLACK: &str = "NO_SLACK";
    /// Marks a message as important.
    pub const IMPORTANT: &str = "IMPORTANT";
    /// Groups independent tags.
    pub const WRAPPER: &str = "WRAPPER";
    /// Container for encoded key/value pairs.
    pub const CONTEXT: &str = "CONTEXT";
    pub const CONTEXT_KEY_PREFIX: &str = "CONTEXT_KEY_";
    pub const CONTEXT_VALUE_PREFIX: &str = "CONTEXT_VAL_";
}
