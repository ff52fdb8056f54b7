// SPDX-License-Identifier: MIT OR Apache-2.0

//! Building, searching, merging and decoding tag trees.

use super::names::{CONTEXT, CONTEXT_KEY_PREFIX, CONTEXT_VALUE_PREFIX, WRAPPER};
use super::{ContextMap, SLACK, Tag};
use crate::error::TagError;
use std::borrow::Cow;

/**
Encodes `map` as a `CONTEXT` tag.

Returns `None` for an empty map.  Absent values are encoded with an empty value suffix, which is
also how an explicitly empty value ends up, so `""` decodes back as absent.

Keys and values are not escaped.  See [try_encode_context] for a checked version.
*/
pub fn encode_context(map: &ContextMap) -> Option<Tag> {
    if map.is_empty() {
        return None;
    }
    let children = map
        .iter()
        .map(|(key, value)| Tag::Composite {
            name: Cow::Owned(format!("{}{}", CONTEXT_KEY_PREFIX, key)),
            children: vec![Tag::Leaf(Cow::Owned(format!(
                "{}{}",
                CONTEXT_VALUE_PREFIX,
                value.unwrap_or("")
            )))],
        })
        .collect();
    Some(Tag::Composite {
        name: Cow::Borrowed(CONTEXT),
        children,
    })
}

/**
Like [encode_context], but rejects maps that would not survive a round trip.

Keys must be non-empty, and neither keys nor values may contain a reserved prefix.
*/
pub fn try_encode_context(map: &ContextMap) -> Result<Option<Tag>, TagError> {
    for (key, value) in map.iter() {
        if key.is_empty() {
            return Err(TagError::EmptyKey);
        }
        if collides(key) {
            return Err(TagError::ReservedKey(key.to_string()));
        }
        if let Some(value) = value {
            if collides(value) {
                return Err(TagError::ReservedValue {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(encode_context(map))
}

fn collides(text: &str) -> bool {
    text.contains(CONTEXT_KEY_PREFIX) || text.contains(CONTEXT_VALUE_PREFIX)
}

/**
Finds the first `CONTEXT` node in `tag` (depth first) and decodes it.

Returns an empty map when there is none.  Malformed entries (a key node without exactly one
value child, or children without the expected prefixes) are skipped.
*/
pub fn decode_context(tag: Option<&Tag>) -> ContextMap {
    match find_tag(tag, CONTEXT) {
        Some(context) => read_context(context),
        None => ContextMap::new(),
    }
}

/**
Like [decode_context], but detaches the `CONTEXT` node it decodes.

If the root itself is the context container, the slot is emptied.  Decoding the same slot again
therefore yields whatever context is left, which is usually nothing.
*/
pub fn take_context(slot: &mut Option<Tag>) -> ContextMap {
    match take_tag(slot, CONTEXT) {
        Some(context) => read_context(&context),
        None => ContextMap::new(),
    }
}

fn read_context(context: &Tag) -> ContextMap {
    let mut map = ContextMap::new();
    for key in context.children() {
        let Some(key_name) = key.name().strip_prefix(CONTEXT_KEY_PREFIX) else {
            continue;
        };
        let [value] = key.children() else {
            continue;
        };
        let Some(value_name) = value.name().strip_prefix(CONTEXT_VALUE_PREFIX) else {
            continue;
        };
        let value = if value_name.is_empty() {
            None
        } else {
            Some(value_name.to_string())
        };
        map.insert_opt(key_name, value);
    }
    map
}

/// Depth-first search by name, starting with `tag` itself.
pub fn find_tag<'a>(tag: Option<&'a Tag>, name: &str) -> Option<&'a Tag> {
    let tag = tag?;
    if tag.name() == name {
        return Some(tag);
    }
    tag.children()
        .iter()
        .find_map(|child| find_tag(Some(child), name))
}

/**
Depth-first search by name that removes the match from its parent.

A matching root is taken out of `slot`.
*/
pub fn take_tag(slot: &mut Option<Tag>, name: &str) -> Option<Tag> {
    let root_matches = match slot.as_ref() {
        Some(tag) => tag.name() == name,
        None => return None,
    };
    if root_matches {
        return slot.take();
    }
    slot.as_mut().and_then(|tag| detach(tag, name))
}

fn detach(parent: &mut Tag, name: &str) -> Option<Tag> {
    let children = parent.children_mut()?;
    for i in 0..children.len() {
        if children[i].name() == name {
            return Some(children.remove(i));
        }
        if let Some(found) = detach(&mut children[i], name) {
            return Some(found);
        }
    }
    None
}

/**
Groups tags.

`None`s are dropped.  No tags gives `None`, a single tag is returned as is, and anything more is
wrapped in a new `WRAPPER` composite, preserving order.
*/
pub fn combine(tags: impl IntoIterator<Item = Option<Tag>>) -> Option<Tag> {
    let mut present: Vec<Tag> = tags.into_iter().flatten().collect();
    match present.len() {
        0 => None,
        1 => present.pop(),
        _ => Some(Tag::Composite {
            name: Cow::Borrowed(WRAPPER),
            children: present,
        }),
    }
}

/**
Merges two tags that must travel on the same call.

If either side is `None` the other is returned untouched.  Otherwise the context of both sides is
stripped and merged, with `call` winning over `base` on key collisions, and whatever else either
side carried is combined with the re-encoded context.
*/
pub fn combine_context(base: Option<Tag>, call: Option<Tag>) -> Option<Tag> {
    let (mut base, mut call) = match (base, call) {
        (None, other) | (other, None) => return other,
        (base, call) => (base, call),
    };
    let mut merged = take_context(&mut base);
    merged.merge(take_context(&mut call));
    combine([prune(base), prune(call), encode_context(&merged)])
}

/// A wrapper that lost its children to stripping is dropped, one that kept a single child collapses.
pub(crate) fn prune(tag: Option<Tag>) -> Option<Tag> {
    match tag {
        Some(Tag::Composite { name, mut children }) if name == WRAPPER => match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Tag::Composite { name, children }),
        },
        other => other,
    }
}

/// A tag asking for delivery to the notification sink, carrying `context`.
pub fn slack_tag(context: &ContextMap) -> Option<Tag> {
    combine([Some(SLACK), encode_context(context)])
}
