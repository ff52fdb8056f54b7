// SPDX-License-Identifier: MIT OR Apache-2.0

use super::names;
use crate::error::TagError;
use std::borrow::Cow;
use std::fmt::Display;

/**
A named node in a tag tree.

A leaf is just a name.  A composite additionally owns an ordered list of children; it is either a
`WRAPPER` around independent tags, a `CONTEXT` container, or some other structured tag.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Leaf(Cow<'static, str>),
    Composite {
        name: Cow<'static, str>,
        children: Vec<Tag>,
    },
}

/// Deliver this message to the notification sink.
pub const SLACK: Tag = Tag::Leaf(Cow::Borrowed(names::SLACK));
/// Never deliver this message to the notification sink.
pub const NO_SLACK: Tag = Tag::Leaf(Cow::Borrowed(names::NO_SLACK));
/// This message is important.
pub const IMPORTANT: Tag = Tag::Leaf(Cow::Borrowed(names::IMPORTANT));

impl Tag {
    /**
    Creates a leaf.

    # Panics
    If `name` is empty.  Use [Self::try_leaf] for names that aren't known ahead of time.
    */
    pub fn leaf(name: impl Into<Cow<'static, str>>) -> Tag {
        match Self::try_leaf(name) {
            Ok(tag) => tag,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_leaf(name: impl Into<Cow<'static, str>>) -> Result<Tag, TagError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TagError::EmptyName);
        }
        Ok(Tag::Leaf(name))
    }

    /**
    Creates a composite with the given children, in order.

    # Panics
    If `name` is empty.
    */
    pub fn composite(name: impl Into<Cow<'static, str>>, children: Vec<Tag>) -> Tag {
        let name = name.into();
        assert!(!name.is_empty(), "{}", TagError::EmptyName);
        Tag::Composite { name, children }
    }

    pub fn name(&self) -> &str {
        match self {
            Tag::Leaf(name) | Tag::Composite { name, .. } => name.as_ref(),
        }
    }

    pub fn children(&self) -> &[Tag] {
        match self {
            Tag::Leaf(_) => &[],
            Tag::Composite { children, .. } => children,
        }
    }

    /// A tag without children.  A composite whose children were all removed counts as a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Whether this tag or any descendant is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        super::find_tag(Some(self), name).is_some()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Tag>> {
        match self {
            Tag::Leaf(_) => None,
            Tag::Composite { children, .. } => Some(children),
        }
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tag::Leaf(name) => f.write_str(name),
            Tag::Composite { name, .. } if name == names::CONTEXT => {
                write!(f, "{}", super::decode_context(Some(self)))
            }
            Tag::Composite { name, children } if name == names::WRAPPER => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Tag::Composite { name, children } => {
                if children.is_empty() {
                    return f.write_str(name);
                }
                write!(f, "{} [ ", name)?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", child)?;
                }
                f.write_str(" ]")
            }
        }
    }
}

impl From<&'static str> for Tag {
    fn from(name: &'static str) -> Self {
        Tag::leaf(name)
    }
}

/*
Boilerplate notes.

Clone: tags are values; the decorator clones what it receives before it strips anything.
PartialEq/Eq/Hash: structural.  Search and merge only ever compare names.
Default: there is no sensible default name.
Ord: no meaningful ordering between trees.
Display: used when tags have to be folded into message text.
*/
