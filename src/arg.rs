// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message arguments and template formatting.
//!
//! Templates use `{}` placeholders which are filled left to right:
//!
//! ```rust
//! use tagwise::{Arg, format_message};
//!
//! let args = [Arg::new("alice"), Arg::new(3)];
//! assert_eq!(format_message("{} has {} items", &args), "alice has 3 items");
//! ```
//!
//! `\{}` renders a literal `{}`, and `\\{}` renders a backslash followed by the argument.
//! Placeholders without an argument are left as they are, surplus arguments are ignored.

use std::fmt::{Debug, Display};
use std::sync::Arc;

/**
A message argument.

Arguments are type-erased [Display] values that are only rendered when a message is actually
formatted.  They are cheap to clone, so records can carry them around unformatted.
*/
#[derive(Clone)]
pub struct Arg(Arc<dyn Display + Send + Sync>);

impl Arg {
    pub fn new<T: Display + Send + Sync + 'static>(value: T) -> Self {
        Arg(Arc::new(value))
    }

    pub fn render(&self) -> String {
        self.0.to_string()
    }
}

/*
Arg deliberately does not implement Display itself, otherwise the blanket From below would
overlap with From<T> for T.
*/
impl<T: Display + Send + Sync + 'static> From<T> for Arg {
    fn from(value: T) -> Self {
        Arg::new(value)
    }
}

impl Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Arg({})", self.0)
    }
}

/**
The argument shapes a log call accepts.

```rust
use tagwise::{Arg, IntoArgs};

assert_eq!(().into_args().len(), 0);
assert_eq!(("one",).into_args().len(), 1);
assert_eq!(("one", 2).into_args().len(), 2);
assert_eq!(vec![Arg::new(1), Arg::new(2), Arg::new(3)].into_args().len(), 3);
```
*/
pub trait IntoArgs {
    fn into_args(self) -> Vec<Arg>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Arg> {
        Vec::new()
    }
}

impl<A: Into<Arg>> IntoArgs for (A,) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into()]
    }
}

impl<A: Into<Arg>, B: Into<Arg>> IntoArgs for (A, B) {
    fn into_args(self) -> Vec<Arg> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<const N: usize> IntoArgs for [Arg; N] {
    fn into_args(self) -> Vec<Arg> {
        self.into()
    }
}

impl IntoArgs for Vec<Arg> {
    fn into_args(self) -> Vec<Arg> {
        self
    }
}

impl IntoArgs for &[Arg] {
    fn into_args(self) -> Vec<Arg> {
        self.to_vec()
    }
}

/// A structured key/value pair attached to a record.  Renders as `key=value`.
#[derive(Debug, Clone)]
pub struct KeyValue {
    pub key: String,
    pub value: Arg,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<Arg>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl Display for KeyValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value.0)
    }
}

/// Fills the `{}` placeholders of `template` with `args`.
pub fn format_message(template: &str, args: &[Arg]) -> String {
    if args.is_empty() && !template.contains('\\') {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        let before = &rest[..pos];
        let escaped = before.ends_with('\\');
        let double_escaped = before.ends_with("\\\\");
        if escaped && !double_escaped {
            // \{} is a literal placeholder
            out.push_str(&before[..before.len() - 1]);
            out.push_str("{}");
        } else {
            let before = if double_escaped {
                &before[..before.len() - 1]
            } else {
                before
            };
            out.push_str(before);
            match args.next() {
                Some(arg) => out.push_str(&arg.render()),
                None => {
                    out.push_str("{}");
                    out.push_str(&rest[pos + 2..]);
                    return out;
                }
            }
        }
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}
