// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::Display;

/**
The decoded key/value view of a `CONTEXT` tag.

Keys are unique.  A value may be absent, which is distinct from the key being missing.
Iteration is ordered by key, so anything rendered from a map is deterministic.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ContextMap {
    entries: BTreeMap<String, Option<String>>,
}

impl ContextMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key` with a value, replacing any earlier value for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Inserts `key` without a value.
    pub fn insert_absent(&mut self, key: impl Into<String>) {
        self.entries.insert(key.into(), None);
    }

    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /**
    Looks up `key`.

    The outer option is whether the key is present, the inner one whether it has a value.
    */
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Adds every entry of `other`, letting `other` win on collisions.
    pub fn merge(&mut self, other: ContextMap) {
        self.entries.extend(other.entries);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ContextMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ContextMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ContextMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for ContextMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for ContextMap {
    type Item = (String, Option<String>);
    type IntoIter = btree_map::IntoIter<String, Option<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Renders `k=v` pairs separated by single spaces.  Absent values render as `k=`.
impl Display for ContextMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value.unwrap_or(""))?;
        }
        Ok(())
    }
}
