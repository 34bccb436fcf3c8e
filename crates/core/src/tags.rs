//! Tag parsing and reconciliation.
//!
//! Tags are plain names attached to one question; there is no shared tag
//! dictionary. Editing a question computes the minimal add/remove delta
//! between the stored names and the requested ones.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Separators accepted in a tag list: semicolon, comma, space, newline.
static TAG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;, \n]").expect("tag separator pattern is valid"));

/// Parse a free-form tag string into a set of distinct, trimmed names.
///
/// Matching is case-sensitive. `None`-like inputs (empty or only
/// separators) yield an empty set.
pub fn parse_tag_list(input: &str) -> BTreeSet<String> {
    TAG_SEPARATORS
        .split(input)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Names to insert and delete to move a question from `stored` to `requested`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagDelta {
    pub to_add: BTreeSet<String>,
    pub to_remove: BTreeSet<String>,
}

impl TagDelta {
    pub fn between(stored: &BTreeSet<String>, requested: &BTreeSet<String>) -> Self {
        Self {
            to_add: requested.difference(stored).cloned().collect(),
            to_remove: stored.difference(requested).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
