//! Flat search over the connection tree
//!
//! A query is matched case-insensitively as a plain substring against each
//! launchable leaf's host and description, and optionally its name. Groups
//! are never part of the result; their matching descendants are, in tree order.

use crate::connections::{Forest, Leaf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Also match against the leaf's display name.
    pub match_names: bool,
}

/// Every launchable leaf matching `query`, depth-first in source order.
pub fn filter<'a>(forest: &'a Forest, query: &str, options: SearchOptions) -> Vec<&'a Leaf> {
    let needle = query.to_lowercase();
    forest.leaves().filter(|leaf| leaf_matches(leaf, &needle, options)).collect()
}

/// `needle` must already be lowercase.
fn leaf_matches(leaf: &Leaf, needle: &str, options: SearchOptions) -> bool {
    if !leaf.is_actionable() {
        return false;
    }

    let contains = |text: &str| text.to_lowercase().contains(needle);

    leaf.host.as_deref().is_some_and(contains)
        || leaf.description.as_deref().is_some_and(contains)
        || (options.match_names && contains(leaf.name.as_str()))
}

#[cfg(test)]
#[path = "test/filter.rs"]
mod tests;
