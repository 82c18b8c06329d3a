//! Loaded connections plus the current search
//!
//! A [`Catalog`] owns the forest built from its sources and, while a search
//! is active, the query with its flat list of matches. Loading builds a new
//! forest off to the side and swaps it in whole.

use crate::connections::{self, ConnectionNode, Forest, Leaf, LoadReporter, LoadWarning};
use crate::filter::{self, SearchOptions};
use crate::launcher::LaunchError;
use crate::{log_debug, log_info, log_warn};
use std::path::{Path, PathBuf};

/// Sends load progress to the debug log.
struct DebugLogReporter;

impl LoadReporter for DebugLogReporter {
    fn source_loaded(&mut self, path: &Path, roots: usize) {
        log_info!("Loaded {} top-level connection(s) from {:?}", roots, path);
    }

    fn warning(&mut self, warning: &LoadWarning) {
        log_warn!("{}", warning);
    }
}

/// What a display should currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible<'a> {
    Tree(&'a [ConnectionNode]),
    Matches { query: &'a str, leaves: &'a [Leaf] },
}

#[derive(Debug, Clone)]
struct ActiveFilter {
    query: String,
    matches: Vec<Leaf>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    sources: Vec<PathBuf>,
    options: SearchOptions,
    forest: Forest,
    warnings: Vec<LoadWarning>,
    active_filter: Option<ActiveFilter>,
}

impl Catalog {
    /// An empty catalog; call [`Catalog::load`] to read `sources`.
    pub fn new(sources: Vec<PathBuf>, options: SearchOptions) -> Self {
        Self {
            sources,
            options,
            forest: Forest::default(),
            warnings: Vec::new(),
            active_filter: None,
        }
    }

    /// A catalog over an already built forest, with no sources to reload from.
    pub fn with_forest(forest: Forest, options: SearchOptions) -> Self {
        Self {
            forest,
            ..Self::new(Vec::new(), options)
        }
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Warnings from the most recent load.
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn query(&self) -> Option<&str> {
        self.active_filter.as_ref().map(|active| active.query.as_str())
    }

    pub fn matches(&self) -> Option<&[Leaf]> {
        self.active_filter.as_ref().map(|active| active.matches.as_slice())
    }

    /// Rebuild the forest from every source.
    ///
    /// An active search is re-run against the new forest.
    pub fn load(&mut self) -> &[LoadWarning] {
        let report = connections::load_with(&self.sources, &mut DebugLogReporter);
        log_info!("Loaded {} root node(s) with {} warning(s)", report.forest.roots().len(), report.warnings.len());
        self.forest = report.forest;
        self.warnings = report.warnings;

        if let Some(query) = self.active_filter.take().map(|active| active.query) {
            self.filter(&query);
        }
        &self.warnings
    }

    /// Drop any search and reload.
    pub fn refresh(&mut self) -> &[LoadWarning] {
        self.clear_filter();
        self.load()
    }

    /// Replace the active search with `query`; a blank query clears it.
    pub fn filter(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.clear_filter();
            return;
        }

        let matches: Vec<Leaf> = filter::filter(&self.forest, query, self.options).into_iter().cloned().collect();
        log_debug!("Search {:?} matched {} connection(s)", query, matches.len());
        self.active_filter = Some(ActiveFilter {
            query: query.to_string(),
            matches,
        });
    }

    pub fn clear_filter(&mut self) {
        self.active_filter = None;
    }

    pub fn visible(&self) -> Visible<'_> {
        match &self.active_filter {
            Some(active) => Visible::Matches {
                query: &active.query,
                leaves: &active.matches,
            },
            None => Visible::Tree(self.forest.roots()),
        }
    }

    /// Find a leaf by its slash-separated name path (`Group/Sub/Leaf`) or,
    /// failing that, by a leaf name that occurs exactly once.
    pub fn find_leaf(&self, target: &str) -> Result<&Leaf, LaunchError> {
        let target = target.trim();
        let mut paths = Vec::new();
        collect_leaf_paths(self.forest.roots(), &mut Vec::new(), &mut paths);

        if let Some((_, leaf)) = paths.iter().find(|(path, _)| path == target) {
            return Ok(*leaf);
        }

        let named: Vec<&(String, &Leaf)> = paths.iter().filter(|(_, leaf)| leaf.name == target).collect();
        match named.as_slice() {
            [] => Err(LaunchError::UnknownTarget(target.to_string())),
            [(_, leaf)] => Ok(*leaf),
            many => Err(LaunchError::AmbiguousTarget {
                target: target.to_string(),
                matches: many.iter().map(|(path, _)| path.clone()).collect(),
            }),
        }
    }
}

fn collect_leaf_paths<'a>(nodes: &'a [ConnectionNode], prefix: &mut Vec<&'a str>, out: &mut Vec<(String, &'a Leaf)>) {
    for node in nodes {
        prefix.push(node.name());
        match node {
            ConnectionNode::Leaf(leaf) => out.push((prefix.join("/"), leaf)),
            ConnectionNode::Group(group) => collect_leaf_paths(&group.children, prefix, out),
        }
        prefix.pop();
    }
}

#[cfg(test)]
#[path = "test/catalog.rs"]
mod tests;
