//! The note graph produced by one build.

use std::collections::HashMap;
use std::collections::hash_map;
use std::path::{Path, PathBuf};

use super::note::Note;

/// How deep below the root directory the walk may descend.
///
/// The root directory itself is depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthLimit {
    #[default]
    Unbounded,
    Limited(usize),
}

impl DepthLimit {
    /// Whether a directory at `depth` has its entries processed.
    pub fn allows(self, depth: usize) -> bool {
        match self {
            DepthLimit::Unbounded => true,
            DepthLimit::Limited(max) => depth <= max,
        }
    }
}

impl From<Option<usize>> for DepthLimit {
    fn from(value: Option<usize>) -> Self {
        value.map_or(DepthLimit::Unbounded, DepthLimit::Limited)
    }
}

impl std::fmt::Display for DepthLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthLimit::Unbounded => f.write_str("unbounded"),
            DepthLimit::Limited(max) => write!(f, "{max}"),
        }
    }
}

/// Mapping from note path to parsed note. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteGraph {
    notes: HashMap<PathBuf, Note>,
}

impl NoteGraph {
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&Note> {
        self.notes.get(path.as_ref())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.notes.contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Entries in arbitrary order.
    pub fn iter(&self) -> hash_map::Iter<'_, PathBuf, Note> {
        self.notes.iter()
    }

    /// All note paths, sorted.
    pub fn paths(&self) -> Vec<&Path> {
        let mut paths: Vec<&Path> = self.notes.keys().map(PathBuf::as_path).collect();
        paths.sort();
        paths
    }

    pub fn notes(&self) -> hash_map::Values<'_, PathBuf, Note> {
        self.notes.values()
    }

    /// Number of outgoing links across every note.
    pub fn total_links(&self) -> usize {
        self.notes.values().map(|note| note.links().len()).sum()
    }

    pub fn into_inner(self) -> HashMap<PathBuf, Note> {
        self.notes
    }
}

impl FromIterator<(PathBuf, Note)> for NoteGraph {
    fn from_iter<I: IntoIterator<Item = (PathBuf, Note)>>(iter: I) -> Self {
        Self { notes: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a NoteGraph {
    type Item = (&'a PathBuf, &'a Note);
    type IntoIter = hash_map::Iter<'a, PathBuf, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
