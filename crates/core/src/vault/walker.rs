//! Concurrent recursive walk that assembles the note graph.

use std::path::{Path, PathBuf};
use std::time::Instant;

use futures::future::{self, BoxFuture, FutureExt};

use super::errors::NoteError;
use super::graph::{DepthLimit, NoteGraph};
use super::note::{Note, load_note};

type Entries = Vec<(PathBuf, Note)>;

/// Builds a [`NoteGraph`] from a directory tree.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    root: PathBuf,
    max_depth: DepthLimit,
}

impl GraphBuilder {
    /// Create a builder for `root` with no depth limit.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), max_depth: DepthLimit::Unbounded }
    }

    pub fn max_depth(mut self, max_depth: DepthLimit) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and load every eligible note.
    ///
    /// All-or-nothing: any note that fails to load fails the whole build.
    pub async fn build(&self) -> Result<NoteGraph, NoteError> {
        let start = Instant::now();

        let entries =
            walk_dir(self.root.clone(), 0, self.max_depth).await.inspect_err(|e| {
                tracing::warn!(path = %e.path().display(), "note graph build failed: {e}");
            })?;
        let graph: NoteGraph = entries.into_iter().collect();

        tracing::info!(
            root = %self.root.display(),
            max_depth = %self.max_depth,
            notes = graph.len(),
            links = graph.total_links(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "built note graph"
        );
        Ok(graph)
    }
}

/// Build the note graph for every eligible markdown file under `root`.
pub async fn build_graph(root: &Path, max_depth: DepthLimit) -> Result<NoteGraph, NoteError> {
    GraphBuilder::new(root).max_depth(max_depth).build().await
}

/// What a directory entry turns into.
enum Branch {
    Note(PathBuf),
    Dir(PathBuf),
}

/// Boxed entry point for the recursion; a plain `async fn` cannot call itself.
fn walk_dir(
    dir: PathBuf,
    depth: usize,
    max_depth: DepthLimit,
) -> BoxFuture<'static, Result<Entries, NoteError>> {
    walk_dir_inner(dir, depth, max_depth).boxed()
}

/// Load the notes of one directory and, recursively, its subdirectories.
async fn walk_dir_inner(
    dir: PathBuf,
    depth: usize,
    max_depth: DepthLimit,
) -> Result<Entries, NoteError> {
    if !max_depth.allows(depth) {
        tracing::debug!(path = %dir.display(), depth, "beyond depth limit, skipping");
        return Ok(Vec::new());
    }

    let branches = list_branches(&dir).await?;

    let units = branches.into_iter().map(move |branch| async move {
        match branch {
            Branch::Note(path) => {
                let note = load_note(&path).await?;
                Ok::<Entries, NoteError>(vec![(path, note)])
            }
            Branch::Dir(path) => walk_dir(path, depth + 1, max_depth).await,
        }
    });

    // join_all lets every started unit settle before the merge; the first
    // failure in listing order is the one reported.
    let results = future::join_all(units).await;

    let mut entries = Vec::new();
    for result in results {
        entries.extend(result?);
    }
    Ok(entries)
}

/// List `dir` and classify each entry by its own name and file type.
async fn list_branches(dir: &Path) -> Result<Vec<Branch>, NoteError> {
    let mut read_dir = tokio::fs::read_dir(dir).await.map_err(|e| NoteError::io(dir, e))?;

    let mut branches = Vec::new();
    while let Some(entry) = read_dir.next_entry().await.map_err(|e| NoteError::io(dir, e))? {
        let path = dir.join(entry.file_name());
        // file_type() does not follow symlinks, so links fall through to skipped.
        let file_type = entry.file_type().await.map_err(|e| NoteError::io(&path, e))?;

        if file_type.is_file() && is_note_file_name(&entry.file_name().to_string_lossy()) {
            branches.push(Branch::Note(path));
        } else if file_type.is_dir() {
            branches.push(Branch::Dir(path));
        } else {
            tracing::trace!(path = %path.display(), "skipping entry");
        }
    }
    Ok(branches)
}

/// Visible files with the `.md` extension.
fn is_note_file_name(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(".md")
}
