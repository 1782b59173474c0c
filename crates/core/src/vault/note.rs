//! Loading a single markdown file into a [`Note`].

use std::path::Path;

use serde::Serialize;

use super::errors::NoteError;
use crate::markdown_ast::{
    LinkEntry, SyntaxTree, extract_links, find_first_heading, parse, render_inline,
};

/// Heading level a note's title is taken from.
const TITLE_HEADING_LEVEL: u8 = 1;

/// A parsed markdown note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    title: String,
    links: Vec<LinkEntry>,
    raw_text: String,
    syntax_tree: SyntaxTree,
}

impl Note {
    /// Build a note from text already in memory.
    ///
    /// `path` is only used to label the error when no title is found.
    pub fn from_text(path: &Path, text: String) -> Result<Self, NoteError> {
        let syntax_tree = parse(&text);

        let title = find_first_heading(&syntax_tree, TITLE_HEADING_LEVEL)
            .map(|heading| render_inline(heading.children()))
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| NoteError::MissingTitle { path: path.to_path_buf() })?;

        let links = extract_links(&syntax_tree);

        Ok(Self { title, links, raw_text: text, syntax_tree })
    }

    /// Text of the first top-level heading.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Outgoing links in document order.
    pub fn links(&self) -> &[LinkEntry] {
        &self.links
    }

    /// File contents exactly as read.
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn syntax_tree(&self) -> &SyntaxTree {
        &self.syntax_tree
    }
}

/// Read and parse the note at `path`.
pub async fn load_note(path: &Path) -> Result<Note, NoteError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| NoteError::io(path, e))?;

    let note = Note::from_text(path, text)?;
    tracing::debug!(
        path = %path.display(),
        title = note.title(),
        links = note.links().len(),
        "loaded note"
    );
    Ok(note)
}
