//! Output formatting for the build command.

use std::path::Path;

use notegraph_core::markdown_ast::LinkEntry;
use notegraph_core::{Note, NoteGraph};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Formatted note for JSON output.
#[derive(Debug, Serialize)]
pub struct NoteOutput {
    pub path: String,
    pub title: String,
    pub links: Vec<LinkOutput>,
}

impl NoteOutput {
    pub fn from_note(path: &Path, note: &Note) -> Self {
        Self {
            path: path.display().to_string(),
            title: note.title().to_string(),
            links: note.links().iter().map(LinkOutput::from).collect(),
        }
    }
}

/// Formatted link for JSON output.
#[derive(Debug, Serialize)]
pub struct LinkOutput {
    pub target: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub line: u32,
}

impl From<&LinkEntry> for LinkOutput {
    fn from(link: &LinkEntry) -> Self {
        Self {
            target: link.target.clone(),
            kind: link.kind.as_str().to_string(),
            label: link.label.clone(),
            line: link.line,
        }
    }
}

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Links")]
    links: usize,
}

/// Print notes as a table, paths shown relative to `root`.
pub fn print_graph_table(graph: &NoteGraph, root: &Path) {
    if graph.is_empty() {
        println!("(no notes found)");
        return;
    }

    let rows: Vec<NoteRow> = graph
        .paths()
        .into_iter()
        .filter_map(|path| {
            let note = graph.get(path)?;
            Some(NoteRow {
                path: path.strip_prefix(root).unwrap_or(path).display().to_string(),
                title: note.title().to_string(),
                links: note.links().len(),
            })
        })
        .collect();

    let table = Table::new(&rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!("\n-- {} notes, {} links --", graph.len(), graph.total_links());
}

/// Notes as pretty JSON, sorted by path.
pub fn graph_json(graph: &NoteGraph) -> serde_json::Result<String> {
    let output: Vec<NoteOutput> = graph
        .paths()
        .into_iter()
        .filter_map(|path| graph.get(path).map(|note| NoteOutput::from_note(path, note)))
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Print notes as JSON; exits 1 if serialization fails.
pub fn print_graph_json(graph: &NoteGraph) {
    match graph_json(graph) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize note graph: {e}");
            std::process::exit(1);
        }
    }
}
