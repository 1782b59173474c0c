#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

//! In-memory link graph of a directory of markdown notes.
//!
//! [`build_graph`] walks a notes directory, parses every visible `.md` file,
//! takes its title from the first top-level heading and collects its outgoing
//! links into a [`NoteGraph`].

pub mod config;
pub mod markdown_ast;
pub mod vault;

pub use vault::{DepthLimit, GraphBuilder, Note, NoteError, NoteGraph, build_graph, load_note};
