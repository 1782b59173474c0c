//! Note discovery, loading and graph assembly.
//!
//! This module walks a notes directory, parses every eligible markdown file
//! into a [`Note`] and collects them into a [`NoteGraph`].

pub mod errors;
pub mod graph;
pub mod note;
pub mod walker;

pub use errors::NoteError;
pub use graph::{DepthLimit, NoteGraph};
pub use note::{Note, load_note};
pub use walker::{GraphBuilder, build_graph};
