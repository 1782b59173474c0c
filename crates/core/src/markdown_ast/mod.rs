//! Markdown syntax tree: parsing, structural search, inline rendering and
//! link extraction, isolated from the concrete parser.

pub mod comrak;
pub mod links;
pub mod render;
pub mod types;

// Re-export primary API
pub use self::comrak::parse;
pub use links::{LinkEntry, LinkKind, extract_links};
pub use render::{render_inline, render_plain};
pub use types::{
    Children, Descendants, Edge, NodeKind, SourceSpan, SyntaxNode, SyntaxTree, Traverse,
};

/// First heading of the given level in document order, if any.
pub fn find_first_heading(tree: &SyntaxTree, level: u8) -> Option<SyntaxNode<'_>> {
    tree.find_first(|node| node.heading_level() == Some(level))
}
