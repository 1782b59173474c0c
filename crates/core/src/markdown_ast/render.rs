//! Serialisation of inline content back to markdown source text.

use crate::markdown_ast::types::{Edge, NodeKind, SyntaxNode};

/// Render inline nodes back to text, trailing whitespace stripped.
///
/// Plain text is emitted verbatim while inline markup is written back in its
/// markdown form, so `# Hello *world*` renders as `Hello *world*`.
pub fn render_inline<'a>(nodes: impl IntoIterator<Item = SyntaxNode<'a>>) -> String {
    let mut out = String::new();
    for node in nodes {
        render_node(node, &mut out);
    }
    out.trim_end().to_string()
}

/// Render inline nodes as plain text: markup is dropped, only the text kept.
pub fn render_plain<'a>(nodes: impl IntoIterator<Item = SyntaxNode<'a>>) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_plain(node, &mut out);
    }
    out
}

fn render_node(node: SyntaxNode<'_>, out: &mut String) {
    let mut traverse = node.traverse();
    while let Some(edge) = traverse.next() {
        match edge {
            Edge::Enter(node) => match node.kind() {
                NodeKind::Text { value } => out.push_str(value),
                NodeKind::Code { literal } => {
                    let fence = backtick_fence(literal);
                    out.push_str(&fence);
                    out.push_str(literal);
                    out.push_str(&fence);
                }
                NodeKind::Emph => out.push('*'),
                NodeKind::Strong => out.push_str("**"),
                NodeKind::Strikethrough => out.push_str("~~"),
                NodeKind::Link { .. } => out.push('['),
                NodeKind::Image { .. } => out.push_str("!["),
                NodeKind::WikiLink { url } => {
                    let label = render_plain(node.children());
                    out.push_str("[[");
                    out.push_str(url);
                    if label != *url {
                        out.push('|');
                        out.push_str(&label);
                    }
                    out.push_str("]]");
                    traverse.skip_children();
                }
                NodeKind::FootnoteReference { name } => {
                    out.push_str("[^");
                    out.push_str(name);
                    out.push(']');
                }
                NodeKind::HtmlInline { literal } => out.push_str(literal),
                NodeKind::SoftBreak => out.push(' '),
                NodeKind::LineBreak => out.push('\n'),
                _ => {}
            },
            Edge::Exit(node) => match node.kind() {
                NodeKind::Emph => out.push('*'),
                NodeKind::Strong => out.push_str("**"),
                NodeKind::Strikethrough => out.push_str("~~"),
                NodeKind::Link { url, title } | NodeKind::Image { url, title } => {
                    out.push_str("](");
                    out.push_str(url);
                    push_link_title(title, out);
                    out.push(')');
                }
                _ => {}
            },
        }
    }
}

fn push_link_title(title: &str, out: &mut String) {
    if !title.is_empty() {
        out.push_str(" \"");
        out.push_str(title);
        out.push('"');
    }
}

/// Shortest backtick run longer than any run inside the literal.
fn backtick_fence(literal: &str) -> String {
    let mut longest = 0;
    let mut current = 0;
    for ch in literal.chars() {
        if ch == '`' {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    "`".repeat(longest + 1)
}

fn collect_plain(node: SyntaxNode<'_>, out: &mut String) {
    for node in node.descendants() {
        match node.kind() {
            NodeKind::Text { value } => out.push_str(value),
            NodeKind::Code { literal } => out.push_str(literal),
            NodeKind::SoftBreak | NodeKind::LineBreak => out.push(' '),
            _ => {}
        }
    }
}
