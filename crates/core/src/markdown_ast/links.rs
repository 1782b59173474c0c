//! Outgoing link extraction from a parsed note.

use serde::Serialize;

use crate::markdown_ast::render::{render_inline, render_plain};
use crate::markdown_ast::types::{Edge, NodeKind, SyntaxNode, SyntaxTree};

const CONTEXT_MAX_CHARS: usize = 100;

/// Asset extensions that never point at a note.
const ASSET_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".svg", ".pdf"];

/// Syntax a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// `[[target]]` or `[[target|label]]`
    Wikilink,
    /// `[text](target.md)`
    Markdown,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Wikilink => "wikilink",
            LinkKind::Markdown => "markdown",
        }
    }
}

/// An outgoing link found in a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkEntry {
    /// Target as written in the link (not resolved).
    pub target: String,
    /// Link text; `None` for a wikilink without an explicit label.
    pub label: Option<String>,
    pub kind: LinkKind,
    /// Line the link starts on (1-based).
    pub line: u32,
    /// Text of the enclosing block.
    pub context: Option<String>,
}

/// Extract every note link in document order.
pub fn extract_links(tree: &SyntaxTree) -> Vec<LinkEntry> {
    let mut links = Vec::new();
    // Innermost paragraph, heading or table cell around the current node.
    let mut enclosing: Vec<SyntaxNode<'_>> = Vec::new();

    let mut traverse = tree.root().traverse();
    while let Some(edge) = traverse.next() {
        let node = match edge {
            Edge::Enter(node) => node,
            Edge::Exit(node) => {
                if encloses_inline(node.kind()) {
                    enclosing.pop();
                }
                continue;
            }
        };
        if encloses_inline(node.kind()) {
            enclosing.push(node);
        }
        let context = || enclosing.last().copied().map(context_of);

        match node.kind() {
            NodeKind::WikiLink { url } => {
                let label = render_plain(node.children());
                links.push(LinkEntry {
                    target: url.clone(),
                    label: (!label.is_empty() && label != *url).then_some(label),
                    kind: LinkKind::Wikilink,
                    line: line_of(node),
                    context: context(),
                });
            }
            NodeKind::Link { url, .. } if is_note_reference(url) => {
                links.push(LinkEntry {
                    target: url.clone(),
                    label: Some(render_inline(node.children())),
                    kind: LinkKind::Markdown,
                    line: line_of(node),
                    context: context(),
                });
            }
            // Images are assets, and their alt text cannot hold links.
            NodeKind::Image { .. } => traverse.skip_children(),
            _ => {}
        }
    }
    links
}

fn encloses_inline(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Paragraph | NodeKind::Heading { .. } | NodeKind::TableCell)
}

fn line_of(node: SyntaxNode<'_>) -> u32 {
    u32::try_from(node.span().start_line).unwrap_or(u32::MAX)
}

/// Whether a markdown link URL points at a local note.
fn is_note_reference(url: &str) -> bool {
    if url.is_empty() || url.starts_with('#') || has_scheme(url) {
        return false;
    }

    let path = url.split(['#', '?']).next().unwrap_or(url).to_lowercase();
    !ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// `scheme:` per RFC 3986: a letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn context_of(block: SyntaxNode<'_>) -> String {
    let text = render_plain(block.children());
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_context(&collapsed, CONTEXT_MAX_CHARS)
}

fn truncate_context(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_ast::comrak::parse;

    fn links_of(input: &str) -> Vec<LinkEntry> {
        extract_links(&parse(input))
    }

    #[test]
    fn test_markdown_link_to_note() {
        let links = links_of("# Alpha\n\nSee [b](b.md).");

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "b.md");
        assert_eq!(links[0].label, Some("b".to_string()));
        assert_eq!(links[0].kind, LinkKind::Markdown);
        assert_eq!(links[0].line, 3);
        assert_eq!(links[0].context, Some("See b.".to_string()));
    }

    #[test]
    fn test_wikilinks_with_and_without_label() {
        let links = links_of("Links to [[other-note]] and [[another|with alias]].");

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, "other-note");
        assert_eq!(links[0].label, None);
        assert_eq!(links[0].kind, LinkKind::Wikilink);
        assert_eq!(links[1].target, "another");
        assert_eq!(links[1].label, Some("with alias".to_string()));
    }

    #[test]
    fn test_external_and_asset_links_skipped() {
        let links = links_of(
            "[external](https://example.com) [mail](mailto:a@b.c) \
             [anchor](#top) [pic](./pic.PNG) [doc](./other.md#section)",
        );

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, "./other.md#section");
    }

    #[test]
    fn test_images_are_not_links() {
        assert!(links_of("![diagram](diagram.md)").is_empty());
    }

    #[test]
    fn test_document_order_across_blocks() {
        let input = "# T\n\n- [[first]]\n- [second](second.md)\n\n> [[third]]\n";
        let targets: Vec<_> = links_of(input).into_iter().map(|l| l.target).collect();
        assert_eq!(targets, vec!["first", "second.md", "third"]);
    }

    #[test]
    fn test_no_links_yields_empty() {
        assert!(links_of("# Beta").is_empty());
    }

    #[test]
    fn test_links_inside_code_are_ignored() {
        assert!(links_of("`[[not-a-link]]`\n\n```\n[x](x.md)\n```\n").is_empty());
    }

    #[test]
    fn test_long_context_is_truncated() {
        let filler = "word ".repeat(40);
        let links = links_of(&format!("{filler}[[target]]"));
        let context = links[0].context.clone().unwrap();
        assert!(context.ends_with("..."));
        assert_eq!(context.chars().count(), CONTEXT_MAX_CHARS + 3);
    }

    #[test]
    fn test_links_inside_deep_quotes() {
        let input = format!("# T\n\n{}[[deep]] [d](d.md)", "> ".repeat(10_000));
        let links = links_of(&input);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].target, "deep");
        assert_eq!(links[1].context, Some("deep d".to_string()));
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("https://example.com"));
        assert!(has_scheme("obsidian://open"));
        assert!(!has_scheme("notes/a.md"));
        assert!(!has_scheme("1:2"));
    }
}
