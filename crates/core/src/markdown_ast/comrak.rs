use comrak::arena_tree::NodeEdge;
use comrak::nodes::{AstNode, ListType, NodeValue, Sourcepos};
use comrak::{Arena, Options, parse_document};

use crate::markdown_ast::types::*;

/// Parse markdown into an owned syntax tree.
///
/// Total for any input: malformed markdown degrades to paragraphs and text
/// rather than failing.
pub fn parse(input: &str) -> SyntaxTree {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    convert(root)
}

/// Copy the comrak arena into an owned tree.
///
/// Driven by comrak's edge iterator rather than recursion, so nesting depth
/// is bounded by memory, not by the stack.
fn convert<'a>(root: &'a AstNode<'a>) -> SyntaxTree {
    let mut builder = TreeBuilder::default();
    for edge in root.traverse() {
        match edge {
            NodeEdge::Start(node) => {
                let ast = node.data.borrow();
                builder.open(convert_value(&ast.value), convert_sourcepos(ast.sourcepos));
            }
            NodeEdge::End(_) => builder.close(),
        }
    }
    builder.finish()
}

fn convert_value(value: &NodeValue) -> NodeKind {
    match value {
        NodeValue::Document => NodeKind::Document,
        NodeValue::FrontMatter(literal) => {
            NodeKind::FrontMatter { literal: literal.clone() }
        }
        NodeValue::BlockQuote => NodeKind::BlockQuote,
        NodeValue::List(list) => {
            NodeKind::List { ordered: matches!(list.list_type, ListType::Ordered) }
        }
        NodeValue::Item(_) => NodeKind::Item,
        NodeValue::TaskItem(..) => NodeKind::TaskItem,
        NodeValue::CodeBlock(block) => NodeKind::CodeBlock {
            info: block.info.clone(),
            literal: block.literal.clone(),
        },
        NodeValue::HtmlBlock(block) => {
            NodeKind::HtmlBlock { literal: block.literal.clone() }
        }
        NodeValue::Paragraph => NodeKind::Paragraph,
        NodeValue::Heading(heading) => NodeKind::Heading { level: heading.level },
        NodeValue::ThematicBreak => NodeKind::ThematicBreak,
        NodeValue::FootnoteDefinition(def) => {
            NodeKind::FootnoteDefinition { name: def.name.clone() }
        }
        NodeValue::Table(_) => NodeKind::Table,
        NodeValue::TableRow(header) => NodeKind::TableRow { header: *header },
        NodeValue::TableCell => NodeKind::TableCell,
        NodeValue::Text(value) => NodeKind::Text { value: value.clone() },
        NodeValue::SoftBreak => NodeKind::SoftBreak,
        NodeValue::LineBreak => NodeKind::LineBreak,
        NodeValue::Code(code) => NodeKind::Code { literal: code.literal.clone() },
        NodeValue::HtmlInline(literal) => {
            NodeKind::HtmlInline { literal: literal.clone() }
        }
        NodeValue::Emph => NodeKind::Emph,
        NodeValue::Strong => NodeKind::Strong,
        NodeValue::Strikethrough => NodeKind::Strikethrough,
        NodeValue::Link(link) => {
            NodeKind::Link { url: link.url.clone(), title: link.title.clone() }
        }
        NodeValue::Image(link) => {
            NodeKind::Image { url: link.url.clone(), title: link.title.clone() }
        }
        NodeValue::WikiLink(link) => NodeKind::WikiLink { url: link.url.clone() },
        NodeValue::FootnoteReference(reference) => {
            NodeKind::FootnoteReference { name: reference.name.clone() }
        }
        _ => NodeKind::Other,
    }
}

fn convert_sourcepos(pos: Sourcepos) -> SourceSpan {
    SourceSpan {
        start_line: pos.start.line,
        start_column: pos.start.column,
        end_line: pos.end.line,
        end_column: pos.end.column,
    }
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    // GFM extensions plus the wikilink/front matter syntax common in note vaults
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.wikilinks_title_after_pipe = true;
    options.extension.front_matter_delimiter = Some("---".to_string());

    options.parse.smart = false; // Keep quotes/dashes as written

    options
}
