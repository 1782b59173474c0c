use std::fmt;

use serde::Serialize;

/// Source position of a node, 1-based, as reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceSpan {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// Kind of a syntax tree node, with the payload the node carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    FrontMatter { literal: String },
    BlockQuote,
    List { ordered: bool },
    Item,
    TaskItem,
    CodeBlock { info: String, literal: String },
    HtmlBlock { literal: String },
    Paragraph,
    Heading { level: u8 },
    ThematicBreak,
    FootnoteDefinition { name: String },
    Table,
    TableRow { header: bool },
    TableCell,
    Text { value: String },
    SoftBreak,
    LineBreak,
    Code { literal: String },
    HtmlInline { literal: String },
    Emph,
    Strong,
    Strikethrough,
    Link { url: String, title: String },
    Image { url: String, title: String },
    WikiLink { url: String },
    FootnoteReference { name: String },
    /// Constructs this crate does not distinguish (math, alerts, ...).
    Other,
}

/// Stored form of a node. `end` is one past the last index of its subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct NodeData {
    kind: NodeKind,
    span: SourceSpan,
    end: usize,
}

/// Parsed markdown document. Always rooted at a `Document` node.
///
/// Nodes live in one vector in pre-order, so every subtree is a contiguous
/// range and no operation on the tree recurses, however deep the nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
}

impl SyntaxTree {
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn descendants(&self) -> Descendants<'_> {
        self.root().descendants()
    }

    /// Structural search in document (pre-)order. Absence is `None`.
    pub fn find_first<P>(&self, predicate: P) -> Option<SyntaxNode<'_>>
    where
        P: FnMut(&SyntaxNode<'_>) -> bool,
    {
        self.root().find_first(predicate)
    }
}

/// Appends nodes in pre-order: `open` on entering a node, `close` on leaving.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<usize>,
}

impl TreeBuilder {
    pub(crate) fn open(&mut self, kind: NodeKind, span: SourceSpan) {
        self.open.push(self.nodes.len());
        self.nodes.push(NodeData { kind, span, end: 0 });
    }

    pub(crate) fn close(&mut self) {
        if let Some(index) = self.open.pop() {
            self.nodes[index].end = self.nodes.len();
        }
    }

    pub(crate) fn finish(mut self) -> SyntaxTree {
        while !self.open.is_empty() {
            self.close();
        }
        if self.nodes.is_empty() {
            let span = SourceSpan::default();
            self.nodes.push(NodeData { kind: NodeKind::Document, span, end: 1 });
        }
        SyntaxTree { nodes: self.nodes }
    }
}

/// A node of a [`SyntaxTree`], borrowed from it.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: usize,
}

impl<'a> SyntaxNode<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.index]
    }

    pub fn kind(&self) -> &'a NodeKind {
        &self.data().kind
    }

    pub fn span(&self) -> SourceSpan {
        self.data().span
    }

    /// Heading level if this node is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind() {
            NodeKind::Heading { level } => Some(*level),
            _ => None,
        }
    }

    pub fn has_children(&self) -> bool {
        self.data().end > self.index + 1
    }

    /// Direct children, left to right.
    pub fn children(&self) -> Children<'a> {
        Children { tree: self.tree, next: self.index + 1, end: self.data().end }
    }

    /// Pre-order iterator over this node and everything below it.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants { tree: self.tree, next: self.index, end: self.data().end }
    }

    /// Enter/exit events for this node's subtree, in document order.
    pub fn traverse(&self) -> Traverse<'a> {
        Traverse { tree: self.tree, next: self.index, end: self.data().end, open: Vec::new() }
    }

    /// First node in pre-order (this node included) matching `predicate`.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<SyntaxNode<'a>>
    where
        P: FnMut(&SyntaxNode<'a>) -> bool,
    {
        self.descendants().find(|node| predicate(node))
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxNode")
            .field("index", &self.index)
            .field("kind", self.kind())
            .field("span", &self.span())
            .finish()
    }
}

/// Direct children of a node.
pub struct Children<'a> {
    tree: &'a SyntaxTree,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        // Jump over the child's subtree to its next sibling.
        self.next = self.tree.nodes[index].end;
        Some(SyntaxNode { tree: self.tree, index })
    }
}

/// Pre-order traversal of a subtree.
pub struct Descendants<'a> {
    tree: &'a SyntaxTree,
    next: usize,
    end: usize,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        Some(SyntaxNode { tree: self.tree, index })
    }
}

/// One step of a [`Traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge<'a> {
    Enter(SyntaxNode<'a>),
    Exit(SyntaxNode<'a>),
}

/// Depth-first walk yielding an `Enter` and a matching `Exit` per node.
pub struct Traverse<'a> {
    tree: &'a SyntaxTree,
    next: usize,
    end: usize,
    open: Vec<usize>,
}

impl Traverse<'_> {
    /// Skip the subtree of the node just entered; its `Exit` still follows.
    pub fn skip_children(&mut self) {
        if let Some(&index) = self.open.last() {
            self.next = self.tree.nodes[index].end;
        }
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(&index) = self.open.last() {
            if self.next >= self.tree.nodes[index].end {
                self.open.pop();
                return Some(Edge::Exit(SyntaxNode { tree: self.tree, index }));
            }
        }
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        self.open.push(index);
        Some(Edge::Enter(SyntaxNode { tree: self.tree, index }))
    }
}
