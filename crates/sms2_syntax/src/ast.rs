//! Syntax tree definitions for SMS2
//!
//! The tree is an arena: nodes live in a `Vec` and refer to each other by
//! [`NodeId`], with parent/children links kept explicit. This keeps point
//! queries allocation-light and makes the tree trivially cloneable for
//! snapshot publication.

use std::fmt;

/// Source location span (byte offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Containment test: inclusive start, exclusive end.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Data source kind named in a `FROM` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceType {
    Sql,
    Json,
    GraphQl,
    Csv,
}

impl SourceType {
    /// The literal spelling in document text.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Sql => "SQL",
            SourceType::Json => "JSON",
            SourceType::GraphQl => "GRAPHQL",
            SourceType::Csv => "CSV",
        }
    }

    /// Resolve a spelling to a source type, if recognized.
    pub fn from_str(s: &str) -> Option<SourceType> {
        match s {
            "SQL" => Some(SourceType::Sql),
            "JSON" => Some(SourceType::Json),
            "GRAPHQL" => Some(SourceType::GraphQl),
            "CSV" => Some(SourceType::Csv),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Grammar rule that produced a node, with rule-specific payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Document root. Always present, spans the whole text.
    Mapping,
    /// The `MAPPING` header (keyword plus optional name).
    MappingDecl,
    /// Mapping name in the header.
    Identifier(String),
    FromClause,
    ToClause,
    WhereClause,
    /// The source-type literal inside a `FROM` clause.
    SourceTypeRef(SourceType),
    /// A `{ ... }` clause body. Content is opaque to the grammar.
    Block,
}

impl NodeKind {
    /// Grammar-rule name, as published in hover labels and diagnostic sources.
    pub fn rule_name(&self) -> &'static str {
        match self {
            NodeKind::Mapping => "Mapping",
            NodeKind::MappingDecl => "MappingDecl",
            NodeKind::Identifier(_) => "Identifier",
            NodeKind::FromClause => "FromClause",
            NodeKind::ToClause => "ToClause",
            NodeKind::WhereClause => "WhereClause",
            NodeKind::SourceTypeRef(_) => "SourceTypeRef",
            NodeKind::Block => "Block",
        }
    }
}

/// A node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Immutable syntax tree plus position index over it.
///
/// Produced once per parse; never mutated afterwards. The root is always a
/// [`NodeKind::Mapping`] node, even for empty or broken documents.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
}

impl SyntaxTree {
    pub const ROOT: NodeId = NodeId(0);

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate all nodes in creation (source) order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Innermost node whose span contains `offset`.
    ///
    /// Children are visited in source order and the first containing child is
    /// descended into. Containment is `[start, end)`, so an offset sitting on
    /// the shared boundary of two adjacent siblings belongs to the node that
    /// starts there. Falls back to the root when no deeper node matches.
    pub fn node_at(&self, offset: usize) -> NodeId {
        let mut current = Self::ROOT;
        'descend: loop {
            for &child in &self.nodes[current.index()].children {
                if self.nodes[child.index()].span.contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return current;
        }
    }

    /// Check the structural invariants: every child span inside its parent
    /// span, sibling spans in source order and non-overlapping.
    pub fn is_well_formed(&self) -> bool {
        for node in &self.nodes {
            let mut previous_end = node.span.start;
            for &child in &node.children {
                let child_span = self.nodes[child.index()].span;
                if child_span.start < node.span.start || child_span.end > node.span.end {
                    return false;
                }
                if child_span.start < previous_end {
                    return false;
                }
                previous_end = child_span.end;
            }
        }
        true
    }
}

/// Arena construction used by the parser. Spans of interior nodes are patched
/// once their last token is known.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<Node>,
}

impl TreeBuilder {
    pub(crate) fn new(root_span: Span) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Mapping,
                span: root_span,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub(crate) fn add(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    pub(crate) fn set_span(&mut self, id: NodeId, span: Span) {
        self.nodes[id.index()].span = span;
    }

    pub(crate) fn finish(self) -> SyntaxTree {
        SyntaxTree { nodes: self.nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        // Mapping [0, 20)
        //   MappingDecl [0, 7)
        //   FromClause [8, 20)
        //     SourceTypeRef [13, 16)
        //     Block [16, 20)
        let mut builder = TreeBuilder::new(Span::new(0, 20));
        builder.add(SyntaxTree::ROOT, NodeKind::MappingDecl, Span::new(0, 7));
        let from = builder.add(SyntaxTree::ROOT, NodeKind::FromClause, Span::new(8, 20));
        builder.add(from, NodeKind::SourceTypeRef(SourceType::Sql), Span::new(13, 16));
        builder.add(from, NodeKind::Block, Span::new(16, 20));
        builder.finish()
    }

    #[test]
    fn test_node_at_innermost() {
        let tree = sample_tree();
        assert_eq!(tree.node(tree.node_at(0)).kind.rule_name(), "MappingDecl");
        assert_eq!(tree.node(tree.node_at(14)).kind.rule_name(), "SourceTypeRef");
        assert_eq!(tree.node(tree.node_at(18)).kind.rule_name(), "Block");
    }

    #[test]
    fn test_node_at_gap_falls_back_to_parent() {
        let tree = sample_tree();
        // Offset 7 is the gap between the header and the FROM clause.
        assert_eq!(tree.node_at(7), SyntaxTree::ROOT);
        // FROM keyword itself is covered only by the clause node.
        assert_eq!(tree.node(tree.node_at(9)).kind.rule_name(), "FromClause");
    }

    #[test]
    fn test_node_at_shared_sibling_boundary_prefers_starting_node() {
        let tree = sample_tree();
        // 16 is both the end of SourceTypeRef and the start of Block.
        assert_eq!(tree.node(tree.node_at(16)).kind.rule_name(), "Block");
    }

    #[test]
    fn test_node_at_outside_root_returns_root() {
        let tree = sample_tree();
        assert_eq!(tree.node_at(20), SyntaxTree::ROOT);
        assert_eq!(tree.node_at(9999), SyntaxTree::ROOT);
    }

    #[test]
    fn test_well_formedness() {
        assert!(sample_tree().is_well_formed());

        let mut builder = TreeBuilder::new(Span::new(0, 10));
        builder.add(SyntaxTree::ROOT, NodeKind::Block, Span::new(5, 15));
        assert!(!builder.finish().is_well_formed());

        let mut builder = TreeBuilder::new(Span::new(0, 10));
        builder.add(SyntaxTree::ROOT, NodeKind::Block, Span::new(2, 6));
        builder.add(SyntaxTree::ROOT, NodeKind::Block, Span::new(4, 8));
        assert!(!builder.finish().is_well_formed());
    }
}
