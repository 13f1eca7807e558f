// Raw graph IR produced by the parser.
//
// Holds node declarations and directed edges exactly as written, before any
// kind resolution. Node ids are unique (redeclaration overwrites); edges are
// an ordered list and duplicates are permitted.
//
// Preconditions: produced by the parser from lexed tokens.
// Postconditions: node iteration order and edge order are deterministic.
// Failure modes: none (data-only module).
// Side effects: none.

use std::collections::HashMap;

use crate::lexer::Span;

/// A node declaration: `id[descriptor]`. The descriptor is uninterpreted
/// text; the resolver turns it into a kind plus values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub id: String,
    pub descriptor: String,
    pub span: Span,
}

/// A directed edge: `source --> target`. Endpoints are bare ids; whether
/// they refer to nodes or root channels is decided during pin binding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEdge {
    pub source: String,
    pub target: String,
    pub span: Span,
}

/// Parsed but unresolved graph: id→descriptor declarations plus an ordered
/// edge list. Lives for one compile invocation.
#[derive(Debug, Default)]
pub struct RawGraph {
    nodes: Vec<RawNode>,
    index: HashMap<String, usize>,
    edges: Vec<RawEdge>,
}

impl RawGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare or redeclare a node. Redeclaration overwrites the descriptor
    /// and moves the node to the back of the declaration order, so the last
    /// occurrence wins for both the descriptor and the creation slot.
    pub fn declare(&mut self, id: &str, descriptor: String, span: Span) {
        if let Some(&pos) = self.index.get(id) {
            self.nodes.remove(pos);
            for idx in self.index.values_mut() {
                if *idx > pos {
                    *idx -= 1;
                }
            }
        }
        self.index.insert(id.to_string(), self.nodes.len());
        self.nodes.push(RawNode {
            id: id.to_string(),
            descriptor,
            span,
        });
    }

    /// Append an edge. Duplicates are allowed and kept in order.
    pub fn add_edge(&mut self, source: &str, target: &str, span: Span) {
        self.edges.push(RawEdge {
            source: source.to_string(),
            target: target.to_string(),
            span,
        });
    }

    /// Declared nodes in declaration order (redeclared nodes appear at the
    /// position of their final declaration).
    pub fn nodes(&self) -> &[RawNode] {
        &self.nodes
    }

    /// Edges in declaration order.
    pub fn edges(&self) -> &[RawEdge] {
        &self.edges
    }

    /// Descriptor for a declared node id, if any.
    pub fn descriptor_of(&self, id: &str) -> Option<&str> {
        self.index
            .get(id)
            .map(|&idx| self.nodes[idx].descriptor.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}
