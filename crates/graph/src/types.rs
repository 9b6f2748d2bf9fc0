use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Position of a record in the input, which is also its node index
pub type NodeId = usize;

/// Serialized input: `{ "digraph": [record, ...] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub digraph: Vec<VertexRecord>,
}

/// One documented code artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VertexRecord {
    /// Unique-ish name used to resolve child references
    pub vertex_name: String,

    /// Free-text documentation comment
    pub comment: String,

    /// Display label
    pub vertex_label: String,

    /// Records this one is similar to
    #[serde(default)]
    pub children: Vec<ChildRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRef {
    pub name: String,
}

/// Node in comment graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: NodeId,
    pub name: String,
    pub comment: String,
    pub label: String,
}

/// Directed similarity link between two comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEdge {
    pub source: NodeId,
    pub target: NodeId,
}

/// Similarity graph over documentation comments
#[derive(Debug)]
pub struct CommentGraph {
    /// Directed graph (record -> similar record)
    pub graph: DiGraph<CommentNode, CommentEdge>,

    /// Name -> first node carrying it
    name_index: HashMap<String, NodeIndex>,
}

impl CommentGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
        }
    }

    /// Add node; its id is the number of nodes added before it
    pub fn add_node(&mut self, name: &str, comment: &str, label: &str) -> NodeId {
        let id = self.graph.node_count();
        let idx = self.graph.add_node(CommentNode {
            id,
            name: name.to_string(),
            comment: comment.to_string(),
            label: label.to_string(),
        });
        self.name_index.entry(name.to_string()).or_insert(idx);
        id
    }

    /// Add edge; adding the same edge twice keeps a single one
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) {
        self.graph.update_edge(
            NodeIndex::new(source),
            NodeIndex::new(target),
            CommentEdge { source, target },
        );
    }

    /// First node with the given name
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).map(|idx| idx.index())
    }

    pub fn node(&self, id: NodeId) -> Option<&CommentNode> {
        self.graph.node_weight(NodeIndex::new(id))
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &CommentNode> {
        self.graph.node_weights()
    }

    /// All edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = CommentEdge> + '_ {
        self.graph.edge_references().map(|e| *e.weight())
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for CommentGraph {
    fn default() -> Self {
        Self::new()
    }
}
