//! # DocLine Graph
//!
//! Similarity graph of documentation comments and its connected components.
//!
//! ## Architecture
//!
//! ```text
//! JSON { "digraph": [record, ...] }
//!     │
//!     ├──> Graph Loader
//!     │      ├─ Nodes: first `vertex_limit` records (name, comment, label)
//!     │      └─ Edges: record -> first node named like each child
//!     │
//!     ├──> Comment Graph (petgraph)
//!     │
//!     └──> Components (undirected connectivity)
//!            ├─ Sorted by size, largest first
//!            └─ Tokenized member comments -> archetype clusters
//! ```

mod builder;
mod config;
mod error;
mod graph;
mod types;

pub use builder::GraphLoader;
pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use graph::Component;
pub use types::{ChildRef, CommentEdge, CommentGraph, CommentNode, GraphDocument, NodeId, VertexRecord};
