use crate::config::GraphConfig;
use crate::error::{GraphError, Result};
use crate::types::{CommentGraph, GraphDocument};
use std::path::Path;

/// Build comment graphs from serialized record sets
pub struct GraphLoader {
    config: GraphConfig,
}

impl GraphLoader {
    pub fn new(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Read and parse a JSON graph file
    pub fn load_path(&self, path: &Path) -> Result<CommentGraph> {
        let bytes = std::fs::read(path).map_err(|source| GraphError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| GraphError::InvalidText {
            path: path.display().to_string(),
            encoding: self.config.input_encoding.clone(),
        })?;
        self.load_str(&text)
    }

    pub fn load_str(&self, json: &str) -> Result<CommentGraph> {
        let json = json.strip_prefix('\u{feff}').unwrap_or(json);
        let document: GraphDocument = serde_json::from_str(json)?;
        Ok(self.build(&document))
    }

    /// Build graph from parsed records
    pub fn build(&self, document: &GraphDocument) -> CommentGraph {
        let limit = self.config.vertex_limit;
        let records = &document.digraph[..document.digraph.len().min(limit)];
        if document.digraph.len() > limit {
            log::warn!(
                "Input has {} records; only the first {} are used",
                document.digraph.len(),
                limit
            );
        }

        let mut graph = CommentGraph::new();

        // Phase 1: one node per record
        for record in records {
            graph.add_node(&record.vertex_name, &record.comment, &record.vertex_label);
        }

        // Phase 2: resolve children by name
        for (source, record) in records.iter().enumerate() {
            for child in &record.children {
                match graph.find_node(&child.name) {
                    Some(target) => graph.add_edge(source, target),
                    None => log::debug!(
                        "Unresolved child '{}' of '{}'",
                        child.name,
                        record.vertex_name
                    ),
                }
            }
        }

        log::info!(
            "Built comment graph: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }
}

impl Default for GraphLoader {
    fn default() -> Self {
        Self {
            config: GraphConfig::default(),
        }
    }
}
