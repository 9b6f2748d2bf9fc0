use crate::error::{GraphError, Result};
use crate::types::{CommentEdge, CommentGraph, CommentNode, NodeId};
use docline_archetype::TokenSequence;
use petgraph::unionfind::UnionFind;
use std::collections::BTreeMap;

/// Weakly connected component of the comment graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Member node ids, ascending
    pub nodes: Vec<NodeId>,

    /// Edges between members, in insertion order
    pub edges: Vec<CommentEdge>,
}

impl Component {
    /// Lowest member id; names the component's page
    pub fn min_id(&self) -> NodeId {
        self.nodes.first().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl CommentGraph {
    /// Connected components ignoring edge direction, largest first.
    ///
    /// Components of equal size are ordered by their lowest node id.
    pub fn components(&self) -> Vec<Component> {
        let mut sets = UnionFind::<usize>::new(self.node_count());
        for edge in self.edges() {
            sets.union(edge.source, edge.target);
        }

        let mut by_root: BTreeMap<usize, Component> = BTreeMap::new();
        for id in 0..self.node_count() {
            by_root
                .entry(sets.find(id))
                .or_insert_with(|| Component {
                    nodes: Vec::new(),
                    edges: Vec::new(),
                })
                .nodes
                .push(id);
        }
        for edge in self.edges() {
            if let Some(component) = by_root.get_mut(&sets.find(edge.source)) {
                component.edges.push(edge);
            }
        }

        let mut components: Vec<Component> = by_root.into_values().collect();
        components.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.min_id().cmp(&b.min_id()))
        });
        components
    }

    /// Member nodes of a component
    pub fn members(&self, component: &Component) -> Result<Vec<&CommentNode>> {
        component
            .nodes
            .iter()
            .map(|&id| self.node(id).ok_or(GraphError::NodeNotFound(id)))
            .collect()
    }

    /// Tokenized member comments, ready for archetype extraction
    pub fn cluster(&self, component: &Component) -> Result<Vec<TokenSequence>> {
        Ok(self
            .members(component)?
            .into_iter()
            .map(|node| TokenSequence::from_text(&node.comment))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph(nodes: usize, edges: &[(usize, usize)]) -> CommentGraph {
        let mut graph = CommentGraph::new();
        for i in 0..nodes {
            graph.add_node(&format!("n{i}"), &format!("comment {i}"), &format!("L{i}"));
        }
        for &(a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    #[test]
    fn components_ignore_direction_and_sort_by_size() {
        let graph = graph(6, &[(1, 0), (2, 1), (4, 5)]);
        let components = graph.components();

        let nodes: Vec<Vec<usize>> = components.iter().map(|c| c.nodes.clone()).collect();
        assert_eq!(nodes, vec![vec![0, 1, 2], vec![4, 5], vec![3]]);
        assert_eq!(components[0].edges.len(), 2);
        assert_eq!(components[2].min_id(), 3);
        assert!(components[2].edges.is_empty());
    }

    #[test]
    fn equal_sizes_order_by_lowest_id() {
        let graph = graph(4, &[(3, 1), (2, 0)]);
        let mins: Vec<usize> = graph.components().iter().map(Component::min_id).collect();
        assert_eq!(mins, vec![0, 1]);
    }

    #[test]
    fn cluster_tokenizes_member_comments() {
        let mut graph = CommentGraph::new();
        let a = graph.add_node("a", "Returns  the value", "A");
        let b = graph.add_node("b", "Returns the\tkey", "B");
        graph.add_edge(a, b);

        let component = &graph.components()[0];
        let cluster = graph.cluster(component).unwrap();
        assert_eq!(
            cluster,
            vec![
                TokenSequence::from_text("Returns the value"),
                TokenSequence::from_text("Returns the key"),
            ]
        );
    }

    #[test]
    fn members_reports_unknown_nodes() {
        let graph = graph(1, &[]);
        let bogus = Component {
            nodes: vec![0, 7],
            edges: Vec::new(),
        };
        assert!(matches!(graph.members(&bogus), Err(GraphError::NodeNotFound(7))));
    }
}
