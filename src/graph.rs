// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Graph index and ordering algorithms for the prerequisite graph

use crate::types::{Graph, Resource};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Errors raised by graph ordering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The graph cannot be linearized
    #[error("Graph contains cycles - cannot create learning path ({sorted} of {total} resources ordered)")]
    Cycle {
        /// Resources emitted before the sort stalled
        sorted: usize,
        /// Resources in the input
        total: usize,
    },
}

/// Read-only petgraph view over a [`Graph`]
///
/// Node weights borrow the source resources; edges are only added when both
/// endpoints exist, so dangling dependencies never reach the algorithms.
pub struct ResourceGraph<'g> {
    /// The underlying directed graph
    graph: DiGraph<&'g Resource, ()>,
    /// Map from resource ID to node index (first occurrence wins)
    node_indices: HashMap<&'g str, NodeIndex>,
    /// Number of resources in the source graph, duplicates included
    source_len: usize,
}

impl<'g> ResourceGraph<'g> {
    /// Build the index for a graph
    #[must_use]
    pub fn new(source: &'g Graph) -> Self {
        let mut graph = DiGraph::with_capacity(source.nodes.len(), source.edges.len());
        let mut node_indices = HashMap::with_capacity(source.nodes.len());

        for resource in &source.nodes {
            node_indices
                .entry(resource.id.as_str())
                .or_insert_with(|| graph.add_node(resource));
        }

        for edge in &source.edges {
            if let (Some(&from_idx), Some(&to_idx)) = (
                node_indices.get(edge.source.as_str()),
                node_indices.get(edge.target.as_str()),
            ) {
                graph.add_edge(from_idx, to_idx, ());
            }
        }

        Self {
            graph,
            node_indices,
            source_len: source.nodes.len(),
        }
    }

    /// Order resources so every prerequisite precedes its dependents
    ///
    /// Kahn's algorithm with a FIFO queue: roots are seeded in node order and
    /// successors are released in edge order, so the output is deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] if not every resource could be ordered.
    pub fn topological_order(&self) -> Result<Vec<&'g Resource>, GraphError> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| self.graph.edges_directed(idx, Direction::Incoming).count())
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .collect();

        let mut result = Vec::with_capacity(self.source_len);

        while let Some(current) = queue.pop_front() {
            result.push(self.graph[current]);

            for next in self.successors(current) {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(next);
                }
            }
        }

        if result.len() != self.source_len {
            tracing::debug!(
                sorted = result.len(),
                total = self.source_len,
                "topological sort stalled"
            );
            return Err(GraphError::Cycle {
                sorted: result.len(),
                total: self.source_len,
            });
        }

        Ok(result)
    }

    /// Resources with an edge into `id`, in edge order
    #[must_use]
    pub fn prerequisites(&self, id: &str) -> Vec<&'g Resource> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Resources with an edge out of `id`, in edge order
    #[must_use]
    pub fn dependents(&self, id: &str) -> Vec<&'g Resource> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Get node count (distinct IDs)
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get count of edges with both endpoints present
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<&'g Resource> {
        let Some(&idx) = self.node_indices.get(id) else {
            return vec![];
        };
        self.sorted_edges(idx, dir)
            .into_iter()
            .map(|other| self.graph[other])
            .collect()
    }

    fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.sorted_edges(idx, Direction::Outgoing)
    }

    /// petgraph walks adjacency newest-first; sort by edge index to get
    /// insertion order back.
    fn sorted_edges(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_unstable_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, other)| other).collect()
    }
}

/// Order the graph's resources topologically
///
/// # Errors
///
/// Returns [`GraphError::Cycle`] if the graph cannot be linearized.
pub fn topological_sort(graph: &Graph) -> Result<Vec<&Resource>, GraphError> {
    ResourceGraph::new(graph).topological_order()
}

/// Check whether the graph contains a cycle among its resources
#[must_use]
pub fn has_cycles(graph: &Graph) -> bool {
    topological_sort(graph).is_err()
}

/// Direct prerequisites of a resource (one hop)
#[must_use]
pub fn prerequisites<'g>(node_id: &str, graph: &'g Graph) -> Vec<&'g Resource> {
    ResourceGraph::new(graph).prerequisites(node_id)
}

/// Direct dependents of a resource (one hop)
#[must_use]
pub fn dependents<'g>(node_id: &str, graph: &'g Graph) -> Vec<&'g Resource> {
    ResourceGraph::new(graph).dependents(node_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Dependency;

    fn make_graph(ids: &[&str], edges: &[(&str, &str)]) -> Graph {
        Graph::new(
            ids.iter().map(|id| Resource::new(*id, *id)).collect(),
            edges.iter().map(|(s, t)| Dependency::new(*s, *t)).collect(),
        )
    }

    fn ids(nodes: &[&Resource]) -> Vec<String> {
        nodes.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_sort_follows_edges() {
        let graph = make_graph(&["c", "b", "a"], &[("a", "b"), ("b", "c")]);
        let order = topological_sort(&graph).unwrap();
        assert_eq!(ids(&order), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_roots_keep_node_order() {
        let graph = make_graph(&["x", "y", "z"], &[]);
        let order = topological_sort(&graph).unwrap();
        assert_eq!(ids(&order), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_sort_successors_released_in_edge_order() {
        // 1 -> 3 is declared before 1 -> 2, so 3 is released first
        let graph = make_graph(&["1", "2", "3"], &[("1", "3"), ("1", "2")]);
        let order = topological_sort(&graph).unwrap();
        assert_eq!(ids(&order), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_web_dev_diamond_order() {
        let graph = make_graph(
            &["1", "2", "3", "4", "5", "6"],
            &[
                ("1", "2"),
                ("1", "3"),
                ("2", "4"),
                ("3", "4"),
                ("3", "5"),
                ("4", "6"),
                ("5", "6"),
            ],
        );
        let order = topological_sort(&graph).unwrap();
        assert_eq!(ids(&order), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_dangling_edges_ignored() {
        let graph = make_graph(&["a", "b"], &[("a", "ghost"), ("ghost", "b"), ("a", "b")]);
        let index = ResourceGraph::new(&graph);
        assert_eq!(index.edge_count(), 1);
        assert_eq!(ids(&index.topological_order().unwrap()), vec!["a", "b"]);
    }

    #[test]
    fn test_cycle_is_error() {
        let graph = make_graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "b")]);
        let err = topological_sort(&graph).unwrap_err();
        assert_eq!(err, GraphError::Cycle { sorted: 1, total: 3 });
        assert!(has_cycles(&graph));
    }

    #[test]
    fn test_self_loop_is_cycle() {
        let graph = make_graph(&["a"], &[("a", "a")]);
        assert!(has_cycles(&graph));
    }

    #[test]
    fn test_duplicate_ids_cannot_be_ordered() {
        let graph = make_graph(&["a", "a"], &[]);
        assert!(topological_sort(&graph).is_err());
    }

    #[test]
    fn test_empty_graph_sorts_to_empty() {
        let graph = Graph::default();
        assert!(topological_sort(&graph).unwrap().is_empty());
        assert!(!has_cycles(&graph));
    }

    #[test]
    fn test_neighbors_are_one_hop() {
        let graph = make_graph(
            &["a", "b", "c", "d"],
            &[("a", "c"), ("b", "c"), ("c", "d"), ("x", "c")],
        );
        assert_eq!(ids(&prerequisites("c", &graph)), vec!["a", "b"]);
        assert_eq!(ids(&dependents("c", &graph)), vec!["d"]);
        assert_eq!(ids(&dependents("a", &graph)), vec!["c"]);
        assert!(prerequisites("a", &graph).is_empty());
        assert!(dependents("missing", &graph).is_empty());
    }
}
