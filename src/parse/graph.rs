//! petgraph-based directed graph wrapper for the workflow canvas.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::types::Canvas;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vertex {
    /// A node placed on the canvas.
    Placed { id: String, workflow_id: String },
    /// An id referenced by an edge that has no placed node.
    Dangling { id: String },
}

impl Vertex {
    pub fn id(&self) -> &str {
        match self {
            Vertex::Placed { id, .. } | Vertex::Dangling { id } => id,
        }
    }

    pub fn workflow_id(&self) -> Option<&str> {
        match self {
            Vertex::Placed { workflow_id, .. } => Some(workflow_id),
            Vertex::Dangling { .. } => None,
        }
    }
}

/// Canvas as a directed graph. Edge weights are the edge's position in the
/// canvas edge list, so "first edge by input order" is the minimum weight.
pub struct CanvasGraph {
    pub graph: DiGraph<Vertex, usize>,
    pub node_indices: HashMap<String, NodeIndex>,
    /// Placed nodes in canvas order. A repeated id keeps its first occurrence.
    pub placed: Vec<NodeIndex>,
    pub duplicate_ids: Vec<String>,
}

impl CanvasGraph {
    pub fn build(canvas: &Canvas) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut placed = Vec::new();
        let mut duplicate_ids = Vec::new();

        for node in &canvas.nodes {
            if node_indices.contains_key(&node.id) {
                duplicate_ids.push(node.id.clone());
                continue;
            }
            let idx = graph.add_node(Vertex::Placed {
                id: node.id.clone(),
                workflow_id: node.workflow_id.clone(),
            });
            node_indices.insert(node.id.clone(), idx);
            placed.push(idx);
        }

        for (position, edge) in canvas.edges.iter().enumerate() {
            let s = endpoint(&mut graph, &mut node_indices, &edge.source_id);
            let t = endpoint(&mut graph, &mut node_indices, &edge.target_id);
            graph.add_edge(s, t, position);
        }

        CanvasGraph {
            graph,
            node_indices,
            placed,
            duplicate_ids,
        }
    }

    pub fn vertex(&self, idx: NodeIndex) -> &Vertex {
        &self.graph[idx]
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Target of the earliest edge leaving `idx`, if any.
    pub fn first_successor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .min_by_key(|e| *e.weight())
            .map(|e| e.target())
    }

    /// First placed node, in canvas order, with no incoming edge.
    pub fn start_node(&self) -> Option<NodeIndex> {
        self.placed
            .iter()
            .copied()
            .find(|&idx| self.incoming(idx) == 0)
    }

    pub fn incoming(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    pub fn outgoing(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Outgoing).count()
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.node_indices
            .get(node_id)
            .map_or(0, |&idx| self.incoming(idx))
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.node_indices
            .get(node_id)
            .map_or(0, |&idx| self.outgoing(idx))
    }

    pub fn dangling(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .node_indices()
            .filter(|&idx| matches!(self.graph[idx], Vertex::Dangling { .. }))
    }
}

fn endpoint(
    graph: &mut DiGraph<Vertex, usize>,
    node_indices: &mut HashMap<String, NodeIndex>,
    id: &str,
) -> NodeIndex {
    if let Some(&idx) = node_indices.get(id) {
        return idx;
    }
    let idx = graph.add_node(Vertex::Dangling { id: id.to_string() });
    node_indices.insert(id.to_string(), idx);
    idx
}
