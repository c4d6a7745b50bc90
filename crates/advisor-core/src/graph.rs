//! Graph wrapper using petgraph::StableDiGraph with custom NodeId/EdgeId

use crate::error::CoreError;
use crate::model::*;
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// The course graph — a directed multigraph with stable node/edge indices.
///
/// Nodes are unique per `(kind, key)`; the index makes identifier lookups O(1).
pub struct Graph {
    inner: StableDiGraph<GraphNode, GraphEdge>,
    index: HashMap<(NodeKind, String), NodeId>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: StableDiGraph::new(),
            index: HashMap::new(),
        }
    }

    /// Add a node to graph. Returns assigned NodeId.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeId, CoreError> {
        let key = (node.kind(), node.key().to_string());
        if self.index.contains_key(&key) {
            return Err(CoreError::DuplicateNode {
                kind: key.0,
                key: key.1,
            });
        }
        let idx = self.inner.add_node(node);
        let id = NodeId(idx.index() as u64);
        self.index.insert(key, id);
        Ok(id)
    }

    /// Return the node with this kind and key, inserting it if absent.
    pub fn ensure_node(&mut self, node: GraphNode) -> NodeId {
        match self.find(node.kind(), node.key()) {
            Some(id) => id,
            None => {
                let key = (node.kind(), node.key().to_string());
                let idx = self.inner.add_node(node);
                let id = NodeId(idx.index() as u64);
                self.index.insert(key, id);
                id
            }
        }
    }

    /// Add an edge to graph. Returns assigned EdgeId.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, kind: EdgeKind) -> EdgeId {
        let edge = GraphEdge { source, target, kind };
        let idx = self.inner.add_edge(
            NodeIndex::new(source.0 as usize),
            NodeIndex::new(target.0 as usize),
            edge,
        );
        EdgeId(idx.index() as u64)
    }

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.inner.node_weight(NodeIndex::new(id.0 as usize))
    }

    /// Find a node by kind and identifier.
    pub fn find(&self, kind: NodeKind, key: &str) -> Option<NodeId> {
        self.index.get(&(kind, key.to_string())).copied()
    }

    pub fn course(&self, course_id: &str) -> Option<&Course> {
        self.find(NodeKind::Course, course_id)
            .and_then(|id| self.node(id))
            .and_then(GraphNode::as_course)
    }

    pub fn milestone(&self, milestone_id: &str) -> Option<&Milestone> {
        self.find(NodeKind::Milestone, milestone_id)
            .and_then(|id| self.node(id))
            .and_then(GraphNode::as_milestone)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes, in insertion order.
    pub fn all_nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.inner
            .node_indices()
            .filter_map(move |idx| {
                self.inner
                    .node_weight(idx)
                    .map(|n| (NodeId(idx.index() as u64), n))
            })
    }

    /// Get all nodes of a specific kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = (NodeId, &GraphNode)> + '_ {
        self.all_nodes().filter(move |(_, n)| n.kind() == kind)
    }

    /// Incoming edges of one kind, in edge insertion order.
    pub fn edges_to(&self, target: NodeId, kind: EdgeKind) -> Vec<&GraphEdge> {
        self.edges_directed(target, kind, Direction::Incoming)
    }

    /// Sources of incoming `kind` edges whose node is of `source_kind`.
    pub fn sources_of(&self, target: NodeId, kind: EdgeKind, source_kind: NodeKind) -> Vec<NodeId> {
        self.edges_to(target, kind)
            .into_iter()
            .map(|e| e.source)
            .filter(|&id| self.node(id).is_some_and(|n| n.kind() == source_kind))
            .collect()
    }

    fn edges_directed(&self, node: NodeId, kind: EdgeKind, dir: Direction) -> Vec<&GraphEdge> {
        let idx = NodeIndex::new(node.0 as usize);
        if !self.inner.contains_node(idx) {
            return Vec::new();
        }
        // petgraph walks adjacency lists newest-first
        let mut edges: Vec<_> = self
            .inner
            .edges_directed(idx, dir)
            .filter(|edge_ref| edge_ref.weight().kind == kind)
            .map(|edge_ref| (edge_ref.id(), edge_ref.weight()))
            .collect();
        edges.sort_by_key(|(id, _)| id.index());
        edges.into_iter().map(|(_, e)| e).collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
