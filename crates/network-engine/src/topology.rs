//! Undirected weighted graph stored as adjacency lists.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::latency::derived_latency;

/// Dense node handle, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One direction of an undirected link. `from` is always the node whose
/// adjacency list holds the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: u32,
    pub bandwidth: u32,
}

impl Edge {
    pub fn latency(&self) -> u64 {
        derived_latency(self.bandwidth)
    }
}

/// Read-only view of a graph, handed to the spanning and path algorithms.
pub trait Topology {
    fn node_count(&self) -> usize;

    /// Incident edges of `node`, each with `from == node`.
    fn neighbors(&self, node: NodeId) -> &[Edge];

    fn label(&self, node: NodeId) -> &str;

    fn node_id(&self, label: &str) -> Option<NodeId>;

    fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(NodeId)
    }

    /// Every undirected edge exactly once, as the `from <= to` record.
    fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.node_ids()
            .flat_map(move |n| self.neighbors(n).iter())
            .filter(|e| e.from <= e.to)
    }
}

/// Adjacency-list graph. Grows monotonically: nodes and edges are never
/// removed.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    labels: Vec<String>,
    index: HashMap<String, NodeId>,
    /// Adjacency list: NodeId -> incident edges in insertion order
    adj: Vec<Vec<Edge>>,
}

impl WeightedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` and leaves the graph untouched when the
    /// label is already present.
    pub fn add_node(&mut self, label: &str) -> bool {
        if self.index.contains_key(label) {
            return false;
        }
        let id = NodeId(self.labels.len());
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        self.adj.push(Vec::new());
        debug!(node = label, id = id.0, "added node");
        true
    }

    /// Add an undirected edge, stored once per direction. A self-loop is
    /// stored once.
    ///
    /// Both endpoints must exist and `bandwidth` must be positive; on error
    /// nothing is stored.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: u32, bandwidth: u32) -> GraphResult<()> {
        let a = self
            .node_id(from)
            .ok_or_else(|| GraphError::UnknownNode(from.to_string()))?;
        let b = self
            .node_id(to)
            .ok_or_else(|| GraphError::UnknownNode(to.to_string()))?;
        if bandwidth == 0 {
            return Err(GraphError::InvalidBandwidth {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        self.adj[a.0].push(Edge { from: a, to: b, cost, bandwidth });
        if a != b {
            self.adj[b.0].push(Edge { from: b, to: a, cost, bandwidth });
        }
        debug!(from, to, cost, bandwidth, "added edge");
        Ok(())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }
}

impl Topology for WeightedGraph {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    fn neighbors(&self, node: NodeId) -> &[Edge] {
        self.adj.get(node.0).map(Vec::as_slice).unwrap_or(&[])
    }

    fn label(&self, node: NodeId) -> &str {
        &self.labels[node.0]
    }

    fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }
}
