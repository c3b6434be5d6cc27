use tracing::info;

use crate::error::GraphResult;
use crate::mst::{self, ModulePlan, SpanningForest, SpanningTree};
use crate::shortest_path::{self, PathOutcome};
use crate::topology::{Topology, WeightedGraph};

/// Owns one network graph for its whole lifetime and answers design queries
/// against it.
///
/// Queries borrow `&self` and allocate all traversal state per call, so any
/// number of them may run while no mutation is in flight.
#[derive(Debug, Clone, Default)]
pub struct NetworkOptimizer {
    graph: WeightedGraph,
}

impl NetworkOptimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the node already existed.
    pub fn add_node(&mut self, id: &str) -> bool {
        self.graph.add_node(id)
    }

    /// Connect two existing nodes. Fails without mutating on an unknown
    /// endpoint or a zero bandwidth.
    pub fn add_edge(&mut self, from: &str, to: &str, cost: u32, bandwidth: u32) -> GraphResult<()> {
        self.graph.add_edge(from, to, cost, bandwidth)
    }

    /// Prim spanning tree with total cost and derived latency.
    pub fn compute_mst(&self) -> SpanningTree {
        let tree = mst::prim(&self.graph);
        if !tree.is_spanning() {
            info!(
                visited = tree.nodes_visited,
                total = tree.total_nodes,
                "graph is disconnected, spanning tree covers the start component only"
            );
        }
        tree
    }

    /// Kruskal spanning forest over the same edges, without a virtual root.
    pub fn compute_spanning_forest(&self) -> SpanningForest {
        mst::spanning_forest(&self.graph)
    }

    pub fn compute_shortest_path(&self, start: &str, end: &str) -> GraphResult<PathOutcome> {
        shortest_path::shortest_path(&self.graph, start, end)
    }

    /// Cheapest way to connect `device_count` devices, each either linked
    /// through `connections` or given a stand-alone module. Independent of
    /// the owned graph.
    pub fn plan_modules(
        device_count: usize,
        standalone_costs: &[u32],
        connections: &[(usize, usize, u32)],
    ) -> GraphResult<ModulePlan> {
        mst::plan_modules(device_count, standalone_costs, connections)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graph.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn labels(&self) -> &[String] {
        self.graph.labels()
    }

    /// Read-only view of the owned graph.
    pub fn topology(&self) -> &impl Topology {
        &self.graph
    }
}
