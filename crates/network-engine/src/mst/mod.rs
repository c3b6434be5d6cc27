//! Minimum-cost spanning structures.
//!
//! Three builders share the result types below:
//!
//! - [`plan_modules`]: Kruskal over devices plus a virtual root, where an
//!   edge to the root stands for installing a stand-alone module.
//! - [`spanning_forest`]: Kruskal over a [`Topology`](crate::topology::Topology)
//!   with no virtual root.
//! - [`prim`]: Prim from the first node, also summing derived latency.

use serde::Serialize;

mod kruskal;
mod prim;

pub use kruskal::{plan_modules, spanning_forest};
pub use prim::prim;

/// Endpoint of a candidate edge in a module plan. The root never overlaps
/// the 1-based device id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Root,
    Device(usize),
}

impl Endpoint {
    /// Disjoint-set slot: the root takes slot 0, device `d` takes slot `d`.
    pub(crate) fn slot(self) -> usize {
        match self {
            Endpoint::Root => 0,
            Endpoint::Device(d) => d,
        }
    }
}

/// One edge chosen by [`plan_modules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Install a stand-alone module on `device`.
    Module { device: usize, cost: u32 },
    /// Use the direct connection between two devices.
    Link { a: usize, b: usize, cost: u32 },
}

impl Selection {
    pub fn cost(&self) -> u32 {
        match self {
            Selection::Module { cost, .. } | Selection::Link { cost, .. } => *cost,
        }
    }

    /// The candidate edge this selection stands for. A module is an edge
    /// from the virtual root.
    pub fn endpoints(&self) -> (Endpoint, Endpoint) {
        match *self {
            Selection::Module { device, .. } => (Endpoint::Root, Endpoint::Device(device)),
            Selection::Link { a, b, .. } => (Endpoint::Device(a), Endpoint::Device(b)),
        }
    }
}

/// Result of [`plan_modules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModulePlan {
    pub total_cost: u64,
    pub edges_used: usize,
    pub reachable_all: bool,
    pub selections: Vec<Selection>,
}

impl ModulePlan {
    /// Total cost, or `-1` when the devices could not all be connected. The
    /// total is a sum of `u32` costs, so it fits in `i64`.
    pub fn cost_or_sentinel(&self) -> i64 {
        if self.reachable_all {
            self.total_cost as i64
        } else {
            -1
        }
    }
}

/// An edge of a spanning tree or forest, by node label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEdge {
    pub from: String,
    pub to: String,
    pub cost: u32,
    pub bandwidth: u32,
}

/// Result of [`spanning_forest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningForest {
    pub total_cost: u64,
    pub edges_used: usize,
    /// `true` when the forest is a single tree over every node.
    pub reachable_all: bool,
    pub edges: Vec<TreeEdge>,
}

/// Result of [`prim`].
///
/// On a disconnected graph only the start node's component is spanned;
/// `nodes_visited < total_nodes` tells the two cases apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanningTree {
    pub total_cost: u64,
    pub total_latency: u64,
    pub nodes_visited: usize,
    pub total_nodes: usize,
    pub edges: Vec<TreeEdge>,
}

impl SpanningTree {
    pub fn is_spanning(&self) -> bool {
        self.nodes_visited == self.total_nodes
    }
}
