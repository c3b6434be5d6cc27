//! Dijkstra's algorithm tracking cost and derived latency.
//!
//! Both metrics form one lexicographic key `(cost, latency)`: a neighbour is
//! relaxed only when the candidate pair is strictly smaller. The latency
//! reported is therefore the latency of the returned cheapest path, and
//! among equally cheap paths the lowest-latency one wins.
//!
//! Edge costs are `u32` and totals are `u64`, so no path total can
//! overflow for any graph that fits in memory.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::topology::{NodeId, Topology};

/// A cheapest path and its accumulated metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub cost: u64,
    pub latency: u64,
    /// Node labels from start to end, inclusive.
    pub hops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathOutcome {
    Reached(Route),
    Unreachable,
}

impl PathOutcome {
    pub fn route(&self) -> Option<&Route> {
        match self {
            PathOutcome::Reached(route) => Some(route),
            PathOutcome::Unreachable => None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, PathOutcome::Reached(_))
    }

    /// Path cost, or `-1` when no path exists. Totals are sums of `u32`
    /// edge costs, so they stay below `i64::MAX`.
    pub fn cost_or_sentinel(&self) -> i64 {
        self.route().map_or(-1, |r| r.cost as i64)
    }

    /// Path latency, or `-1` when no path exists.
    pub fn latency_or_sentinel(&self) -> i64 {
        self.route().map_or(-1, |r| r.latency as i64)
    }
}

/// Cheapest path from `start` to `end`.
///
/// Returns as soon as `end` is popped from the queue. Fails only when an
/// endpoint is not in the graph; an unreachable target is a normal outcome.
pub fn shortest_path<T: Topology>(graph: &T, start: &str, end: &str) -> GraphResult<PathOutcome> {
    let source = graph
        .node_id(start)
        .ok_or_else(|| GraphError::UnknownNode(start.to_string()))?;
    let target = graph
        .node_id(end)
        .ok_or_else(|| GraphError::UnknownNode(end.to_string()))?;

    let n = graph.node_count();
    let mut best = vec![(u64::MAX, u64::MAX); n];
    let mut predecessors: Vec<Option<NodeId>> = vec![None; n];
    best[source.index()] = (0, 0);

    // Priority queue: (cost, latency, node)
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0u64, 0u64, source)));

    while let Some(Reverse((cost, latency, u))) = heap.pop() {
        if u == target {
            let route = Route {
                cost,
                latency,
                hops: reconstruct(graph, &predecessors, source, target),
            };
            debug!(start, end, cost, latency, hops = route.hops.len(), "path found");
            return Ok(PathOutcome::Reached(route));
        }

        // Skip entries superseded by a better key.
        if (cost, latency) > best[u.index()] {
            continue;
        }

        for edge in graph.neighbors(u) {
            let v = edge.to.index();
            let candidate = (cost + u64::from(edge.cost), latency + edge.latency());
            if candidate < best[v] {
                best[v] = candidate;
                predecessors[v] = Some(u);
                heap.push(Reverse((candidate.0, candidate.1, edge.to)));
            }
        }
    }

    debug!(start, end, "target unreachable");
    Ok(PathOutcome::Unreachable)
}

/// Walk the predecessor chain from target back to source.
fn reconstruct<T: Topology>(graph: &T, prev: &[Option<NodeId>], source: NodeId, target: NodeId) -> Vec<String> {
    let mut path = Vec::new();
    let mut current = target;

    loop {
        path.push(graph.label(current).to_string());
        if current == source {
            break;
        }
        match prev[current.index()] {
            Some(p) => current = p,
            None => break,
        }
    }

    path.reverse();
    path
}
