//! Prim's algorithm with a lazy binary heap.
//!
//! Time: O(E log E).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::topology::{Edge, NodeId, Topology};

use super::{SpanningTree, TreeEdge};

/// Minimum spanning tree grown from the first inserted node.
///
/// Each accepted edge adds its cost to `total_cost` and its derived latency
/// to `total_latency`. Ties on cost are broken by destination then source
/// id, so repeated calls on the same graph give the same tree.
pub fn prim<T: Topology>(graph: &T) -> SpanningTree {
    let n = graph.node_count();
    if n == 0 {
        return SpanningTree {
            total_cost: 0,
            total_latency: 0,
            nodes_visited: 0,
            total_nodes: 0,
            edges: Vec::new(),
        };
    }

    let mut visited = vec![false; n];
    let mut heap: BinaryHeap<Reverse<(u32, NodeId, NodeId, u32)>> = BinaryHeap::new();

    let start = NodeId(0);
    visited[start.index()] = true;
    let mut nodes_visited = 1;
    push_frontier(&mut heap, graph.neighbors(start), &visited);

    let mut total_cost = 0u64;
    let mut total_latency = 0u64;
    let mut edges = Vec::with_capacity(n - 1);

    while let Some(Reverse((cost, to, from, bandwidth))) = heap.pop() {
        if visited[to.index()] {
            continue;
        }
        visited[to.index()] = true;
        nodes_visited += 1;

        let edge = Edge { from, to, cost, bandwidth };
        total_cost += u64::from(cost);
        total_latency += edge.latency();
        edges.push(TreeEdge {
            from: graph.label(from).to_string(),
            to: graph.label(to).to_string(),
            cost,
            bandwidth,
        });

        push_frontier(&mut heap, graph.neighbors(to), &visited);
    }

    debug!(
        start = graph.label(start),
        nodes_visited,
        total_nodes = n,
        total_cost,
        total_latency,
        "prim spanning tree computed"
    );

    SpanningTree {
        total_cost,
        total_latency,
        nodes_visited,
        total_nodes: n,
        edges,
    }
}

fn push_frontier(heap: &mut BinaryHeap<Reverse<(u32, NodeId, NodeId, u32)>>, edges: &[Edge], visited: &[bool]) {
    for e in edges {
        if !visited[e.to.index()] {
            heap.push(Reverse((e.cost, e.to, e.from, e.bandwidth)));
        }
    }
}
