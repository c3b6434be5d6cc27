//! Kruskal's algorithm, with and without a virtual root.
//!
//! Time: O(E log E) for sorting + O(E α(V)) for union-find.

use tracing::debug;

use crate::disjoint_set::DisjointSet;
use crate::error::{GraphError, GraphResult};
use crate::topology::Topology;

use super::{ModulePlan, Selection, SpanningForest, TreeEdge};

/// Cheapest way to connect `device_count` devices when each one may either
/// install a stand-alone module (`standalone_costs[d - 1]`) or be linked to
/// other devices through `connections` (`(a, b, cost)`, 1-based ids).
///
/// Every module option becomes an edge from a virtual root, so a spanning
/// tree over the root plus all devices has exactly `device_count` edges.
pub fn plan_modules(
    device_count: usize,
    standalone_costs: &[u32],
    connections: &[(usize, usize, u32)],
) -> GraphResult<ModulePlan> {
    if standalone_costs.len() != device_count {
        return Err(GraphError::InvalidInput(format!(
            "expected {} standalone costs, got {}",
            device_count,
            standalone_costs.len()
        )));
    }
    for &(a, b, _) in connections {
        for device in [a, b] {
            if device == 0 || device > device_count {
                return Err(GraphError::UnknownDevice {
                    device,
                    device_count,
                });
            }
        }
    }

    let mut candidates: Vec<Selection> = Vec::with_capacity(device_count + connections.len());
    candidates.extend(
        standalone_costs
            .iter()
            .enumerate()
            .map(|(i, &cost)| Selection::Module { device: i + 1, cost }),
    );
    candidates.extend(connections.iter().map(|&(a, b, cost)| Selection::Link { a, b, cost }));

    // Stable: equal costs keep module options ahead of links.
    candidates.sort_by_key(Selection::cost);

    let mut sets = DisjointSet::new(device_count);
    let mut total_cost = 0u64;
    let mut selections = Vec::with_capacity(device_count);

    for c in &candidates {
        if selections.len() == device_count {
            break;
        }
        let (from, to) = c.endpoints();
        if sets.union(from.slot(), to.slot()) {
            total_cost += u64::from(c.cost());
            selections.push(c.clone());
        }
    }

    let edges_used = selections.len();
    let reachable_all = edges_used == device_count;
    debug!(
        device_count,
        candidates = candidates.len(),
        edges_used,
        total_cost,
        reachable_all,
        "module plan computed"
    );

    Ok(ModulePlan {
        total_cost,
        edges_used,
        reachable_all,
        selections,
    })
}

/// Minimum spanning forest of `graph`. Stops once `n - 1` edges are taken.
pub fn spanning_forest<T: Topology>(graph: &T) -> SpanningForest {
    let n = graph.node_count();

    let mut edges: Vec<_> = graph.edges().collect();
    edges.sort_by_key(|e| (e.cost, e.from, e.to));

    let mut sets = DisjointSet::new(n);
    let mut total_cost = 0u64;
    let mut tree = Vec::with_capacity(n.saturating_sub(1));

    for e in edges {
        if tree.len() + 1 >= n {
            break;
        }
        if sets.union(e.from.index(), e.to.index()) {
            total_cost += u64::from(e.cost);
            tree.push(TreeEdge {
                from: graph.label(e.from).to_string(),
                to: graph.label(e.to).to_string(),
                cost: e.cost,
                bandwidth: e.bandwidth,
            });
        }
    }

    let edges_used = tree.len();
    let reachable_all = edges_used + 1 >= n;
    debug!(nodes = n, edges_used, total_cost, reachable_all, "spanning forest computed");

    SpanningForest {
        total_cost,
        edges_used,
        reachable_all,
        edges: tree,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::WeightedGraph;

    #[test]
    fn test_three_devices() {
        let plan = plan_modules(3, &[1, 2, 2], &[(1, 2, 1), (2, 3, 1)]).unwrap();
        assert_eq!(plan.total_cost, 3);
        assert_eq!(plan.edges_used, 3);
        assert!(plan.reachable_all);
        assert_eq!(
            plan.selections,
            vec![
                Selection::Module { device: 1, cost: 1 },
                Selection::Link { a: 1, b: 2, cost: 1 },
                Selection::Link { a: 2, b: 3, cost: 1 },
            ]
        );
    }

    #[test]
    fn test_four_devices() {
        let plan = plan_modules(4, &[5, 3, 4, 2], &[(1, 2, 1), (2, 3, 1), (3, 4, 1), (1, 4, 3)]).unwrap();
        assert_eq!(plan.cost_or_sentinel(), 5);
        assert!(plan.selections.contains(&Selection::Module { device: 4, cost: 2 }));
    }

    #[test]
    fn test_modules_only() {
        let plan = plan_modules(3, &[4, 1, 7], &[]).unwrap();
        assert_eq!(plan.total_cost, 12);
        assert!(plan.selections.iter().all(|s| matches!(s, Selection::Module { .. })));
    }

    #[test]
    fn test_no_devices() {
        let plan = plan_modules(0, &[], &[]).unwrap();
        assert_eq!(plan.cost_or_sentinel(), 0);
        assert!(plan.reachable_all);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            plan_modules(2, &[1], &[]),
            Err(GraphError::InvalidInput(_))
        ));
        assert_eq!(
            plan_modules(2, &[1, 1], &[(1, 3, 1)]),
            Err(GraphError::UnknownDevice { device: 3, device_count: 2 })
        );
        assert_eq!(
            plan_modules(2, &[1, 1], &[(0, 1, 1)]),
            Err(GraphError::UnknownDevice { device: 0, device_count: 2 })
        );
    }

    #[test]
    fn test_never_worse_than_all_modules() {
        let costs = [9, 2, 6, 3, 8];
        let connections = [(1, 2, 4), (2, 3, 7), (3, 4, 1), (4, 5, 5), (1, 5, 10), (2, 4, 2)];
        let plan = plan_modules(5, &costs, &connections).unwrap();
        assert!(plan.total_cost <= costs.iter().map(|&c| u64::from(c)).sum::<u64>());
        assert_eq!(plan.total_cost, 2 + 2 + 1 + 4 + 5);
    }

    #[test]
    fn test_forest_on_disconnected_graph() {
        let mut g = WeightedGraph::new();
        for n in ["a", "b", "c", "d"] {
            g.add_node(n);
        }
        g.add_edge("a", "b", 3, 1).unwrap();
        g.add_edge("c", "d", 1, 1).unwrap();

        let forest = spanning_forest(&g);
        assert_eq!(forest.total_cost, 4);
        assert_eq!(forest.edges_used, 2);
        assert!(!forest.reachable_all);
    }

    #[test]
    fn test_forest_triangle() {
        let mut g = WeightedGraph::new();
        for n in ["a", "b", "c"] {
            g.add_node(n);
        }
        g.add_edge("a", "b", 1, 1).unwrap();
        g.add_edge("b", "c", 2, 1).unwrap();
        g.add_edge("a", "c", 3, 1).unwrap();

        let forest = spanning_forest(&g);
        assert_eq!(forest.total_cost, 3);
        assert!(forest.reachable_all);
        assert_eq!(forest.edges[1].from, "b");
    }

    #[test]
    fn test_forest_on_empty_graph() {
        let forest = spanning_forest(&WeightedGraph::new());
        assert_eq!(forest.total_cost, 0);
        assert_eq!(forest.edges_used, 0);
        assert!(forest.reachable_all);
        assert!(forest.edges.is_empty());
    }

    #[test]
    fn test_forest_on_single_node() {
        let mut g = WeightedGraph::new();
        g.add_node("solo");
        g.add_edge("solo", "solo", 7, 1).unwrap();

        let forest = spanning_forest(&g);
        assert_eq!(forest.total_cost, 0);
        assert_eq!(forest.edges_used, 0);
        assert!(forest.reachable_all);
    }
}
