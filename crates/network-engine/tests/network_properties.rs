use anyhow::Result;
use netopt_core::{GraphError, NetworkOptimizer, PathOutcome, Topology};

/// Deterministic pseudo-random connected graph: a chain plus extra chords.
fn generated_network(nodes: usize, seed: u64) -> Result<NetworkOptimizer> {
    let mut net = NetworkOptimizer::new();
    let labels: Vec<String> = (0..nodes).map(|i| format!("n{}", i)).collect();
    for l in &labels {
        net.add_node(l);
    }

    let mut state = seed;
    let mut next = move |m: u64| {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) % m
    };

    for i in 1..nodes {
        let j = next(i as u64) as usize;
        net.add_edge(&labels[i], &labels[j], next(50) as u32 + 1, next(20) as u32 + 1)?;
    }
    for _ in 0..nodes * 2 {
        let a = next(nodes as u64) as usize;
        let b = next(nodes as u64) as usize;
        net.add_edge(&labels[a], &labels[b], next(50) as u32, next(20) as u32 + 1)?;
    }
    Ok(net)
}

#[test]
fn shortest_path_prefers_two_hop_route() -> Result<()> {
    let mut net = NetworkOptimizer::new();
    for n in ["A", "B", "C"] {
        net.add_node(n);
    }
    net.add_edge("A", "B", 4, 10)?;
    net.add_edge("B", "C", 2, 5)?;
    net.add_edge("A", "C", 10, 1)?;

    let outcome = net.compute_shortest_path("A", "C")?;
    assert_eq!(outcome.cost_or_sentinel(), 6);
    assert_eq!(outcome.latency_or_sentinel(), 30);
    Ok(())
}

#[test]
fn device_scenarios() -> Result<()> {
    let plan = NetworkOptimizer::plan_modules(3, &[1, 2, 2], &[(1, 2, 1), (2, 3, 1)])?;
    assert_eq!(plan.cost_or_sentinel(), 3);

    let plan = NetworkOptimizer::plan_modules(
        4,
        &[5, 3, 4, 2],
        &[(1, 2, 1), (2, 3, 1), (3, 4, 1), (1, 4, 3)],
    )?;
    assert_eq!(plan.cost_or_sentinel(), 5);
    assert_eq!(plan.edges_used, 4);
    Ok(())
}

#[test]
fn prim_and_kruskal_agree_on_generated_graphs() -> Result<()> {
    for seed in 1..=20 {
        let net = generated_network(12, seed)?;
        let tree = net.compute_mst();
        let forest = net.compute_spanning_forest();

        assert!(tree.is_spanning(), "seed {}", seed);
        assert!(forest.reachable_all, "seed {}", seed);
        assert_eq!(tree.total_cost, forest.total_cost, "seed {}", seed);
        assert_eq!(tree.edges.len(), 11);
    }
    Ok(())
}

#[test]
fn module_plan_never_exceeds_all_standalone() -> Result<()> {
    for seed in 1..=20 {
        let net = generated_network(8, seed)?;
        let topo = net.topology();
        let connections: Vec<(usize, usize, u32)> = topo
            .edges()
            .map(|e| (e.from.index() + 1, e.to.index() + 1, e.cost))
            .collect();
        let standalone: Vec<u32> = (0..8u32).map(|i| 10 + (i * seed as u32) % 17).collect();

        let plan = NetworkOptimizer::plan_modules(8, &standalone, &connections)?;
        assert!(plan.reachable_all);
        let all_modules: u64 = standalone.iter().map(|&c| u64::from(c)).sum();
        assert!(plan.total_cost <= all_modules, "seed {}", seed);
    }
    Ok(())
}

#[test]
fn shortest_paths_are_symmetric_and_zero_on_self() -> Result<()> {
    let net = generated_network(10, 42)?;
    let labels = net.labels().to_vec();

    for a in &labels {
        assert_eq!(net.compute_shortest_path(a, a)?.cost_or_sentinel(), 0);
        for b in &labels {
            let there = net.compute_shortest_path(a, b)?;
            let back = net.compute_shortest_path(b, a)?;
            assert_eq!(there.cost_or_sentinel(), back.cost_or_sentinel(), "{} <-> {}", a, b);
        }
    }
    Ok(())
}

#[test]
fn mst_is_idempotent() -> Result<()> {
    let net = generated_network(15, 7)?;
    assert_eq!(net.compute_mst(), net.compute_mst());
    Ok(())
}

#[test]
fn path_totals_do_not_wrap_on_large_costs() -> Result<()> {
    let mut net = NetworkOptimizer::new();
    for n in ["a", "b", "c", "d"] {
        net.add_node(n);
    }
    net.add_edge("a", "b", u32::MAX, 10)?;
    net.add_edge("b", "d", 5, 10)?;
    net.add_edge("a", "c", u32::MAX, 10)?;
    net.add_edge("c", "d", 1, 10)?;

    let outcome = net.compute_shortest_path("a", "d")?;
    let route = outcome.route().expect("d is reachable");
    assert_eq!(route.hops, vec!["a", "c", "d"]);
    assert_eq!(route.cost, u64::from(u32::MAX) + 1);
    assert_eq!(outcome.cost_or_sentinel(), 4_294_967_296);

    let tree = net.compute_mst();
    assert_eq!(tree.total_cost, u64::from(u32::MAX) + 6);
    assert_eq!(net.compute_spanning_forest().total_cost, tree.total_cost);
    Ok(())
}

#[test]
fn invalid_references_fail_fast() {
    let mut net = NetworkOptimizer::new();
    net.add_node("a");

    assert_eq!(
        net.add_edge("a", "ghost", 1, 1),
        Err(GraphError::UnknownNode("ghost".to_string()))
    );
    assert!(matches!(
        net.add_edge("a", "a", 1, 0),
        Err(GraphError::InvalidBandwidth { .. })
    ));
    assert_eq!(net.edge_count(), 0);
    assert_eq!(
        net.compute_shortest_path("ghost", "a"),
        Err(GraphError::UnknownNode("ghost".to_string()))
    );
}

#[test]
fn disconnected_graph_is_reported_not_raised() -> Result<()> {
    let mut net = NetworkOptimizer::new();
    for n in ["a", "b", "c", "d"] {
        net.add_node(n);
    }
    net.add_edge("a", "b", 1, 1)?;
    net.add_edge("c", "d", 1, 1)?;

    let tree = net.compute_mst();
    assert_eq!((tree.nodes_visited, tree.total_nodes), (2, 4));
    assert!(!net.compute_spanning_forest().reachable_all);
    assert_eq!(net.compute_shortest_path("a", "d")?, PathOutcome::Unreachable);
    Ok(())
}
