pub mod latency {
    /// A link of bandwidth `b` contributes `LATENCY_SCALE / b` latency units.
    pub const LATENCY_SCALE: u64 = 100;

    /// Integer floor division. Stored edges always have a positive
    /// bandwidth; zero is clamped so the function itself is total.
    pub fn derived_latency(bandwidth: u32) -> u64 {
        LATENCY_SCALE / u64::from(bandwidth.max(1))
    }
}

pub mod config;
pub mod disjoint_set;
pub mod error;
pub mod mst;
pub mod optimizer;
pub mod protocol;
pub mod registry;
pub mod shortest_path;
pub mod stdio;
pub mod topology;

pub use error::{GraphError, GraphResult};
pub use mst::{Endpoint, ModulePlan, Selection, SpanningForest, SpanningTree, TreeEdge};
pub use optimizer::NetworkOptimizer;
pub use registry::NetworkRegistry;
pub use shortest_path::{PathOutcome, Route};
pub use topology::{Edge, NodeId, Topology, WeightedGraph};
