//! Error types for graph mutation and queries.
//!
//! Disconnection is not an error: spanning and path results carry it as a
//! value. Everything here is a caller mistake that fails before any state
//! changes.

use thiserror::Error;

/// Result type alias for engine operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A node label that was never added to the graph.
    #[error("no such node: {0}")]
    UnknownNode(String),

    /// A namespace that no mutation has created yet.
    #[error("no such namespace: {0}")]
    UnknownNamespace(String),

    /// A device id outside `1..=device_count` in a module plan.
    #[error("device {device} is out of range 1..={device_count}")]
    UnknownDevice { device: usize, device_count: usize },

    /// Bandwidth is a divisor for derived latency and must be positive.
    #[error("edge {from} - {to} has zero bandwidth")]
    InvalidBandwidth { from: String, to: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A network lock was poisoned by a panicking writer.
    #[error("network lock poisoned: {0}")]
    Poisoned(String),
}
