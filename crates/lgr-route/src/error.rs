//! Error types for the routing crate.

use lgr_ir::QubitId;
use thiserror::Error;

/// Errors that can occur during line-graph routing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] lgr_ir::IrError),

    /// An operation addresses neither one nor two wires.
    #[error(
        "Operation '{name}' acts on {arity} qubits; only 1- and 2-qubit operations can be routed"
    )]
    UnsupportedArity {
        /// Name of the offending operation.
        name: String,
        /// Number of wires it addresses.
        arity: usize,
    },

    /// The lowest wire carrying an operation is not wire 0.
    #[error("Lowest addressed qubit must be q0, found {lowest}")]
    NonCompactAddressing {
        /// The lowest addressed wire.
        lowest: QubitId,
    },

    /// The coupling graph falls apart into several components.
    #[error(
        "Coupling graph has {components} connected components; bridge them with pad operations"
    )]
    DisconnectedCouplingGraph {
        /// Number of connected components.
        components: usize,
    },

    /// No root graph has the coupling graph as its line graph.
    #[error("Coupling graph is not a line graph: {0}")]
    NotALineGraph(String),

    /// Two adjacent root vertices do not share exactly one wire.
    #[error("Root vertices {a} and {b} share {shared} wires, expected exactly one")]
    AmbiguousSharedNode {
        /// Index of the first root vertex.
        a: usize,
        /// Index of the second root vertex.
        b: usize,
        /// Number of wires the two vertices have in common.
        shared: usize,
    },

    /// The heavy graph could not be built from the root graph.
    #[error("Heavy graph construction failed: {0}")]
    BuildFailure(String),

    /// The heavy graph has no path of exactly three nodes between two
    /// interacting wires.
    #[error(
        "No three-node path between {from} and {to} in the heavy graph{}",
        format_path_len(.nodes)
    )]
    NoThreeNodePath {
        /// First operand.
        from: QubitId,
        /// Second operand.
        to: QubitId,
        /// Node count of the shortest path, if one exists.
        nodes: Option<usize>,
    },

    /// A non-swap two-qubit operation touches an eliminated wire.
    #[error("Operation '{name}' on eliminated wire {wire} is not a swap")]
    RoutingInvariantBroken {
        /// Name of the offending operation.
        name: String,
        /// The eliminated wire it touches.
        wire: QubitId,
    },

    /// A pass ran before the pass that derives its input.
    #[error("Pass requires '{0}', which no earlier pass provided")]
    MissingProperty(&'static str),
}

#[allow(clippy::ref_option)]
fn format_path_len(nodes: &Option<usize>) -> String {
    match nodes {
        Some(n) => format!(" (shortest path has {n} nodes)"),
        None => " (unreachable)".into(),
    }
}

/// Result type for routing operations.
pub type RouteResult<T> = Result<T, RouteError>;
