//! Summary of one routing call.

use lgr_ir::Circuit;
use serde::Serialize;

use crate::property::{PropertySet, RoutingStats};

/// Metrics of a routed circuit next to the circuit it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingReport {
    /// Name of the routed circuit.
    pub name: String,
    /// Register size of the input.
    pub input_qubits: u32,
    /// Register size of the output.
    pub output_qubits: u32,
    /// Operation count of the input.
    pub input_ops: usize,
    /// Operation count of the output.
    pub output_ops: usize,
    /// Swaps left in the output.
    pub swaps: usize,
    /// Depth of the input.
    pub input_depth: usize,
    /// Depth of the output.
    pub output_depth: usize,
    /// Nodes of the heavy graph the circuit was routed on.
    pub heavy_nodes: usize,
    /// Lone leaves folded into their cells.
    pub lone_leaves: usize,
    /// Per-pass counters.
    pub stats: RoutingStats,
}

impl RoutingReport {
    /// Build a report from the input, the routed output and the properties
    /// of the routing call.
    pub fn new(input: &Circuit, output: &Circuit, properties: &PropertySet) -> Self {
        let (heavy_nodes, lone_leaves) = properties
            .heavy_graph
            .as_ref()
            .map_or((0, 0), |h| (h.num_nodes(), h.lone_leaves().len()));

        Self {
            name: input.name().to_string(),
            input_qubits: input.num_qubits(),
            output_qubits: output.num_qubits(),
            input_ops: input.len(),
            output_ops: output.len(),
            swaps: output.count_swaps(),
            input_depth: input.depth(),
            output_depth: output.depth(),
            heavy_nodes,
            lone_leaves,
            stats: properties.stats,
        }
    }

    /// Swaps left per two-qubit operation of the input, or 0 without any.
    #[allow(clippy::cast_precision_loss)]
    pub fn swap_overhead(&self) -> f64 {
        // The router brackets each routed operation with exactly two swaps.
        let two_qubit = self.stats.swaps_inserted / 2;
        if two_qubit == 0 {
            0.0
        } else {
            self.swaps as f64 / two_qubit as f64
        }
    }
}
