//! Coupling graph: which wires a circuit needs to interact.

use std::collections::{BTreeMap, BTreeSet};

use lgr_ir::{Circuit, QubitId};
use petgraph::graphmap::UnGraphMap;

use crate::error::{RouteError, RouteResult};

/// Undirected interaction graph of a circuit.
///
/// Nodes are the wires addressed by at least one operation, edges the wire
/// pairs addressed by at least one two-qubit operation (including `pad`).
#[derive(Debug, Clone, Default)]
pub struct CouplingGraph {
    graph: UnGraphMap<QubitId, ()>,
}

impl CouplingGraph {
    /// Extract the coupling graph of `circuit`.
    ///
    /// Fails if an operation addresses neither one nor two wires, if the
    /// lowest addressed wire is not `q0`, or if the interactions do not form
    /// a single connected component.
    pub fn from_circuit(circuit: &Circuit) -> RouteResult<Self> {
        let mut graph = UnGraphMap::new();
        for inst in circuit {
            match inst.qubits.as_slice() {
                [q] => {
                    graph.add_node(*q);
                }
                [a, b] => {
                    graph.add_edge(*a, *b, ());
                }
                _ => {
                    return Err(RouteError::UnsupportedArity {
                        name: inst.name().to_string(),
                        arity: inst.arity(),
                    });
                }
            }
        }

        let coupling = Self { graph };
        if let Some(lowest) = coupling.graph.nodes().min() {
            if lowest != QubitId(0) {
                return Err(RouteError::NonCompactAddressing { lowest });
            }
        }

        let components = coupling.component_count();
        if components > 1 {
            return Err(RouteError::DisconnectedCouplingGraph { components });
        }

        Ok(coupling)
    }

    /// Build a coupling graph from explicit wire pairs.
    ///
    /// No validation is performed.
    pub fn from_edges(edges: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut graph = UnGraphMap::new();
        for (a, b) in edges {
            graph.add_edge(QubitId(a), QubitId(b), ());
        }
        Self { graph }
    }

    /// Add a wire, isolated unless it already interacts.
    pub fn add_wire(&mut self, wire: QubitId) {
        self.graph.add_node(wire);
    }

    /// Record that `a` and `b` interact.
    pub fn add_edge(&mut self, a: QubitId, b: QubitId) {
        if a != b {
            self.graph.add_edge(a, b, ());
        }
    }

    /// Number of wires.
    pub fn num_wires(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of interacting wire pairs.
    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if the graph has no wires.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Wires in ascending order.
    pub fn wires(&self) -> Vec<QubitId> {
        let mut wires: Vec<_> = self.graph.nodes().collect();
        wires.sort_unstable();
        wires
    }

    /// Interacting pairs `(a, b)` with `a < b`, in ascending order.
    pub fn edges(&self) -> Vec<(QubitId, QubitId)> {
        let mut edges: Vec<_> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| if a < b { (a, b) } else { (b, a) })
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Check whether `a` and `b` interact.
    pub fn contains_edge(&self, a: QubitId, b: QubitId) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Neighbours of `wire` in ascending order.
    pub fn neighbors(&self, wire: QubitId) -> Vec<QubitId> {
        let mut nbrs: Vec<_> = self.graph.neighbors(wire).collect();
        nbrs.sort_unstable();
        nbrs
    }

    /// Ordered adjacency sets, the working form of the line-graph inverter.
    pub fn adjacency(&self) -> BTreeMap<QubitId, BTreeSet<QubitId>> {
        self.graph
            .nodes()
            .map(|w| (w, self.graph.neighbors(w).collect()))
            .collect()
    }

    /// Number of connected components.
    pub fn component_count(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &UnGraphMap<QubitId, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_nodes_and_edges() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.h(QubitId(2)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cz(QubitId(1), QubitId(2)).unwrap();
        circuit.cx(QubitId(1), QubitId(0)).unwrap();

        let cg = CouplingGraph::from_circuit(&circuit).unwrap();
        assert_eq!(cg.num_wires(), 3);
        assert_eq!(cg.num_edges(), 2);
        assert_eq!(
            cg.edges(),
            vec![(QubitId(0), QubitId(1)), (QubitId(1), QubitId(2))]
        );
        assert_eq!(cg.neighbors(QubitId(1)), vec![QubitId(0), QubitId(2)]);
    }

    #[test]
    fn test_pad_contributes_an_edge() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.pad(QubitId(1), QubitId(2)).unwrap();
        circuit.cx(QubitId(2), QubitId(3)).unwrap();

        let cg = CouplingGraph::from_circuit(&circuit).unwrap();
        assert!(cg.contains_edge(QubitId(2), QubitId(1)));
        assert_eq!(cg.component_count(), 1);
    }

    #[test]
    fn test_rejects_three_qubit_gate() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

        match CouplingGraph::from_circuit(&circuit) {
            Err(RouteError::UnsupportedArity { name, arity }) => {
                assert_eq!(name, "ccx");
                assert_eq!(arity, 3);
            }
            other => panic!("Expected UnsupportedArity, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_non_compact_addressing() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.cx(QubitId(1), QubitId(2)).unwrap();

        assert!(matches!(
            CouplingGraph::from_circuit(&circuit),
            Err(RouteError::NonCompactAddressing {
                lowest: QubitId(1)
            })
        ));
    }

    #[test]
    fn test_rejects_disconnected() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.cx(QubitId(2), QubitId(3)).unwrap();

        assert!(matches!(
            CouplingGraph::from_circuit(&circuit),
            Err(RouteError::DisconnectedCouplingGraph { components: 2 })
        ));
    }

    #[test]
    fn test_empty_circuit() {
        let cg = CouplingGraph::from_circuit(&Circuit::with_size("empty", 3)).unwrap();
        assert!(cg.is_empty());
        assert_eq!(cg.component_count(), 0);
    }
}
