//! DAG-based view of a circuit's wire dependencies.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Start marker of a wire.
    In(QubitId),
    /// End marker of a wire.
    Out(QubitId),
    /// An operation, with its position in the source circuit.
    Op {
        /// Index into the source circuit's instruction list.
        position: usize,
        /// The instruction itself.
        instruction: Instruction,
    },
}

impl DagNode {
    /// Check if this is an input node.
    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, DagNode::In(_))
    }

    /// Check if this is an output node.
    #[inline]
    pub fn is_output(&self) -> bool {
        matches!(self, DagNode::Out(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op { instruction, .. } => Some(instruction),
            _ => None,
        }
    }

    /// Position in the source circuit if this is an operation node.
    #[inline]
    pub fn position(&self) -> Option<usize> {
        match self {
            DagNode::Op { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// An edge in the circuit DAG: one step along a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DagEdge {
    /// The wire this edge belongs to.
    pub wire: QubitId,
}

/// Wire-dependency DAG of a [`Circuit`].
///
/// - every wire has exactly one `In` and one `Out` node
/// - each operation node has one incoming and one outgoing edge per wire
///   it acts on
/// - along each wire the operations appear in program order
///
/// The DAG is a read-only snapshot: passes that rewrite a circuit analyse
/// the DAG, then build a new circuit and, if needed, a new DAG from it.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    /// The underlying graph.
    graph: DiGraph<DagNode, DagEdge, u32>,
    /// Map from qubit to its input node.
    inputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from qubit to its output node.
    outputs: FxHashMap<QubitId, NodeIndex>,
    /// Operation nodes in program order.
    ops: Vec<NodeIndex>,
}

impl CircuitDag {
    /// Build the DAG of `circuit`.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let mut graph = DiGraph::default();
        let mut inputs = FxHashMap::default();
        let mut outputs = FxHashMap::default();
        let mut front: FxHashMap<QubitId, NodeIndex> = FxHashMap::default();

        for q in 0..circuit.num_qubits() {
            let qubit = QubitId(q);
            let node = graph.add_node(DagNode::In(qubit));
            inputs.insert(qubit, node);
            front.insert(qubit, node);
        }

        let mut ops = Vec::with_capacity(circuit.len());
        for (position, instruction) in circuit.iter().enumerate() {
            let node = graph.add_node(DagNode::Op {
                position,
                instruction: instruction.clone(),
            });
            for &wire in &instruction.qubits {
                // Circuit validation guarantees every operand has an In node.
                if let Some(prev) = front.insert(wire, node) {
                    graph.add_edge(prev, node, DagEdge { wire });
                }
            }
            ops.push(node);
        }

        for q in 0..circuit.num_qubits() {
            let qubit = QubitId(q);
            let node = graph.add_node(DagNode::Out(qubit));
            outputs.insert(qubit, node);
            if let Some(&last) = front.get(&qubit) {
                graph.add_edge(last, node, DagEdge { wire: qubit });
            }
        }

        Self {
            graph,
            inputs,
            outputs,
            ops,
        }
    }

    /// Operation nodes with their instructions, in program order.
    pub fn op_nodes(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> + '_ {
        self.ops
            .iter()
            .filter_map(|&idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    /// Get a node by index.
    #[inline]
    pub fn node(&self, node: NodeIndex) -> Option<&DagNode> {
        self.graph.node_weight(node)
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(DagNode::instruction)
    }

    /// Position of an operation node in the source circuit.
    #[inline]
    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.graph.node_weight(node).and_then(DagNode::position)
    }

    /// Distinct direct predecessors of `node`, ordered by index.
    pub fn predecessors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_directed(node, Direction::Incoming)
    }

    /// Distinct direct successors of `node`, ordered by index.
    pub fn successors(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_directed(node, Direction::Outgoing)
    }

    fn neighbors_directed(&self, node: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut out: Vec<_> = self.graph.neighbors_directed(node, dir).collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// The node that follows `node` on `wire`, if `node` acts on it.
    pub fn successor_on(&self, node: NodeIndex, wire: QubitId) -> Option<NodeIndex> {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .find(|e| e.weight().wire == wire)
            .map(|e| e.target())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.inputs.len()
    }

    /// Get the number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Calculate the circuit depth.
    ///
    /// Operation nodes are stored in program order, which is a topological
    /// order of the DAG, so a single forward sweep suffices.
    pub fn depth(&self) -> usize {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.ops.len(), Default::default());

        let mut max_depth = 0usize;
        for &node in &self.ops {
            let node_depth = self
                .graph
                .neighbors_directed(node, Direction::Incoming)
                .map(|pred| depths.get(&pred).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            max_depth = max_depth.max(node_depth);
            depths.insert(node, node_depth);
        }

        max_depth
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &DiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks that the graph is acyclic and that every wire forms a single
    /// path from its `In` node to its `Out` node visiting exactly the
    /// operations that act on it.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        let mut visited: FxHashSet<NodeIndex> = FxHashSet::default();
        for (&qubit, &in_node) in &self.inputs {
            let out_node = self.outputs.get(&qubit).copied().ok_or_else(|| {
                IrError::InvalidDag(format!("Qubit {qubit} has an In node but no Out node"))
            })?;

            let mut current = in_node;
            let mut steps = 0;
            while current != out_node {
                current = self.successor_on(current, qubit).ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Wire for qubit {qubit} is broken: no outgoing edge from node {current:?}"
                    ))
                })?;
                if let Some(inst) = self.get_instruction(current) {
                    if !inst.acts_on(qubit) {
                        return Err(IrError::InvalidDag(format!(
                            "Wire for qubit {qubit} passes through '{}' which does not act on it",
                            inst.name()
                        )));
                    }
                    visited.insert(current);
                }
                steps += 1;
                if steps > self.graph.node_count() {
                    return Err(IrError::InvalidDag(format!(
                        "Wire for qubit {qubit} has too many steps (possible infinite loop)"
                    )));
                }
            }
        }

        if visited.len() != self.ops.len() {
            return Err(IrError::InvalidDag(
                "Operation node not reachable along any wire".into(),
            ));
        }

        Ok(())
    }
}
