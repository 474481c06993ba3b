//! Redundant swap cleanup.

use lgr_ir::{Circuit, CircuitDag, DagNode, Instruction, NodeIndex, QubitId};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::RouteResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Double swap cancellation pass.
///
/// Cancels pairs of back-to-back swaps on the same two wires.
/// SWAP · SWAP = I
pub struct DoubleSwapCancellation;

impl DoubleSwapCancellation {
    /// Create a new double swap cancellation pass.
    pub fn new() -> Self {
        Self
    }

    /// Find positions of adjacent swap pairs that can be cancelled.
    #[allow(clippy::unused_self)]
    fn find_cancellable_pairs(&self, dag: &CircuitDag) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        let mut processed: FxHashSet<NodeIndex> = FxHashSet::default();

        for (node, inst) in dag.op_nodes() {
            if !inst.is_swap() || processed.contains(&node) {
                continue;
            }

            // Both wires must lead straight into the same operation.
            let successors = dag.successors(node);
            let &[next] = successors.as_slice() else {
                continue;
            };
            if processed.contains(&next) {
                continue;
            }
            let Some(next_inst) = dag.get_instruction(next) else {
                continue;
            };
            if !next_inst.is_swap() || wire_pair(inst) != wire_pair(next_inst) {
                continue;
            }

            if let (Some(a), Some(b)) = (dag.position(node), dag.position(next)) {
                pairs.push((a, b));
                processed.insert(node);
                processed.insert(next);
            }
        }

        pairs
    }
}

impl Default for DoubleSwapCancellation {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for DoubleSwapCancellation {
    fn name(&self) -> &'static str {
        "DoubleSwapCancellation"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        // Every round removes at least one pair, so this terminates.
        let mut cancelled = 0;
        loop {
            let pairs = self.find_cancellable_pairs(&circuit.to_dag());
            if pairs.is_empty() {
                break;
            }

            let removed: FxHashSet<usize> = pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
            cancelled += removed.len();
            *circuit = without_positions(circuit, &removed)?;
        }

        if cancelled > 0 {
            debug!("Cancelled {} back-to-back swaps", cancelled);
        }
        properties.stats.double_swaps_cancelled += cancelled;
        Ok(())
    }
}

/// Outer swap removal pass.
///
/// Removes swaps that only touch circuit-start markers before them, or only
/// circuit-end markers after them.
pub struct OuterSwapRemoval;

impl OuterSwapRemoval {
    /// Create a new outer swap removal pass.
    pub fn new() -> Self {
        Self
    }

    #[allow(clippy::unused_self)]
    fn find_outer_swaps(&self, dag: &CircuitDag) -> FxHashSet<usize> {
        let at_boundary = |nodes: Vec<NodeIndex>, marker: fn(&DagNode) -> bool| {
            nodes.into_iter().all(|n| dag.node(n).is_some_and(marker))
        };

        dag.op_nodes()
            .filter(|(_, inst)| inst.is_swap())
            .filter(|&(node, _)| {
                at_boundary(dag.predecessors(node), DagNode::is_input)
                    || at_boundary(dag.successors(node), DagNode::is_output)
            })
            .filter_map(|(node, _)| dag.position(node))
            .collect()
    }
}

impl Default for OuterSwapRemoval {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for OuterSwapRemoval {
    fn name(&self) -> &'static str {
        "OuterSwapRemoval"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let mut removed_total = 0;
        loop {
            let removed = self.find_outer_swaps(&circuit.to_dag());
            if removed.is_empty() {
                break;
            }
            removed_total += removed.len();
            *circuit = without_positions(circuit, &removed)?;
        }

        if removed_total > 0 {
            debug!("Removed {} swaps at the circuit boundary", removed_total);
        }
        properties.stats.outer_swaps_removed += removed_total;
        Ok(())
    }
}

fn wire_pair(inst: &Instruction) -> Option<(QubitId, QubitId)> {
    match *inst.qubits.as_slice() {
        [a, b] => Some((a.min(b), a.max(b))),
        _ => None,
    }
}

fn without_positions(circuit: &Circuit, removed: &FxHashSet<usize>) -> RouteResult<Circuit> {
    let kept = circuit
        .iter()
        .enumerate()
        .filter(|(pos, _)| !removed.contains(pos))
        .map(|(_, inst)| inst.clone());
    Ok(Circuit::from_instructions(
        circuit.name(),
        circuit.num_qubits(),
        kept,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_cancels_back_to_back_swaps() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.h(q(0)).unwrap();
        circuit.swap(q(0), q(1)).unwrap();
        circuit.swap(q(1), q(0)).unwrap();
        circuit.cx(q(0), q(1)).unwrap();
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();

        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.count_swaps(), 0);
        assert_eq!(props.stats.double_swaps_cancelled, 2);
    }

    #[test]
    fn test_keeps_swaps_with_intervening_op() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.swap(q(0), q(1)).unwrap();
        circuit.h(q(1)).unwrap();
        circuit.swap(q(0), q(1)).unwrap();
        let before = circuit.clone();
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_keeps_swaps_on_different_pairs() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.swap(q(0), q(1)).unwrap();
        circuit.swap(q(1), q(2)).unwrap();
        let before = circuit.clone();
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, before);
    }

    #[test]
    fn test_odd_run_leaves_one_swap() {
        let mut circuit = Circuit::with_size("test", 2);
        for _ in 0..3 {
            circuit.swap(q(0), q(1)).unwrap();
        }
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit.count_swaps(), 1);
    }

    #[test]
    fn test_nested_pairs_cancel_to_fixpoint() {
        // swap(0,1) swap(1,2) swap(2,1) swap(1,0): the inner pair goes first,
        // which exposes the outer pair.
        let mut circuit = Circuit::with_size("test", 3);
        circuit.swap(q(0), q(1)).unwrap();
        circuit.swap(q(1), q(2)).unwrap();
        circuit.swap(q(2), q(1)).unwrap();
        circuit.swap(q(1), q(0)).unwrap();
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(props.stats.double_swaps_cancelled, 4);
    }

    #[test]
    fn test_cancellation_is_idempotent() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.cx(q(0), q(3)).unwrap();
        circuit.swap(q(3), q(1)).unwrap();
        circuit.swap(q(2), q(3)).unwrap();
        circuit.swap(q(3), q(2)).unwrap();
        circuit.cx(q(1), q(3)).unwrap();
        let mut props = PropertySet::new();

        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        let once = circuit.clone();
        DoubleSwapCancellation.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, once);
        assert_eq!(once.count_swaps(), 1);
    }

    #[test]
    fn test_removes_leading_and_trailing_swaps() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.swap(q(1), q(2)).unwrap();
        circuit.cx(q(0), q(2)).unwrap();
        circuit.swap(q(2), q(1)).unwrap();
        let mut props = PropertySet::new();

        OuterSwapRemoval.run(&mut circuit, &mut props).unwrap();

        assert_eq!(circuit.len(), 1);
        assert_eq!(circuit.instructions()[0].qubits, vec![q(0), q(2)]);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(props.stats.outer_swaps_removed, 2);
    }

    #[test]
    fn test_keeps_swap_between_operations() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.cx(q(0), q(3)).unwrap();
        circuit.swap(q(3), q(1)).unwrap();
        circuit.swap(q(2), q(3)).unwrap();
        circuit.cx(q(1), q(3)).unwrap();
        circuit.cx(q(0), q(3)).unwrap();
        let before = circuit.clone();
        let mut props = PropertySet::new();

        OuterSwapRemoval.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit, before);
        assert_eq!(props.stats.outer_swaps_removed, 0);
    }

    #[test]
    fn test_half_boundary_swap_is_kept() {
        // Wire 0 starts at the input, wire 1 does not.
        let mut circuit = Circuit::with_size("test", 3);
        circuit.h(q(1)).unwrap();
        circuit.swap(q(0), q(1)).unwrap();
        circuit.cx(q(1), q(2)).unwrap();
        circuit.h(q(0)).unwrap();
        let mut props = PropertySet::new();

        OuterSwapRemoval.run(&mut circuit, &mut props).unwrap();
        assert_eq!(circuit.count_swaps(), 1);
    }

    #[test]
    fn test_swap_only_circuit_is_cleared() {
        let mut circuit = Circuit::with_size("test", 4);
        circuit.swap(q(0), q(1)).unwrap();
        circuit.swap(q(1), q(2)).unwrap();
        circuit.swap(q(2), q(3)).unwrap();
        let mut props = PropertySet::new();

        OuterSwapRemoval.run(&mut circuit, &mut props).unwrap();
        assert!(circuit.is_empty());
        assert_eq!(props.stats.outer_swaps_removed, 3);
    }
}
