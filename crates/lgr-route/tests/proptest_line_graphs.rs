//! Property-based tests over random line graphs.
//!
//! A random connected root graph is drawn, its line graph is turned into a
//! circuit (one `h` per wire, one `cx` per interaction) and the circuit is
//! inverted and routed.

use std::collections::{BTreeMap, BTreeSet};

use lgr_ir::{Circuit, CircuitDag, Instruction, QubitId, StandardGate};
use lgr_route::{CouplingGraph, RootGraph, route, route_with_report};
use proptest::prelude::*;
use proptest::sample::Index;

/// Generate the edge set of a random connected simple graph.
///
/// Generates graphs with:
/// - 2-7 vertices
/// - a random spanning tree
/// - up to 8 extra edges
fn arb_root_edges() -> impl Strategy<Value = Vec<(usize, usize)>> {
    (2_usize..=7).prop_flat_map(|n| {
        (
            prop::collection::vec(any::<Index>(), n - 1),
            prop::collection::vec((0..n, 0..n), 0..=8),
        )
            .prop_map(|(parents, extra)| {
                let mut edges = BTreeSet::new();
                for (child, parent) in parents.iter().enumerate() {
                    let child = child + 1;
                    edges.insert((parent.index(child), child));
                }
                for (a, b) in extra {
                    if a != b {
                        edges.insert((a.min(b), a.max(b)));
                    }
                }
                edges.into_iter().collect()
            })
    })
}

/// Helper: line-graph interactions of a root edge list, one wire per edge.
fn line_graph_pairs(root_edges: &[(usize, usize)]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();
    for (i, &(a, b)) in root_edges.iter().enumerate() {
        for (j, &(c, d)) in root_edges.iter().enumerate().skip(i + 1) {
            if a == c || a == d || b == c || b == d {
                pairs.push((wire(i), wire(j)));
            }
        }
    }
    pairs
}

#[allow(clippy::cast_possible_truncation)]
fn wire(i: usize) -> u32 {
    i as u32
}

/// Helper: circuit with an `h` on every wire and a `cx` per interaction.
fn interaction_circuit(num_wires: usize, pairs: &[(u32, u32)]) -> Circuit {
    let mut circuit = Circuit::with_size("random", wire(num_wires));
    for w in 0..wire(num_wires) {
        circuit.h(QubitId(w)).unwrap();
    }
    for &(a, b) in pairs {
        circuit.cx(QubitId(a), QubitId(b)).unwrap();
    }
    circuit
}

/// Extra gates mixed into an interaction circuit: `(is_cz, target, position)`.
///
/// A `cz` acts on one of the interacting pairs, an `h` on one wire; either is
/// inserted at a random position.
fn arb_extra_gates() -> impl Strategy<Value = Vec<(bool, Index, Index)>> {
    prop::collection::vec((any::<bool>(), any::<Index>(), any::<Index>()), 0..=12)
}

/// Helper: interaction circuit with `extras` inserted.
fn mixed_circuit(
    num_wires: usize,
    pairs: &[(u32, u32)],
    extras: &[(bool, Index, Index)],
) -> Circuit {
    let mut ops: Vec<Instruction> = interaction_circuit(num_wires, pairs)
        .iter()
        .cloned()
        .collect();
    for (is_cz, target, at) in extras {
        let inst = if *is_cz && !pairs.is_empty() {
            let (a, b) = pairs[target.index(pairs.len())];
            Instruction::two_qubit_gate(StandardGate::CZ, QubitId(b), QubitId(a))
        } else {
            let w = wire(target.index(num_wires));
            Instruction::single_qubit_gate(StandardGate::H, QubitId(w))
        };
        ops.insert(at.index(ops.len() + 1), inst);
    }
    Circuit::from_instructions("mixed", wire(num_wires), ops).unwrap()
}

/// Replay `routed`, following which logical wire each position holds across
/// swaps, and check that its k-th non-swap operation is the input's k-th
/// non-pad operation on consistently relabelled wires.
fn check_interactions(input: &Circuit, routed: &Circuit) -> Result<(), String> {
    let mut holder: Vec<usize> = (0..routed.num_qubits() as usize).collect();
    let mut to_input: BTreeMap<usize, QubitId> = BTreeMap::new();
    let mut to_token: BTreeMap<QubitId, usize> = BTreeMap::new();
    let mut expected = input.iter().filter(|inst| !inst.is_pad());

    for (k, inst) in routed.iter().enumerate() {
        if inst.is_swap() {
            holder.swap(inst.qubits[0].index(), inst.qubits[1].index());
            continue;
        }

        let Some(want) = expected.next() else {
            return Err(format!("op {k} '{}' has no counterpart", inst.name()));
        };
        if want.name() != inst.name() || want.arity() != inst.arity() {
            return Err(format!(
                "op {k} is '{}', expected '{}'",
                inst.name(),
                want.name()
            ));
        }

        for (&out_wire, &in_wire) in inst.qubits.iter().zip(&want.qubits) {
            let token = holder[out_wire.index()];
            let known_input = *to_input.entry(token).or_insert(in_wire);
            let known_token = *to_token.entry(in_wire).or_insert(token);
            if known_input != in_wire || known_token != token {
                return Err(format!(
                    "op {k} '{}' puts {in_wire} on token {token}, already bound to {known_input}",
                    inst.name()
                ));
            }
        }
    }

    match expected.next() {
        Some(missing) => Err(format!("'{}' was dropped", missing.name())),
        None => Ok(()),
    }
}

fn all_markers(dag: &CircuitDag, nodes: &[lgr_ir::NodeIndex], input: bool) -> bool {
    nodes.iter().all(|&n| {
        dag.node(n)
            .is_some_and(|node| if input { node.is_input() } else { node.is_output() })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn inversion_reproduces_line_graph(root_edges in arb_root_edges()) {
        let pairs = line_graph_pairs(&root_edges);
        let mut coupling = CouplingGraph::from_edges(pairs.iter().copied());
        for w in 0..wire(root_edges.len()) {
            coupling.add_wire(QubitId(w));
        }

        let root = RootGraph::invert(&coupling).unwrap();
        prop_assert_eq!(root.num_edges(), root_edges.len());
        prop_assert_eq!(root.line_graph().adjacency(), coupling.adjacency());
    }

    #[test]
    fn routing_succeeds_on_line_graphs(root_edges in arb_root_edges()) {
        let pairs = line_graph_pairs(&root_edges);
        let circuit = interaction_circuit(root_edges.len(), &pairs);

        let (routed, report) = route_with_report(&circuit).unwrap();

        let counts = routed.count_ops();
        prop_assert_eq!(counts.get("cx").copied().unwrap_or(0), pairs.len());
        prop_assert_eq!(counts.get("h").copied().unwrap_or(0), root_edges.len());
        prop_assert_eq!(routed.num_qubits() as usize, routed.active_qubits().len());
        prop_assert!(routed.num_qubits() as usize <= report.heavy_nodes);
        prop_assert!(routed.num_qubits() as usize >= root_edges.len());
    }

    #[test]
    fn cleanup_leaves_no_redundant_swaps(root_edges in arb_root_edges()) {
        let pairs = line_graph_pairs(&root_edges);
        let circuit = interaction_circuit(root_edges.len(), &pairs);

        let (routed, _) = route_with_report(&circuit).unwrap();
        let dag = CircuitDag::from_circuit(&routed);

        for (node, inst) in dag.op_nodes() {
            if !inst.is_swap() {
                continue;
            }
            prop_assert!(!all_markers(&dag, &dag.predecessors(node), true));
            prop_assert!(!all_markers(&dag, &dag.successors(node), false));

            if let [next] = dag.successors(node).as_slice() {
                let next_inst = dag.get_instruction(*next).unwrap();
                let same_pair = next_inst.is_swap()
                    && next_inst.qubits.iter().all(|w| inst.acts_on(*w));
                prop_assert!(!same_pair);
            }
        }
    }

    #[test]
    fn routing_preserves_interactions_up_to_relabeling(
        root_edges in arb_root_edges(),
        extras in arb_extra_gates(),
    ) {
        let pairs = line_graph_pairs(&root_edges);
        let circuit = mixed_circuit(root_edges.len(), &pairs, &extras);

        let routed = route(&circuit).unwrap();
        prop_assert_eq!(check_interactions(&circuit, &routed), Ok(()));
    }

    #[test]
    fn routing_is_deterministic(root_edges in arb_root_edges()) {
        let pairs = line_graph_pairs(&root_edges);
        let circuit = interaction_circuit(root_edges.len(), &pairs);

        let (first, _) = route_with_report(&circuit).unwrap();
        let (second, _) = route_with_report(&circuit).unwrap();
        prop_assert_eq!(first, second);
    }
}
