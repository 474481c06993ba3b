//! Lone-leaf elimination and label restoration.
//!
//! A lone leaf is a degree-1 heavy-graph node that is the only leaf of its
//! neighbour. Routing only ever swaps it into that neighbour and back, so the
//! neighbour can host its operations directly and the swaps disappear.

use std::collections::BTreeMap;

use lgr_ir::{Circuit, QubitId};
use tracing::debug;

use crate::error::{RouteError, RouteResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Moves single-qubit operations off lone leaves and drops the swaps that
/// shuttle them.
pub struct LoneLeafElimination;

impl Pass for LoneLeafElimination {
    fn name(&self) -> &'static str {
        "LoneLeafElimination"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let heavy = properties
            .heavy_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("heavy_graph"))?;

        let host: BTreeMap<QubitId, QubitId> = heavy
            .lone_leaf_map()
            .into_iter()
            .map(|(nbr, leaf)| (leaf, nbr))
            .collect();
        if host.is_empty() {
            return Ok(());
        }
        debug!("Eliminating {} lone leaves", host.len());

        let mut out = Circuit::with_size(circuit.name(), circuit.num_qubits());
        let mut dropped = 0;
        for inst in circuit.iter() {
            match inst.qubits.as_slice() {
                [q] => match host.get(q) {
                    Some(&nbr) => {
                        out.apply(inst.remapped([nbr]))?;
                    }
                    None => {
                        out.apply(inst.clone())?;
                    }
                },
                [a, b] => {
                    let leaf = [a, b].into_iter().find(|q| host.contains_key(*q));
                    match leaf {
                        Some(_) if inst.is_swap() => dropped += 1,
                        Some(&wire) => {
                            return Err(RouteError::RoutingInvariantBroken {
                                name: inst.name().to_string(),
                                wire,
                            });
                        }
                        None => {
                            out.apply(inst.clone())?;
                        }
                    }
                }
                _ => {
                    out.apply(inst.clone())?;
                }
            }
        }

        properties.stats.lone_leaf_swaps_dropped += dropped;
        *circuit = out;
        Ok(())
    }
}

/// Gives the hosts of eliminated lone leaves the leaves' wire labels back.
pub struct LabelFix;

impl Pass for LabelFix {
    fn name(&self) -> &'static str {
        "LabelFix"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let heavy = properties
            .heavy_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("heavy_graph"))?;

        let relabel = heavy.lone_leaf_map();
        if relabel.is_empty() {
            return Ok(());
        }

        *circuit = Circuit::from_instructions(
            circuit.name(),
            circuit.num_qubits(),
            circuit
                .iter()
                .map(|inst| inst.map_qubits(|q| relabel.get(&q).copied().unwrap_or(q))),
        )?;
        Ok(())
    }
}
