//! Swap insertion over the heavy graph.

use lgr_ir::{Circuit, Instruction, QubitId};
use tracing::trace;

use crate::error::{RouteError, RouteResult};
use crate::heavy::HeavyGraph;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Line-graph routing pass.
///
/// Every two-qubit operation on `(i, j)` runs on the cell node `m` between
/// them: the endpoint with the lower heavy-graph degree is swapped into `m`,
/// the operation runs, and the endpoint is swapped back. On equal degrees
/// the second operand moves. `pad` operations are checked like any other
/// interaction but emit nothing.
pub struct LineGraphRouting;

impl Pass for LineGraphRouting {
    fn name(&self) -> &'static str {
        "LineGraphRouting"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let heavy = properties
            .heavy_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("heavy_graph"))?;

        let mut routed = Circuit::with_size(circuit.name(), heavy.register_size()?);
        let mut swaps = 0;
        let mut pads = 0;

        for inst in circuit.iter() {
            match inst.qubits.as_slice() {
                [_] => {
                    routed.apply(inst.clone())?;
                }
                &[i, j] => {
                    let m = middle_node(heavy, i, j)?;
                    if inst.is_pad() {
                        pads += 1;
                        continue;
                    }

                    if heavy.degree(i) >= heavy.degree(j) {
                        trace!("{} on ({}, {}) via {}, moving {}", inst.name(), i, j, m, j);
                        routed.apply(Instruction::swap(j, m))?;
                        routed.apply(inst.remapped([i, m]))?;
                        routed.apply(Instruction::swap(m, j))?;
                    } else {
                        trace!("{} on ({}, {}) via {}, moving {}", inst.name(), i, j, m, i);
                        routed.apply(Instruction::swap(i, m))?;
                        routed.apply(inst.remapped([m, j]))?;
                        routed.apply(Instruction::swap(m, i))?;
                    }
                    swaps += 2;
                }
                _ => {
                    return Err(RouteError::UnsupportedArity {
                        name: inst.name().to_string(),
                        arity: inst.arity(),
                    });
                }
            }
        }

        properties.stats.swaps_inserted += swaps;
        properties.stats.pads_consumed += pads;
        *circuit = routed;
        Ok(())
    }
}

/// The node between `i` and `j` on their shortest heavy-graph path.
fn middle_node(heavy: &HeavyGraph, i: QubitId, j: QubitId) -> RouteResult<QubitId> {
    match heavy.shortest_path(i, j) {
        Some(path) if path.len() == 3 => Ok(path[1]),
        other => Err(RouteError::NoThreeNodePath {
            from: i,
            to: j,
            nodes: other.map(|p| p.len()),
        }),
    }
}
