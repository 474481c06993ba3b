//! Final register compaction.

use lgr_ir::{Circuit, QubitId};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::RouteResult;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Drops every wire no operation touches, keeping the others in order.
pub struct IdleWireRemoval;

impl Pass for IdleWireRemoval {
    fn name(&self) -> &'static str {
        "IdleWireRemoval"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    #[allow(clippy::cast_possible_truncation)]
    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let active = circuit.active_qubits();
        let removed = circuit.num_qubits() as usize - active.len();
        if removed == 0 {
            return Ok(());
        }

        let compact: FxHashMap<QubitId, QubitId> = active
            .into_iter()
            .enumerate()
            .map(|(i, q)| (q, QubitId(i as u32)))
            .collect();
        debug!(
            "Removing {} idle wires, {} remain",
            removed,
            compact.len()
        );

        *circuit = Circuit::from_instructions(
            circuit.name(),
            compact.len() as u32,
            circuit
                .iter()
                .map(|inst| inst.map_qubits(|q| compact.get(&q).copied().unwrap_or(q))),
        )?;
        properties.stats.idle_wires_removed += removed;
        Ok(())
    }
}
