//! Register sizing for the heavy graph.

use lgr_ir::Circuit;
use tracing::debug;

use crate::error::{RouteError, RouteResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Resizes the register to address every heavy-graph node.
///
/// Operations keep their wires; the wires standing for cells start idle.
pub struct RegisterResize;

impl Pass for RegisterResize {
    fn name(&self) -> &'static str {
        "RegisterResize"
    }

    fn kind(&self) -> PassKind {
        PassKind::Transformation
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let heavy = properties
            .heavy_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("heavy_graph"))?;

        let size = heavy.register_size()?;
        debug!("Resizing register from {} to {}", circuit.num_qubits(), size);
        *circuit = circuit.resized(size)?;
        Ok(())
    }
}
