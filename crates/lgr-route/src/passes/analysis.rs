//! Analysis passes deriving the graphs routing runs on.

use lgr_ir::Circuit;
use tracing::debug;

use crate::coupling::CouplingGraph;
use crate::error::{RouteError, RouteResult};
use crate::heavy::HeavyGraph;
use crate::line_graph::RootGraph;
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Extracts the coupling graph of the circuit.
pub struct CouplingGraphExtraction;

impl Pass for CouplingGraphExtraction {
    fn name(&self) -> &'static str {
        "CouplingGraphExtraction"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let coupling = CouplingGraph::from_circuit(circuit)?;
        debug!(
            "Coupling graph: {} wires, {} edges",
            coupling.num_wires(),
            coupling.num_edges()
        );
        properties.coupling_graph = Some(coupling);
        Ok(())
    }
}

/// Reconstructs the root graph of the coupling graph.
pub struct LineGraphInversion;

impl Pass for LineGraphInversion {
    fn name(&self) -> &'static str {
        "LineGraphInversion"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, _circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let coupling = properties
            .coupling_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("coupling_graph"))?;

        let root = RootGraph::invert(coupling)?;
        properties.root_graph = Some(root);
        Ok(())
    }
}

/// Builds and labels the heavy graph.
pub struct HeavyGraphConstruction;

impl Pass for HeavyGraphConstruction {
    fn name(&self) -> &'static str {
        "HeavyGraphConstruction"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, _circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        let root = properties
            .root_graph
            .as_ref()
            .ok_or(RouteError::MissingProperty("root_graph"))?;

        let heavy = HeavyGraph::from_root(root)?;
        let size = heavy.register_size()?;
        debug!(
            "Heavy graph: {} nodes, register size {}",
            heavy.num_nodes(),
            size
        );
        properties.heavy_graph = Some(heavy);
        Ok(())
    }
}
