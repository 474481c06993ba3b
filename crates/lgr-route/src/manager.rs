//! Pass manager for orchestrating routing.

use tracing::{debug, info, instrument};

use lgr_ir::Circuit;

use crate::error::RouteResult;
use crate::pass::Pass;
use crate::passes::{
    CouplingGraphExtraction, DoubleSwapCancellation, HeavyGraphConstruction, IdleWireRemoval,
    LabelFix, LineGraphInversion, LineGraphRouting, LoneLeafElimination, OuterSwapRemoval,
    RegisterResize,
};
use crate::property::PropertySet;

/// Manages and executes a sequence of routing passes.
///
/// Passes run strictly in order; the first failure aborts the run and leaves
/// the circuit as the last successful pass produced it.
pub struct PassManager {
    /// The passes to execute, in order.
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Create a new empty pass manager.
    pub fn new() -> Self {
        Self { passes: vec![] }
    }

    /// The full line-graph routing pipeline.
    pub fn line_graph_routing() -> Self {
        let mut pm = Self::new();
        pm.add_pass(CouplingGraphExtraction);
        pm.add_pass(LineGraphInversion);
        pm.add_pass(HeavyGraphConstruction);
        pm.add_pass(RegisterResize);
        pm.add_pass(LineGraphRouting);
        pm.add_pass(LoneLeafElimination);
        pm.add_pass(LabelFix);
        pm.add_pass(DoubleSwapCancellation);
        pm.add_pass(OuterSwapRemoval);
        pm.add_pass(IdleWireRemoval);
        pm
    }

    /// Add a pass to the manager.
    pub fn add_pass(&mut self, pass: impl Pass + 'static) {
        self.passes.push(Box::new(pass));
    }

    /// Names of the passes, in execution order.
    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run all passes on the given circuit.
    #[instrument(skip(self, circuit, properties), fields(circuit = circuit.name()))]
    pub fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> RouteResult<()> {
        info!(
            "Running pass manager with {} passes on circuit with {} qubits",
            self.passes.len(),
            circuit.num_qubits()
        );

        for pass in &self.passes {
            debug!("Running pass: {} ({:?})", pass.name(), pass.kind());
            pass.run(circuit, properties)?;
            debug!(
                "Pass {} completed, qubits: {}, ops: {}",
                pass.name(),
                circuit.num_qubits(),
                circuit.len()
            );
        }

        info!(
            "Pass manager completed, qubits: {}, ops: {}, swaps: {}",
            circuit.num_qubits(),
            circuit.len(),
            circuit.count_swaps()
        );

        Ok(())
    }

    /// Get the number of passes.
    pub fn len(&self) -> usize {
        self.passes.len()
    }

    /// Check if the manager has no passes.
    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

impl Default for PassManager {
    fn default() -> Self {
        Self::new()
    }
}
