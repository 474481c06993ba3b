//! Line-Graph Routing for Quantum Circuits
//!
//! This crate maps the two-qubit interactions of a circuit onto a connectivity
//! graph on which every interaction is between neighbours. It treats the
//! circuit's interaction graph as the line graph of some root graph and routes
//! on the "heavy" graph of that root: each wire sits on a root edge and two
//! interacting wires always meet in the cell node they share.
//!
//! # Architecture
//!
//! ```text
//! Input Circuit
//!       │
//!       ▼
//! ┌─────────────┐
//! │ PassManager │ ◄── PropertySet (coupling, root and heavy graphs, stats)
//! └─────────────┘
//!       │
//!       ├── CouplingGraphExtraction / LineGraphInversion / HeavyGraphConstruction
//!       ├── RegisterResize
//!       ├── LineGraphRouting
//!       ├── LoneLeafElimination / LabelFix
//!       ├── DoubleSwapCancellation / OuterSwapRemoval
//!       └── IdleWireRemoval
//!       │
//!       ▼
//! Routed Circuit
//! ```
//!
//! # Example
//!
//! ```rust
//! use lgr_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("path", 3);
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(1), QubitId(2)).unwrap();
//!
//! let routed = lgr_route::route(&circuit).unwrap();
//! assert_eq!(routed.num_qubits(), 3);
//! assert_eq!(routed.count_swaps(), 0);
//! ```
//!
//! Circuits whose interactions fall apart into separate groups must be
//! bridged with a `pad`, which the router consumes:
//!
//! ```rust
//! use lgr_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("split", 4);
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//! circuit.cx(QubitId(2), QubitId(3)).unwrap();
//! assert!(lgr_route::route(&circuit).is_err());
//!
//! circuit.pad(QubitId(1), QubitId(2)).unwrap();
//! let (routed, report) = lgr_route::route_with_report(&circuit).unwrap();
//! assert!(routed.iter().all(|inst| !inst.is_pad()));
//! assert_eq!(report.stats.pads_consumed, 1);
//! ```
//!
//! # Custom Pipelines
//!
//! Implement the [`Pass`] trait to run extra passes alongside the built-in
//! ones:
//!
//! ```rust
//! use lgr_ir::Circuit;
//! use lgr_route::{Pass, PassKind, PropertySet, RouteResult};
//!
//! struct CountOnly;
//!
//! impl Pass for CountOnly {
//!     fn name(&self) -> &'static str { "CountOnly" }
//!     fn kind(&self) -> PassKind { PassKind::Analysis }
//!
//!     fn run(&self, _circuit: &mut Circuit, _props: &mut PropertySet) -> RouteResult<()> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod coupling;
pub mod error;
pub mod heavy;
pub mod line_graph;
pub mod manager;
pub mod pass;
pub mod property;
pub mod report;

// Built-in passes
pub mod passes;

use lgr_ir::Circuit;
use tracing::{info, instrument};

pub use coupling::CouplingGraph;
pub use error::{RouteError, RouteResult};
pub use heavy::{HeavyGraph, HeavyNode};
pub use line_graph::{Cell, CellId, RootGraph};
pub use manager::PassManager;
pub use pass::{Pass, PassKind};
pub use property::{PropertySet, RoutingStats};
pub use report::RoutingReport;

/// Route `circuit` on the heavy graph of its interaction graph.
///
/// The input is left untouched. Fails without partial output if any stage
/// rejects the circuit.
pub fn route(circuit: &Circuit) -> RouteResult<Circuit> {
    route_with_report(circuit).map(|(routed, _)| routed)
}

/// Route `circuit` and summarise what the pipeline did.
#[instrument(skip(circuit), fields(circuit = circuit.name(), qubits = circuit.num_qubits()))]
pub fn route_with_report(circuit: &Circuit) -> RouteResult<(Circuit, RoutingReport)> {
    let mut routed = circuit.clone();
    let mut props = PropertySet::new();
    PassManager::line_graph_routing().run(&mut routed, &mut props)?;

    let report = RoutingReport::new(circuit, &routed, &props);
    info!(
        "Routed {} qubits onto {}, {} swaps remaining",
        report.input_qubits, report.output_qubits, report.swaps
    );
    Ok((routed, report))
}
