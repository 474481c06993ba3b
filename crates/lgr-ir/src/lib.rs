//! Circuit intermediate representation for line-graph routing.
//!
//! This crate provides the circuit data structures the router reads and
//! writes. A [`Circuit`] is an ordered list of validated [`Instruction`]s over
//! a register of wires; a [`CircuitDag`] is the wire-dependency view of it,
//! used by the swap-cleaning passes.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a wire
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   opaque user-defined blocks
//! - **Parameters**: [`ParameterExpression`] for symbolic angles
//! - **Instructions**: [`Instruction`] combining an operation with its wires,
//!   including the routing-only `Pad` placeholder
//! - **DAG**: [`CircuitDag`] with `In`/`Out` marker nodes per wire
//!
//! # Example
//!
//! ```rust
//! use lgr_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! Instructions are immutable values. Moving an operation to other wires
//! creates a new instruction:
//!
//! ```rust
//! use lgr_ir::{Instruction, QubitId};
//!
//! let swap = Instruction::swap(QubitId(0), QubitId(1));
//! let moved = swap.remapped([QubitId(3), QubitId(4)]);
//! assert!(moved.is_swap());
//! assert_eq!(swap.qubits, vec![QubitId(0), QubitId(1)]);
//! ```

pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::ParameterExpression;
pub use qubit::QubitId;
