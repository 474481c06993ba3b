//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(Gate),
    /// Two-qubit no-op that only exists to join otherwise disconnected
    /// parts of the coupling graph. Routing consumes it.
    Pad,
    /// Reset qubit to |0⟩.
    Reset,
    /// Barrier (synchronization point).
    Barrier,
    /// Delay instruction.
    Delay {
        /// Duration in device-specific units.
        duration: u64,
    },
}

/// An operation together with the wires it acts on.
///
/// Instructions are values: moving one to other wires goes through
/// [`Instruction::remapped`] or [`Instruction::map_qubits`], which return a
/// new instruction and leave the original untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on, in operand order.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate.into()),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a SWAP instruction.
    pub fn swap(q1: QubitId, q2: QubitId) -> Self {
        Self::two_qubit_gate(StandardGate::Swap, q1, q2)
    }

    /// Create a pad instruction joining `q1` and `q2` in the coupling graph.
    pub fn pad(q1: QubitId, q2: QubitId) -> Self {
        Self {
            kind: InstructionKind::Pad,
            qubits: vec![q1, q2],
        }
    }

    /// Create a reset instruction.
    pub fn reset(qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Reset,
            qubits: vec![qubit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Number of wires this instruction touches.
    #[inline]
    pub fn arity(&self) -> usize {
        self.qubits.len()
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a SWAP gate.
    pub fn is_swap(&self) -> bool {
        matches!(&self.kind, InstructionKind::Gate(g) if g.is_swap())
    }

    /// Check if this is a pad placeholder.
    pub fn is_pad(&self) -> bool {
        matches!(self.kind, InstructionKind::Pad)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Parameters carried by this instruction.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        self.as_gate().map(Gate::parameters).unwrap_or_default()
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Pad => "pad",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Delay { .. } => "delay",
        }
    }

    /// The same operation placed on `qubits`.
    #[must_use]
    pub fn remapped(&self, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: self.kind.clone(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// The same operation with every operand passed through `f`.
    #[must_use]
    pub fn map_qubits(&self, f: impl FnMut(QubitId) -> QubitId) -> Self {
        self.remapped(self.qubits.iter().copied().map(f))
    }

    /// Whether the instruction touches `qubit`.
    #[inline]
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}
