//! High-level circuit builder API.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::dag::CircuitDag;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// A quantum circuit: an ordered list of instructions over a register of
/// `num_qubits` wires numbered `0..num_qubits`.
///
/// Every instruction is validated on insertion, so a `Circuit` never holds
/// an instruction that addresses a wire outside the register or repeats a
/// wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Size of the wire register.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            num_qubits: 0,
            instructions: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            num_qubits,
            ..Self::new(name)
        }
    }

    /// Build a circuit from instructions, validating each one.
    pub fn from_instructions(
        name: impl Into<String>,
        num_qubits: u32,
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> IrResult<Self> {
        let mut circuit = Self::with_size(name, num_qubits);
        for inst in instructions {
            circuit.apply(inst)?;
        }
        Ok(circuit)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(self.num_qubits);
        self.num_qubits += 1;
        id
    }

    /// Append an instruction after validating its operands.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            _ => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected,
                    got,
                });
            }
        }

        if instruction.is_pad() && instruction.qubits.len() != 2 {
            return Err(IrError::QubitCountMismatch {
                gate_name: "pad".into(),
                expected: 2,
                got: instruction.qubits.len() as u32,
            });
        }

        let mut seen = BTreeSet::new();
        for &qubit in &instruction.qubits {
            if qubit.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// The same instructions on a register of `num_qubits` wires.
    ///
    /// Growing adds idle wires at the end. Shrinking fails if an
    /// instruction would lose one of its wires.
    pub fn resized(&self, num_qubits: u32) -> IrResult<Self> {
        let required = self.max_qubit().map_or(0, |q| q.0 + 1);
        if num_qubits < required {
            return Err(IrError::RegisterTooSmall {
                required,
                requested: num_qubits,
            });
        }
        Ok(Self {
            name: self.name.clone(),
            num_qubits,
            instructions: self.instructions.clone(),
        })
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CZ, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::swap(q1, q2))
    }

    /// Apply controlled-phase gate.
    pub fn cp(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CP(theta.into()),
            control,
            target,
        ))
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::RZZ(theta.into()),
            q1,
            q2,
        ))
    }

    /// Join `q1` and `q2` in the coupling graph without acting on them.
    pub fn pad(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::pad(q1, q2))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply Toffoli (CCX) gate.
    pub fn ccx(&mut self, c1: QubitId, c2: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(StandardGate::CCX, [c1, c2, target]))
    }

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Reset a qubit to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::reset(qubit))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    // =========================================================================
    // Accessors and metrics
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over instructions in program order.
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Highest wire index used by any instruction.
    pub fn max_qubit(&self) -> Option<QubitId> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.qubits.iter().copied())
            .max()
    }

    /// Wires touched by at least one instruction, ascending.
    pub fn active_qubits(&self) -> BTreeSet<QubitId> {
        self.instructions
            .iter()
            .flat_map(|inst| inst.qubits.iter().copied())
            .collect()
    }

    /// Number of instructions per name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of SWAP gates.
    pub fn count_swaps(&self) -> usize {
        self.instructions.iter().filter(|inst| inst.is_swap()).count()
    }

    /// Length of the longest per-wire dependency chain.
    pub fn depth(&self) -> usize {
        self.to_dag().depth()
    }

    /// Build the wire-dependency DAG of this circuit.
    pub fn to_dag(&self) -> CircuitDag {
        CircuitDag::from_circuit(self)
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit (without measurement).
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_size("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit: a CX chain along a line.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        Ok(circuit)
    }

    /// Create a QFT circuit, whose interactions are all-to-all.
    pub fn qft(n: u32) -> IrResult<Self> {
        use std::f64::consts::PI;

        if n == 0 {
            return Ok(Self::new("qft_0"));
        }

        let mut circuit = Self::with_size("qft", n);
        for i in 0..n {
            circuit.h(QubitId(i))?;
            for j in (i + 1)..n {
                let k = j - i;
                let angle = PI / f64::from(1u32 << k.min(31));
                circuit.cp(angle, QubitId(j), QubitId(i))?;
            }
        }
        for i in 0..n / 2 {
            circuit.swap(QubitId(i), QubitId(n - 1 - i))?;
        }
        Ok(circuit)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_add_qubit() {
        let mut circuit = Circuit::with_size("test", 2);
        assert_eq!(circuit.add_qubit(), QubitId(2));
        assert_eq!(circuit.num_qubits(), 3);
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.len(), 2);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.count_ops()["cx"], 4);
        assert_eq!(circuit.depth(), 5);
    }

    #[test]
    fn test_qft_counts() {
        let circuit = Circuit::qft(4).unwrap();
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 4);
        assert_eq!(counts["cp"], 6);
        assert_eq!(circuit.count_swaps(), 2);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .rz(PI / 2.0, QubitId(1))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 2);
        assert_eq!(circuit.active_qubits().len(), 2);
    }

    #[test]
    fn test_rejects_unknown_qubit() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(QubitId(0), QubitId(7)).unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitNotFound {
                qubit: QubitId(7),
                ..
            }
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_qubit() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { .. }));
    }

    #[test]
    fn test_rejects_arity_mismatch() {
        let mut circuit = Circuit::with_size("test", 2);
        let err = circuit
            .apply(Instruction::gate(StandardGate::CX, [QubitId(0)]))
            .unwrap_err();
        match err {
            IrError::QubitCountMismatch {
                gate_name,
                expected,
                got,
            } => {
                assert_eq!(gate_name, "cx");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
            }
            other => panic!("Expected QubitCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_resized() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit.cx(QubitId(0), QubitId(2)).unwrap();

        let grown = circuit.resized(6).unwrap();
        assert_eq!(grown.num_qubits(), 6);
        assert_eq!(grown.instructions(), circuit.instructions());

        assert!(matches!(
            circuit.resized(2),
            Err(IrError::RegisterTooSmall {
                required: 3,
                requested: 2
            })
        ));
    }

    #[test]
    fn test_serializes_to_json() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit.pad(QubitId(0), QubitId(1)).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        assert!(json.contains("\"num_qubits\":2"));
        assert!(json.contains("Pad"));
    }
}
