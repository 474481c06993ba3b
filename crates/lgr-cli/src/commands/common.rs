//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};
use tracing::debug;

use lgr_ir::{Circuit, Instruction};

/// On-disk JSON form of a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitFile {
    /// Circuit name.
    pub name: String,
    /// Register size.
    pub num_qubits: u32,
    /// Operations in program order.
    pub instructions: Vec<Instruction>,
}

impl CircuitFile {
    /// Validate and build the circuit.
    pub fn into_circuit(self) -> Result<Circuit> {
        let name = self.name.clone();
        Circuit::from_instructions(self.name, self.num_qubits, self.instructions)
            .with_context(|| format!("Invalid circuit '{name}'"))
    }
}

impl From<&Circuit> for CircuitFile {
    fn from(circuit: &Circuit) -> Self {
        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            instructions: circuit.instructions().to_vec(),
        }
    }
}

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &str) -> Result<Circuit> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }

    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
    let file: CircuitFile = serde_json::from_str(&source)
        .with_context(|| format!("Failed to parse circuit JSON: {path}"))?;
    debug!(
        "Loaded '{}' from {}: {} qubits, {} instructions",
        file.name,
        path,
        file.num_qubits,
        file.instructions.len()
    );
    file.into_circuit()
}

/// Save a circuit to a JSON file.
pub fn save_circuit(circuit: &Circuit, path: &str) -> Result<()> {
    let content = serde_json::to_string_pretty(&CircuitFile::from(circuit))
        .context("Failed to serialize circuit")?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {path}"))?;
    debug!("Wrote '{}' to {}", circuit.name(), path);
    Ok(())
}

/// Print circuit metrics in a table format (shared by route and stats).
pub fn print_metrics(label: &str, circuit: &Circuit) {
    println!(
        "  {:<8} {} qubits, {} ops, depth {}, {} swaps",
        style(label).bold(),
        circuit.num_qubits(),
        circuit.len(),
        circuit.depth(),
        circuit.count_swaps()
    );
}
