//! Stats command implementation.

use std::collections::BTreeSet;

use anyhow::Result;
use console::style;

use super::common::{load_circuit, print_metrics};

/// Execute the stats command.
pub fn execute(input: &str) -> Result<()> {
    let circuit = load_circuit(input)?;

    println!(
        "{} {} ({})",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        input
    );
    print_metrics("Circuit", &circuit);

    let counts = circuit.count_ops();
    if !counts.is_empty() {
        println!("  Operations:");
        for (name, count) in &counts {
            println!("    {:<10} {:>6}", style(name).cyan(), count);
        }
    }

    let symbolic = circuit
        .iter()
        .filter(|inst| inst.parameters().iter().any(|p| p.is_symbolic()))
        .count();
    if symbolic > 0 {
        let symbols: BTreeSet<&str> = circuit
            .iter()
            .flat_map(|inst| inst.parameters())
            .flat_map(|p| p.symbols())
            .collect();
        let names: Vec<&str> = symbols.into_iter().collect();
        println!(
            "  Symbolic: {} ops over {}",
            symbolic,
            style(names.join(", ")).yellow()
        );
    }

    Ok(())
}
