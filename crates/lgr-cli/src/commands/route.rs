//! Route command implementation.

use anyhow::{Context, Result};
use console::style;

use lgr_route::{RoutingReport, route_with_report};

use super::common::{load_circuit, print_metrics, save_circuit};
use crate::ReportFormat;

/// Execute the route command.
pub fn execute(input: &str, output: Option<&str>, format: ReportFormat) -> Result<()> {
    let circuit = load_circuit(input)?;

    let (routed, report) =
        route_with_report(&circuit).with_context(|| format!("Failed to route {input}"))?;

    match format {
        ReportFormat::Table => print_table(input, &circuit, &routed, &report),
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    if let Some(path) = output {
        save_circuit(&routed, path)?;
        if format == ReportFormat::Table {
            println!("  Output: {}", style(path).green());
        }
    }

    Ok(())
}

fn print_table(
    input: &str,
    circuit: &lgr_ir::Circuit,
    routed: &lgr_ir::Circuit,
    report: &RoutingReport,
) {
    println!(
        "{} Routed {} ({} heavy-graph nodes, {} lone leaves)",
        style("✓").green().bold(),
        style(input).green(),
        report.heavy_nodes,
        report.lone_leaves
    );
    print_metrics("Input", circuit);
    print_metrics("Output", routed);

    let stats = &report.stats;
    println!("  Passes:");
    println!("    swaps inserted         {:>6}", stats.swaps_inserted);
    println!("    pads consumed          {:>6}", stats.pads_consumed);
    println!("    lone-leaf swaps        {:>6}", stats.lone_leaf_swaps_dropped);
    println!("    double swaps cancelled {:>6}", stats.double_swaps_cancelled);
    println!("    outer swaps removed    {:>6}", stats.outer_swaps_removed);
    println!("    idle wires removed     {:>6}", stats.idle_wires_removed);
    println!(
        "  Swap overhead: {}",
        style(format!("{:.2}", report.swap_overhead())).yellow()
    );
}
