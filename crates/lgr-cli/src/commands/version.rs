//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - line-graph qubit routing",
        style("lgr").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  lgr-ir     Circuit intermediate representation");
    println!("  lgr-route  Line-graph routing passes");
    println!("  lgr-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
