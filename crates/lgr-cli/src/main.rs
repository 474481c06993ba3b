//! lgr Command-Line Interface
//!
//! Routes circuits stored as JSON onto the heavy graph of their interaction
//! graph.
//!
//! ```text
//! lgr route -i circuit.json -o routed.json --report table
//! lgr stats -i circuit.json
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{route, stats, version};

/// lgr - line-graph qubit routing
#[derive(Parser)]
#[command(name = "lgr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a circuit and print a summary
    Route {
        /// Input file (JSON)
        #[arg(short, long)]
        input: String,

        /// Output file for the routed circuit (JSON)
        #[arg(short, long)]
        output: Option<String>,

        /// Summary format
        #[arg(long, value_enum, env = "LGR_REPORT", default_value = "table")]
        report: ReportFormat,
    },

    /// Print metrics of a circuit without routing it
    Stats {
        /// Input file (JSON)
        #[arg(short, long)]
        input: String,
    },

    /// Show version information
    Version,
}

/// How `route` prints its summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Route {
            input,
            output,
            report,
        } => route::execute(&input, output.as_deref(), report),

        Commands::Stats { input } => stats::execute(&input),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
