mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dashboard::{CashArgs, ConcentrationArgs, SummaryArgs, WaterfallArgs};

/// Financial dashboard queries over a checked-in fixture
#[derive(Parser)]
#[command(
    name = "finboard",
    version,
    about = "Financial dashboard aggregation queries",
    long_about = "Runs the finboard aggregation engine against a JSON fixture: \
                  period summaries with budget and prior-year variance banding, \
                  revenue concentration (HHI), EBITDA bridge waterfalls, and \
                  monthly cash walks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Period totals with variances vs budget and prior year
    Summary(SummaryArgs),
    /// Revenue concentration metrics (HHI, effective streams)
    Concentration(ConcentrationArgs),
    /// EBITDA bridge waterfall steps
    Waterfall(WaterfallArgs),
    /// Monthly cash balance walk
    Cash(CashArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::dashboard::run_summary(args),
        Commands::Concentration(args) => commands::dashboard::run_concentration(args),
        Commands::Waterfall(args) => commands::dashboard::run_waterfall(args),
        Commands::Cash(args) => commands::dashboard::run_cash(args),
        Commands::Version => {
            println!("finboard {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
