//! # redeem CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::Parser;

use redeem_cli::inspect::{self, KeyArgs, ValidateArgs};
use redeem_cli::run::{self, RunArgs};

/// Prize redemption wizard: validation, masking, and simulated redemptions.
#[derive(Parser, Debug)]
#[command(name = "redeem", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Check a value against a field validator.
    Validate(ValidateArgs),
    /// Print the masked form of a payment key.
    Mask(KeyArgs),
    /// Print the formatted form of a payment key.
    Format(KeyArgs),
    /// Run a simulated redemption end to end.
    Run(RunArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => {
            let report = inspect::run_validate(&args);
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Mask(args) => println!("{}", inspect::run_mask(&args)),
        Commands::Format(args) => println!("{}", inspect::run_format(&args)),
        Commands::Run(args) => {
            // Single-threaded: all session timers share one executor.
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let record = runtime.block_on(run::execute(args))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
