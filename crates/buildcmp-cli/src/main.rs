//! buildcmp CLI
//!
//! Command-line interface for comparing the outcomes of two builds

use buildcmp_core::logging_facility::{self, Profile};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "buildcmp")]
#[command(about = "buildcmp - Compare the outcomes of two builds", long_about = None)]
struct Cli {
    /// Logging profile: dev (human-readable) or prod (JSON)
    #[arg(long, global = true, default_value = "dev")]
    log_profile: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compare a source build against a target build and write a report
    Compare(commands::compare::CompareArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_profile);

    let result = match cli.command {
        Commands::Compare(args) => commands::compare::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
