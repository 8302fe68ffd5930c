//! lem-in CLI - Command-line interface
//!
//! Commands:
//! - solve: Move every ant to the end room and print the moves
//! - routes: List the routes and disjoint groups of a farm

mod input;
mod routes_cmd;
mod solve_cmd;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lem-in")]
#[command(about = "Move an ant colony through a farm in as few turns as possible")]
struct Cli {
    /// Log search progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a farm and print the moves
    Solve(solve_cmd::SolveArgs),
    /// List routes and disjoint groups
    Routes(routes_cmd::RoutesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Solve(args) => solve_cmd::run(args),
        Commands::Routes(args) => routes_cmd::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout only carries the move log
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
