//! Solve command - move every ant through the farm
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), report()
//! - Level 3: text, JSON and summary output
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use lemin_core::{Farm, RouteStrategy, Solution, Solver, SolverConfig};

use crate::input::{load_config, load_farm};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Farm description file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Solver configuration JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Stop the group search after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Route enumeration order (bfs or dfs)
    #[arg(long)]
    pub strategy: Option<RouteStrategy>,

    /// Consider at most this many routes per search step
    #[arg(long)]
    pub max_routes: Option<usize>,

    /// Explore search branches in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Skip the greedy shortest-route plans
    #[arg(long)]
    pub no_seeds: bool,

    /// Print the farm description before the moves
    #[arg(long)]
    pub echo: bool,

    /// Also write the moves to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print turns, routes and distribution to stderr
    #[arg(long)]
    pub summary: bool,

    /// Output the solution as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// 1. Load the farm and configuration
/// 2. Solve
/// 3. Report the moves
pub fn run(args: SolveArgs) -> Result<()> {
    let (text, farm) = load_farm(&args.file)?;
    let config = build_config(&args)?;

    tracing::info!(
        "Solving {} ({} ants, {} rooms)",
        args.file.display(),
        farm.ants(),
        farm.room_count()
    );

    let solution = Solver::new(config)
        .solve(&farm)
        .with_context(|| format!("solving {}", args.file.display()))?;

    report(&text, &farm, &solution, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configuration file first, then command-line overrides
fn build_config(args: &SolveArgs) -> Result<SolverConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SolverConfig::default(),
    };

    if let Some(ms) = args.time_limit_ms {
        config.time_limit_ms = Some(ms);
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if let Some(max_routes) = args.max_routes {
        config.max_routes = Some(max_routes);
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.no_seeds {
        config.seed_plans = false;
    }

    Ok(config)
}

fn report(text: &str, farm: &Farm, solution: &Solution, args: &SolveArgs) -> Result<()> {
    let moves = solution.moves.render(farm);

    if let Some(path) = &args.output {
        std::fs::write(path, &moves)
            .with_context(|| format!("writing moves to {}", path.display()))?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&json_output(farm, solution))?;
        println!("{json}");
    } else {
        if args.echo {
            println!("{}\n", text.trim_end());
        }
        print!("{moves}");
    }

    if args.summary {
        eprint!("{}", summary(farm, solution));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

#[derive(Serialize)]
struct JsonRoute {
    rooms: Vec<String>,
    ants: usize,
}

#[derive(Serialize)]
struct JsonOutput {
    turns: usize,
    predicted_turns: usize,
    candidates: usize,
    truncated: bool,
    routes: Vec<JsonRoute>,
    moves: Vec<Vec<String>>,
}

fn json_output(farm: &Farm, solution: &Solution) -> JsonOutput {
    JsonOutput {
        turns: solution.turns,
        predicted_turns: solution.cost.turns,
        candidates: solution.candidates,
        truncated: solution.truncated,
        routes: solution
            .route_names(farm)
            .into_iter()
            .enumerate()
            .map(|(i, rooms)| JsonRoute {
                rooms: rooms.into_iter().map(str::to_string).collect(),
                ants: solution.distribution.get(i),
            })
            .collect(),
        moves: solution
            .moves
            .turns()
            .iter()
            .map(|turn| {
                turn.iter()
                    .map(|mv| format!("L{}-{}", mv.ant, farm.name(mv.room)))
                    .collect()
            })
            .collect(),
    }
}

fn summary(farm: &Farm, solution: &Solution) -> String {
    let mut out = format!("Turns: {}\n", solution.turns);
    for (i, rooms) in solution.route_names(farm).iter().enumerate() {
        out.push_str(&format!(
            "Route {} ({} ants): {}\n",
            i + 1,
            solution.distribution.get(i),
            format_route(farm.name(farm.start()), rooms)
        ));
    }
    if solution.truncated {
        out.push_str("Search stopped at the time limit\n");
    }
    out
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn format_route(start: &str, rooms: &[&str]) -> String {
    std::iter::once(start)
        .chain(rooms.iter().copied())
        .collect::<Vec<_>>()
        .join(" -> ")
}
