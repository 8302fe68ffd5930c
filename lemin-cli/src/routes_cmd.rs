//! Routes command - inspect the routes and disjoint groups of a farm

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use lemin_core::paths::enumerate_routes;
use lemin_core::{evaluate, Farm, GroupSearch, Plan, Route, RouteStrategy, SolverConfig};

use crate::input::load_farm;

#[derive(Args)]
pub struct RoutesArgs {
    /// Farm description file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Route enumeration order (bfs or dfs)
    #[arg(long, default_value = "bfs")]
    pub strategy: RouteStrategy,

    /// Show at most this many routes
    #[arg(long)]
    pub limit: Option<usize>,

    /// Also list every disjoint group with its predicted cost
    #[arg(long)]
    pub groups: bool,

    /// Stop the group search after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,
}

pub fn run(args: RoutesArgs) -> Result<()> {
    let (_, farm) = load_farm(&args.file)?;

    let routes = enumerate_routes(&farm, args.strategy, args.limit);
    println!("{} routes ({:?})", routes.len(), args.strategy);
    for (i, route) in routes.iter().enumerate() {
        println!("{:>4}  {}", i + 1, format_route(&farm, route));
    }

    if args.groups {
        let mut config = SolverConfig::default().with_strategy(args.strategy);
        if let Some(ms) = args.time_limit_ms {
            config = config.with_time_limit_ms(ms);
        }
        let plans = candidate_plans(&farm, &config);

        println!();
        println!("{} groups", plans.len());
        for plan in &plans {
            println!(
                "turns {:>4}  weighted {:>5}  ants {:?}",
                plan.cost.turns,
                plan.cost.weighted_length,
                plan.distribution.counts()
            );
            for route in plan.group.routes() {
                println!("      {}", format_route(&farm, route));
            }
        }
    }
    Ok(())
}

/// Every group the search finds, scored and sorted fastest first
fn candidate_plans(farm: &Farm, config: &SolverConfig) -> Vec<Plan> {
    let outcome = GroupSearch::new(config, farm.ants(), config.deadline()).search(farm);
    if outcome.truncated {
        tracing::warn!("group search stopped at the time limit");
    }

    let mut plans: Vec<Plan> = outcome
        .groups
        .into_iter()
        .filter(|group| !group.is_empty() && group.len() <= farm.ants())
        .map(|group| evaluate(group, farm.ants()))
        .collect();
    plans.sort_by_key(|plan| plan.cost);
    plans
}

fn format_route(farm: &Farm, route: &Route) -> String {
    let mut names = vec![farm.name(farm.start())];
    names.extend(route.names(farm));
    names.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lemin_core::parse_farm;

    #[test]
    fn test_candidate_plans_sorted() {
        let farm = parse_farm("4\n##start\ns 0 0\na 1 0\nb 1 1\nc 2 1\n##end\ne 3 0\ns-a\na-e\ns-b\nb-c\nc-e\n").unwrap();
        let plans = candidate_plans(&farm, &SolverConfig::default());

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].group.len(), 2);
        assert_eq!(plans[0].cost.turns, 4);
        assert!(plans.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn test_format_route() {
        let farm = parse_farm("1\n##start\ns 0 0\n##end\ne 1 1\ns-e\n").unwrap();
        let route = Route::new(vec![farm.end()]);
        assert_eq!(format_route(&farm, &route), "s -> e");
    }
}
