//! Full optimisation pass: routes, groups, selection, simulation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: [`Solver::solve`] - orchestration
//! - Level 2: candidate collection, plan selection, simulation
//! - Level 3: group search, distribution, cost (see the sibling modules)

use std::time::Instant;

use serde::Serialize;

use crate::config::SolverConfig;
use crate::cost::{select_best, Plan, PlanCost};
use crate::distribution::Distribution;
use crate::error::SolveError;
use crate::farm::Farm;
use crate::groups::{seed_groups, Group, GroupSearch, SearchOutcome};
use crate::simulate::{simulate, MoveLog};

/// Everything one pass produces
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Chosen routes
    pub group: Group,
    /// Ants per route of `group`
    pub distribution: Distribution,
    /// Score predicted by the cost model
    pub cost: PlanCost,
    /// Moves made in each turn
    pub moves: MoveLog,
    /// Turns the simulation took
    pub turns: usize,
    /// Candidate groups evaluated
    pub candidates: usize,
    /// The time limit cut the group search short
    pub truncated: bool,
}

impl Solution {
    /// Room names of each chosen route
    pub fn route_names<'a>(&self, farm: &'a Farm) -> Vec<Vec<&'a str>> {
        self.group
            .routes()
            .iter()
            .map(|route| route.names(farm))
            .collect()
    }
}

/// Solver for one farm layout
pub struct Solver {
    pub config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Pick the fastest plan for `farm` and simulate it
    pub fn solve(&self, farm: &Farm) -> Result<Solution, SolveError> {
        let started = Instant::now();
        let deadline = self.config.deadline();
        let ants = farm.ants();

        let candidates = self.collect_candidates(farm, deadline);
        let candidate_count = candidates.groups.len();

        let Plan {
            group,
            distribution,
            cost,
        } = select_best(candidates.groups, ants).ok_or(SolveError::NoRoute)?;

        tracing::info!(
            routes = group.len(),
            predicted_turns = cost.turns,
            candidates = candidate_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "plan selected"
        );

        let outcome = simulate(farm, &group, &distribution)?;
        if outcome.turns != cost.turns {
            tracing::warn!(
                predicted = cost.turns,
                simulated = outcome.turns,
                "simulation disagrees with the cost model"
            );
        }

        Ok(Solution {
            group,
            distribution,
            cost,
            moves: outcome.moves,
            turns: outcome.turns,
            candidates: candidate_count,
            truncated: candidates.truncated,
        })
    }

    /// Greedy seeds first, then every group the search reaches in time
    fn collect_candidates(&self, farm: &Farm, deadline: Option<Instant>) -> SearchOutcome {
        let ants = farm.ants();
        let mut groups = if self.config.seed_plans {
            seed_groups(farm, ants)
        } else {
            Vec::new()
        };

        let search = GroupSearch::new(&self.config, ants, deadline).search(farm);
        if search.truncated {
            tracing::warn!(
                time_limit_ms = self.config.time_limit_ms,
                found = search.groups.len(),
                "group search hit the time limit, using the best plan found so far"
            );
        }

        let (expansions, truncated) = (search.expansions, search.truncated);
        groups.extend(search.groups);
        SearchOutcome {
            groups,
            expansions,
            truncated,
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

/// Solve with the default configuration
pub fn solve(farm: &Farm) -> Result<Solution, SolveError> {
    Solver::default().solve(farm)
}
