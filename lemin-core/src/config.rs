//! Solver configuration

use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Route enumeration order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteStrategy {
    /// Breadth-first, shortest routes first
    #[default]
    Bfs,
    /// Depth-first backtracking
    Dfs,
}

impl FromStr for RouteStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(RouteStrategy::Bfs),
            "dfs" => Ok(RouteStrategy::Dfs),
            other => Err(format!("unknown route strategy: {other} (expected bfs or dfs)")),
        }
    }
}

/// Configuration for one optimisation pass
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Route enumeration order
    pub strategy: RouteStrategy,
    /// Optional time limit for the group search in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Consider at most this many routes per expansion (in enumeration order)
    pub max_routes: Option<usize>,
    /// Explore top-level branches on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
    /// Record the greedy shortest-route plans before the exhaustive search
    pub seed_plans: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: RouteStrategy::Bfs,
            time_limit_ms: None,
            max_routes: None,
            parallel: false,
            seed_plans: true,
        }
    }
}

impl SolverConfig {
    /// Set the search time limit
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Set the enumeration strategy
    pub fn with_strategy(mut self, strategy: RouteStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Cap the routes considered per expansion
    pub fn with_max_routes(mut self, max_routes: usize) -> Self {
        self.max_routes = Some(max_routes);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed_plans(mut self, seed_plans: bool) -> Self {
        self.seed_plans = seed_plans;
        self
    }

    /// Absolute deadline for a pass starting now
    pub fn deadline(&self) -> Option<Instant> {
        self.time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms))
    }
}
