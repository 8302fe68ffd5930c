//! Disjoint-group search
//!
//! A [`Group`] is a set of routes that share no interior room, so ants on
//! different routes never compete for a room. The search builds every such
//! set (up to one route per ant) by repeatedly picking a route and reducing
//! the farm by it.
//!
//! ## Architecture
//! - Level 2: [`GroupSearch::search`] - root expansion, branch fan-out
//! - Level 3: [`GroupSearch::explore`] - worklist over one branch
//! - Level 4: frame expansion, deadline checks

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::farm::Farm;
use crate::paths::{enumerate_routes, shortest_route, Route};
use crate::reduce::reduce;

// ============================================================================
// GROUP
// ============================================================================

/// Routes that are pairwise disjoint on interior rooms
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    routes: Vec<Route>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group from routes, without checking disjointness
    pub fn from_routes(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Whether `route` shares no interior room with any route of the group
    pub fn is_compatible(&self, route: &Route) -> bool {
        self.routes.iter().all(|member| !member.shares_interior_with(route))
    }

    /// Pairwise disjointness of every route in the group
    pub fn is_disjoint(&self) -> bool {
        self.routes
            .iter()
            .enumerate()
            .all(|(i, a)| self.routes[i + 1..].iter().all(|b| !a.shares_interior_with(b)))
    }

    /// Copy of this group with one more route
    pub fn with_route(&self, route: Route) -> Self {
        let mut routes = Vec::with_capacity(self.routes.len() + 1);
        routes.extend_from_slice(&self.routes);
        routes.push(route);
        Self { routes }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Candidate groups produced by one search
#[derive(Clone, Debug, Default)]
pub struct SearchOutcome {
    /// Candidates in enumeration order
    pub groups: Vec<Group>,
    /// Frames expanded
    pub expansions: usize,
    /// The deadline cut the search short
    pub truncated: bool,
}

impl SearchOutcome {
    fn merge(&mut self, other: SearchOutcome) {
        self.groups.extend(other.groups);
        self.expansions += other.expansions;
        self.truncated |= other.truncated;
    }
}

/// Worklist entry: a reduced farm and the partial group that produced it.
/// Every frame owns its own copies so branches never alias.
#[derive(Clone, Debug)]
struct Frame {
    farm: Farm,
    group: Group,
}

impl Frame {
    /// Whether `route` may extend this frame's group. Routes must rank after
    /// the last chosen one so each set is built exactly once.
    fn accepts(&self, route: &Route, ants: usize) -> bool {
        if self.group.len() + 1 > ants {
            return false;
        }
        if let Some(last) = self.group.routes().last() {
            if route.rank_key() <= last.rank_key() {
                return false;
            }
        }
        self.group.is_compatible(route)
    }
}

/// Exhaustive disjoint-group search bounded by the ant count and an optional deadline
pub struct GroupSearch<'a> {
    config: &'a SolverConfig,
    ants: usize,
    deadline: Option<Instant>,
}

impl<'a> GroupSearch<'a> {
    pub fn new(config: &'a SolverConfig, ants: usize, deadline: Option<Instant>) -> Self {
        Self {
            config,
            ants,
            deadline,
        }
    }

    /// Run the search over `farm`
    pub fn search(&self, farm: &Farm) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        if self.expired() {
            outcome.truncated = true;
            return outcome;
        }

        let root = Frame {
            farm: farm.clone(),
            group: Group::new(),
        };
        outcome.expansions += 1;
        let branches = self.expand(&root, &mut outcome.groups);

        for branch in self.explore_branches(branches) {
            outcome.merge(branch);
        }

        tracing::debug!(
            candidates = outcome.groups.len(),
            expansions = outcome.expansions,
            truncated = outcome.truncated,
            "group search finished"
        );
        outcome
    }

    #[cfg(feature = "parallel")]
    fn explore_branches(&self, branches: Vec<Frame>) -> Vec<SearchOutcome> {
        use rayon::prelude::*;

        if self.config.parallel {
            return branches
                .into_par_iter()
                .map(|frame| self.explore(frame))
                .collect();
        }
        branches.into_iter().map(|frame| self.explore(frame)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn explore_branches(&self, branches: Vec<Frame>) -> Vec<SearchOutcome> {
        if self.config.parallel {
            tracing::debug!("parallel search requested without the `parallel` feature");
        }
        branches.into_iter().map(|frame| self.explore(frame)).collect()
    }

    /// Depth-first worklist over one branch
    fn explore(&self, frame: Frame) -> SearchOutcome {
        let mut outcome = SearchOutcome::default();
        let mut stack = vec![frame];

        while let Some(frame) = stack.pop() {
            if self.expired() {
                outcome.truncated = true;
                break;
            }
            outcome.expansions += 1;

            let children = self.expand(&frame, &mut outcome.groups);
            // reversed so the first child is explored first
            stack.extend(children.into_iter().rev());
        }

        outcome
    }

    /// Record every extension of `frame` and return the frames to explore next
    fn expand(&self, frame: &Frame, groups: &mut Vec<Group>) -> Vec<Frame> {
        if frame.group.len() >= self.ants {
            return Vec::new();
        }

        let mut children = Vec::new();
        for route in enumerate_routes(&frame.farm, self.config.strategy, self.config.max_routes) {
            if !frame.accepts(&route, self.ants) {
                continue;
            }

            let group = frame.group.with_route(route);
            groups.push(group.clone());

            if group.len() < self.ants {
                let farm = reduce(&frame.farm, &group.routes()[group.len() - 1]);
                children.push(Frame { farm, group });
            }
        }
        children
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

// ============================================================================
// GREEDY SEEDS
// ============================================================================

/// Repeatedly take the shortest route and remove it from the farm
pub fn iterative_shortest(farm: &Farm, ants: usize) -> Group {
    let mut group = Group::new();
    let mut current = farm.clone();

    while group.len() < ants {
        let Some(path) = shortest_route(&current, current.start(), current.end()) else {
            break;
        };
        let route = Route::new(path[1..].to_vec());
        current = reduce(&current, &route);
        group = group.with_route(route);
    }

    group
}

/// One shortest route per start neighbor, reducing the farm after each
pub fn per_neighbor_shortest(farm: &Farm, ants: usize) -> Group {
    let mut group = Group::new();
    let mut current = farm.clone();

    for &neighbor in farm.neighbors(farm.start()) {
        if group.len() >= ants {
            break;
        }
        if !current.has_tunnel(current.start(), neighbor) {
            continue;
        }
        let Some(path) = shortest_route(&current, neighbor, current.end()) else {
            continue;
        };
        let route = Route::new(path);
        current = reduce(&current, &route);
        group = group.with_route(route);
    }

    group
}

/// Non-empty greedy plans, in a fixed order
pub fn seed_groups(farm: &Farm, ants: usize) -> Vec<Group> {
    [iterative_shortest(farm, ants), per_neighbor_shortest(farm, ants)]
        .into_iter()
        .filter(|group| !group.is_empty())
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
