//! lem-in core - ant farm routing engine
//!
//! This crate moves a number of ants from a start room to an end room in as
//! few turns as possible, with at most one ant per intermediate room per turn:
//! - Farm model and description parser
//! - Route enumeration (breadth-first and depth-first)
//! - Farm reduction and disjoint-group search under a time limit
//! - Ant distribution, plan scoring and selection
//! - Turn simulation producing the move log

pub mod config;
pub mod cost;
pub mod distribution;
pub mod error;
pub mod farm;
pub mod groups;
pub mod parse;
pub mod paths;
pub mod reduce;
pub mod simulate;
pub mod solver;

// Re-exports for convenient access
pub use config::{RouteStrategy, SolverConfig};
pub use cost::{evaluate, select_best, Plan, PlanCost};
pub use distribution::{distribute, Distribution};
pub use error::{FarmError, ParseError, SimulationError, SolveError};
pub use farm::{Farm, FarmBuilder, Room, RoomId};
pub use groups::{Group, GroupSearch, SearchOutcome};
pub use parse::parse_farm;
pub use paths::{all_routes_bfs, all_routes_dfs, shortest_route, Route};
pub use reduce::reduce;
pub use simulate::{simulate, AntId, AntMove, MoveLog, Simulation, SimulationOutcome};
pub use solver::{solve, Solution, Solver};
