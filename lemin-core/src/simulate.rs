//! Turn-by-turn movement of ants along a plan
//!
//! Ants on the same route leave one turn apart: the `i`-th ant of a route
//! waits `i` turns before its first move. Every turn each ant still on its
//! way tries one step, in ascending id order. The end room takes any number
//! of ants. Any other room can be claimed by only one ant per turn; an ant
//! whose target was already claimed this turn stays put and retries.

use std::fmt::Write as _;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::SimulationError;
use crate::farm::{Farm, RoomId};
use crate::groups::Group;
use crate::paths::Route;

/// Ant identifier, starting at 1
pub type AntId = usize;

// ============================================================================
// MOVE LOG
// ============================================================================

/// One ant entering one room
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AntMove {
    pub ant: AntId,
    pub room: RoomId,
}

/// Moves made in each turn, first turn first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    turns: Vec<Vec<AntMove>>,
}

impl MoveLog {
    pub fn turns(&self) -> &[Vec<AntMove>] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn total_moves(&self) -> usize {
        self.turns.iter().map(Vec::len).sum()
    }

    /// One line per turn of `L<ant>-<room>` tokens
    pub fn render(&self, farm: &Farm) -> String {
        let mut out = String::new();
        for turn in &self.turns {
            let line = turn
                .iter()
                .map(|mv| format!("L{}-{}", mv.ant, farm.name(mv.room)))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "{line}");
        }
        out
    }
}

// ============================================================================
// ANTS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AntState {
    /// Waiting in the start room for this many more turns
    Pending(usize),
    /// Has entered `position` rooms of its route
    Moving(usize),
    Arrived,
}

#[derive(Clone, Debug)]
struct Ant {
    id: AntId,
    route: usize,
    state: AntState,
}

/// Result of a completed simulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationOutcome {
    pub moves: MoveLog,
    pub turns: usize,
}

// ============================================================================
// SIMULATION
// ============================================================================

/// Movement state for one plan
pub struct Simulation<'a> {
    routes: &'a [Route],
    end: RoomId,
    ants: Vec<Ant>,
    /// Interior rooms entered during the current turn
    claimed: FxHashSet<RoomId>,
    turn: usize,
}

impl<'a> Simulation<'a> {
    /// Place the ants of `distribution` in the start room. Ids are handed out
    /// route by route.
    pub fn new(farm: &Farm, group: &'a Group, distribution: &Distribution) -> Result<Self, SimulationError> {
        if distribution.len() != group.len() {
            return Err(SimulationError::DistributionMismatch {
                routes: group.len(),
                entries: distribution.len(),
            });
        }
        if let Some(route) = group.routes().iter().position(Route::is_empty) {
            return Err(SimulationError::EmptyRoute { route });
        }

        let mut ants = Vec::with_capacity(distribution.total());
        for (route, &count) in distribution.counts().iter().enumerate() {
            for i in 0..count {
                let state = if i == 0 {
                    AntState::Moving(0)
                } else {
                    AntState::Pending(i)
                };
                ants.push(Ant {
                    id: ants.len() + 1,
                    route,
                    state,
                });
            }
        }

        Ok(Self {
            routes: group.routes(),
            end: farm.end(),
            ants,
            claimed: FxHashSet::default(),
            turn: 0,
        })
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.ants.iter().all(|ant| ant.state == AntState::Arrived)
    }

    pub fn unfinished(&self) -> usize {
        self.ants
            .iter()
            .filter(|ant| ant.state != AntState::Arrived)
            .count()
    }

    /// Advance one turn. Returns the moves made and whether any ant changed state.
    pub fn step(&mut self) -> (Vec<AntMove>, bool) {
        self.turn += 1;
        self.claimed.clear();
        let mut moves = Vec::new();
        let mut changed = false;

        for ant in &mut self.ants {
            match ant.state {
                AntState::Arrived => {}
                AntState::Pending(wait) => {
                    ant.state = if wait > 1 {
                        AntState::Pending(wait - 1)
                    } else {
                        AntState::Moving(0)
                    };
                    changed = true;
                }
                AntState::Moving(position) => {
                    let route = self.routes[ant.route].rooms();
                    let target = route[position];
                    if target != self.end && !self.claimed.insert(target) {
                        continue;
                    }

                    ant.state = if position + 1 == route.len() {
                        AntState::Arrived
                    } else {
                        AntState::Moving(position + 1)
                    };
                    moves.push(AntMove { ant: ant.id, room: target });
                    changed = true;
                }
            }
        }

        (moves, changed)
    }

    /// Run until every ant has arrived
    pub fn run(mut self) -> Result<SimulationOutcome, SimulationError> {
        let mut log = MoveLog::default();

        while !self.is_finished() {
            let (moves, changed) = self.step();
            self.check_progress(changed)?;
            log.turns.push(moves);
        }

        Ok(SimulationOutcome {
            turns: self.turn,
            moves: log,
        })
    }

    /// Deadlock when a whole turn changed nothing and ants remain
    fn check_progress(&self, changed: bool) -> Result<(), SimulationError> {
        if changed || self.is_finished() {
            return Ok(());
        }
        Err(SimulationError::Deadlock {
            turn: self.turn,
            unfinished: self.unfinished(),
        })
    }
}

/// Simulate `group` carrying `distribution`
pub fn simulate(farm: &Farm, group: &Group, distribution: &Distribution) -> Result<SimulationOutcome, SimulationError> {
    Simulation::new(farm, group, distribution)?.run()
}

// ============================================================================
// TESTS
// ============================================================================
