//! Route enumeration
//!
//! A [`Route`] lists the rooms an ant enters after leaving the start room,
//! ending with the end room. Two enumeration orders are available and both
//! produce the same set of routes:
//! - [`all_routes_bfs`]: shortest routes first
//! - [`all_routes_dfs`]: depth-first backtracking over neighbor order

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::config::RouteStrategy;
use crate::farm::{Farm, RoomId};

// ============================================================================
// ROUTE
// ============================================================================

/// Simple path from (excluding) the start room to (including) the end room
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    rooms: Vec<RoomId>,
}

impl Route {
    pub fn new(rooms: Vec<RoomId>) -> Self {
        Self { rooms }
    }

    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    /// Number of tunnels crossed, which is also the number of rooms listed
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Rooms other than the final (end) room
    pub fn interior(&self) -> &[RoomId] {
        match self.rooms.split_last() {
            Some((_, interior)) => interior,
            None => &[],
        }
    }

    /// Whether the two routes meet anywhere besides start and end
    pub fn shares_interior_with(&self, other: &Route) -> bool {
        let (short, long) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        short.interior().iter().any(|room| long.interior().contains(room))
    }

    /// Total order used to build each set of routes only once:
    /// shorter first, then by room ids
    pub fn rank_key(&self) -> (usize, &[RoomId]) {
        (self.rooms.len(), &self.rooms)
    }

    pub fn names<'a>(&self, farm: &'a Farm) -> Vec<&'a str> {
        self.rooms.iter().map(|&id| farm.name(id)).collect()
    }
}

// ============================================================================
// ENUMERATION
// ============================================================================

/// Every simple route, shortest first
pub fn all_routes_bfs(farm: &Farm) -> Vec<Route> {
    routes_bfs(farm, None)
}

/// Every simple route, in depth-first order
pub fn all_routes_dfs(farm: &Farm) -> Vec<Route> {
    routes_dfs(farm, None)
}

/// Enumerate with the given strategy, stopping after `limit` routes
pub fn enumerate_routes(farm: &Farm, strategy: RouteStrategy, limit: Option<usize>) -> Vec<Route> {
    match strategy {
        RouteStrategy::Bfs => routes_bfs(farm, limit),
        RouteStrategy::Dfs => routes_dfs(farm, limit),
    }
}

fn routes_bfs(farm: &Farm, limit: Option<usize>) -> Vec<Route> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut routes = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(vec![farm.start()]);

    while let Some(path) = queue.pop_front() {
        if routes.len() >= limit {
            break;
        }

        let current = path[path.len() - 1];
        if current == farm.end() {
            routes.push(Route::new(path[1..].to_vec()));
            continue;
        }

        for &neighbor in farm.neighbors(current) {
            if path.contains(&neighbor) {
                continue;
            }
            let mut extended = Vec::with_capacity(path.len() + 1);
            extended.extend_from_slice(&path);
            extended.push(neighbor);
            queue.push_back(extended);
        }
    }

    routes
}

fn routes_dfs(farm: &Farm, limit: Option<usize>) -> Vec<Route> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut routes = Vec::new();

    // path[i] is being explored through its cursor[i]-th neighbor
    let mut path = vec![farm.start()];
    let mut cursor = vec![0usize];

    while let Some(&current) = path.last() {
        if routes.len() >= limit {
            break;
        }

        if current == farm.end() {
            routes.push(Route::new(path[1..].to_vec()));
            path.pop();
            cursor.pop();
            continue;
        }

        let depth = path.len() - 1;
        match farm.neighbors(current).get(cursor[depth]) {
            Some(&neighbor) => {
                cursor[depth] += 1;
                if !path.contains(&neighbor) {
                    path.push(neighbor);
                    cursor.push(0);
                }
            }
            None => {
                path.pop();
                cursor.pop();
            }
        }
    }

    routes
}

/// One minimum-hop path from `from` to `to`, both included.
///
/// The farm's start room is never used as a thoroughfare unless the search
/// begins there.
pub fn shortest_route(farm: &Farm, from: RoomId, to: RoomId) -> Option<Vec<RoomId>> {
    if !farm.contains(from) || !farm.contains(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut parent: FxHashMap<RoomId, RoomId> = FxHashMap::default();
    let mut queue = VecDeque::from([from]);

    while let Some(current) = queue.pop_front() {
        if current == to {
            let mut path = vec![to];
            let mut step = to;
            while let Some(&previous) = parent.get(&step) {
                path.push(previous);
                step = previous;
            }
            path.reverse();
            return Some(path);
        }

        if current == farm.start() && current != from {
            continue;
        }

        for &neighbor in farm.neighbors(current) {
            if neighbor != from && !parent.contains_key(&neighbor) {
                parent.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{farm_from, route_of};

    fn sorted(mut routes: Vec<Route>) -> Vec<Route> {
        routes.sort_by(|a, b| a.rank_key().cmp(&b.rank_key()));
        routes
    }

    #[test]
    fn test_single_hop_route() {
        let farm = farm_from(1, &["start-end"]);
        let routes = all_routes_bfs(&farm);
        assert_eq!(routes, vec![route_of(&farm, &["end"])]);
        assert_eq!(routes[0].len(), 1);
        assert!(routes[0].interior().is_empty());
    }

    #[test]
    fn test_unreachable_end_gives_no_routes() {
        let farm = farm_from(1, &["start-a", "a-b"]);
        assert!(all_routes_bfs(&farm).is_empty());
        assert!(all_routes_dfs(&farm).is_empty());
    }

    #[test]
    fn test_bfs_orders_by_length() {
        let farm = farm_from(1, &["start-a", "a-b", "b-end", "start-c", "c-end", "a-c"]);
        let routes = all_routes_bfs(&farm);
        for pair in routes.windows(2) {
            assert!(pair[0].len() <= pair[1].len());
        }
        assert_eq!(routes[0], route_of(&farm, &["c", "end"]));
    }

    #[test]
    fn test_bfs_and_dfs_agree() {
        let farm = farm_from(
            1,
            &["start-a", "a-b", "b-end", "start-c", "c-end", "a-c", "c-b", "start-d", "d-b"],
        );
        let bfs = all_routes_bfs(&farm);
        let dfs = all_routes_dfs(&farm);
        assert_eq!(bfs.len(), dfs.len());
        assert_eq!(sorted(bfs), sorted(dfs));
    }

    #[test]
    fn test_routes_are_simple() {
        let farm = farm_from(1, &["start-a", "a-b", "b-c", "c-a", "c-end", "b-end"]);
        for route in all_routes_dfs(&farm) {
            let mut seen = route.rooms().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), route.len());
            assert!(!route.rooms().contains(&farm.start()));
            assert_eq!(route.rooms().last(), Some(&farm.end()));
        }
    }

    #[test]
    fn test_limit_stops_enumeration() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-end", "start-c", "c-end"]);
        assert_eq!(enumerate_routes(&farm, RouteStrategy::Bfs, Some(2)).len(), 2);
        assert_eq!(enumerate_routes(&farm, RouteStrategy::Dfs, Some(1)).len(), 1);
        assert_eq!(enumerate_routes(&farm, RouteStrategy::Dfs, None).len(), 3);
    }

    #[test]
    fn test_shortest_route_avoids_start() {
        // from a, the only short way to end is back through start
        let farm = farm_from(1, &["start-a", "start-end", "a-b", "b-c", "c-end"]);
        let a = farm.room_id("a").unwrap();
        let path = shortest_route(&farm, a, farm.end()).unwrap();
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&farm.start()));
    }

    #[test]
    fn test_shortest_route_from_start() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-c", "c-end"]);
        let path = shortest_route(&farm, farm.start(), farm.end()).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], farm.start());
        assert_eq!(*path.last().unwrap(), farm.end());
    }

    #[test]
    fn test_shortest_route_unreachable() {
        let farm = farm_from(1, &["start-a", "b-end"]);
        assert_eq!(shortest_route(&farm, farm.start(), farm.end()), None);
    }

    #[test]
    fn test_shares_interior() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-a", "start-end"]);
        let direct = route_of(&farm, &["end"]);
        let via_a = route_of(&farm, &["a", "end"]);
        let via_b = route_of(&farm, &["b", "a", "end"]);
        assert!(!direct.shares_interior_with(&via_a));
        assert!(via_a.shares_interior_with(&via_b));
    }
}
