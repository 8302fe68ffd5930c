//! Graph reduction: copy a farm without the rooms of a chosen route

use crate::farm::Farm;
use crate::paths::Route;

/// New farm with every interior room of `route` deleted.
///
/// A direct start-end route has no interior rooms, so the start-end tunnel
/// is removed instead. The input farm is left untouched.
pub fn reduce(farm: &Farm, route: &Route) -> Farm {
    let mut reduced = farm.clone();

    if route.len() == 1 {
        reduced.remove_tunnel(farm.start(), farm.end());
        return reduced;
    }

    for &room in route.interior() {
        reduced.remove_room(room);
    }
    reduced
}

/// Apply [`reduce`] for each route in turn
pub fn reduce_all<'a>(farm: &Farm, routes: impl IntoIterator<Item = &'a Route>) -> Farm {
    routes
        .into_iter()
        .fold(farm.clone(), |current, route| reduce(&current, route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{farm_from, route_of};
    use crate::paths::all_routes_bfs;

    #[test]
    fn test_empty_route_is_identity() {
        let farm = farm_from(2, &["start-a", "a-end", "start-end"]);
        assert_eq!(reduce(&farm, &Route::new(Vec::new())), farm);
    }

    #[test]
    fn test_removes_interior_rooms() {
        let farm = farm_from(2, &["start-a", "a-b", "b-end", "start-c", "c-b"]);
        let route = route_of(&farm, &["a", "b", "end"]);
        let reduced = reduce(&farm, &route);

        assert!(reduced.room_id("a").is_none());
        assert!(reduced.room_id("b").is_none());
        assert!(reduced.contains(reduced.end()));
        let c = reduced.room_id("c").unwrap();
        assert_eq!(reduced.neighbors(c), &[reduced.start()]);
        assert!(all_routes_bfs(&reduced).is_empty());

        // input untouched
        assert!(farm.room_id("a").is_some());
        assert_eq!(farm.tunnel_count(), 5);
    }

    #[test]
    fn test_direct_route_drops_tunnel() {
        let farm = farm_from(2, &["start-end", "start-a", "a-end"]);
        let reduced = reduce(&farm, &route_of(&farm, &["end"]));

        assert!(!reduced.has_tunnel(reduced.start(), reduced.end()));
        assert_eq!(reduced.room_count(), farm.room_count());
        assert_eq!(all_routes_bfs(&reduced), vec![route_of(&farm, &["a", "end"])]);
    }

    #[test]
    fn test_reduce_all() {
        let farm = farm_from(2, &["start-end", "start-a", "a-end"]);
        let routes = all_routes_bfs(&farm);
        let reduced = reduce_all(&farm, &routes);
        assert!(all_routes_bfs(&reduced).is_empty());
    }
}
