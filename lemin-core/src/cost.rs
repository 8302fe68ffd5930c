//! Plan scoring and selection
//!
//! A route of length `L` carrying `k` ants finishes after `L - 1 + k` turns:
//! the first ant needs `L` turns and one more ant arrives every turn after.
//! A group finishes when its slowest route does. Every route of a group
//! counts, including one the distribution leaves without ants.

use serde::{Deserialize, Serialize};

use crate::distribution::{distribute, Distribution};
use crate::groups::Group;
use crate::paths::Route;

/// Score of a group under a distribution. Lower is better; fields compare
/// in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlanCost {
    /// Predicted turns until the last ant arrives
    pub turns: usize,
    /// Total moves made by all ants
    pub weighted_length: usize,
}

/// A group together with its distribution and score
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub group: Group,
    pub distribution: Distribution,
    pub cost: PlanCost,
}

/// Turns needed by one route carrying `ants` ants
pub fn route_turns(length: usize, ants: usize) -> usize {
    length.saturating_sub(1) + ants
}

/// Slowest route of the group decides
pub fn completion_turns(group: &Group, distribution: &Distribution) -> usize {
    group
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| route_turns(route.len(), distribution.get(i)))
        .max()
        .unwrap_or(0)
}

pub fn weighted_length(group: &Group, distribution: &Distribution) -> usize {
    group
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| route.len() * distribution.get(i))
        .sum()
}

/// Distribute `ants` over `group` and score the result
pub fn evaluate(group: Group, ants: usize) -> Plan {
    let distribution = distribute(&group, ants);
    let cost = PlanCost {
        turns: completion_turns(&group, &distribution),
        weighted_length: weighted_length(&group, &distribution),
    };
    Plan {
        group,
        distribution,
        cost,
    }
}

/// Cheapest plan among the candidates; the first one wins a full tie.
/// Empty groups, groups with an empty route and groups with more routes
/// than ants are skipped.
pub fn select_best(candidates: impl IntoIterator<Item = Group>, ants: usize) -> Option<Plan> {
    let mut best: Option<Plan> = None;

    for group in candidates {
        if group.is_empty() || group.len() > ants || group.routes().iter().any(Route::is_empty) {
            continue;
        }
        let plan = evaluate(group, ants);
        match &best {
            Some(current) if plan.cost >= current.cost => {}
            _ => best = Some(plan),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{farm_from, route_of};

    #[test]
    fn test_route_turns() {
        assert_eq!(route_turns(2, 1), 2);
        assert_eq!(route_turns(1, 1), 1);
        assert_eq!(route_turns(3, 4), 6);
        assert_eq!(route_turns(9, 0), 8);
        assert_eq!(route_turns(0, 2), 2);
    }

    #[test]
    fn test_idle_route_still_counts() {
        let farm = farm_from(
            2,
            &["start-a", "a-end", "start-b", "b-c", "c-d", "d-e", "e-f", "f-g", "g-h", "h-i", "i-end"],
        );
        let short = route_of(&farm, &["a", "end"]);
        let long = route_of(&farm, &["b", "c", "d", "e", "f", "g", "h", "i", "end"]);
        let both = Group::from_routes(vec![short.clone(), long]);

        let plan = evaluate(both.clone(), 2);
        assert_eq!(plan.distribution.counts(), &[2, 0]);
        // max(2 - 1 + 2, 9 - 1 + 0)
        assert_eq!(plan.cost.turns, 8);

        let best = select_best(vec![both, Group::from_routes(vec![short.clone()])], 2).unwrap();
        assert_eq!(best.group, Group::from_routes(vec![short]));
        assert_eq!(best.cost, PlanCost { turns: 3, weighted_length: 4 });
    }

    #[test]
    fn test_select_skips_empty_routes() {
        let farm = farm_from(2, &["start-a", "a-end"]);
        let a = route_of(&farm, &["a", "end"]);
        let broken = Group::from_routes(vec![Route::new(Vec::new())]);
        let mixed = Group::from_routes(vec![a.clone(), Route::new(Vec::new())]);

        assert!(select_best(vec![broken.clone()], 2).is_none());
        let best = select_best(vec![broken, mixed, Group::from_routes(vec![a.clone()])], 2).unwrap();
        assert_eq!(best.group, Group::from_routes(vec![a]));
    }

    #[test]
    fn test_slowest_route_decides() {
        let farm = farm_from(4, &["start-a", "a-end", "start-b", "b-c", "c-end"]);
        let group = Group::from_routes(vec![route_of(&farm, &["a", "end"]), route_of(&farm, &["b", "c", "end"])]);
        let plan = evaluate(group, 4);
        assert_eq!(plan.distribution.counts(), &[3, 1]);
        // max(2 - 1 + 3, 3 - 1 + 1)
        assert_eq!(plan.cost.turns, 4);
        assert_eq!(plan.cost.weighted_length, 2 * 3 + 3);
    }

    #[test]
    fn test_adding_ants_never_helps() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-c", "c-end", "start-d", "d-e", "e-f", "f-end"]);
        let group = Group::from_routes(vec![
            route_of(&farm, &["a", "end"]),
            route_of(&farm, &["b", "c", "end"]),
            route_of(&farm, &["d", "e", "f", "end"]),
        ]);
        let mut previous = 0;
        for ants in 1..40 {
            let turns = evaluate(group.clone(), ants).cost.turns;
            assert!(turns >= previous, "{ants} ants: {turns} < {previous}");
            previous = turns;
        }
    }

    #[test]
    fn test_select_prefers_fewer_turns_then_shorter() {
        let farm = farm_from(3, &["start-a", "a-end", "start-b", "b-end", "start-c", "c-d", "d-end"]);
        let a = route_of(&farm, &["a", "end"]);
        let b = route_of(&farm, &["b", "end"]);
        let c = route_of(&farm, &["c", "d", "end"]);

        let candidates = vec![
            Group::from_routes(vec![a.clone()]),
            Group::from_routes(vec![a.clone(), c.clone()]),
            Group::from_routes(vec![a.clone(), b.clone()]),
        ];
        let best = select_best(candidates, 3).unwrap();
        // {a, c} and {a, b} both finish in 3 turns; {a, b} moves less
        assert_eq!(best.group, Group::from_routes(vec![a, b]));
        assert_eq!(best.cost, PlanCost { turns: 3, weighted_length: 6 });
    }

    #[test]
    fn test_select_keeps_first_on_tie() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-end"]);
        let a = Group::from_routes(vec![route_of(&farm, &["a", "end"])]);
        let b = Group::from_routes(vec![route_of(&farm, &["b", "end"])]);
        assert_eq!(select_best(vec![a.clone(), b], 1).unwrap().group, a);
    }

    #[test]
    fn test_select_rejects_oversubscribed_and_empty() {
        let farm = farm_from(1, &["start-a", "a-end", "start-b", "b-end"]);
        let both = Group::from_routes(vec![route_of(&farm, &["a", "end"]), route_of(&farm, &["b", "end"])]);
        assert!(select_best(vec![both, Group::new()], 1).is_none());
    }
}
