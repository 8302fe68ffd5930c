//! Ant distribution over the routes of a group

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::groups::Group;

/// Number of ants sent down each route of a group, by route index
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Distribution {
    counts: Vec<usize>,
}

impl Distribution {
    pub fn from_counts(counts: Vec<usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn get(&self, route: usize) -> usize {
        self.counts.get(route).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Greedy assignment: each ant goes to the route whose length plus ants
/// already assigned is smallest, lowest route index on ties.
pub fn distribute(group: &Group, ants: usize) -> Distribution {
    let mut counts = vec![0; group.len()];
    if group.is_empty() {
        return Distribution { counts };
    }

    // min-heap on (occupied length, route index)
    let mut heap: BinaryHeap<Reverse<(usize, usize)>> = group
        .routes()
        .iter()
        .enumerate()
        .map(|(i, route)| Reverse((route.len(), i)))
        .collect();

    for _ in 0..ants {
        let Some(Reverse((occupied, i))) = heap.pop() else {
            break;
        };
        counts[i] += 1;
        heap.push(Reverse((occupied + 1, i)));
    }

    Distribution { counts }
}
