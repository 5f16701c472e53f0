//! Proximity grouping of candidates into possible table regions.
//!
//! Neighbours are candidates whose distance, measured per
//! [`ProximityMeasure`], is at most the proximity threshold.
//!
//! Two strategies are available. `SingleExpansion` walks candidates in input
//! order and collects, around each unprocessed seed, every other unprocessed
//! neighbour of the seed. Every member is marked processed before the size
//! check, so the members of a discarded group never seed or join a later
//! group. Neighbours of neighbours are never pulled in, so a long chain of
//! fields can be split or missed.
//!
//! `ConnectedComponents` takes the transitive closure of the proximity
//! relation with a union-find. It recovers chained layouts but may merge two
//! tables that sit close together.

use tracing::debug;

use crate::candidate::FieldCandidate;

use super::types::{GroupingStrategy, ProximityMeasure, TableSettings};

/// Partition candidates into groups that may form tables.
///
/// Only groups with at least `settings.min_group_size` members are returned.
/// Members keep their input order.
pub fn group_candidates<'a>(
    candidates: &'a [FieldCandidate],
    settings: &TableSettings,
) -> Vec<Vec<&'a FieldCandidate>> {
    let groups = match settings.grouping {
        GroupingStrategy::SingleExpansion => single_expansion(candidates, settings),
        GroupingStrategy::ConnectedComponents => connected_components(candidates, settings),
    };
    groups
        .into_iter()
        .map(|idxs| idxs.into_iter().map(|i| &candidates[i]).collect())
        .collect()
}

fn is_near(a: &FieldCandidate, b: &FieldCandidate, settings: &TableSettings) -> bool {
    let distance = match settings.proximity {
        ProximityMeasure::Origin => a.bbox.origin_distance(&b.bbox),
        ProximityMeasure::Gap => a.bbox.gap_distance(&b.bbox),
    };
    distance <= settings.proximity_threshold
}

fn single_expansion(candidates: &[FieldCandidate], settings: &TableSettings) -> Vec<Vec<usize>> {
    let mut processed = vec![false; candidates.len()];
    let mut groups = Vec::new();

    for (seed_idx, seed) in candidates.iter().enumerate() {
        if processed[seed_idx] {
            continue;
        }
        let members: Vec<usize> = candidates
            .iter()
            .enumerate()
            .filter(|&(j, other)| {
                j == seed_idx || (!processed[j] && is_near(seed, other, settings))
            })
            .map(|(j, _)| j)
            .collect();

        for &j in &members {
            processed[j] = true;
        }
        if members.len() >= settings.min_group_size {
            debug!(seed = %seed.id, size = members.len(), "retained candidate group");
            groups.push(members);
        } else {
            debug!(seed = %seed.id, size = members.len(), "discarded small group");
        }
    }
    groups
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Union by smallest index so the root is always the earliest member.
    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}

fn connected_components(
    candidates: &[FieldCandidate],
    settings: &TableSettings,
) -> Vec<Vec<usize>> {
    let n = candidates.len();
    let mut set = DisjointSet::new(n);
    for i in 0..n {
        for j in (i + 1)..n {
            if is_near(&candidates[i], &candidates[j], settings) {
                set.union(i, j);
            }
        }
    }

    // Roots are the smallest member index, so iterating in input order
    // yields components ordered by their first member.
    let mut slot_of_root = vec![usize::MAX; n];
    let mut components: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let root = set.find(i);
        if slot_of_root[root] == usize::MAX {
            slot_of_root[root] = components.len();
            components.push(Vec::new());
        }
        components[slot_of_root[root]].push(i);
    }

    components
        .into_iter()
        .filter(|c| {
            let keep = c.len() >= settings.min_group_size;
            if !keep {
                debug!(size = c.len(), "discarded small component");
            }
            keep
        })
        .collect()
}
