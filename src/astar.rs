use fxhash::FxBuildHasher;
/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// whose frontier breaks ties between equal estimates with an explicit key instead of
/// insertion order, which keeps the expansion order deterministic.
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Frontier entry, ranked by estimated total cost and then by the tie-break key, smallest
/// first.
struct FrontierEntry<C, T> {
    estimated_cost: C,
    tie_break: T,
    cost: C,
    index: usize,
}

impl<C: Ord, T: Ord> Eq for FrontierEntry<C, T> {}

impl<C: Ord, T: Ord> PartialEq for FrontierEntry<C, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Ord, T: Ord> PartialOrd for FrontierEntry<C, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord, T: Ord> Ord for FrontierEntry<C, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap, so both comparisons are reversed
        other
            .estimated_cost
            .cmp(&self.estimated_cost)
            .then_with(|| other.tie_break.cmp(&self.tie_break))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Best-first search from `start` until `success` holds for a popped node. Returns the path
/// including both endpoints and its cost, or [None] once the frontier runs dry.
pub(crate) fn astar<N, C, T, FN, IN, FH, FT, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut tie_break: FT,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    T: Ord,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FT: FnMut(&N) -> T,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    to_see.push(FrontierEntry {
        estimated_cost: heuristic(start),
        tie_break: tie_break(start),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded = 0usize;
    while let Some(FrontierEntry { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            // A node is pushed again whenever a cheaper way to it is found; only the entry
            // carrying the best known cost is expanded.
            if cost > c {
                continue;
            }
            if success(node) {
                debug!("Goal popped after expanding {expanded} nodes");
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return Some((path, cost));
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h; // heuristic(&successor)
            let t; // tie_break(&successor)
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    t = tie_break(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        t = tie_break(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(FrontierEntry {
                estimated_cost: new_cost + h,
                tie_break: t,
                cost: new_cost,
                index: n,
            });
        }
    }
    debug!("Frontier exhausted after expanding {expanded} nodes");
    None
}
