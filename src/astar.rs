//! Best-first search over an implicit graph. Nodes are generated on demand by a successor
//! function, ordered by accumulated cost plus heuristic estimate, and the path is rebuilt by
//! following predecessor links.
//!
//! The frontier is allowed to hold several entries for the same node. When a cheaper route to a
//! node is found, a new entry is pushed instead of updating the existing one. Stale entries are
//! not filtered when popped: expanding them again cannot produce a cheaper cost than what is
//! already recorded, so it only costs time.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::node::{SearchNode, SmallestCostHolder};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

fn reverse_path<N: Clone, C>(nodes: &[SearchNode<N, C>], end: usize) -> Vec<N> {
    let mut path: Vec<N> = std::iter::successors(Some(end), |&i| nodes[i].predecessor)
        .map(|i| nodes[i].node.clone())
        .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for a popped node, returning the path from start
/// to that node inclusive together with its cost, or [None] once the frontier is exhausted.
///
/// `successors` yields each neighbour with the (positive) cost of moving to it. With an admissible
/// and consistent `heuristic` the returned path has minimal cost. A zero heuristic turns this
/// into Dijkstra's algorithm.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let start_node = SearchNode::new(start.clone(), C::zero(), heuristic(start), None);
    let mut to_see = BinaryHeap::new();
    to_see.push(SmallestCostHolder {
        estimated_cost: start_node.f_cost(),
        cost: C::zero(),
        index: 0,
    });
    let mut nodes = vec![start_node];
    let mut best_costs: FxIndexMap<N, C> = FxIndexMap::default();
    best_costs.insert(start.clone(), C::zero());
    let mut closed: FxHashSet<N> = FxHashSet::default();
    let mut expansions = 0usize;

    while let Some(SmallestCostHolder { index, .. }) = to_see.pop() {
        expansions += 1;
        let (node, cost) = {
            let current = &nodes[index];
            (current.node.clone(), current.g_cost)
        };
        closed.insert(node.clone());
        if success(&node) {
            debug!(
                "Goal reached after {} expansions, {} nodes created",
                expansions,
                nodes.len()
            );
            return Some((reverse_path(&nodes, index), cost));
        }
        for (successor, move_cost) in successors(&node) {
            if closed.contains(&successor) {
                continue;
            }
            let new_cost = cost + move_cost;
            match best_costs.entry(successor.clone()) {
                Vacant(e) => {
                    e.insert(new_cost);
                }
                Occupied(mut e) => {
                    if new_cost < *e.get() {
                        e.insert(new_cost);
                    } else {
                        continue;
                    }
                }
            }
            let h = heuristic(&successor);
            let next = SearchNode::new(successor, new_cost, h, Some(index));
            to_see.push(SmallestCostHolder {
                estimated_cost: next.f_cost(),
                cost: new_cost,
                index: nodes.len(),
            });
            nodes.push(next);
        }
    }
    debug!(
        "Frontier exhausted after {} expansions over {} distinct nodes",
        expansions,
        best_costs.len()
    );
    None
}
