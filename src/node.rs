use std::cmp::Ordering;
use std::ops::Add;

/// One state created during a search: a node reached with an accumulated cost, the heuristic
/// estimate from there to the goal, and the arena index of the node it was expanded from.
///
/// Nodes are not edited once pushed. Finding a cheaper route to the same node pushes a new
/// [SearchNode], leaving the old one behind as a stale entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode<N, C> {
    pub node: N,
    pub g_cost: C,
    pub h_cost: C,
    pub predecessor: Option<usize>,
}

impl<N, C: Add<Output = C> + Copy> SearchNode<N, C> {
    pub fn new(node: N, g_cost: C, h_cost: C, predecessor: Option<usize>) -> Self {
        SearchNode {
            node,
            g_cost,
            h_cost,
            predecessor,
        }
    }

    pub fn f_cost(&self) -> C {
        self.g_cost + self.h_cost
    }
}

/// Entry of the frontier heap, pointing at a [SearchNode] in the arena.
/// [BinaryHeap](std::collections::BinaryHeap) is a max-heap, so the ordering is reversed on the
/// estimated cost.
pub(crate) struct SmallestCostHolder<C> {
    pub estimated_cost: C,
    pub cost: C,
    pub index: usize,
}

impl<C: PartialEq> Eq for SmallestCostHolder<C> {}

impl<C: PartialEq> PartialEq for SmallestCostHolder<C> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.cost.eq(&other.cost)
    }
}

impl<C: Ord> PartialOrd for SmallestCostHolder<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for SmallestCostHolder<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lowest estimated cost first; among equal estimates the node with the larger
        // accumulated cost, which is closer to the goal.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.cmp(&other.cost),
            s => s,
        }
    }
}
