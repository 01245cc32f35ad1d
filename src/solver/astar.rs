use grid_util::point::Point;

use crate::solver::GridSolver;

/// A* with the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic.
/// Every step costs at least 1, so the heuristic is admissible and consistent on a
/// 4-connected grid.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver;

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver
    }
}

/// Saturates at [u32::MAX] for points at opposite ends of the `i32` range.
pub fn manhattan_distance(p1: &Point, p2: &Point) -> u32 {
    p1.x.abs_diff(p2.x).saturating_add(p1.y.abs_diff(p2.y))
}

impl GridSolver for AstarSolver {
    fn heuristic(&self, p1: &Point, p2: &Point) -> u32 {
        manhattan_distance(p1, p2)
    }
}
