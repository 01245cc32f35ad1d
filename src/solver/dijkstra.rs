use grid_util::point::Point;

use crate::solver::GridSolver;

/// Uniform-cost search: A* without a heuristic. Explores more nodes than
/// [AstarSolver](super::astar::AstarSolver) but does not depend on a heuristic being admissible,
/// which makes it a reference for checking path costs.
#[derive(Clone, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn heuristic(&self, _: &Point, _: &Point) -> u32 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::astar::AstarSolver;
    use crate::terrain_grid::TerrainGrid;

    #[test]
    fn agrees_with_astar_on_weighted_map() {
        let grid: TerrainGrid = ". ~ ~ . .\n. | \\ | .\n~ . . ~ .\n. | | . \\".parse().unwrap();
        let (start, goal) = (Point::new(0, 0), Point::new(3, 4));
        let dijkstra = DijkstraSolver.find_path_with_cost(&grid, start, goal).unwrap();
        let astar = AstarSolver::new().find_path_with_cost(&grid, start, goal).unwrap();
        assert_eq!(dijkstra.1, astar.1);
    }
}
