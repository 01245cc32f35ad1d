use std::io::{self, Write};

use grid_util::point::Point;

use crate::solver::astar::AstarSolver;
use crate::solver::GridSolver;
use crate::terrain_grid::{GridView, TerrainGrid};
use crate::Path;

/// Binds a [TerrainGrid] to a [GridSolver] for the outer application. Endpoints are expected to
/// be validated by the caller; see [GridSolver::find_path] for what happens otherwise.
pub struct RouteService<'a, S = AstarSolver> {
    grid: &'a TerrainGrid,
    solver: S,
}

impl<'a> RouteService<'a> {
    pub fn new(grid: &'a TerrainGrid) -> Self {
        RouteService::with_solver(grid, AstarSolver::new())
    }
}

impl<'a, S: GridSolver> RouteService<'a, S> {
    pub fn with_solver(grid: &'a TerrainGrid, solver: S) -> Self {
        RouteService { grid, solver }
    }

    pub fn plan_route(&self, start: Point, goal: Point) -> Path {
        self.solver.find_path(self.grid, start, goal)
    }

    /// The grid with `path` highlighted.
    pub fn render(&self, path: &[Point]) -> GridView<'a> {
        self.grid.view(path)
    }

    pub fn route_cost(&self, path: &[Point]) -> Option<u32> {
        self.solver.get_path_cost(self.grid, path)
    }

    /// Plans a route and reports it to `out`, returning the planned path.
    pub fn show_route<W: Write>(&self, start: Point, goal: Point, out: &mut W) -> io::Result<Path> {
        let path = self.plan_route(start, goal);
        if path.is_empty() {
            writeln!(out, "No valid route found.")?;
        } else {
            match self.route_cost(&path) {
                Some(cost) => writeln!(out, "Route found (cost {}):", cost)?,
                None => writeln!(out, "Route found:")?,
            }
            writeln!(out, "{}", self.render(&path))?;
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::dijkstra::DijkstraSolver;

    #[test]
    fn shows_found_route() {
        let grid: TerrainGrid = ". | .\n. . .".parse().unwrap();
        let service = RouteService::new(&grid);
        let mut out = Vec::new();
        let path = service
            .show_route(Point::new(0, 0), Point::new(0, 2), &mut out)
            .unwrap();
        assert_eq!(path.len(), 5);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Route found (cost 4):\n* | *\n* * *\n\n");
    }

    #[test]
    fn reports_missing_route() {
        let grid: TerrainGrid = ". | .".parse().unwrap();
        let service = RouteService::with_solver(&grid, DijkstraSolver);
        let mut out = Vec::new();
        let path = service
            .show_route(Point::new(0, 0), Point::new(0, 2), &mut out)
            .unwrap();
        assert!(path.is_empty());
        assert_eq!(String::from_utf8(out).unwrap(), "No valid route found.\n");
    }

    #[test]
    fn plan_route_delegates_to_solver() {
        let grid = TerrainGrid::new(4, 3);
        let service = RouteService::new(&grid);
        let path = service.plan_route(Point::new(2, 0), Point::new(0, 3));
        assert_eq!(path.len(), 6);
        assert_eq!(service.route_cost(&path), Some(5));
    }
}
