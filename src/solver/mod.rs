use grid_util::point::Point;
use log::{info, warn};
use smallvec::SmallVec;

use crate::error::GridError;
use crate::terrain_grid::TerrainGrid;
use crate::{Path, N_SMALLVEC_SIZE};

pub mod astar;
pub mod dijkstra;

/// A search strategy over a [TerrainGrid]. Implementors only choose the heuristic; expansion
/// uses the 4-connected neighbourhood with terrain step costs.
pub trait GridSolver {
    /// Estimate of the cost from `p1` to `p2`. Must never overestimate the true cost for the
    /// returned paths to be optimal.
    fn heuristic(&self, p1: &Point, p2: &Point) -> u32;

    fn successors(
        &self,
        grid: &TerrainGrid,
        node: &Point,
    ) -> SmallVec<[(Point, u32); N_SMALLVEC_SIZE]> {
        grid.neighbours_and_cost(node)
    }

    /// Computes the cheapest path from start to goal and its cost, or [None] if the goal cannot
    /// be reached or either endpoint lies outside the grid. Accessibility of the endpoints is
    /// not checked: a start on a wall is still expanded, and a goal on a wall is only found when
    /// it equals the start.
    fn find_path_with_cost(
        &self,
        grid: &TerrainGrid,
        start: Point,
        goal: Point,
    ) -> Option<(Path, u32)> {
        if !grid.in_bounds(start) || !grid.in_bounds(goal) {
            warn!("Search from {} to {} has an endpoint outside the grid", start, goal);
            return None;
        }
        crate::astar::astar(
            &start,
            |node| self.successors(grid, node),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        )
    }

    /// Computes the cheapest path from start to goal, both inclusive. Returns an empty path if
    /// the goal cannot be reached or either endpoint lies outside the grid.
    fn find_path(&self, grid: &TerrainGrid, start: Point, goal: Point) -> Path {
        match self.find_path_with_cost(grid, start, goal) {
            Some((path, cost)) => {
                info!("Found path from {} to {} with cost {}", start, goal, cost);
                path
            }
            None => {
                info!("No path from {} to {}", start, goal);
                Path::new()
            }
        }
    }

    /// Like [find_path](Self::find_path), but rejects out of bounds endpoints with
    /// [GridError::OutOfBounds] instead of returning an empty path.
    fn try_find_path(
        &self,
        grid: &TerrainGrid,
        start: Point,
        goal: Point,
    ) -> Result<Path, GridError> {
        for point in [start, goal] {
            if !grid.in_bounds(point) {
                let (width, height) = grid.bounds();
                return Err(GridError::OutOfBounds {
                    point,
                    width,
                    height,
                });
            }
        }
        Ok(self.find_path(grid, start, goal))
    }

    /// Sums the step costs of every cell after the first. Returns [None] for an empty path or
    /// one that leaves the grid, crosses a wall or makes a non-orthogonal step.
    fn get_path_cost(&self, grid: &TerrainGrid, path: &[Point]) -> Option<u32> {
        let first = path.first()?;
        if !grid.in_bounds(*first) {
            return None;
        }
        path.windows(2).try_fold(0u32, |total, step| {
            let (from, to) = (step[0], step[1]);
            match (from.x.abs_diff(to.x), from.y.abs_diff(to.y)) {
                (0, 1) | (1, 0) => {}
                _ => return None,
            }
            grid.terrain_at(to)
                .and_then(|terrain| terrain.step_cost())
                .and_then(|cost| total.checked_add(cost))
        })
    }
}
