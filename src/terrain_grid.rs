use core::fmt;
use std::str::FromStr;

use fxhash::FxHashSet;
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::terrain::Terrain;
use crate::N_SMALLVEC_SIZE;

/// A fixed-size map of [Terrain] cells. Points address cells as `x` = row, `y` = column, so a
/// point is in bounds when `0 <= x < height` and `0 <= y < width`.
///
/// Besides the raw terrain, [TerrainGrid] maintains a [UnionFind] over the passable cells so that
/// reachability can be answered without searching. Clearing a cell joins components eagerly;
/// placing a wall can split a component, so it only flags the components as dirty and
/// [update](Self::update) regenerates them.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    width: usize,
    height: usize,
    cells: Vec<Terrain>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl TerrainGrid {
    /// Creates a grid of the given size where every cell is [Terrain::Open].
    pub fn new(width: usize, height: usize) -> TerrainGrid {
        let mut grid = TerrainGrid {
            width,
            height,
            cells: vec![Terrain::Open; width * height],
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Returns `(width, height)`.
    pub fn bounds(&self) -> (usize, usize) {
        (self.width, self.height)
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.height
            && (point.y as usize) < self.width
    }

    fn get_ix(&self, point: Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.x as usize * self.width + point.y as usize)
    }

    fn checked_ix(&self, point: Point) -> Result<usize, GridError> {
        self.get_ix(point).ok_or(GridError::OutOfBounds {
            point,
            width: self.width,
            height: self.height,
        })
    }

    /// The terrain at a point, or [None] if it lies outside the grid.
    pub fn terrain_at(&self, point: Point) -> Option<Terrain> {
        self.get_ix(point).map(|ix| self.cells[ix])
    }

    /// True if the point is in bounds and not a wall.
    pub fn is_accessible(&self, point: Point) -> bool {
        self.terrain_at(point).is_some_and(Terrain::is_passable)
    }

    /// The orthogonal neighbours of a point in the order up, down, left, right. Points outside
    /// the grid are included.
    pub fn neumann_neighborhood(point: Point) -> [Point; 4] {
        [
            Point::new(point.x - 1, point.y),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y - 1),
            Point::new(point.x, point.y + 1),
        ]
    }

    /// Accessible orthogonal neighbours together with the cost of stepping onto them.
    pub fn neighbours_and_cost(&self, point: &Point) -> SmallVec<[(Point, u32); N_SMALLVEC_SIZE]> {
        Self::neumann_neighborhood(*point)
            .into_iter()
            .filter_map(|n| {
                self.terrain_at(n)
                    .and_then(Terrain::step_cost)
                    .map(|cost| (n, cost))
            })
            .collect()
    }

    /// Overwrites the terrain of a cell. Joins newly connected components and flags the
    /// components as dirty if a wall (potentially) broke one apart.
    pub fn set_terrain(&mut self, point: Point, terrain: Terrain) -> Result<(), GridError> {
        let ix = self.checked_ix(point)?;
        let previous = self.cells[ix];
        self.cells[ix] = terrain;
        if terrain.is_passable() {
            for n in Self::neumann_neighborhood(point) {
                if self.is_accessible(n) {
                    if let Some(n_ix) = self.get_ix(n) {
                        self.components.union(ix, n_ix);
                    }
                }
            }
        } else if previous.is_passable() {
            self.components_dirty = true;
        }
        Ok(())
    }

    /// Places an obstacle of the given kind. Placing [Terrain::Open] clears the cell.
    pub fn add_obstacle(&mut self, point: Point, terrain: Terrain) -> Result<(), GridError> {
        self.set_terrain(point, terrain)
    }

    /// Resets a cell to [Terrain::Open].
    pub fn remove_obstacle(&mut self, point: Point) -> Result<(), GridError> {
        self.set_terrain(point, Terrain::Open)
    }

    /// Checks if start and goal are accessible and on the same component. Only accurate while
    /// the components are not dirty, see [update](Self::update).
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.get_ix(*start), self.get_ix(*goal)) {
            (Some(start_ix), Some(goal_ix)) => {
                self.is_accessible(*start)
                    && self.is_accessible(*goal)
                    && self.components.equiv(start_ix, goal_ix)
            }
            _ => false,
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up accessible neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width * self.height);
        self.components_dirty = false;
        for (row, col) in iproduct!(0..self.height as i32, 0..self.width as i32) {
            let point = Point::new(row, col);
            if !self.is_accessible(point) {
                continue;
            }
            let ix = point.x as usize * self.width + point.y as usize;
            // Down and right suffice, the other two directions are covered by the neighbour.
            for n in [Point::new(row + 1, col), Point::new(row, col + 1)] {
                if self.is_accessible(n) {
                    let n_ix = n.x as usize * self.width + n.y as usize;
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    /// A displayable view of the grid in which the cells of `path` are marked with `*`.
    pub fn view(&self, path: &[Point]) -> GridView<'_> {
        GridView {
            grid: self,
            highlight: path.iter().copied().collect(),
        }
    }
}

/// Renders a [TerrainGrid] one row per line, cells separated by a space, with highlighted cells
/// drawn as `*`.
pub struct GridView<'a> {
    grid: &'a TerrainGrid,
    highlight: FxHashSet<Point>,
}

pub const PATH_GLYPH: char = '*';

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.grid.height as i32 {
            let line = (0..self.grid.width as i32)
                .map(|col| {
                    let p = Point::new(row, col);
                    if self.highlight.contains(&p) {
                        PATH_GLYPH
                    } else {
                        self.grid.terrain_at(p).map_or(' ', Terrain::glyph)
                    }
                })
                .join(" ");
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.view(&[]), f)
    }
}

/// Parses the format produced by [Display]: one line per row, one glyph per cell, whitespace
/// between glyphs ignored. Path markers are read back as open ground.
impl FromStr for TerrainGrid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(|line| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        PATH_GLYPH => Ok(Terrain::Open),
                        c => Terrain::from_glyph(c),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .filter(|row| !matches!(row, Ok(cells) if cells.is_empty()))
            .collect::<Result<Vec<_>, _>>()?;
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().find_position(|cells| cells.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        let mut grid = TerrainGrid {
            width,
            height: rows.len(),
            cells: rows.into_iter().flatten().collect(),
            components: UnionFind::new(0),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_rows_and_columns() {
        let grid = TerrainGrid::new(4, 2);
        assert_eq!(grid.bounds(), (4, 2));
        assert!(grid.in_bounds(Point::new(1, 3)));
        assert!(!grid.in_bounds(Point::new(3, 1)));
        assert!(!grid.in_bounds(Point::new(-1, 0)));
        assert!(!grid.in_bounds(Point::new(0, 4)));
        assert_eq!(grid.terrain_at(Point::new(2, 0)), None);
    }

    #[test]
    fn obstacles_change_accessibility() {
        let mut grid = TerrainGrid::new(3, 3);
        let p = Point::new(1, 1);
        grid.add_obstacle(p, Terrain::Wall).unwrap();
        assert!(!grid.is_accessible(p));
        grid.add_obstacle(p, Terrain::Water).unwrap();
        assert!(grid.is_accessible(p));
        assert_eq!(grid.terrain_at(p), Some(Terrain::Water));
        grid.remove_obstacle(p).unwrap();
        assert_eq!(grid.terrain_at(p), Some(Terrain::Open));
    }

    #[test]
    fn out_of_bounds_obstacle_is_rejected() {
        let mut grid = TerrainGrid::new(5, 5);
        let err = grid.add_obstacle(Point::new(5, 0), Terrain::Wall).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds {
                point: Point::new(5, 0),
                width: 5,
                height: 5
            }
        );
        assert!(grid.remove_obstacle(Point::new(0, -1)).is_err());
    }

    #[test]
    fn neighbours_skip_walls_and_edges() {
        let grid: TerrainGrid = ". | .\n~ . .".parse().unwrap();
        let neighbours = grid.neighbours_and_cost(&Point::new(0, 0));
        assert_eq!(neighbours.as_slice(), &[(Point::new(1, 0), 5)]);
        let neighbours = grid.neighbours_and_cost(&Point::new(1, 1));
        assert_eq!(
            neighbours.as_slice(),
            &[(Point::new(1, 0), 5), (Point::new(1, 2), 1)]
        );
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // . | .
        // . | .
        let mut grid = TerrainGrid::new(3, 2);
        grid.add_obstacle(Point::new(0, 1), Terrain::Wall).unwrap();
        grid.add_obstacle(Point::new(1, 1), Terrain::Wall).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(1, 0)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(0, 2)));
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(0, 1)));
    }

    #[test]
    fn clearing_a_wall_joins_components() {
        let mut grid: TerrainGrid = ". | .".parse().unwrap();
        let (left, right) = (Point::new(0, 0), Point::new(0, 2));
        assert!(!grid.reachable(&left, &right));
        grid.add_obstacle(Point::new(0, 1), Terrain::Forest).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&left, &right));
    }

    #[test]
    fn renders_path_over_terrain() {
        let mut grid = TerrainGrid::new(3, 2);
        grid.add_obstacle(Point::new(0, 1), Terrain::Wall).unwrap();
        grid.add_obstacle(Point::new(1, 2), Terrain::Forest).unwrap();
        assert_eq!(grid.to_string(), ". | .\n. . \\\n");
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        assert_eq!(grid.view(&path).to_string(), "* | .\n* * \\\n");
    }

    #[test]
    fn parses_rendered_map() {
        let grid: TerrainGrid = ". ~ .\n| \\ .\n".parse().unwrap();
        assert_eq!(grid.bounds(), (3, 2));
        assert_eq!(grid.terrain_at(Point::new(0, 1)), Some(Terrain::Water));
        assert_eq!(grid.terrain_at(Point::new(1, 0)), Some(Terrain::Wall));
        assert_eq!(grid.terrain_at(Point::new(1, 1)), Some(Terrain::Forest));
        assert_eq!(grid.to_string().parse::<TerrainGrid>().unwrap().to_string(), grid.to_string());
    }

    #[test]
    fn rejects_malformed_maps() {
        assert_eq!(
            ". .\n.".parse::<TerrainGrid>().unwrap_err(),
            GridError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            }
        );
        assert_eq!(
            ". x".parse::<TerrainGrid>().unwrap_err(),
            GridError::InvalidGlyph('x')
        );
    }
}
