//! # terrain_pathfinding
//!
//! Minimum-cost pathfinding on a 4-connected grid whose cells carry different traversal costs.
//! Cells are open ground (cost 1), water (cost 5), forest (cost 10) or impassable walls; the cost
//! of a path is the sum of the costs of the cells it steps onto.
//!
//! Paths are computed with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) using the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) as heuristic, which never
//! overestimates since every step costs at least 1. The grid additionally tracks
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory)) so
//! reachability can be checked without a search.
//!
//! ```
//! use terrain_pathfinding::{AstarSolver, GridSolver, Point, TerrainGrid};
//!
//! let grid: TerrainGrid = ". ~ .\n. . .".parse().unwrap();
//! let path = AstarSolver::new().find_path(&grid, Point::new(0, 0), Point::new(0, 2));
//! // Walking around the water is cheaper than wading through it.
//! assert_eq!(path.len(), 5);
//! ```
pub mod astar;
pub mod error;
pub mod node;
pub mod route;
pub mod session;
pub mod solver;
pub mod terrain;
pub mod terrain_grid;

pub use error::GridError;
pub use grid_util::point::Point;
pub use route::RouteService;
pub use solver::{astar::AstarSolver, dijkstra::DijkstraSolver, GridSolver};
pub use terrain::Terrain;
pub use terrain_grid::TerrainGrid;

/// A cell address: `x` is the row and `y` the column.
pub type Coordinate = Point;

/// Cells from start to goal, both inclusive. Empty if no path exists.
pub type Path = Vec<Coordinate>;

/// Upper bound on the number of successors of a cell, used to keep them on the stack.
pub const N_SMALLVEC_SIZE: usize = 4;
