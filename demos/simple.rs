use terrain_pathfinding::{AstarSolver, GridSolver, Point, Terrain, TerrainGrid};

// In this example a path is found on a 5x5 grid with shape
// S . | . E
// . . | . .
// . . | . .
// . . | . .
// . . . . .
// where
// - | marks a wall
// - S marks the start
// - E marks the end
//
// The only way around the wall is through the bottom row.

fn main() {
    let mut grid = TerrainGrid::new(5, 5);
    for row in 0..4 {
        grid.add_obstacle(Point::new(row, 2), Terrain::Wall).unwrap();
    }
    println!("{}", grid);
    let solver = AstarSolver::new();
    let start = Point::new(0, 0);
    let end = Point::new(0, 4);
    let path = solver.find_path(&grid, start, end);
    println!("Path:");
    for p in &path {
        println!("{:?}", p);
    }
    println!("\n{}", grid.view(&path));
}
