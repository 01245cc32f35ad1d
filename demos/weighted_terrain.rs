use terrain_pathfinding::{GridSolver, Point, RouteService, TerrainGrid};

// Water costs 5 and forest 10 to enter, open ground 1. Getting from the left of the fourth row
// to the bottom-left corner means either crossing the forest cell in the wall (cost 19) or
// walking around the lake and down the right edge (cost 22).

fn main() {
    let grid: TerrainGrid = "\
. . . . . . . .
. ~ ~ ~ ~ ~ . .
. ~ ~ ~ ~ ~ | .
. . . . . . | .
| | | | \\ | | .
. . . . . . . ."
        .parse()
        .unwrap();
    let service = RouteService::new(&grid);
    let start = Point::new(3, 0);
    let end = Point::new(5, 0);
    let path = service.plan_route(start, end);
    println!("Cost: {:?}", service.route_cost(&path));
    println!("{}", service.render(&path));

    // The same query with Dijkstra explores more of the map but lands on the same cost.
    let dijkstra = terrain_pathfinding::DijkstraSolver;
    let other = dijkstra.find_path(&grid, start, end);
    println!("Dijkstra cost: {:?}", dijkstra.get_path_cost(&grid, &other));
}
