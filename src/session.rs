//! The interactive loop: show the map, ask for start and goal, show the route, then offer to
//! edit the map before the next search. Works over any line-based input so it can be driven
//! from stdin or from a script.
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

use grid_util::point::Point;
use log::{debug, info};
use thiserror::Error;

use crate::route::RouteService;
use crate::terrain::Terrain;
use crate::terrain_grid::TerrainGrid;

/// Why a round stopped early.
#[derive(Error, Debug)]
enum Interrupt {
    #[error("end of input")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] io::Error),
}

type Step<T> = Result<T, Interrupt>;

pub struct Session<R, W> {
    grid: TerrainGrid,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(grid: TerrainGrid, input: R, output: W) -> Self {
        Session {
            grid,
            input,
            output,
        }
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn into_grid(self) -> TerrainGrid {
        self.grid
    }

    /// Runs rounds until the user declines another search or the input ends. Only IO errors
    /// on the underlying streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        let mut rounds = 0;
        loop {
            rounds += 1;
            match self.round() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(Interrupt::EndOfInput) => {
                    info!("Input closed during round {}", rounds);
                    break;
                }
                Err(Interrupt::Io(e)) => return Err(e),
            }
        }
        info!("Session ended after {} rounds", rounds);
        Ok(())
    }

    /// One search followed by the optional map edits. Returns whether another round follows.
    fn round(&mut self) -> Step<bool> {
        self.grid.update();
        writeln!(self.output, "Current map:")?;
        writeln!(self.output, "{}", self.grid)?;
        let start = self.read_endpoint("start")?;
        let goal = self.read_endpoint("goal")?;
        if self.grid.reachable(&start, &goal) {
            RouteService::new(&self.grid).show_route(start, goal, &mut self.output)?;
        } else {
            debug!("{} and {} are on different components, skipping search", start, goal);
            writeln!(self.output, "No valid route found.")?;
        }

        if self.confirm("Add an obstacle? (y/n): ")? {
            let Some(point) = self.read_point("obstacle")? else {
                return Ok(true);
            };
            let code = self.read_line("Enter the obstacle type (wall=1, water=2, forest=3): ")?;
            let terrain = match code.trim().parse::<u8>().map(Terrain::try_from) {
                Ok(Ok(terrain)) if terrain != Terrain::Open => terrain,
                _ => {
                    writeln!(self.output, "Invalid obstacle type, please try again.")?;
                    return Ok(true);
                }
            };
            if let Err(e) = self.grid.add_obstacle(point, terrain) {
                writeln!(self.output, "Cannot place obstacle: {}", e)?;
                return Ok(true);
            }
            debug!("Placed {} at {}", terrain, point);
        }

        if self.confirm("Remove an obstacle? (y/n): ")? {
            let Some(point) = self.read_point("obstacle to remove")? else {
                return Ok(true);
            };
            if let Err(e) = self.grid.remove_obstacle(point) {
                writeln!(self.output, "Cannot remove obstacle: {}", e)?;
                return Ok(true);
            }
            debug!("Cleared {}", point);
        }

        self.confirm("Search another route? (y/n): ")
    }

    fn read_line(&mut self, prompt: &str) -> Step<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::EndOfInput);
        }
        Ok(line)
    }

    fn read_int(&mut self, prompt: &str) -> Step<Result<i32, ParseIntError>> {
        Ok(self.read_line(prompt)?.trim().parse())
    }

    fn confirm(&mut self, prompt: &str) -> Step<bool> {
        Ok(self.read_line(prompt)?.trim().eq_ignore_ascii_case("y"))
    }

    /// Reads a row and a column. A malformed number is reported and yields [None].
    fn read_point(&mut self, label: &str) -> Step<Option<Point>> {
        let prompt = format!("Enter the row of the {}: ", label);
        let Ok(row) = self.read_int(&prompt)? else {
            writeln!(self.output, "Invalid coordinate format, please try again.")?;
            return Ok(None);
        };
        let prompt = format!("Enter the column of the {}: ", label);
        let Ok(col) = self.read_int(&prompt)? else {
            writeln!(self.output, "Invalid coordinate format, please try again.")?;
            return Ok(None);
        };
        Ok(Some(Point::new(row, col)))
    }

    /// Asks until the user names an accessible cell.
    fn read_endpoint(&mut self, label: &str) -> Step<Point> {
        let (width, height) = self.grid.bounds();
        let label = format!(
            "{} point (rows 0-{}, columns 0-{})",
            label,
            height.saturating_sub(1),
            width.saturating_sub(1)
        );
        loop {
            let Some(point) = self.read_point(&label)? else {
                continue;
            };
            if self.grid.is_accessible(point) {
                return Ok(point);
            }
            writeln!(
                self.output,
                "Invalid coordinates or located on an obstacle. Please try again."
            )?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(grid: TerrainGrid, script: &str) -> (TerrainGrid, String) {
        let mut out = Vec::new();
        let mut session = Session::new(grid, script.as_bytes(), &mut out);
        session.run().unwrap();
        let grid = session.into_grid();
        (grid, String::from_utf8(out).unwrap())
    }

    #[test]
    fn single_search() {
        let (_, out) = run_script(TerrainGrid::new(5, 5), "0\n0\n4\n4\nn\nn\nn\n");
        assert!(out.starts_with("Current map:\n. . . . .\n"));
        assert!(out.contains("Route found (cost 8):"));
        assert!(out.ends_with("Search another route? (y/n): "));
        assert_eq!(out.matches("Current map:").count(), 1);
    }

    #[test]
    fn reprompts_for_invalid_endpoints() {
        let mut grid = TerrainGrid::new(3, 3);
        grid.add_obstacle(Point::new(1, 1), Terrain::Wall).unwrap();
        // Malformed row, out of bounds, on the wall, then valid.
        let script = "x\n5\n5\n1\n1\n0\n0\n2\n2\nn\nn\nn\n";
        let (_, out) = run_script(grid, script);
        assert_eq!(out.matches("Invalid coordinate format").count(), 1);
        assert_eq!(out.matches("located on an obstacle").count(), 2);
        assert!(out.contains("Route found (cost 4):"));
    }

    #[test]
    fn edits_map_between_searches() {
        // Wall off the middle column except the bottom row, then search again.
        let script = "\
0\n0\n0\n2\ny\n0\n1\n1\nn\ny\n\
0\n0\n0\n2\ny\n1\n1\n1\nn\ny\n\
0\n0\n0\n2\nn\ny\n0\n1\nn\n";
        let (grid, out) = run_script(TerrainGrid::new(3, 3), script);
        assert_eq!(out.matches("Current map:").count(), 3);
        assert!(out.contains("Route found (cost 2):"));
        assert!(out.contains("Route found (cost 6):"));
        assert!(out.contains(". | .\n. | .\n. . .\n"));
        assert_eq!(grid.terrain_at(Point::new(0, 1)), Some(Terrain::Open));
        assert_eq!(grid.terrain_at(Point::new(1, 1)), Some(Terrain::Wall));
    }

    #[test]
    fn rejects_bad_obstacles() {
        // Unknown type, out of bounds placement, malformed removal, then the input ends.
        let script = "\
0\n0\n0\n1\ny\n0\n1\n7\n\
0\n0\n0\n1\ny\n9\n9\n2\n\
0\n0\n0\n1\nn\ny\nq\n";
        let (grid, out) = run_script(TerrainGrid::new(2, 2), script);
        assert!(out.contains("Invalid obstacle type"));
        assert!(out.contains("Cannot place obstacle: coordinate"));
        assert!(out.contains("Invalid coordinate format"));
        assert_eq!(out.matches("Current map:").count(), 4);
        assert_eq!(grid.to_string(), ". .\n. .\n");
    }

    #[test]
    fn end_of_input_stops_cleanly() {
        let (_, out) = run_script(TerrainGrid::new(2, 2), "0\n");
        assert!(out.ends_with("Enter the column of the start point (rows 0-1, columns 0-1): "));
    }

    #[test]
    fn components_refresh_after_failed_edit() {
        // Each round places a wall and then fails to remove one. The second wall cuts the left
        // column off, so the last search is answered from the components.
        let script = "\
0\n0\n0\n2\ny\n0\n1\n1\ny\nq\n\
0\n0\n0\n2\ny\n1\n1\n1\ny\n5\n5\n\
0\n0\n1\n2\nn\nn\nn\n";
        let (grid, out) = run_script(TerrainGrid::new(3, 2), script);
        assert!(out.contains("Invalid coordinate format"));
        assert!(out.contains("Cannot remove obstacle: coordinate"));
        assert!(out.contains("Route found (cost 4):"));
        let last_round = out.rsplit("Current map:").next().unwrap();
        assert!(last_round.contains("No valid route found."));
        assert!(!grid.components_dirty);
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 2)));
    }

    #[test]
    fn no_route_is_reported() {
        let grid: TerrainGrid = ". | .".parse().unwrap();
        let (_, out) = run_script(grid, "0\n0\n0\n2\nn\nn\nn\n");
        assert!(out.contains("No valid route found."));
    }
}
