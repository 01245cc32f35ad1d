use grid_util::point::Point;
use thiserror::Error;

/// Errors raised by [TerrainGrid](crate::terrain_grid::TerrainGrid) mutations and the checked
/// search entry points. An unreachable goal is not an error: it yields an empty path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("coordinate {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },
    #[error("unknown terrain code {0}, expected 0 (open), 1 (wall), 2 (water) or 3 (forest)")]
    InvalidTerrainCode(u8),
    #[error("unknown map glyph {0:?}")]
    InvalidGlyph(char),
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
