use core::fmt;

use crate::error::GridError;

/// The kind of ground occupying a cell. Every kind except [Terrain::Wall] can be entered, at the
/// price given by [Terrain::step_cost].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terrain {
    #[default]
    Open,
    Wall,
    Water,
    Forest,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [Terrain::Open, Terrain::Wall, Terrain::Water, Terrain::Forest];

    /// Numeric code used on the command line: 0 open, 1 wall, 2 water, 3 forest.
    pub fn code(self) -> u8 {
        match self {
            Terrain::Open => 0,
            Terrain::Wall => 1,
            Terrain::Water => 2,
            Terrain::Forest => 3,
        }
    }

    /// Cost of moving onto a cell of this kind, [None] for walls.
    pub fn step_cost(self) -> Option<u32> {
        match self {
            Terrain::Open => Some(1),
            Terrain::Water => Some(5),
            Terrain::Forest => Some(10),
            Terrain::Wall => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self != Terrain::Wall
    }

    pub fn glyph(self) -> char {
        match self {
            Terrain::Open => '.',
            Terrain::Wall => '|',
            Terrain::Water => '~',
            Terrain::Forest => '\\',
        }
    }

    /// Inverse of [glyph](Self::glyph).
    pub fn from_glyph(glyph: char) -> Result<Terrain, GridError> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.glyph() == glyph)
            .ok_or(GridError::InvalidGlyph(glyph))
    }
}

impl TryFrom<u8> for Terrain {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Terrain::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(GridError::InvalidTerrainCode(code))
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Terrain::Open => "open",
            Terrain::Wall => "wall",
            Terrain::Water => "water",
            Terrain::Forest => "forest",
        };
        write!(f, "{}", name)
    }
}
