//! The two-state cell.

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Dead = 0,
    /// Live cell.
    Alive = 1,
}

impl Cell {
    /// Whether the cell is alive.
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// The opposite state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }

    /// Numeric value used for neighbour sums (0 or 1).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}
