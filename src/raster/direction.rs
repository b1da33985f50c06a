//! Cardinal directions shared by the overlap relation and propagation

/// Direction from a cell or pattern toward one of its four neighbors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward smaller y
    Up,
    /// Toward larger y
    Down,
    /// Toward smaller x
    Left,
    /// Toward larger x
    Right,
}

impl Direction {
    /// All four directions in canonical order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// The direction that travels back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Dense index used by the adjacency matrix
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Down => 1,
            Self::Left => 2,
            Self::Right => 3,
        }
    }
}
