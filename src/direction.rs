use serde::{Deserialize, Serialize};

use Direction::*;

/// One of the four moves on the grid. Rows grow downwards, columns grow to
/// the right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(row_delta, col_delta)` for a single step.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (-1, 0),
            Down => (1, 0),
            Left => (0, -1),
            Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_negates_offset() {
        for dir in [Up, Down, Left, Right].iter().copied() {
            let (dr, dc) = dir.offset();
            assert_eq!(dir.opposite().offset(), (-dr, -dc));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn offsets_are_unit_steps() {
        assert_eq!(Up.offset(), (-1, 0));
        assert_eq!(Right.offset(), (0, 1));
    }
}
