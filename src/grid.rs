use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::direction::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// The neighbouring position one step towards `direction`. May land
    /// outside the grid, the caller decides what that means.
    pub fn translate(self, direction: Direction) -> Position {
        let (dr, dc) = direction.offset();
        Position { row: self.row + dr, col: self.col + dc }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Snake,
    Food,
    RareFood,
}

/// Row-major board of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, columns: usize) -> Self {
        Grid { rows, columns, cells: vec![Cell::Empty; rows * columns] }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as usize) < self.rows && (pos.col as usize) < self.columns
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// Writes `cell` at `pos`. Out of bounds writes are ignored.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = cell;
        }
    }

    /// Every position holding `cell`, row by row.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells.iter()
            .enumerate()
            .filter(move |(_, c)| **c == cell)
            .map(move |(i, _)| Position::new((i / columns) as i32, (i % columns) as i32))
    }

    /// Uniformly picks one of the currently empty positions, if there is any.
    pub fn random_empty<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let empty: Vec<Position> = self.positions_of(Cell::Empty).collect();
        empty.choose(rng).copied()
    }

    /// Rows of cells, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.columns)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.columns + pos.col as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn translate_does_not_bounds_check() {
        let pos = Position::new(0, 0);
        assert_eq!(pos.translate(Direction::Up), Position::new(-1, 0));
        assert_eq!(pos.translate(Direction::Left), Position::new(0, -1));
        assert_eq!(pos.translate(Direction::Right).translate(Direction::Down), Position::new(1, 1));
    }

    #[test]
    fn get_outside_is_none() {
        let grid = Grid::new(3, 4);
        assert_eq!(grid.get(Position::new(2, 3)), Some(Cell::Empty));
        assert_eq!(grid.get(Position::new(3, 0)), None);
        assert_eq!(grid.get(Position::new(0, 4)), None);
        assert_eq!(grid.get(Position::new(-1, 0)), None);
    }

    #[test]
    fn set_outside_is_ignored() {
        let mut grid = Grid::new(2, 2);
        grid.set(Position::new(5, 5), Cell::Food);
        assert_eq!(grid.positions_of(Cell::Food).count(), 0);

        grid.set(Position::new(1, 0), Cell::Food);
        assert_eq!(grid.positions_of(Cell::Food).collect::<Vec<_>>(), vec![Position::new(1, 0)]);
    }

    #[test]
    fn random_empty_picks_the_only_free_cell() {
        let mut grid = Grid::new(2, 2);
        for pos in [Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)].iter() {
            grid.set(*pos, Cell::Snake);
        }

        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(grid.random_empty(&mut rng), Some(Position::new(1, 0)));
        }

        grid.set(Position::new(1, 0), Cell::RareFood);
        assert_eq!(grid.random_empty(&mut rng), None);
    }
}
