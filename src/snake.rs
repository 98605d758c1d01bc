use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::grid::Position;

/// How many direction changes can wait for the next ticks.
pub const MAX_PENDING_TURNS: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending: VecDeque<Direction>,
}

impl Snake {
    /// Lays out `size` segments ending at `head`, trailing away from
    /// `direction`.
    pub fn new(head: Position, size: usize, direction: Direction) -> Self {
        let (dr, dc) = direction.opposite().offset();
        let body = (0..size as i32)
            .map(|i| Position::new(head.row + dr * i, head.col + dc * i))
            .collect();
        Snake { body, direction, pending: VecDeque::with_capacity(MAX_PENDING_TURNS) }
    }

    #[cfg(test)]
    pub(crate) fn from_body(body: Vec<Position>, direction: Direction) -> Self {
        Snake { body: body.into_iter().collect(), direction, pending: VecDeque::new() }
    }

    /// Head first.
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending(&self) -> &VecDeque<Direction> {
        &self.pending
    }

    /// Where the snake will be heading once every queued turn is applied.
    pub fn last_direction(&self) -> Direction {
        self.pending.back().copied().unwrap_or(self.direction)
    }

    /// Queues a turn unless the buffer is full or the turn is a no-op or a
    /// reversal relative to the last queued heading. Returns whether it was
    /// accepted.
    pub fn queue_turn(&mut self, new_direction: Direction) -> bool {
        if self.pending.len() >= MAX_PENDING_TURNS {
            return false;
        }

        let last = self.last_direction();
        if new_direction == last || new_direction == last.opposite() {
            return false;
        }

        self.pending.push_back(new_direction);
        true
    }

    /// Pops the oldest queued turn into the current direction.
    pub fn apply_next_turn(&mut self) -> Direction {
        if let Some(dir) = self.pending.pop_front() {
            self.direction = dir;
        }
        self.direction
    }

    pub fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn snake() -> Snake {
        Snake::new(Position::new(7, 3), 3, Right)
    }

    #[test]
    fn new_trails_behind_head() {
        let snake = snake();
        let body: Vec<_> = snake.body().iter().copied().collect();
        assert_eq!(body, vec![Position::new(7, 3), Position::new(7, 2), Position::new(7, 1)]);
        assert_eq!(snake.head(), Position::new(7, 3));
        assert_eq!(snake.tail(), Position::new(7, 1));
    }

    #[test]
    fn rejects_same_and_reverse() {
        let mut snake = snake();
        assert!(!snake.queue_turn(Right));
        assert!(!snake.queue_turn(Left));
        assert!(snake.pending().is_empty());
    }

    #[test]
    fn checks_against_last_queued_turn() {
        let mut snake = snake();
        assert!(snake.queue_turn(Up));
        // Down reverses the queued Up, Left is fine after Up
        assert!(!snake.queue_turn(Down));
        assert!(snake.queue_turn(Left));
        assert_eq!(snake.last_direction(), Left);
    }

    #[test]
    fn buffer_holds_two_turns() {
        let mut snake = snake();
        assert!(snake.queue_turn(Up));
        assert!(snake.queue_turn(Left));
        assert!(!snake.queue_turn(Down));
        assert_eq!(snake.pending().len(), 2);

        assert_eq!(snake.apply_next_turn(), Up);
        assert_eq!(snake.apply_next_turn(), Left);
        assert_eq!(snake.apply_next_turn(), Left);
    }
}
