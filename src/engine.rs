//! The game world and its tick.
//!
//! An [`Engine`] owns the board, the snake, the food and the score. A driver
//! forwards key presses to [`Engine::request_direction_change`] and calls
//! [`Engine::advance`] on a fixed cadence, passing the time elapsed since the
//! engine was built and the random source to draw food placement from.

use std::time::Duration;

use log::{debug, info, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::EngineError;
use crate::grid::{Cell, Grid, Position};
use crate::rare_food::RareFoodState;
use crate::settings::{RareFoodCheck, Settings, INITIAL_SNAKE_LENGTH};
use crate::snake::Snake;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Food {
    Regular,
    Rare,
}

impl Food {
    pub fn points(self) -> u32 {
        match self {
            Food::Regular => 1,
            Food::Rare => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Position, old_tail: Option<Position>, eaten: Option<Food> },
    Crashed(Collision),
    /// The game was already over, nothing happened.
    Halted,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    settings: Settings,
    grid: Grid,
    snake: Snake,
    food: Option<Position>,
    rare_food: Option<RareFoodState>,
    score: u32,
    collision: Option<Collision>,
}

impl Engine {
    /// A board of the given size with the default rare food rules.
    pub fn new<R: Rng + ?Sized>(rows: usize, columns: usize, rng: &mut R) -> Result<Self, EngineError> {
        Engine::with_settings(Settings::with_size(rows, columns), rng)
    }

    pub fn with_settings<R: Rng + ?Sized>(settings: Settings, rng: &mut R) -> Result<Self, EngineError> {
        settings.validate()?;

        let head = Position::new((settings.rows / 2) as i32, INITIAL_SNAKE_LENGTH as i32);
        let snake = Snake::new(head, INITIAL_SNAKE_LENGTH, Direction::Right);

        let mut grid = Grid::new(settings.rows, settings.columns);
        for pos in snake.body() {
            grid.set(*pos, Cell::Snake);
        }

        let rare_food = settings.rare_food.as_ref().map(RareFoodState::new);
        let mut engine = Engine { settings, grid, snake, food: None, rare_food, score: 0, collision: None };
        engine.place_food(rng);

        Ok(engine)
    }

    /// Queues a turn for one of the next ticks. Turns that repeat or reverse
    /// the heading the snake will have after the queued ones, or that arrive
    /// while two turns are already waiting, are dropped.
    pub fn request_direction_change(&mut self, direction: Direction) {
        if self.is_game_over() {
            return;
        }

        if self.snake.queue_turn(direction) {
            debug!("queued turn {:?}", direction);
        }
    }

    /// Moves the snake one cell. `now` is the simulation time since the engine
    /// was created and drives rare food timing.
    pub fn advance<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> MoveResult {
        if self.is_game_over() {
            return Halted;
        }

        let direction = self.snake.apply_next_turn();
        let new_head = self.snake.head().translate(direction);
        trace!("tick at {:?}: {:?} -> {:?}", now, direction, new_head);

        let target = match self.resolve(new_head) {
            Some(Cell::Snake) => return self.crash(Collision::Body),
            None => return self.crash(Collision::Wall),
            Some(cell) => cell,
        };

        let mut old_tail = None;
        let eaten = match target {
            Cell::Food => Some(Food::Regular),
            Cell::RareFood => Some(Food::Rare),
            _ => None,
        };

        if eaten.is_none() {
            old_tail = self.snake.pop_tail();
            if let Some(tail) = old_tail {
                self.grid.set(tail, Cell::Empty);
            }
        }
        self.snake.push_head(new_head);
        self.grid.set(new_head, Cell::Snake);

        if let Some(food) = eaten {
            self.score += food.points();
            debug!("ate {:?} food at {:?}, score {}", food, new_head, self.score);
        }

        match eaten {
            Some(Food::Regular) => {
                self.food = None;
                self.place_food(rng);
            }
            Some(Food::Rare) => {
                if let Some(rare) = self.rare_food.as_mut() {
                    rare.eaten();
                }
            }
            None => {}
        }

        self.update_rare_food(now, eaten.is_some(), rng);

        if self.food.is_none() {
            self.place_food(rng);
        }

        Moved { new_head, old_tail, eaten }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// `None` outside the board.
    pub fn grid_value(&self, pos: Position) -> Option<Cell> {
        self.grid.get(pos)
    }

    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn current_direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn pending_directions(&self) -> impl Iterator<Item = Direction> + '_ {
        self.snake.pending().iter().copied()
    }

    /// Head first.
    pub fn body_positions(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.snake.body().iter().copied()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.collision.is_some()
    }

    pub fn collision(&self) -> Option<Collision> {
        self.collision
    }

    pub fn food_position(&self) -> Option<Position> {
        self.food
    }

    pub fn rare_food_position(&self) -> Option<Position> {
        self.rare_food.as_ref().and_then(|rare| rare.item()).map(|item| item.position)
    }

    ///////////////////////////////////////////////////////////////////////////

    /// What the head would find at `pos`. The tail counts as empty since it
    /// moves out of the way on the same tick.
    fn resolve(&self, pos: Position) -> Option<Cell> {
        if !self.grid.contains(pos) {
            return None;
        }

        if pos == self.snake.tail() {
            return Some(Cell::Empty);
        }

        self.grid.get(pos)
    }

    fn crash(&mut self, collision: Collision) -> MoveResult {
        self.collision = Some(collision);
        info!("game over ({:?}) with score {}", collision, self.score);
        Crashed(collision)
    }

    fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        match self.grid.random_empty(rng) {
            Some(pos) => {
                self.grid.set(pos, Cell::Food);
                self.food = Some(pos);
                debug!("food placed at {:?}", pos);
            }
            None => debug!("no room left for food"),
        }
    }

    fn update_rare_food<R: Rng + ?Sized>(&mut self, now: Duration, ate: bool, rng: &mut R) {
        let (rare, settings) = match (self.rare_food.as_mut(), self.settings.rare_food.as_ref()) {
            (Some(rare), Some(settings)) => (rare, settings),
            _ => return,
        };

        rare.expire(&mut self.grid, now, settings);

        let check = match settings.check {
            RareFoodCheck::EveryTick => true,
            RareFoodCheck::OnEat => ate,
        };
        if check {
            rare.try_spawn(&mut self.grid, now, settings, rng);
        }
    }
}
