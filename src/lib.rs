//! Grid snake simulation: a single board advanced one tick at a time.
//!
//! The engine knows nothing about screens, keyboards or timers. Whoever drives
//! it queues turns with [`Engine::request_direction_change`], calls
//! [`Engine::advance`] at a fixed pace and reads the public state back to draw
//! it.

pub mod direction;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rare_food;
pub mod settings;
pub mod snake;

pub use direction::Direction;
pub use engine::{Collision, Engine, Food, MoveResult};
pub use error::EngineError;
pub use grid::{Cell, Grid, Position};
pub use settings::{RareFoodCheck, RareFoodSettings, Settings};
