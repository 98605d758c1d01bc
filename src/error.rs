use thiserror::Error;

/// Reasons an engine cannot be built from a set of settings.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("the grid needs at least one row")]
    NoRows,
    #[error("the grid needs at least {min} columns to fit the starting snake, got {columns}")]
    TooNarrow { columns: usize, min: usize },
    #[error("a {rows}x{columns} grid does not fit in signed 32-bit coordinates")]
    TooLarge { rows: usize, columns: usize },
    #[error("rare food spawn chance must be between 0 and 1, got {0}")]
    InvalidSpawnChance(f64),
    #[error("rare food lifetime must be longer than zero")]
    ZeroLifetime,
}
