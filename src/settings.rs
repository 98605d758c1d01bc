use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Length of the snake a fresh engine starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Columns needed to place the starting snake at columns 1..=3 and still
/// leave the wall column free.
pub const MIN_COLUMNS: usize = INITIAL_SNAKE_LENGTH + 1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub rows: usize,
    pub columns: usize,
    /// `None` plays the classic game with regular food only.
    pub rare_food: Option<RareFoodSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { rows: 15, columns: 15, rare_food: Some(RareFoodSettings::default()) }
    }
}

impl Settings {
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Settings { rows, columns, ..Default::default() }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 {
            return Err(EngineError::NoRows);
        }
        if self.columns < MIN_COLUMNS {
            return Err(EngineError::TooNarrow { columns: self.columns, min: MIN_COLUMNS });
        }
        if self.rows > i32::MAX as usize || self.columns > i32::MAX as usize {
            return Err(EngineError::TooLarge { rows: self.rows, columns: self.columns });
        }
        if let Some(rare) = &self.rare_food {
            rare.validate()?;
        }
        Ok(())
    }
}

/// When the rare food spawn roll is made.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RareFoodCheck {
    /// At the end of every tick the snake survives.
    EveryTick,
    /// Only on ticks where the snake ate something.
    OnEat,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RareFoodSettings {
    /// Minimum time between two spawns, counted from the previous spawn.
    pub cooldown: Duration,
    /// How long an item stays on the board, eaten or not.
    pub lifetime: Duration,
    /// Probability of a spawn on each eligible check.
    pub spawn_chance: f64,
    pub check: RareFoodCheck,
    /// Whether the first spawn may happen before a full cooldown has passed
    /// since construction.
    pub eligible_at_start: bool,
}

impl Default for RareFoodSettings {
    fn default() -> Self {
        RareFoodSettings {
            cooldown: Duration::from_secs(15),
            lifetime: Duration::from_secs(2),
            spawn_chance: 0.45,
            check: RareFoodCheck::EveryTick,
            eligible_at_start: false,
        }
    }
}

impl RareFoodSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(EngineError::InvalidSpawnChance(self.spawn_chance));
        }
        if self.lifetime == Duration::from_secs(0) {
            return Err(EngineError::ZeroLifetime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_sizes() {
        assert_eq!(Settings::with_size(0, 15).validate(), Err(EngineError::NoRows));
        assert_eq!(
            Settings::with_size(15, 3).validate(),
            Err(EngineError::TooNarrow { columns: 3, min: 4 })
        );
        assert_eq!(Settings::with_size(1, 4).validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_rare_food() {
        let mut settings = Settings::default();
        if let Some(rare) = settings.rare_food.as_mut() {
            rare.spawn_chance = 1.5;
        }
        assert_eq!(settings.validate(), Err(EngineError::InvalidSpawnChance(1.5)));

        let mut settings = Settings::default();
        if let Some(rare) = settings.rare_food.as_mut() {
            rare.lifetime = Duration::from_secs(0);
        }
        assert_eq!(settings.validate(), Err(EngineError::ZeroLifetime));
    }

    #[test]
    fn classic_variant_skips_rare_checks() {
        let settings = Settings { rare_food: None, ..Settings::with_size(10, 10) };
        assert_eq!(settings.validate(), Ok(()));
    }
}
