//! Bonus food that appears now and then and vanishes on its own.
//!
//! Two clocks are involved. The spawn gate remembers when the last item
//! appeared and holds back the next roll until the cooldown has passed. Each
//! item also carries its own spawn time, which decides when it expires. The
//! two are independent: a short lifetime does not shorten the cooldown.

use std::time::Duration;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid, Position};
use crate::settings::RareFoodSettings;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RareFood {
    pub position: Position,
    pub spawned_at: Duration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RareFoodState {
    item: Option<RareFood>,
    /// `None` until the first spawn when spawning is allowed right away.
    last_spawn: Option<Duration>,
}

impl RareFoodState {
    pub fn new(settings: &RareFoodSettings) -> Self {
        let last_spawn = if settings.eligible_at_start { None } else { Some(Duration::from_secs(0)) };
        RareFoodState { item: None, last_spawn }
    }

    pub fn item(&self) -> Option<RareFood> {
        self.item
    }

    pub fn last_spawn(&self) -> Option<Duration> {
        self.last_spawn
    }

    /// The snake's head landed on the item. The cell already belongs to the
    /// snake, so only the bookkeeping goes.
    pub fn eaten(&mut self) {
        self.item = None;
    }

    /// Clears the item once it has been on the board for its lifetime.
    pub fn expire(&mut self, grid: &mut Grid, now: Duration, settings: &RareFoodSettings) {
        let item = match self.item {
            Some(item) => item,
            None => return,
        };

        if now.saturating_sub(item.spawned_at) < settings.lifetime {
            return;
        }

        if grid.get(item.position) == Some(Cell::RareFood) {
            grid.set(item.position, Cell::Empty);
        }
        self.item = None;
        debug!("rare food at {:?} expired", item.position);
    }

    /// Rolls for a new item if none is on the board and the cooldown is over.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        now: Duration,
        settings: &RareFoodSettings,
        rng: &mut R,
    ) {
        if self.item.is_some() || !self.cooled_down(now, settings.cooldown) {
            return;
        }

        if !rng.gen_bool(settings.spawn_chance) {
            return;
        }

        if let Some(position) = grid.random_empty(rng) {
            grid.set(position, Cell::RareFood);
            self.item = Some(RareFood { position, spawned_at: now });
            self.last_spawn = Some(now);
            debug!("rare food spawned at {:?}", position);
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn cooled_down(&self, now: Duration, cooldown: Duration) -> bool {
        match self.last_spawn {
            Some(at) => now.saturating_sub(at) >= cooldown,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn always() -> RareFoodSettings {
        RareFoodSettings { spawn_chance: 1.0, ..RareFoodSettings::default() }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn waits_for_cooldown_from_start() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let settings = always();
        let mut rare = RareFoodState::new(&settings);

        rare.try_spawn(&mut grid, secs(14), &settings, &mut rng);
        assert_eq!(rare.item(), None);

        rare.try_spawn(&mut grid, secs(15), &settings, &mut rng);
        let item = rare.item().expect("spawned after cooldown");
        assert_eq!(grid.get(item.position), Some(Cell::RareFood));
        assert_eq!(item.spawned_at, secs(15));
    }

    #[test]
    fn eligible_at_start_spawns_immediately() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let settings = RareFoodSettings { eligible_at_start: true, ..always() };
        let mut rare = RareFoodState::new(&settings);

        rare.try_spawn(&mut grid, secs(0), &settings, &mut rng);
        assert!(rare.item().is_some());
    }

    #[test]
    fn never_spawns_with_zero_chance() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(1);
        let settings = RareFoodSettings { spawn_chance: 0.0, ..always() };
        let mut rare = RareFoodState::new(&settings);

        for s in 0..100 {
            rare.try_spawn(&mut grid, secs(s), &settings, &mut rng);
        }
        assert_eq!(rare.item(), None);
        assert_eq!(grid.positions_of(Cell::RareFood).count(), 0);
    }

    #[test]
    fn expires_after_lifetime() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let settings = always();
        let mut rare = RareFoodState::new(&settings);

        rare.try_spawn(&mut grid, secs(20), &settings, &mut rng);
        let item = rare.item().expect("spawned");

        rare.expire(&mut grid, secs(21), &settings);
        assert_eq!(rare.item(), Some(item));

        rare.expire(&mut grid, secs(22), &settings);
        assert_eq!(rare.item(), None);
        assert_eq!(grid.get(item.position), Some(Cell::Empty));
    }

    #[test]
    fn expiry_leaves_snake_cell_alone() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(3);
        let settings = always();
        let mut rare = RareFoodState::new(&settings);

        rare.try_spawn(&mut grid, secs(15), &settings, &mut rng);
        let item = rare.item().expect("spawned");
        grid.set(item.position, Cell::Snake);

        rare.expire(&mut grid, secs(30), &settings);
        assert_eq!(grid.get(item.position), Some(Cell::Snake));
    }

    #[test]
    fn cooldown_counts_from_last_spawn_not_expiry() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(5);
        let settings = always();
        let mut rare = RareFoodState::new(&settings);

        rare.try_spawn(&mut grid, secs(15), &settings, &mut rng);
        rare.expire(&mut grid, secs(17), &settings);
        assert_eq!(rare.item(), None);

        rare.try_spawn(&mut grid, secs(29), &settings, &mut rng);
        assert_eq!(rare.item(), None);

        rare.try_spawn(&mut grid, secs(30), &settings, &mut rng);
        assert!(rare.item().is_some());
        assert_eq!(rare.last_spawn(), Some(secs(30)));
    }

    #[test]
    fn one_item_at_a_time() {
        let mut grid = Grid::new(5, 5);
        let mut rng = StdRng::seed_from_u64(9);
        let settings = RareFoodSettings {
            cooldown: secs(0),
            lifetime: secs(100),
            ..always()
        };
        let mut rare = RareFoodState::new(&settings);

        for s in 0..10 {
            rare.try_spawn(&mut grid, secs(s), &settings, &mut rng);
        }
        assert_eq!(grid.positions_of(Cell::RareFood).count(), 1);
    }
}
