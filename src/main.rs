mod game;
mod term;

use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use gridsnake::{RareFoodCheck, RareFoodSettings, Settings};
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RareCheck {
    /// Roll for rare food at the end of every tick
    EveryTick,
    /// Roll only on ticks where something was eaten
    OnEat,
}

#[derive(Debug, Parser)]
#[command(version, about = "Snake in the terminal")]
struct Args {
    #[arg(long, default_value_t = 15)]
    rows: usize,
    #[arg(long, default_value_t = 15)]
    columns: usize,
    /// Milliseconds between two moves
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,
    /// Seed for food placement, random when left out
    #[arg(long)]
    seed: Option<u64>,
    /// Play with regular food only
    #[arg(long)]
    no_rare_food: bool,
    #[arg(long, value_enum, default_value_t = RareCheck::EveryTick)]
    rare_check: RareCheck,
    /// Allow rare food before the first cooldown has passed
    #[arg(long)]
    rare_at_start: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let rare_food = if self.no_rare_food {
            None
        } else {
            let check = match self.rare_check {
                RareCheck::EveryTick => RareFoodCheck::EveryTick,
                RareCheck::OnEat => RareFoodCheck::OnEat,
            };
            Some(RareFoodSettings { check, eligible_at_start: self.rare_at_start, ..Default::default() })
        };

        Settings { rows: self.rows, columns: self.columns, rare_food }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let args = Args::parse();
    let settings = args.settings();
    settings.validate()?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("starting with seed {} and {:?}", seed, settings);

    let mut game = game::SnakeGame::new(settings, Duration::from_millis(args.tick_ms), StdRng::seed_from_u64(seed))?;
    game.initialize()?;

    // Returns only on errors, CTRL+C exits from inside the game
    let result = game.run();
    game.shutdown()?;
    result
}
