use std::{process::exit, thread::sleep, time::Duration};

use crate::{Coords, TermInt};
use crate::term::TermManager;

use color_eyre::{eyre::bail, Result};
use crossterm::event::{KeyEvent, KeyModifiers, KeyCode};
use gridsnake::{Cell, Direction::{*, self}, Engine, MoveResult, Position, Settings};
use log::debug;
use rand::rngs::StdRng;

const POLL_INTERVAL_MS: u64 = 5;
const COUNTDOWN_STEP_MS: u64 = 500;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const RARE_FOOD_CHAR: char = '$';
const DEAD_SNAKE_CHAR: char = 'X';

/// Terminal front end. Feeds key presses to the engine, ticks it at a fixed
/// pace and redraws the board after every tick.
pub struct SnakeGame {
    settings: Settings,
    tick: Duration,
    rng: StdRng,
    paused: bool,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(settings: Settings, tick: Duration, rng: StdRng) -> Result<Self> {
        let term = TermManager::new()?;

        let (w, h) = term.get_terminal_size();
        let (need_w, need_h) = (settings.columns + 2, settings.rows + 3);
        if (w as usize) < need_w || (h as usize) < need_h {
            bail!("a {}x{} board needs a {}x{} terminal, this one is {}x{}",
                  settings.rows, settings.columns, need_w, need_h, w, h);
        }

        Ok(SnakeGame { settings, tick, rng, paused: false, term })
    }

    pub fn initialize(&mut self) -> Result<()> {
        self.term.setup()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        self.term.restore()?;
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        self.show_intro()?;

        loop {
            // The main game loop takes care of exiting cleanly on CTRL+C
            self.play()?;
        }
    }

    fn show_intro(&mut self) -> Result<()> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Esc to pause",
            "CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        if is_ctrl_c(&self.term.read_key_blocking()?) {
            self.clean_exit()?;
        }

        self.term.hide_message()?;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut engine = Engine::with_settings(self.settings.clone(), &mut self.rng)?;
        debug!("new {}x{} game, ticking every {:?}", engine.rows(), engine.columns(), self.tick);

        self.term.clear()?;
        self.term.draw_borders(self.board_size())?;
        self.draw(&engine)?;
        self.countdown()?;

        // Simulation time only moves while the game runs, so pausing does not
        // eat into rare food lifetimes.
        let mut clock = Duration::from_secs(0);
        let mut since_tick = Duration::from_secs(0);
        let poll = Duration::from_millis(POLL_INTERVAL_MS);

        loop {
            sleep(poll);

            for key_ev in self.term.read_key_events_queue()? {
                match &key_ev {
                    ev if is_ctrl_c(ev) => self.clean_exit()?,
                    KeyEvent { code: KeyCode::Esc, .. } => self.toggle_pause()?,
                    KeyEvent { code, .. } => {
                        if let Some(turn) = requested_turn(*code, self.paused) {
                            engine.request_direction_change(turn);
                        }
                    }
                }
            }

            if self.paused { continue; }

            since_tick += poll;
            if since_tick < self.tick { continue; }
            since_tick = Duration::from_secs(0);
            clock += self.tick;

            match engine.advance(clock, &mut self.rng) {
                MoveResult::Moved { .. } => self.draw(&engine)?,
                MoveResult::Crashed(_) | MoveResult::Halted => {
                    self.game_over(&engine)?;
                    break;
                }
            }
        }

        // Quit if the user CTRL+C's after the game
        if is_ctrl_c(&self.term.read_key_blocking()?) {
            self.clean_exit()?;
        }
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn clean_exit(&mut self) -> Result<()> {
        self.term.restore()?;
        exit(0);
    }

    fn countdown(&mut self) -> Result<()> {
        for i in (1..=3).rev() {
            let count = i.to_string();
            self.term.show_message(&[count.as_str()])?;
            sleep(Duration::from_millis(COUNTDOWN_STEP_MS));
        }
        self.term.hide_message()?;
        Ok(())
    }

    fn game_over(&mut self, engine: &Engine) -> Result<()> {
        for pos in engine.body_positions() {
            self.term.print_at(to_screen(pos), DEAD_SNAKE_CHAR)?;
        }

        self.term.show_message(&[
            "Game over!",
            &*format!("Score: {}", engine.score()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit."
        ])?;
        Ok(())
    }

    fn draw(&mut self, engine: &Engine) -> Result<()> {
        for (row, cells) in engine.grid().iter_rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let ch = match cell {
                    Cell::Empty => ' ',
                    Cell::Snake => SNAKE_BODY_CHAR,
                    Cell::Food => FOOD_CHAR,
                    Cell::RareFood => RARE_FOOD_CHAR,
                };
                self.term.print_at(to_screen(Position::new(row as i32, col as i32)), ch)?;
            }
        }

        self.term.print_at(to_screen(engine.head_position()), head_char(engine.current_direction()))?;

        let score_line = format!("Score: {}", engine.score());
        self.term.print_str_at((0, self.board_size().1), &score_line)?;
        self.term.flush()?;
        Ok(())
    }

    fn board_size(&self) -> Coords {
        ((self.settings.columns + 2) as TermInt, (self.settings.rows + 2) as TermInt)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or Ctrl+C to quit"])?;
        } else {
            self.term.hide_message()?;
        }

        self.paused = !self.paused;
        Ok(())
    }
}

/// Board cells sit inside the border, one column and one row in.
fn to_screen(pos: Position) -> Coords {
    ((pos.col + 1) as TermInt, (pos.row + 1) as TermInt)
}

/// The turn a key asks for. Keys pressed while paused are dropped so they
/// don't fire all at once on resume.
fn requested_turn(code: KeyCode, paused: bool) -> Option<Direction> {
    if paused {
        return None;
    }

    match code {
        KeyCode::Char('w') | KeyCode::Up => Some(Up),
        KeyCode::Char('a') | KeyCode::Left => Some(Left),
        KeyCode::Char('s') | KeyCode::Down => Some(Down),
        KeyCode::Char('d') | KeyCode::Right => Some(Right),
        _ => None,
    }
}

fn head_char(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
