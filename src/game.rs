use std::{cmp::max, thread::sleep, time::{Duration, Instant}};

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::draw::{Canvas, Drawable};
use crate::food::Food;
use crate::grid::{Cell, Field};
use crate::input::{command_for, Command};
use crate::snake::{Direction, Snake};
use crate::term::TermManager;

const INITIAL_DIRECTION: Direction = Direction::Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// Set by the tick that reset the round, until that tick is rendered.
    Resetting,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResetCause {
    BitItself,
    BoardFull,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    Ate,
    Reset(ResetCause),
}

pub struct SnakeGame<R> {
    config: Config,
    field: Field,
    snake: Snake,
    food: Food,
    rng: R,
    state: GameState,
    best_len: usize,
    round: u32,
    // Cells to erase on the next render
    stale: Vec<Cell>,
    // No free cell for the food yet; it is placed after the next move
    food_pending: bool,
    full_redraw: bool,
}

impl<R: Rng> SnakeGame<R> {
    pub fn new(config: Config, rng: R) -> Self {
        let field = config.field();
        let snake = Snake::new(field.center(), INITIAL_DIRECTION);
        let food = Food::new(field.center());

        let mut game = SnakeGame {
            config,
            field,
            snake,
            food,
            rng,
            state: GameState::Running,
            best_len: 1,
            round: 1,
            stale: vec![],
            food_pending: false,
            full_redraw: true,
        };
        game.food_pending = !game.relocate_food();
        game
    }

    pub fn run(&mut self, term: &mut TermManager) -> anyhow::Result<()> {
        info!(width = self.field.width(), height = self.field.height(), "starting round {}", self.round);

        term.draw_borders()?;
        self.render(term);
        term.present()?;
        term.show_status(&self.status_line())?;

        let mut clock = Clock::new(self.config.tick_interval());

        loop {
            clock.tick();

            for key_ev in term.read_key_events_queue()? {
                match command_for(&key_ev) {
                    Some(Command::Quit) => {
                        info!(best = self.best_len, rounds = self.round, "quit");
                        return Ok(());
                    }
                    Some(Command::Turn(dir)) => {
                        if !self.snake.request_direction(dir) {
                            debug!(?dir, current = ?self.snake.get_direction(), "ignored reversal");
                        }
                    }
                    None => {}
                }
            }

            let outcome = self.step();
            let resetting = self.state == GameState::Resetting;

            self.render(term);
            term.present()?;

            if resetting || outcome == TickOutcome::Ate {
                term.show_status(&self.status_line())?;
            }
        }
    }

    /// One update: apply the buffered heading, move, eat, then check for a
    /// self-collision.
    pub fn step(&mut self) -> TickOutcome {
        self.snake.apply_pending_direction();
        let step = self.snake.advance(&self.field);
        self.stale.extend_from_slice(&step.vacated);

        if self.food_pending {
            self.food_pending = !self.relocate_food();
        }

        let mut outcome = TickOutcome::Moved;

        if !self.food_pending && step.new_head == self.food.cell() {
            self.snake.grow();
            self.best_len = max(self.best_len, self.snake.target_len());

            if !self.relocate_food() {
                warn!(len = self.snake.target_len(), "no room left for food");
                self.reset(ResetCause::BoardFull);
                return TickOutcome::Reset(ResetCause::BoardFull);
            }

            debug!(x = step.new_head.x, y = step.new_head.y, len = self.snake.target_len(), "ate");
            outcome = TickOutcome::Ate;
        }

        if self.snake.bites_itself() {
            self.reset(ResetCause::BitItself);
            return TickOutcome::Reset(ResetCause::BitItself);
        }

        outcome
    }

    pub fn render<C: Canvas>(&mut self, canvas: &mut C) {
        if self.full_redraw {
            canvas.fill_background();
            self.full_redraw = false;
        }

        for cell in self.stale.drain(..) {
            canvas.clear_cell(cell);
        }
        if let Some(prev) = self.food.previous() {
            canvas.clear_cell(prev);
        }

        self.snake.draw(canvas);
        if !self.food_pending {
            self.food.draw(canvas);
        }

        self.state = GameState::Running;
    }

    pub fn status_line(&self) -> String {
        format!(
            "Length: {}  Best: {}  Round: {}",
            self.snake.target_len(), self.best_len, self.round
        )
    }

    ///////////////////////////////////////////////////////////////////////////

    fn reset(&mut self, cause: ResetCause) {
        let len = self.snake.len();
        let direction = Direction::random(&mut self.rng);

        self.state = GameState::Resetting;
        let vacated = self.snake.reset(self.field.center(), direction, self.config.reset_policy);
        self.stale.extend(vacated);
        // With LengthOnly the old body may still fill the board
        self.food_pending = !self.relocate_food();
        self.round += 1;
        self.full_redraw = true;

        info!(?cause, len, ?direction, food_pending = self.food_pending, "reset, starting round {}", self.round);
    }

    fn relocate_food(&mut self) -> bool {
        let snake = &self.snake;
        self.food
            .relocate(&self.field, |c| snake.contains(c), &mut self.rng, self.config.max_food_attempts)
            .is_some()
    }
}

/// Paces the loop at a fixed rate. A late tick is not caught up.
pub struct Clock {
    interval: Duration,
    next: Instant,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Clock { interval, next: Instant::now() }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.next > now {
            sleep(self.next - now);
            self.next += self.interval;
        } else {
            self.next = now + self.interval;
        }
    }
}
